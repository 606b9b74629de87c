#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod devices;
mod flight_control;
mod logger;
mod payload_bay;
mod scheduling;

use crate::config::MissionConfig;
use crate::devices::{
    BlinkPattern, ConsoleIndicator, EnvironmentSensor, FlightRecorder, IndicatorDriver,
    SimBattery, SimCamera, SimEnvironment,
};
use crate::payload_bay::PayloadBay;
use crate::scheduling::Scheduler;
use std::path::Path;
use std::time::Duration;
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mission_config = MissionConfig::from_env();
    info!(
        "Stratos on-board software up, stratosphere at {:.0} m, descent below {:.0} m",
        mission_config.stratosphere_threshold_m, mission_config.descent_threshold_m
    );
    let bay = init(&mission_config).await;
    let end = Scheduler::new(mission_config, bay).run().await;
    info!(
        "Mission over: max altitude {:.1} m, {} records, {} min aloft",
        end.max_altitude_m,
        end.records_written,
        end.duration.as_secs() / 60
    );
    enter_low_power().await
}

async fn init(mission_config: &MissionConfig) -> PayloadBay {
    let time_scale = config::env_f64("STRATOS_SIM_TIME_SCALE", 1.0);
    let mut indicator = ConsoleIndicator::new();
    indicator.blink(BlinkPattern::STARTUP).await;

    let mut environment = SimEnvironment::new(mission_config.sea_level_hpa, time_scale);
    if let Err(e) = environment.init().await {
        error!("Environment sensor init failed ({e}), proceeding degraded");
        indicator.blink(BlinkPattern::SENSOR_FAULT).await;
    }

    let log_path_var = env::var("STRATOS_LOG_PATH");
    let log_path = log_path_var.as_ref().map_or("flight_log.csv", |v| v.as_str());
    let recorder = match FlightRecorder::create(Path::new(log_path)).await {
        Ok(recorder) => {
            info!("Flight log at {log_path}");
            Some(recorder)
        }
        Err(e) => {
            warn!("Storage unavailable ({e}), this mission will not be logged");
            None
        }
    };

    PayloadBay::new(
        Box::new(environment),
        Box::new(SimBattery::new(time_scale)),
        Box::new(SimCamera::new()),
        Box::new(indicator),
        recorder,
    )
}

/// Terminal low-power state. Nothing short of a power cycle gets the payload
/// out of here.
async fn enter_low_power() {
    warn!("Entering low-power sleep, reset required to resume");
    loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}
