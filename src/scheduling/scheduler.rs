use crate::config::MissionConfig;
use crate::devices::BlinkPattern;
use crate::flight_control::{FlightCommand, FlightMachine, SensorSnapshot};
use crate::payload_bay::PayloadBay;
use crate::{event, log, milestone, warn};
use std::time::{Duration, Instant};

/// Terminal mission report, handed to `main` once the loop stops for good.
#[derive(Debug)]
pub struct MissionEnd {
    pub max_altitude_m: f64,
    pub duration: Duration,
    pub records_written: u32,
}

/// The polling driver. Owns the payload bay and the flight state machine,
/// wakes on a short tick to stay close to the wall clock, and fires one full
/// poll cycle per interval boundary.
///
/// Poll deadlines advance by `next_poll += interval`, so time spent inside
/// blocking blink sequences does not accumulate as drift.
pub struct Scheduler {
    config: MissionConfig,
    bay: PayloadBay,
    machine: FlightMachine,
}

impl Scheduler {
    pub fn new(config: MissionConfig, bay: PayloadBay) -> Self {
        let machine = FlightMachine::new(config.clone());
        Self {
            config,
            bay,
            machine,
        }
    }

    /// Runs the mission to its terminal state. Returns only after the flight
    /// state machine has signalled timeout and the shutdown sequence ran.
    pub async fn run(mut self) -> MissionEnd {
        let start = Instant::now();
        let mut next_poll = start;
        loop {
            if Instant::now() >= next_poll {
                next_poll += self.config.poll_interval;
                if let Some(end) = self.cycle(start).await {
                    return end;
                }
            }
            tokio::time::sleep(self.config.tick).await;
        }
    }

    async fn cycle(&mut self, start: Instant) -> Option<MissionEnd> {
        let snapshot = self.take_snapshot(start).await;
        let command = self.machine.advance(&snapshot, start.elapsed());
        self.execute(&snapshot, command).await;
        if command.mission_timeout {
            return Some(self.shutdown(start).await);
        }
        None
    }

    async fn take_snapshot(&mut self, start: Instant) -> SensorSnapshot {
        let camera_active = self.bay.camera_active();
        let env = self.bay.environment().sample().await;
        let battery_v = self.bay.battery().voltage().await;
        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ms = start.elapsed().as_millis() as u64;
        SensorSnapshot {
            timestamp_ms,
            temperature_c: env.temperature_c,
            pressure_hpa: env.pressure_hpa,
            humidity_pct: env.humidity_pct,
            altitude_m: env.altitude_m,
            battery_v,
            camera_active,
        }
    }

    // Execution order is fixed: camera line first, operator signals second,
    // the persisted record last.
    async fn execute(&mut self, snapshot: &SensorSnapshot, command: FlightCommand) {
        if command.camera_on {
            self.bay.camera().set_trigger(true).await;
        }
        if command.camera_off() {
            self.bay.camera().set_trigger(false).await;
        }

        if command.stratosphere_reached {
            milestone!("Stratosphere reached at {:.0} m", snapshot.altitude_m);
            self.bay.indicator().blink(BlinkPattern::STRATOSPHERE).await;
        }
        if command.camera_on {
            milestone!("Camera activated at t+{} ms", snapshot.timestamp_ms);
            self.bay.indicator().blink(BlinkPattern::CAMERA_ON).await;
        }
        if command.camera_off_time_limit {
            milestone!("Camera deactivated: exposure time limit reached");
        }
        if command.camera_off_descending {
            milestone!("Camera deactivated: payload descending");
        }
        if command.descent_started {
            milestone!("Descent detected at {:.0} m", snapshot.altitude_m);
        }

        if command.log_snapshot {
            if let Some(recorder) = self.bay.recorder() {
                recorder.append(snapshot).await;
            }
        }

        let session = self.machine.session();
        log!(
            "[{:04}] {} | {:8.1} m | {:6.1} C | {:7.2} hPa | {:5.1} % | {:.2} V | cam {}",
            session.record_seq(),
            session.phase(),
            snapshot.altitude_m,
            snapshot.temperature_c,
            snapshot.pressure_hpa,
            snapshot.humidity_pct,
            snapshot.battery_v,
            if snapshot.camera_active { "on" } else { "off" },
        );
        event!(
            "max altitude {:.1} m, elapsed {} s",
            session.max_altitude_m(),
            snapshot.timestamp_ms / 1000
        );
    }

    /// One final forced snapshot and record, camera off, terminal alert. The
    /// state machine is never advanced again after this.
    async fn shutdown(&mut self, start: Instant) -> MissionEnd {
        warn!("Maximum flight time exceeded, forcing mission end");
        let snapshot = self.take_snapshot(start).await;
        if let Some(recorder) = self.bay.recorder() {
            recorder.append(&snapshot).await;
        }
        self.bay.camera().set_trigger(false).await;
        self.bay.indicator().blink(BlinkPattern::EMERGENCY).await;
        MissionEnd {
            max_altitude_m: self.machine.session().max_altitude_m(),
            duration: start.elapsed(),
            records_written: self.bay.records_written(),
        }
    }
}
