use super::DeviceError;
use async_trait::async_trait;
use rand::Rng;
use std::env;
use std::time::Instant;

/// One best-effort reading of the environmental sensor. Altitude is derived
/// from pressure against the configured sea-level reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvReading {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub altitude_m: f64,
}

/// International barometric formula, matching what the sensor silicon itself
/// would report for the given sea-level reference.
pub fn pressure_altitude(pressure_hpa: f64, sea_level_hpa: f64) -> f64 {
    44_330.0 * (1.0 - (pressure_hpa / sea_level_hpa).powf(1.0 / 5.255))
}

/// Inverse of [`pressure_altitude`].
pub fn altitude_pressure(altitude_m: f64, sea_level_hpa: f64) -> f64 {
    sea_level_hpa * (1.0 - altitude_m / 44_330.0).powf(5.255)
}

/// Polled access to the environmental sensor.
///
/// `sample` must always produce a snapshot: on a transient read failure the
/// implementation returns the last good (stale) reading instead of erroring,
/// since the caller has no alternative action anyway.
#[async_trait]
pub trait EnvironmentSensor: Send {
    async fn init(&mut self) -> Result<(), DeviceError>;
    async fn sample(&mut self) -> EnvReading;
}

const ASCENT_RATE_M_S: f64 = 5.3;
const DESCENT_RATE_M_S: f64 = 9.6;
const BURST_ALTITUDE_M: f64 = 31_000.0;
const ISA_LAPSE_C_PER_M: f64 = 0.0065;
const TROPOPAUSE_C: f64 = -56.5;

/// Simulated flight environment: a deterministic ascent/burst/descent
/// profile with sensor noise on top.
///
/// `STRATOS_SIM_SENSOR_FAULT` forces the init failure path for degraded-mode
/// rehearsals; the sensor then serves its zeroed stale reading forever.
pub struct SimEnvironment {
    sea_level_hpa: f64,
    time_scale: f64,
    faulted: bool,
    started: Instant,
    last: EnvReading,
}

impl SimEnvironment {
    pub fn new(sea_level_hpa: f64, time_scale: f64) -> Self {
        Self {
            sea_level_hpa,
            time_scale,
            faulted: env::var("STRATOS_SIM_SENSOR_FAULT").is_ok(),
            started: Instant::now(),
            last: EnvReading::default(),
        }
    }

    fn profile_altitude(&self, flight_secs: f64) -> f64 {
        let ascended = flight_secs * ASCENT_RATE_M_S;
        if ascended < BURST_ALTITUDE_M {
            ascended
        } else {
            let burst_secs = BURST_ALTITUDE_M / ASCENT_RATE_M_S;
            (BURST_ALTITUDE_M - (flight_secs - burst_secs) * DESCENT_RATE_M_S).max(0.0)
        }
    }
}

#[async_trait]
impl EnvironmentSensor for SimEnvironment {
    async fn init(&mut self) -> Result<(), DeviceError> {
        if self.faulted {
            return Err(DeviceError::NotDetected("environment sensor"));
        }
        // Warm the stale-reading cache so even an immediately failing poll
        // has something to serve.
        self.sample().await;
        Ok(())
    }

    async fn sample(&mut self) -> EnvReading {
        if self.faulted {
            return self.last;
        }
        let mut rng = rand::rng();
        let flight_secs = self.started.elapsed().as_secs_f64() * self.time_scale;
        let altitude_m = (self.profile_altitude(flight_secs) + rng.random_range(-12.0..12.0)).max(0.0);
        let reading = EnvReading {
            temperature_c: (15.0 - ISA_LAPSE_C_PER_M * altitude_m).max(TROPOPAUSE_C)
                + rng.random_range(-0.3..0.3),
            pressure_hpa: altitude_pressure(altitude_m, self.sea_level_hpa),
            humidity_pct: (45.0 - altitude_m * 0.0012).clamp(2.0, 95.0)
                + rng.random_range(-1.5..1.5),
            altitude_m,
        };
        self.last = reading;
        reading
    }
}
