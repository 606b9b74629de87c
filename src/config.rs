use crate::warn;
use std::env;
use std::time::Duration;

/// Mission parameters, resolved once at process start.
///
/// Every field has a flight-proven default and can be overridden through a
/// `STRATOS_*` environment variable, mainly so bench runs and tests can fly
/// a compressed mission profile. Invalid overrides are reported and ignored.
#[derive(Debug, Clone)]
pub struct MissionConfig {
    /// Altitude above which the payload is considered stratospheric.
    pub stratosphere_threshold_m: f64,
    /// Altitude below which a post-stratosphere payload is considered descending.
    pub descent_threshold_m: f64,
    /// Sea-level reference pressure for the barometric altitude conversion.
    pub sea_level_hpa: f64,
    /// Interval between two sensor polls.
    pub poll_interval: Duration,
    /// Idle sleep of the scheduler between wall-clock checks.
    pub tick: Duration,
    /// How long the camera trigger line stays high after activation.
    pub camera_duration: Duration,
    /// Hard mission limit, after which the payload shuts down for good.
    pub max_flight_duration: Duration,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            stratosphere_threshold_m: 18_000.0,
            descent_threshold_m: 15_000.0,
            sea_level_hpa: 1013.25,
            poll_interval: Duration::from_millis(5000),
            tick: Duration::from_millis(100),
            camera_duration: Duration::from_millis(300_000),
            max_flight_duration: Duration::from_millis(14_400_000),
        }
    }
}

impl MissionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            stratosphere_threshold_m: env_f64("STRATOS_STRATOSPHERE_M", defaults.stratosphere_threshold_m),
            descent_threshold_m: env_f64("STRATOS_DESCENT_M", defaults.descent_threshold_m),
            sea_level_hpa: env_f64("STRATOS_SEA_LEVEL_HPA", defaults.sea_level_hpa),
            poll_interval: env_ms("STRATOS_POLL_MS", defaults.poll_interval),
            tick: defaults.tick,
            camera_duration: env_ms("STRATOS_CAMERA_MS", defaults.camera_duration),
            max_flight_duration: env_ms("STRATOS_MAX_FLIGHT_MS", defaults.max_flight_duration),
        }
    }
}

pub(crate) fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {key}={raw}, keeping {default}");
            default
        }),
        Err(_) => default,
    }
}

fn env_ms(key: &str, default: Duration) -> Duration {
    match env::var(key) {
        Ok(raw) => raw.parse().map_or_else(
            |_| {
                warn!("Ignoring invalid {key}={raw}, keeping {}ms", default.as_millis());
                default
            },
            Duration::from_millis,
        ),
        Err(_) => default,
    }
}
