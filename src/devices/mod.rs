use std::fmt;

pub mod battery;
pub mod camera;
pub mod environment;
pub mod indicator;
pub mod recorder;

pub use battery::{BatteryMonitor, SimBattery};
pub use camera::{CameraActuator, SimCamera};
pub use environment::{EnvReading, EnvironmentSensor, SimEnvironment};
pub use indicator::{BlinkPattern, ConsoleIndicator, IndicatorDriver};
pub use recorder::FlightRecorder;

/// Startup failures of a payload device. Sampling itself is best-effort and
/// never errors; only initialization is allowed to fail, and the mission
/// proceeds degraded afterwards.
#[derive(Debug)]
pub enum DeviceError {
    NotDetected(&'static str),
    Io(std::io::Error),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NotDetected(device) => write!(f, "{device} not detected"),
            DeviceError::Io(e) => write!(f, "storage i/o failed: {e}"),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::NotDetected(_) => None,
            DeviceError::Io(e) => Some(e),
        }
    }
}
