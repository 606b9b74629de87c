use crate::devices::{
    BatteryMonitor, CameraActuator, EnvironmentSensor, FlightRecorder, IndicatorDriver,
};

/// Struct representing the payload's device complement, providing access to
/// the environment sensor, battery monitor, camera trigger, status indicator
/// and flight recorder behind their capability traits.
///
/// There is exactly one instance, owned by the scheduler; devices are only
/// ever driven from the single control thread.
pub struct PayloadBay {
    /// The environmental sensor producing temperature/pressure/humidity/altitude.
    environment: Box<dyn EnvironmentSensor>,
    /// The battery voltage monitor.
    battery: Box<dyn BatteryMonitor>,
    /// The camera trigger line.
    camera: Box<dyn CameraActuator>,
    /// The status indicator light.
    indicator: Box<dyn IndicatorDriver>,
    /// The persistent record sink, absent when storage was unavailable at start.
    recorder: Option<FlightRecorder>,
}

impl PayloadBay {
    pub fn new(
        environment: Box<dyn EnvironmentSensor>,
        battery: Box<dyn BatteryMonitor>,
        camera: Box<dyn CameraActuator>,
        indicator: Box<dyn IndicatorDriver>,
        recorder: Option<FlightRecorder>,
    ) -> Self {
        Self {
            environment,
            battery,
            camera,
            indicator,
            recorder,
        }
    }

    pub fn environment(&mut self) -> &mut dyn EnvironmentSensor { self.environment.as_mut() }

    pub fn battery(&mut self) -> &mut dyn BatteryMonitor { self.battery.as_mut() }

    pub fn camera(&mut self) -> &mut dyn CameraActuator { self.camera.as_mut() }

    pub fn indicator(&mut self) -> &mut dyn IndicatorDriver { self.indicator.as_mut() }

    pub fn recorder(&mut self) -> Option<&mut FlightRecorder> { self.recorder.as_mut() }

    /// Current camera trigger level, for snapshot assembly.
    pub fn camera_active(&self) -> bool { self.camera.is_active() }

    pub fn records_written(&self) -> u32 {
        self.recorder.as_ref().map_or(0, FlightRecorder::records_written)
    }
}
