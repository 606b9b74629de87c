/// Actuator and logging directives for one poll cycle.
///
/// Emitted by [`FlightMachine::advance`](super::FlightMachine::advance) and
/// executed by the scheduler against fallible hardware. Both camera-off
/// reasons may be set in the same command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightCommand {
    pub log_snapshot: bool,
    pub camera_on: bool,
    pub camera_off_time_limit: bool,
    pub camera_off_descending: bool,
    pub stratosphere_reached: bool,
    pub descent_started: bool,
    pub mission_timeout: bool,
}

impl FlightCommand {
    pub fn camera_off(&self) -> bool { self.camera_off_time_limit || self.camera_off_descending }
}
