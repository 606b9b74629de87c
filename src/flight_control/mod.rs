mod camera_state;
mod flight_command;
mod flight_machine;
mod flight_phase;
mod snapshot;

pub use camera_state::CameraTriggerState;
pub use flight_command::FlightCommand;
pub use flight_machine::{FlightMachine, FlightSession};
pub use flight_phase::FlightPhase;
pub use snapshot::SensorSnapshot;

#[cfg(test)]
mod tests;
