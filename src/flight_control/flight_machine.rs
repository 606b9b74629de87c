use super::{CameraTriggerState, FlightCommand, FlightPhase, SensorSnapshot};
use crate::config::MissionConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Everything one mission accumulates: peak altitude, record counter, the
/// current phase and the camera trigger bookkeeping. Created once at process
/// init and owned exclusively by the [`FlightMachine`]; nothing else mutates
/// it.
#[derive(Debug)]
pub struct FlightSession {
    started_at: DateTime<Utc>,
    max_altitude_m: f64,
    record_seq: u32,
    phase: FlightPhase,
    camera: CameraTriggerState,
    timed_out: bool,
}

impl FlightSession {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            max_altitude_m: 0.0,
            record_seq: 0,
            phase: FlightPhase::PreLaunch,
            camera: CameraTriggerState::default(),
            timed_out: false,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> { self.started_at }

    pub fn max_altitude_m(&self) -> f64 { self.max_altitude_m }

    pub fn record_seq(&self) -> u32 { self.record_seq }

    pub fn phase(&self) -> FlightPhase { self.phase }

    pub fn camera(&self) -> &CameraTriggerState { &self.camera }
}

/// The flight state machine. One call per poll cycle, in arrival order, and
/// never again after a timeout command was issued.
///
/// Every decision is a pure function of the session state and the latest
/// snapshot. There is no I/O in here and no failure mode; the machine only
/// emits commands for the scheduler to execute.
pub struct FlightMachine {
    config: MissionConfig,
    session: FlightSession,
}

impl FlightMachine {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            config,
            session: FlightSession::new(),
        }
    }

    pub fn session(&self) -> &FlightSession { &self.session }

    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&mut self, snapshot: &SensorSnapshot, elapsed_since_start: Duration) -> FlightCommand {
        let session = &mut self.session;
        let mut command = FlightCommand {
            log_snapshot: true,
            ..FlightCommand::default()
        };

        if snapshot.altitude_m > session.max_altitude_m {
            session.max_altitude_m = snapshot.altitude_m;
        }

        // Launch is assumed at mission start, so the first snapshot is
        // already in flight.
        if session.phase == FlightPhase::PreLaunch {
            session.phase = FlightPhase::Ascending;
        }

        if session.phase < FlightPhase::Stratosphere
            && snapshot.altitude_m >= self.config.stratosphere_threshold_m
        {
            session.phase = FlightPhase::Stratosphere;
            command.stratosphere_reached = true;
            if !session.camera.was_triggered() {
                session.camera.activate(snapshot.timestamp_ms);
                command.camera_on = true;
            }
        }

        // Edge-triggered: the phase change happens once, so the milestone
        // fires once no matter how long the payload stays below threshold.
        if session.phase == FlightPhase::Stratosphere
            && snapshot.altitude_m < self.config.descent_threshold_m
        {
            session.phase = FlightPhase::Descending;
            command.descent_started = true;
        }

        if session.camera.line_high() {
            if let Some(activated_at) = session.camera.activated_at_ms() {
                let exposure = snapshot.timestamp_ms.saturating_sub(activated_at);
                command.camera_off_time_limit =
                    exposure >= self.config.camera_duration.as_millis() as u64;
                command.camera_off_descending =
                    snapshot.altitude_m < self.config.descent_threshold_m;
                if command.camera_off() {
                    session.camera.deactivate();
                }
            }
        }

        if !session.timed_out && elapsed_since_start > self.config.max_flight_duration {
            session.timed_out = true;
            command.mission_timeout = true;
        }

        session.record_seq += 1;
        command
    }
}
