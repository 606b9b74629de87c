use super::{FlightMachine, FlightPhase, SensorSnapshot};
use crate::config::MissionConfig;
use crate::devices::environment::altitude_pressure;
use rand::Rng;
use std::time::Duration;

const POLL_MS: u64 = 5000;

fn snap(timestamp_ms: u64, altitude_m: f64) -> SensorSnapshot {
    SensorSnapshot {
        timestamp_ms,
        temperature_c: 15.0 - 0.0065 * altitude_m,
        pressure_hpa: altitude_pressure(altitude_m, 1013.25),
        humidity_pct: 40.0,
        altitude_m,
        battery_v: 8.1,
        camera_active: false,
    }
}

fn machine() -> FlightMachine {
    FlightMachine::new(MissionConfig::default())
}

fn fly(machine: &mut FlightMachine, altitudes: &[f64]) -> Vec<super::FlightCommand> {
    altitudes
        .iter()
        .enumerate()
        .map(|(i, altitude)| {
            let ts = i as u64 * POLL_MS;
            machine.advance(&snap(ts, *altitude), Duration::from_millis(ts))
        })
        .collect()
}

#[test]
fn ascent_burst_descent_scenario() {
    let mut machine = machine();
    let mut phases = Vec::new();
    let commands: Vec<_> = [5000.0, 12_000.0, 18_500.0, 19_000.0, 14_000.0, 10_000.0]
        .iter()
        .enumerate()
        .map(|(i, altitude)| {
            let ts = i as u64 * POLL_MS;
            let command = machine.advance(&snap(ts, *altitude), Duration::from_millis(ts));
            phases.push(machine.session().phase());
            command
        })
        .collect();

    assert_eq!(
        phases,
        vec![
            FlightPhase::Ascending,
            FlightPhase::Ascending,
            FlightPhase::Stratosphere,
            FlightPhase::Stratosphere,
            FlightPhase::Descending,
            FlightPhase::Descending,
        ]
    );
    assert!(commands.iter().all(|c| c.log_snapshot));

    assert!(commands[2].stratosphere_reached);
    assert!(commands[2].camera_on);
    assert_eq!(machine.session().camera().activated_at_ms(), Some(2 * POLL_MS));

    assert!(!commands[3].stratosphere_reached);
    assert!(!commands[3].camera_off());

    assert!(commands[4].descent_started);
    assert!(commands[4].camera_off_descending);
    assert!(!commands[4].camera_off_time_limit);

    assert!(!commands[5].descent_started);
    assert!(!commands[5].camera_off());
    assert!(commands.iter().all(|c| !c.mission_timeout));
}

#[test]
fn phase_never_regresses() {
    let mut rng = rand::rng();
    for _ in 0..50 {
        let altitudes: Vec<f64> =
            (0..120).map(|_| rng.random_range(0.0..40_000.0)).collect();
        let mut machine = machine();
        let mut last = FlightPhase::PreLaunch;
        for (i, altitude) in altitudes.iter().enumerate() {
            let ts = i as u64 * POLL_MS;
            machine.advance(&snap(ts, *altitude), Duration::from_millis(ts));
            let phase = machine.session().phase();
            assert!(phase >= last, "phase regressed from {last} to {phase}");
            last = phase;
        }
    }
}

#[test]
fn stratosphere_announced_once_despite_oscillation() {
    let mut machine = machine();
    let commands = fly(
        &mut machine,
        &[19_000.0, 14_000.0, 19_000.0, 14_000.0, 19_000.0],
    );
    let announcements = commands.iter().filter(|c| c.stratosphere_reached).count();
    assert_eq!(announcements, 1);
    assert_eq!(machine.session().phase(), FlightPhase::Descending);
    // First crossing pinned the activation timestamp for good.
    assert_eq!(machine.session().camera().activated_at_ms(), Some(0));
    assert_eq!(commands.iter().filter(|c| c.camera_on).count(), 1);
}

#[test]
fn descent_milestone_is_edge_triggered() {
    let mut machine = machine();
    let commands = fly(
        &mut machine,
        &[18_500.0, 14_000.0, 13_000.0, 12_000.0, 11_000.0],
    );
    let milestones: Vec<bool> = commands.iter().map(|c| c.descent_started).collect();
    assert_eq!(milestones, vec![false, true, false, false, false]);
}

#[test]
fn camera_shutoff_on_time_limit_independent_of_altitude() {
    let mut machine = machine();
    let mut off_at = None;
    // Altitude stays stratospheric for 301 s worth of polls.
    for i in 0..62_u64 {
        let ts = i * POLL_MS;
        let command = machine.advance(&snap(ts, 18_500.0), Duration::from_millis(ts));
        if command.camera_off() {
            assert!(command.camera_off_time_limit);
            assert!(!command.camera_off_descending);
            assert!(off_at.is_none(), "shutoff must only be commanded once");
            off_at = Some(ts);
        }
    }
    // Activated at t=0, 300 000 ms limit, 5 s cadence.
    assert_eq!(off_at, Some(300_000));
}

#[test]
fn camera_shutoff_reports_both_reasons_together() {
    let mut machine = machine();
    machine.advance(&snap(0, 18_500.0), Duration::from_millis(0));
    // Stay up just below the limit, then sink below threshold exactly as it expires.
    let command = machine.advance(&snap(300_000, 14_000.0), Duration::from_millis(300_000));
    assert!(command.camera_off_time_limit);
    assert!(command.camera_off_descending);
    assert!(command.descent_started);
}

#[test]
fn max_altitude_is_order_independent() {
    let mut rng = rand::rng();
    let altitudes: Vec<f64> = (0..40).map(|_| rng.random_range(0.0..35_000.0)).collect();
    let expected = altitudes.iter().fold(f64::MIN, |a, b| a.max(*b));
    let mut machine = machine();
    fly(&mut machine, &altitudes);
    assert!((machine.session().max_altitude_m() - expected).abs() < f64::EPSILON);
}

#[test]
fn timeout_fires_exactly_once_past_the_limit() {
    let mut machine = machine();
    let at_limit = machine.advance(&snap(14_400_000, 9000.0), Duration::from_millis(14_400_000));
    assert!(!at_limit.mission_timeout, "limit itself is not yet a timeout");
    let past = machine.advance(&snap(14_400_001, 9000.0), Duration::from_millis(14_400_001));
    assert!(past.mission_timeout);
    // A correct caller stops here; the latch keeps a misbehaving one from
    // re-triggering the shutdown sequence.
    let again = machine.advance(&snap(14_500_000, 9000.0), Duration::from_millis(14_500_000));
    assert!(!again.mission_timeout);
}

#[test]
fn every_poll_is_logged_and_counted() {
    let mut machine = machine();
    let commands = fly(&mut machine, &[100.0, 200.0, 300.0]);
    assert!(commands.iter().all(|c| c.log_snapshot));
    assert_eq!(machine.session().record_seq(), 3);
}
