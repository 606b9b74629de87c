/// One immutable bundle of sensor readings taken at a single poll instant.
///
/// Timestamps are monotonic milliseconds since mission start, so they are
/// immune to wall-clock adjustments and line up with the persisted record
/// format.
#[derive(Debug, Clone, Copy)]
pub struct SensorSnapshot {
    pub timestamp_ms: u64,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub altitude_m: f64,
    pub battery_v: f64,
    pub camera_active: bool,
}
