use super::DeviceError;
use crate::event;
use crate::flight_control::SensorSnapshot;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

pub const CSV_HEADER: &str =
    "Timestamp(ms),Temperature(C),Pressure(hPa),Humidity(%),Altitude(m),Battery(V),Camera";

/// Append-only CSV sink for flight records.
///
/// The header goes out once at creation; afterwards every call appends one
/// fixed-schema line and flushes, so a power loss costs at most the record in
/// flight. A failed write is dropped without retry or buffering, the
/// recorder must never stall the scheduler.
pub struct FlightRecorder {
    file: File,
    records: u32,
}

impl FlightRecorder {
    pub async fn create(path: &Path) -> Result<Self, DeviceError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(DeviceError::Io)?;
        file.write_all(format!("{CSV_HEADER}\n").as_bytes()).await.map_err(DeviceError::Io)?;
        file.flush().await.map_err(DeviceError::Io)?;
        Ok(Self { file, records: 0 })
    }

    pub async fn append(&mut self, snapshot: &SensorSnapshot) {
        let line = format_record(snapshot);
        match self.file.write_all(line.as_bytes()).await {
            Ok(()) => {
                let _ = self.file.flush().await;
                self.records += 1;
            }
            Err(e) => event!("Dropped flight record: {e}"),
        }
    }

    pub fn records_written(&self) -> u32 { self.records }
}

fn format_record(s: &SensorSnapshot) -> String {
    format!(
        "{},{:.2},{:.2},{:.1},{:.1},{:.2},{}\n",
        s.timestamp_ms,
        s.temperature_c,
        s.pressure_hpa,
        s.humidity_pct,
        s.altitude_m,
        s.battery_v,
        u8::from(s.camera_active),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::env;

    fn scratch_path() -> std::path::PathBuf {
        let tag: u32 = rand::rng().random();
        env::temp_dir().join(format!("stratos-recorder-{}-{tag}.csv", std::process::id()))
    }

    fn snapshot(timestamp_ms: u64, camera_active: bool) -> SensorSnapshot {
        SensorSnapshot {
            timestamp_ms,
            temperature_c: -21.5,
            pressure_hpa: 72.33,
            humidity_pct: 4.0,
            altitude_m: 18_250.7,
            battery_v: 7.91,
            camera_active,
        }
    }

    #[test]
    fn record_matches_fixed_schema() {
        let line = format_record(&snapshot(15_000, true));
        assert_eq!(line, "15000,-21.50,72.33,4.0,18250.7,7.91,1\n");
        let line = format_record(&snapshot(20_000, false));
        assert!(line.ends_with(",0\n"));
    }

    #[tokio::test]
    async fn header_once_then_one_line_per_record() {
        let path = scratch_path();
        let mut recorder = FlightRecorder::create(&path).await.unwrap();
        recorder.append(&snapshot(5000, false)).await;
        recorder.append(&snapshot(10_000, true)).await;
        assert_eq!(recorder.records_written(), 2);

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("5000,"));
        assert!(lines[2].starts_with("10000,"));
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
