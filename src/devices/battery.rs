use async_trait::async_trait;
use rand::Rng;
use std::time::Instant;

/// Polled battery-voltage reading.
#[async_trait]
pub trait BatteryMonitor: Send {
    async fn voltage(&mut self) -> f64;
}

const FULL_CHARGE_V: f64 = 8.4;
const DISCHARGE_V_PER_H: f64 = 0.35;
const CUTOFF_V: f64 = 6.0;

/// Two-cell pack on a linear discharge curve, with measurement noise.
pub struct SimBattery {
    time_scale: f64,
    started: Instant,
}

impl SimBattery {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale,
            started: Instant::now(),
        }
    }
}

#[async_trait]
impl BatteryMonitor for SimBattery {
    async fn voltage(&mut self) -> f64 {
        let mut rng = rand::rng();
        let hours = self.started.elapsed().as_secs_f64() * self.time_scale / 3600.0;
        (FULL_CHARGE_V - hours * DISCHARGE_V_PER_H + rng.random_range(-0.03..0.03)).max(CUTOFF_V)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_pack_reads_near_full_charge() {
        let mut battery = SimBattery::new(1.0);
        let v = battery.voltage().await;
        assert!((8.3..=8.5).contains(&v), "got {v} V");
    }

    #[tokio::test]
    async fn discharge_never_drops_below_cutoff() {
        // A day of simulated flight at extreme acceleration.
        let mut battery = SimBattery::new(1e9);
        let v = battery.voltage().await;
        assert!(v >= CUTOFF_V - 0.05, "got {v} V");
    }
}
