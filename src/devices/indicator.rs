use crate::event;
use async_trait::async_trait;
use std::time::Duration;

/// Declarative blink sequence for the status indicator. Patterns are data;
/// only the driver turns them into timed pin writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    pub count: u32,
    pub on_ms: u64,
    pub off_ms: u64,
}

impl BlinkPattern {
    /// Software up, waiting for launch.
    pub const STARTUP: Self = Self { count: 3, on_ms: 200, off_ms: 200 };
    /// Environment sensor missing at init, mission continues degraded.
    pub const SENSOR_FAULT: Self = Self { count: 10, on_ms: 100, off_ms: 100 };
    /// Stratosphere threshold crossed.
    pub const STRATOSPHERE: Self = Self { count: 20, on_ms: 100, off_ms: 100 };
    /// Camera trigger line raised.
    pub const CAMERA_ON: Self = Self { count: 10, on_ms: 60, off_ms: 60 };
    /// Forced shutdown, last operator-visible sign of life.
    pub const EMERGENCY: Self = Self { count: 50, on_ms: 50, off_ms: 50 };
}

/// Binary status light. `blink` deliberately blocks the single thread of
/// control for the whole pattern; the scheduler's deadline arithmetic absorbs
/// the delay.
#[async_trait]
pub trait IndicatorDriver: Send {
    async fn set(&mut self, on: bool);

    async fn blink(&mut self, pattern: BlinkPattern) {
        for _ in 0..pattern.count {
            self.set(true).await;
            tokio::time::sleep(Duration::from_millis(pattern.on_ms)).await;
            self.set(false).await;
            tokio::time::sleep(Duration::from_millis(pattern.off_ms)).await;
        }
    }
}

/// Simulated indicator pin with a console trace.
#[derive(Default)]
pub struct ConsoleIndicator {
    lit: bool,
}

impl ConsoleIndicator {
    pub fn new() -> Self { Self::default() }

    pub fn lit(&self) -> bool { self.lit }
}

#[async_trait]
impl IndicatorDriver for ConsoleIndicator {
    async fn set(&mut self, on: bool) {
        if on != self.lit {
            self.lit = on;
            event!("Indicator {}", if on { "ON" } else { "OFF" });
        }
    }
}
