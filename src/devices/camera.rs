use crate::event;
use async_trait::async_trait;

/// Binary camera trigger line. Commanding the level it already holds is a
/// no-op, so shutoff commands are idempotent.
#[async_trait]
pub trait CameraActuator: Send {
    async fn set_trigger(&mut self, high: bool);
    fn is_active(&self) -> bool;
}

/// Simulated trigger pin that counts real line transitions.
#[derive(Default)]
pub struct SimCamera {
    line_high: bool,
    transitions: u32,
}

impl SimCamera {
    pub fn new() -> Self { Self::default() }

    pub fn transitions(&self) -> u32 { self.transitions }
}

#[async_trait]
impl CameraActuator for SimCamera {
    async fn set_trigger(&mut self, high: bool) {
        if high == self.line_high {
            return;
        }
        self.line_high = high;
        self.transitions += 1;
        event!("Camera trigger line {}", if high { "HIGH" } else { "LOW" });
    }

    fn is_active(&self) -> bool { self.line_high }
}
