/// Trigger-line bookkeeping for the single-use payload camera.
///
/// `activated_at_ms` is recorded exactly once per mission; dropping the line
/// later never clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraTriggerState {
    line_high: bool,
    activated_at_ms: Option<u64>,
}

impl CameraTriggerState {
    pub fn line_high(&self) -> bool { self.line_high }

    pub fn activated_at_ms(&self) -> Option<u64> { self.activated_at_ms }

    pub fn was_triggered(&self) -> bool { self.activated_at_ms.is_some() }

    /// Raises the line and pins the activation timestamp. A second call is a
    /// no-op, the first timestamp wins.
    pub fn activate(&mut self, now_ms: u64) {
        if self.activated_at_ms.is_none() {
            self.line_high = true;
            self.activated_at_ms = Some(now_ms);
        }
    }

    pub fn deactivate(&mut self) { self.line_high = false; }
}
