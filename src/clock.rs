/// Converts scheduler wall-clock milliseconds into game milliseconds that
/// stand still while the session is paused.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SessionClock {
    paused_at: Option<u64>,
    paused_total_ms: u64,
}

impl SessionClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Game time for the wall-clock reading `now_ms`.
    #[must_use]
    pub fn game_time(&self, now_ms: u64) -> u64 {
        let frozen_or_now = self.paused_at.unwrap_or(now_ms);
        frozen_or_now.saturating_sub(self.paused_total_ms)
    }

    /// Freezes game time at `now_ms`. Repeated calls keep the first freeze.
    pub fn pause(&mut self, now_ms: u64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now_ms);
        }
    }

    /// Resumes game time, excluding the paused span from every later reading.
    pub fn resume(&mut self, now_ms: u64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total_ms = self
                .paused_total_ms
                .saturating_add(now_ms.saturating_sub(paused_at));
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}
