//! Timed gameplay modifiers granted by special apples.
//!
//! Every effect kind has at most one deadline. Activating a kind that is
//! already running replaces its deadline instead of adding to it, so the
//! player never accumulates more than one instance of anything.

use std::collections::BTreeMap;

use crate::config::GOLDEN_MULTIPLIER;

/// Modifier kinds tracked by [`EffectManager`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EffectKind {
    SpeedBoost,
    Invincibility,
    ScoreMultiplier,
}

impl EffectKind {
    /// Short label shown in the HUD while the effect runs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SpeedBoost => "SPEED BOOST!",
            Self::Invincibility => "INVINCIBLE!",
            Self::ScoreMultiplier => "DOUBLE POINTS!",
        }
    }
}

/// An effect that is currently running, with the game time left on it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub remaining_ms: u64,
}

/// Tracks active effects and their expiry deadlines in game milliseconds.
#[derive(Debug, Clone, Default)]
pub struct EffectManager {
    deadlines: BTreeMap<EffectKind, u64>,
}

impl EffectManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `kind`, or restarts it if already running, ending at
    /// `now_ms + duration_ms`.
    pub fn activate(&mut self, kind: EffectKind, duration_ms: u64, now_ms: u64) {
        let _ = self
            .deadlines
            .insert(kind, now_ms.saturating_add(duration_ms));
    }

    /// Deactivates every effect whose deadline is at or before `now_ms` and
    /// returns the expired kinds in a stable order.
    pub fn tick(&mut self, now_ms: u64) -> Vec<EffectKind> {
        let expired: Vec<EffectKind> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now_ms)
            .map(|(kind, _)| *kind)
            .collect();

        for kind in &expired {
            let _ = self.deadlines.remove(kind);
        }

        expired
    }

    #[must_use]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    #[must_use]
    pub fn deadline(&self, kind: EffectKind) -> Option<u64> {
        self.deadlines.get(&kind).copied()
    }

    /// Game time left on `kind`, or `None` when it is not running.
    #[must_use]
    pub fn remaining_ms(&self, kind: EffectKind, now_ms: u64) -> Option<u64> {
        self.deadline(kind)
            .map(|deadline| deadline.saturating_sub(now_ms))
    }

    /// Current score multiplier; never more than the golden apple's ×2.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        if self.is_active(EffectKind::ScoreMultiplier) {
            GOLDEN_MULTIPLIER
        } else {
            1
        }
    }

    /// Lists running effects with their remaining time.
    #[must_use]
    pub fn active(&self, now_ms: u64) -> Vec<ActiveEffect> {
        self.deadlines
            .iter()
            .map(|(kind, deadline)| ActiveEffect {
                kind: *kind,
                remaining_ms: deadline.saturating_sub(now_ms),
            })
            .collect()
    }

    /// Running effect kinds in stable order.
    pub fn active_kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.deadlines.keys().copied()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{EffectKind, EffectManager};

    #[test]
    fn effect_expires_at_its_deadline() {
        let mut effects = EffectManager::new();
        effects.activate(EffectKind::Invincibility, 5000, 1000);

        assert!(effects.tick(5999).is_empty());
        assert!(effects.is_active(EffectKind::Invincibility));

        assert_eq!(effects.tick(6000), vec![EffectKind::Invincibility]);
        assert!(!effects.is_active(EffectKind::Invincibility));
    }

    #[test]
    fn reactivation_resets_deadline_without_stacking() {
        let mut effects = EffectManager::new();
        effects.activate(EffectKind::ScoreMultiplier, 10_000, 0);
        effects.activate(EffectKind::ScoreMultiplier, 10_000, 4_000);

        assert_eq!(effects.deadline(EffectKind::ScoreMultiplier), Some(14_000));
        assert_eq!(effects.multiplier(), 2);

        assert!(effects.tick(10_000).is_empty());
        assert_eq!(effects.multiplier(), 2);

        assert_eq!(effects.tick(14_000), vec![EffectKind::ScoreMultiplier]);
        assert_eq!(effects.multiplier(), 1);
    }

    #[test]
    fn effects_expire_independently() {
        let mut effects = EffectManager::new();
        effects.activate(EffectKind::SpeedBoost, 8_000, 0);
        effects.activate(EffectKind::Invincibility, 5_000, 0);

        assert_eq!(effects.tick(5_000), vec![EffectKind::Invincibility]);
        assert!(effects.is_active(EffectKind::SpeedBoost));
        assert_eq!(effects.remaining_ms(EffectKind::SpeedBoost, 5_000), Some(3_000));

        assert_eq!(effects.tick(8_000), vec![EffectKind::SpeedBoost]);
        assert!(effects.active(8_000).is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut effects = EffectManager::new();
        effects.activate(EffectKind::SpeedBoost, 8_000, 0);
        effects.activate(EffectKind::ScoreMultiplier, 10_000, 0);

        effects.clear();

        assert!(!effects.is_active(EffectKind::SpeedBoost));
        assert_eq!(effects.multiplier(), 1);
        assert_eq!(effects.remaining_ms(EffectKind::SpeedBoost, 0), None);
    }
}
