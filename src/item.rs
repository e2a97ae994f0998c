use rand::Rng;

use crate::config::{
    GridSize, BONUS_EFFECT_MS, GOLDEN_EFFECT_MS, SPAWN_RETRY_LIMIT, SPEED_BOOST_EFFECT_MS,
};
use crate::effects::EffectKind;
use crate::snake::Position;

/// Apple varieties, each with its own consequence when eaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ItemKind {
    Normal,
    Golden,
    SpeedBoost,
    Bonus,
}

/// What eating one apple does to the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Consumption {
    /// Points before the score multiplier is applied.
    pub base_points: u32,
    pub growth: usize,
    /// Timed effect granted, with its duration in milliseconds.
    pub effect: Option<(EffectKind, u64)>,
    pub extra_life: bool,
}

impl ItemKind {
    /// Every kind, in draw order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Golden, Self::SpeedBoost, Self::Bonus];

    /// Draw weight in percent; the weights of [`ItemKind::ALL`] sum to 100.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            Self::Normal => 70,
            Self::Golden | Self::SpeedBoost | Self::Bonus => 10,
        }
    }

    #[must_use]
    pub fn consumption(self) -> Consumption {
        match self {
            Self::Normal => Consumption {
                base_points: 10,
                growth: 1,
                effect: None,
                extra_life: false,
            },
            Self::Golden => Consumption {
                base_points: 50,
                growth: 3,
                effect: Some((EffectKind::ScoreMultiplier, GOLDEN_EFFECT_MS)),
                extra_life: false,
            },
            Self::SpeedBoost => Consumption {
                base_points: 10,
                growth: 1,
                effect: Some((EffectKind::SpeedBoost, SPEED_BOOST_EFFECT_MS)),
                extra_life: false,
            },
            Self::Bonus => Consumption {
                base_points: 10,
                growth: 2,
                effect: Some((EffectKind::Invincibility, BONUS_EFFECT_MS)),
                extra_life: true,
            },
        }
    }

    /// Returns true for every kind except [`ItemKind::Normal`].
    #[must_use]
    pub fn is_special(self) -> bool {
        self != Self::Normal
    }

    /// Draws a kind using the 70/10/10/10 weighting.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut roll = rng.gen_range(0..100);
        for kind in Self::ALL {
            if roll < kind.weight() {
                return kind;
            }
            roll -= kind.weight();
        }

        Self::Normal
    }
}

/// The single apple currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Item {
    pub position: Position,
    pub kind: ItemKind,
}

impl Item {
    #[must_use]
    pub fn new(position: Position, kind: ItemKind) -> Self {
        Self { position, kind }
    }

    /// Creates a normal apple at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self::new(position, ItemKind::Normal)
    }

    /// Spawns an apple of a freshly drawn kind away from `forbidden` cells.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, forbidden: &[Position]) -> Self {
        let kind = ItemKind::draw(rng);
        let position = spawn_position(rng, bounds, forbidden);
        log::debug!("spawned {kind:?} apple at ({}, {})", position.x, position.y);

        Self { position, kind }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

/// Picks a cell not listed in `forbidden`.
///
/// Random draws are retried up to [`SPAWN_RETRY_LIMIT`] times; after that the
/// free cells are enumerated and one is picked at random. Only a board with no
/// free cell at all yields an overlapping position.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    forbidden: &[Position],
) -> Position {
    let mut candidate = random_cell(rng, bounds);
    for _ in 1..SPAWN_RETRY_LIMIT {
        if !forbidden.contains(&candidate) {
            return candidate;
        }
        candidate = random_cell(rng, bounds);
    }
    if !forbidden.contains(&candidate) {
        return candidate;
    }

    let mut free = Vec::new();
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !forbidden.contains(&position) {
                free.push(position);
            }
        }
    }

    if free.is_empty() {
        log::debug!("no free cell for apple; accepting overlap");
        return candidate;
    }

    free[rng.gen_range(0..free.len())]
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: rng.gen_range(0..i32::from(bounds.width.max(1))),
        y: rng.gen_range(0..i32::from(bounds.height.max(1))),
    }
}
