use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Side length of one grid cell in logical playfield units.
pub const CELL_SIZE_UNITS: i32 = 25;

/// Logical coordinate of the top-left corner of cell `(0, 0)`.
pub const GRID_ORIGIN_UNITS: (i32, i32) = (50, 50);

/// Playfield width and height in logical units.
pub const PLAYFIELD_SIZE_UNITS: i32 = 500;

/// Standard playfield: 500x500 logical units at 25-unit steps.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: (PLAYFIELD_SIZE_UNITS / CELL_SIZE_UNITS) as u16,
    height: (PLAYFIELD_SIZE_UNITS / CELL_SIZE_UNITS) as u16,
};

/// Cell the snake starts on at game start and after every respawn.
pub const START_POSITION: Position = Position { x: 3, y: 3 };

/// Tick interval at level 1 in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 150;

/// Fastest allowed tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Interval reduction applied per level gained.
pub const LEVEL_TICK_STEP_MS: u64 = 10;

/// Interval reduction while a speed boost is active.
pub const SPEED_BOOST_STEP_MS: u64 = 20;

/// Apples needed for each level-up.
pub const APPLES_PER_LEVEL: u32 = 5;

/// Lives at game start and the cap for extra lives.
pub const MAX_LIVES: u8 = 3;

/// How long ticks are suppressed after a non-fatal crash.
pub const RESPAWN_DELAY_MS: u64 = 1000;

/// How long the level-up notice stays visible.
pub const LEVEL_UP_NOTICE_MS: u64 = 2500;

/// Random draws attempted before falling back to scanning for a free cell.
pub const SPAWN_RETRY_LIMIT: u32 = 100;

pub const GOLDEN_EFFECT_MS: u64 = 10_000;
pub const SPEED_BOOST_EFFECT_MS: u64 = 8_000;
pub const BONUS_EFFECT_MS: u64 = 5_000;

/// Score multiplier granted by a golden apple.
pub const GOLDEN_MULTIPLIER: u32 = 2;

/// Returns the level-appropriate tick interval, ignoring active effects.
#[must_use]
pub fn baseline_tick_interval_ms(level: u32) -> u64 {
    let level_penalty_ms = u64::from(level.saturating_sub(1)).saturating_mul(LEVEL_TICK_STEP_MS);
    BASE_TICK_INTERVAL_MS
        .saturating_sub(level_penalty_ms)
        .max(MIN_TICK_INTERVAL_MS)
}
