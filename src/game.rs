use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::SessionClock;
use crate::config::{
    baseline_tick_interval_ms, GridSize, APPLES_PER_LEVEL, DEFAULT_GRID, LEVEL_UP_NOTICE_MS,
    MAX_LIVES, MIN_TICK_INTERVAL_MS, RESPAWN_DELAY_MS, SPEED_BOOST_STEP_MS, START_POSITION,
};
use crate::effects::{ActiveEffect, EffectKind, EffectManager};
use crate::input::{Direction, GameInput};
use crate::item::Item;
use crate::score::HighScoreStore;
use crate::snake::{Position, Snake};

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    /// Ticks are suppressed until the respawn hold runs out.
    Respawning,
    GameOver,
}

/// What cost the player the last life lost.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Final numbers shown on the game-over screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverStats {
    pub score: u32,
    pub level: u32,
    pub apples_eaten: u32,
    pub special_apples_eaten: u32,
    /// Set only when the score beat the stored one and was saved.
    pub new_high_score: bool,
}

/// Level-up banner with the game time it has left on screen.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LevelUpNotice {
    pub text: String,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct LevelUpBanner {
    level: u32,
    shown_at: u64,
}

/// Read-only view of the session handed to renderers.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub bounds: GridSize,
    pub phase: GamePhase,
    pub segments: Vec<Position>,
    pub facing: Direction,
    pub effect_tint: Option<EffectKind>,
    pub item: Item,
    pub score: u32,
    pub high_score: u32,
    pub lives: u8,
    pub level: u32,
    pub multiplier: u32,
    pub apples_eaten: u32,
    pub special_apples_eaten: u32,
    pub active_effects: Vec<ActiveEffect>,
    pub level_up: Option<LevelUpNotice>,
    pub respawn_remaining_ms: Option<u64>,
    pub last_death: Option<DeathReason>,
    pub game_over: Option<GameOverStats>,
    pub tick_interval_ms: u64,
}

/// Complete mutable game state for one session.
///
/// Time enters only through the `now_ms` arguments: a monotonically
/// increasing wall-clock reading in milliseconds supplied by the scheduler.
/// Internally every deadline is kept in pause-excluded game time.
#[derive(Debug)]
pub struct GameState {
    pub snake: Snake,
    pub item: Item,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    pub apples_eaten: u32,
    pub special_apples_eaten: u32,
    pub tick_count: u64,
    pub phase: GamePhase,
    per_level_high_scores: BTreeMap<u32, u32>,
    pending_direction: Option<Direction>,
    effects: EffectManager,
    clock: SessionClock,
    respawn_until: Option<u64>,
    level_up: Option<LevelUpBanner>,
    last_death: Option<DeathReason>,
    game_over: Option<GameOverStats>,
    high_score: u32,
    bounds: GridSize,
    rng: StdRng,
    store: Box<dyn HighScoreStore>,
}

impl GameState {
    /// Creates a session on the standard grid with an entropy-seeded RNG.
    #[must_use]
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        Self::with_rng(DEFAULT_GRID, StdRng::from_entropy(), store)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed), store)
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng, store: Box<dyn HighScoreStore>) -> Self {
        let snake = Snake::new(START_POSITION, Direction::Right);
        let item = Item::spawn(&mut rng, bounds, &snake.positions());
        let high_score = store.read_high_score().unwrap_or_else(|error| {
            log::warn!("high score unavailable, starting from 0: {error}");
            0
        });

        Self {
            snake,
            item,
            score: 0,
            lives: MAX_LIVES,
            level: 1,
            apples_eaten: 0,
            special_apples_eaten: 0,
            tick_count: 0,
            phase: GamePhase::Menu,
            per_level_high_scores: BTreeMap::new(),
            pending_direction: None,
            effects: EffectManager::new(),
            clock: SessionClock::new(),
            respawn_until: None,
            level_up: None,
            last_death: None,
            game_over: None,
            high_score,
            bounds,
            rng,
            store,
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self, now_ms: u64) {
        let now = self.clock.game_time(now_ms);

        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Respawning => {
                self.expire_effects(now);
                if self.respawn_until.is_some_and(|until| now >= until) {
                    self.respawn_until = None;
                    self.phase = GamePhase::Playing;
                }
                return;
            }
            GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver => return,
        }

        self.expire_effects(now);
        self.tick_count += 1;

        let direction = self
            .pending_direction
            .take()
            .unwrap_or_else(|| self.snake.facing());
        let head = self.snake.move_forward(direction);

        if head == self.item.position {
            self.consume_item(now);
        }

        let death = if !head.is_within_bounds(self.bounds) {
            Some(DeathReason::WallCollision)
        } else if self.snake.is_self_colliding() {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = death {
            if !self.effects.is_active(EffectKind::Invincibility) {
                self.lose_life(reason, now);
                return;
            }
        }

        self.expire_effects(now);
    }

    /// Applies one external command. Commands that mean nothing in the
    /// current phase are ignored.
    pub fn apply_input(&mut self, input: GameInput, now_ms: u64) {
        match input {
            GameInput::Direction(direction) => {
                if matches!(
                    self.phase,
                    GamePhase::Playing | GamePhase::Paused | GamePhase::Respawning
                ) {
                    self.pending_direction = Some(direction);
                }
            }
            GameInput::TogglePause => match self.phase {
                GamePhase::Playing => {
                    self.clock.pause(now_ms);
                    self.phase = GamePhase::Paused;
                }
                GamePhase::Paused => {
                    self.clock.resume(now_ms);
                    self.phase = GamePhase::Playing;
                }
                _ => {}
            },
            GameInput::Start => {
                if self.phase == GamePhase::Menu {
                    self.start_session();
                }
            }
            GameInput::Restart => {
                if self.phase == GamePhase::GameOver {
                    self.start_session();
                }
            }
            GameInput::Menu => {
                if self.phase == GamePhase::GameOver {
                    self.phase = GamePhase::Menu;
                }
            }
            GameInput::Quit => {}
        }
    }

    /// Current tick interval: the level baseline, shortened while boosted.
    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        let baseline = baseline_tick_interval_ms(self.level);
        if self.effects.is_active(EffectKind::SpeedBoost) {
            baseline
                .saturating_sub(SPEED_BOOST_STEP_MS)
                .max(MIN_TICK_INTERVAL_MS)
        } else {
            baseline
        }
    }

    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.effects.multiplier()
    }

    #[must_use]
    pub fn is_effect_active(&self, kind: EffectKind) -> bool {
        self.effects.is_active(kind)
    }

    #[must_use]
    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Best stored score, raised only when a new score is saved.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Best score seen while at each level during this session.
    #[must_use]
    pub fn per_level_high_scores(&self) -> &BTreeMap<u32, u32> {
        &self.per_level_high_scores
    }

    #[must_use]
    pub fn last_death(&self) -> Option<DeathReason> {
        self.last_death
    }

    #[must_use]
    pub fn game_over_stats(&self) -> Option<GameOverStats> {
        self.game_over
    }

    /// Level-up banner text and time left, while it is on screen.
    #[must_use]
    pub fn level_up_notice(&self, now_ms: u64) -> Option<LevelUpNotice> {
        let banner = self.level_up?;
        let now = self.clock.game_time(now_ms);
        let elapsed = now.saturating_sub(banner.shown_at);
        if elapsed >= LEVEL_UP_NOTICE_MS {
            return None;
        }

        Some(LevelUpNotice {
            text: format!("Level Up! Now at Level {}", banner.level),
            remaining_ms: LEVEL_UP_NOTICE_MS - elapsed,
        })
    }

    /// Game time left before a respawning snake moves again.
    #[must_use]
    pub fn respawn_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        let until = self.respawn_until?;
        Some(until.saturating_sub(self.clock.game_time(now_ms)))
    }

    /// Captures everything a renderer needs at wall-clock `now_ms`.
    #[must_use]
    pub fn snapshot(&self, now_ms: u64) -> GameSnapshot {
        let now = self.clock.game_time(now_ms);

        GameSnapshot {
            bounds: self.bounds,
            phase: self.phase,
            segments: self.snake.positions(),
            facing: self.snake.facing(),
            effect_tint: self.snake.effect_tint(),
            item: self.item,
            score: self.score,
            high_score: if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                self.high_score
            } else {
                self.high_score.max(self.score)
            },
            lives: self.lives,
            level: self.level,
            multiplier: self.multiplier(),
            apples_eaten: self.apples_eaten,
            special_apples_eaten: self.special_apples_eaten,
            active_effects: self.effects.active(now),
            level_up: self.level_up_notice(now_ms),
            respawn_remaining_ms: self.respawn_remaining_ms(now_ms),
            last_death: self.last_death,
            game_over: self.game_over,
            tick_interval_ms: self.tick_interval_ms(),
        }
    }

    fn start_session(&mut self) {
        self.snake = Snake::new(START_POSITION, Direction::Right);
        self.item = Item::spawn(&mut self.rng, self.bounds, &self.snake.positions());
        self.score = 0;
        self.lives = MAX_LIVES;
        self.level = 1;
        self.apples_eaten = 0;
        self.special_apples_eaten = 0;
        self.tick_count = 0;
        self.per_level_high_scores.clear();
        self.pending_direction = None;
        self.effects.clear();
        self.clock = SessionClock::new();
        self.respawn_until = None;
        self.level_up = None;
        self.last_death = None;
        self.game_over = None;
        self.phase = GamePhase::Playing;

        log::info!("new session started");
    }

    fn consume_item(&mut self, now: u64) {
        let kind = self.item.kind;
        let consumption = kind.consumption();

        self.apples_eaten += 1;
        if kind.is_special() {
            self.special_apples_eaten += 1;
        }

        if let Some((effect, duration_ms)) = consumption.effect {
            self.effects.activate(effect, duration_ms, now);
            self.snake.set_effect_tint(Some(effect));
        }
        if consumption.extra_life {
            self.lives = self.lives.saturating_add(1).min(MAX_LIVES);
        }

        self.snake.grow(consumption.growth);
        self.score = self
            .score
            .saturating_add(consumption.base_points.saturating_mul(self.multiplier()));
        self.record_level_score(self.level);

        self.item = Item::spawn(&mut self.rng, self.bounds, &self.snake.positions());

        if self.apples_eaten % APPLES_PER_LEVEL == 0 {
            self.level_up(now);
        }

        log::debug!(
            "ate {kind:?} apple: score {} apples {}",
            self.score,
            self.apples_eaten
        );
    }

    fn level_up(&mut self, now: u64) {
        self.level += 1;
        self.record_level_score(self.level);
        self.level_up = Some(LevelUpBanner {
            level: self.level,
            shown_at: now,
        });

        log::info!(
            "level up: level {} at score {}, tick interval {}ms",
            self.level,
            self.score,
            self.tick_interval_ms()
        );
    }

    fn record_level_score(&mut self, level: u32) {
        let best = self.per_level_high_scores.entry(level).or_insert(0);
        *best = (*best).max(self.score);
    }

    fn expire_effects(&mut self, now: u64) {
        let expired = self.effects.tick(now);
        for kind in &expired {
            log::debug!("{kind:?} expired");
        }
        if !expired.is_empty() {
            self.refresh_tint();
        }
    }

    /// Keeps the snake tinted by an effect that is still running.
    fn refresh_tint(&mut self) {
        let tint = self
            .snake
            .effect_tint()
            .filter(|kind| self.effects.is_active(*kind))
            .or_else(|| self.effects.active_kinds().last());
        self.snake.set_effect_tint(tint);
    }

    fn lose_life(&mut self, reason: DeathReason, now: u64) {
        self.lives = self.lives.saturating_sub(1);
        self.last_death = Some(reason);

        if self.lives > 0 {
            log::info!("crash ({reason:?}): {} lives left", self.lives);
            let tint = self.snake.effect_tint();
            self.snake = Snake::new(START_POSITION, Direction::Right);
            self.snake.set_effect_tint(tint);
            self.refresh_tint();
            self.pending_direction = None;
            self.item = Item::spawn(&mut self.rng, self.bounds, &self.snake.positions());
            self.respawn_until = Some(now.saturating_add(RESPAWN_DELAY_MS));
            self.phase = GamePhase::Respawning;
            return;
        }

        self.finish_game();
    }

    fn finish_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.respawn_until = None;
        self.level_up = None;

        let stored = self.store.read_high_score().unwrap_or_else(|error| {
            log::warn!("could not read high score, assuming 0: {error}");
            0
        });
        let mut new_high_score = false;
        if self.score > stored {
            match self.store.write_high_score(self.score) {
                Ok(()) => {
                    log::info!("new high score {}", self.score);
                    new_high_score = true;
                }
                Err(error) => log::warn!("failed to save high score: {error}"),
            }
        }
        self.high_score = self.high_score.max(stored);
        if new_high_score {
            self.high_score = self.score;
        }

        self.game_over = Some(GameOverStats {
            score: self.score,
            level: self.level,
            apples_eaten: self.apples_eaten,
            special_apples_eaten: self.special_apples_eaten,
            new_high_score,
        });

        log::info!(
            "game over: score {} level {} apples {} special {}",
            self.score,
            self.level,
            self.apples_eaten,
            self.special_apples_eaten
        );
    }
}
