//! Grid snake arcade game: tick-driven simulation core plus terminal adapters.

pub mod clock;
pub mod config;
pub mod effects;
pub mod game;
pub mod input;
pub mod item;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
