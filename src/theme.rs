use clap::ValueEnum;
use ratatui::style::Color;

use crate::effects::EffectKind;
use crate::item::ItemKind;

/// Colour palette applied to every drawn element.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub play_bg: Color,
    pub grid_line: Color,
    pub border: Color,
    pub panel_bg: Color,
    pub text: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub accent: Color,
}

impl Theme {
    /// Apple colour by kind; the same across themes so kinds stay recognisable.
    #[must_use]
    pub fn item_color(&self, kind: ItemKind) -> Color {
        match kind {
            ItemKind::Normal => Color::Rgb(220, 50, 50),
            ItemKind::Golden => Color::Rgb(255, 215, 0),
            ItemKind::SpeedBoost => Color::Rgb(70, 130, 180),
            ItemKind::Bonus => Color::Rgb(50, 180, 50),
        }
    }

    /// Head colour while an effect tint is set.
    #[must_use]
    pub fn tint_color(&self, tint: EffectKind) -> Color {
        match tint {
            EffectKind::ScoreMultiplier => self.item_color(ItemKind::Golden),
            EffectKind::SpeedBoost => self.item_color(ItemKind::SpeedBoost),
            EffectKind::Invincibility => self.item_color(ItemKind::Bonus),
        }
    }
}

pub const THEME_DEFAULT: Theme = Theme {
    name: "Default",
    play_bg: Color::Rgb(240, 240, 240),
    grid_line: Color::Rgb(225, 225, 225),
    border: Color::Rgb(200, 200, 200),
    panel_bg: Color::Rgb(250, 250, 250),
    text: Color::Rgb(60, 60, 60),
    snake_head: Color::Rgb(30, 90, 30),
    snake_body: Color::Rgb(50, 120, 50),
    accent: Color::Rgb(255, 153, 153),
};

pub const THEME_DARK: Theme = Theme {
    name: "Dark",
    play_bg: Color::Rgb(60, 60, 60),
    grid_line: Color::Rgb(75, 75, 75),
    border: Color::Rgb(120, 120, 120),
    panel_bg: Color::Rgb(80, 80, 80),
    text: Color::White,
    snake_head: Color::Rgb(140, 220, 140),
    snake_body: Color::Rgb(100, 180, 100),
    accent: Color::Rgb(220, 80, 80),
};

pub const THEME_NATURE: Theme = Theme {
    name: "Nature",
    play_bg: Color::Rgb(230, 240, 230),
    grid_line: Color::Rgb(215, 228, 215),
    border: Color::Rgb(180, 200, 180),
    panel_bg: Color::Rgb(240, 250, 240),
    text: Color::Rgb(50, 70, 50),
    snake_head: Color::Rgb(55, 105, 40),
    snake_body: Color::Rgb(80, 140, 60),
    accent: Color::Rgb(200, 60, 60),
};

/// Theme names accepted on the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum ThemeChoice {
    #[default]
    Default,
    Dark,
    Nature,
}

impl ThemeChoice {
    #[must_use]
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Default => &THEME_DEFAULT,
            Self::Dark => &THEME_DARK,
            Self::Nature => &THEME_NATURE,
        }
    }
}
