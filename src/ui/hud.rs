use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::MAX_LIVES;
use crate::effects::ActiveEffect;
use crate::game::GameSnapshot;
use crate::theme::Theme;

const HUD_MARGIN_X: u16 = 1;
const GLYPH_LIFE: &str = "♥";
const GLYPH_LOST_LIFE: &str = "♡";

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
}

/// Renders the two-line HUD below the board and returns the area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, stats_area, effects_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let stats_area = inset_horizontal(stats_area, HUD_MARGIN_X);
    let effects_area = inset_horizontal(effects_area, HUD_MARGIN_X);

    frame.render_widget(
        Paragraph::new(stats_line(snapshot, info.theme))
            .alignment(Alignment::Left)
            .style(Style::default().bg(info.theme.panel_bg)),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(effects_line(&snapshot.active_effects, info.theme))
            .alignment(Alignment::Center)
            .style(Style::default().bg(info.theme.panel_bg)),
        effects_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn stats_line(snapshot: &GameSnapshot, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.text);
    let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let sep = Span::styled(" │ ", Style::default().fg(theme.border));

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(snapshot.score.to_string(), value),
        sep.clone(),
        Span::styled("Level: ", label),
        Span::styled(snapshot.level.to_string(), value),
        sep.clone(),
        Span::styled("Lives: ", label),
        Span::styled(lives_glyphs(snapshot.lives), Style::default().fg(theme.accent)),
        sep.clone(),
        Span::styled("Multiplier: ", label),
        Span::styled(format!("x{}", snapshot.multiplier), value),
        sep,
        Span::styled("Hi: ", label),
        Span::styled(snapshot.high_score.to_string(), value),
    ])
}

fn lives_glyphs(lives: u8) -> String {
    let kept = usize::from(lives.min(MAX_LIVES));
    let lost = usize::from(MAX_LIVES) - kept;
    format!("{}{}", GLYPH_LIFE.repeat(kept), GLYPH_LOST_LIFE.repeat(lost))
}

fn effects_line(effects: &[ActiveEffect], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for effect in effects {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!(
                "{} {:.1}s",
                effect.kind.label(),
                effect.remaining_ms as f64 / 1000.0
            ),
            Style::default()
                .fg(theme.tint_color(effect.kind))
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crate::effects::{ActiveEffect, EffectKind};
    use crate::theme::THEME_DEFAULT;

    use super::{effects_line, lives_glyphs};

    #[test]
    fn lives_render_as_kept_and_lost_hearts() {
        assert_eq!(lives_glyphs(3), "♥♥♥");
        assert_eq!(lives_glyphs(1), "♥♡♡");
        assert_eq!(lives_glyphs(0), "♡♡♡");
    }

    #[test]
    fn effects_line_lists_each_running_effect() {
        let line = effects_line(
            &[
                ActiveEffect {
                    kind: EffectKind::SpeedBoost,
                    remaining_ms: 7_500,
                },
                ActiveEffect {
                    kind: EffectKind::Invincibility,
                    remaining_ms: 1_000,
                },
            ],
            &THEME_DEFAULT,
        );

        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "SPEED BOOST! 7.5s  INVINCIBLE! 1.0s");
    }

    #[test]
    fn no_effects_renders_empty_line() {
        assert!(effects_line(&[], &THEME_DEFAULT).spans.is_empty());
    }
}
