use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::game::{DeathReason, GameOverStats};
use crate::theme::Theme;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &Theme) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.panel_bg)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Play"),
        Line::from("[Q] Exit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text).bg(theme.panel_bg))
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD move, Esc pauses"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.border).bg(theme.panel_bg)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("Press ESC to continue"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text).bg(theme.panel_bg))
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the life-lost notice shown while the snake respawns.
pub fn render_crash_notice(
    frame: &mut Frame<'_>,
    area: Rect,
    lives: u8,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(format!("Crash! {lives} lives left")),
        Line::from(""),
        Line::from(death_reason_text(death_reason)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.accent).bg(theme.panel_bg))
            .block(Block::bordered().title(" life lost ")),
        popup,
    );
}

/// Draws the game-over screen with final stats as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    stats: GameOverStats,
    high_score: u32,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(game_over_lines(stats, high_score, death_reason))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text).bg(theme.panel_bg))
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn game_over_lines(
    stats: GameOverStats,
    high_score: u32,
    death_reason: Option<DeathReason>,
) -> Vec<Line<'static>> {
    vec![
        Line::from("GAME OVER"),
        Line::from(death_reason_text(death_reason)),
        Line::from(""),
        Line::from(format!("Final Score: {}", stats.score)),
        Line::from(format!("Level Reached: {}", stats.level)),
        Line::from(format!("Apples Eaten: {}", stats.apples_eaten)),
        Line::from(format!("Special Apples: {}", stats.special_apples_eaten)),
        Line::from(format!("High score: {high_score}")),
        Line::from(if stats.new_high_score {
            "New high score!"
        } else {
            ""
        }),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[M] Main Menu   [Q] Quit"),
    ]
}

fn death_reason_text(death_reason: Option<DeathReason>) -> &'static str {
    match death_reason {
        Some(DeathReason::WallCollision) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use crate::game::{DeathReason, GameOverStats};

    use super::game_over_lines;

    #[test]
    fn game_over_lists_final_stats() {
        let lines = game_over_lines(
            GameOverStats {
                score: 340,
                level: 3,
                apples_eaten: 12,
                special_apples_eaten: 4,
                new_high_score: true,
            },
            340,
            Some(DeathReason::SelfCollision),
        );
        let text: Vec<String> = lines.iter().map(ToString::to_string).collect();

        assert!(text.contains(&"Final Score: 340".to_owned()));
        assert!(text.contains(&"Level Reached: 3".to_owned()));
        assert!(text.contains(&"Apples Eaten: 12".to_owned()));
        assert!(text.contains(&"Special Apples: 4".to_owned()));
        assert!(text.contains(&"New high score!".to_owned()));
        assert!(text.contains(&"Cause: hit yourself".to_owned()));
    }
}
