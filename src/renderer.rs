use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::GridSize;
use crate::game::{GamePhase, GameSnapshot};
use crate::snake::Position;
use crate::theme::Theme;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{
    render_crash_notice, render_game_over_menu, render_pause_menu, render_start_menu,
};

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_COLUMNS: u16 = 2;
const GLYPH_SEGMENT: &str = "██";
const GLYPH_ITEM: &str = "▐▌";
const GLYPH_EMPTY: &str = " ·";

/// Renders the full game frame from a read-only snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, hud_info: HudInfo<'_>) {
    let theme = hud_info.theme;
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(theme.panel_bg)), area);

    let play_area = render_hud(frame, area, snapshot, &hud_info);
    let board_area = board_rect(play_area, snapshot.bounds);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border).bg(theme.play_bg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_grid(frame, inner, snapshot.bounds, theme);

    if snapshot.phase == GamePhase::Menu {
        render_start_menu(frame, board_area, snapshot.high_score, theme);
        return;
    }

    render_item(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    if let Some(notice) = &snapshot.level_up {
        render_banner(frame, inner, &notice.text, theme);
    }

    match snapshot.phase {
        GamePhase::Paused => render_pause_menu(frame, board_area, theme),
        GamePhase::Respawning => render_crash_notice(
            frame,
            board_area,
            snapshot.lives,
            snapshot.last_death,
            theme,
        ),
        GamePhase::GameOver => {
            if let Some(stats) = snapshot.game_over {
                render_game_over_menu(
                    frame,
                    board_area,
                    stats,
                    snapshot.high_score,
                    snapshot.last_death,
                    theme,
                );
            }
        }
        GamePhase::Menu | GamePhase::Playing => {}
    }
}

/// Centers a bordered board sized for `bounds` inside `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, theme: &Theme) {
    let style = Style::new().fg(theme.grid_line).bg(theme.play_bg);
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            if let Some((column, row)) = cell_to_terminal(inner, bounds, Position { x, y }) {
                buffer.set_string(column, row, GLYPH_EMPTY, style);
            }
        }
    }
}

fn render_item(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, snapshot.bounds, snapshot.item.position) else {
        return;
    };

    let style = Style::new()
        .fg(theme.item_color(snapshot.item.kind))
        .bg(theme.play_bg);
    frame.buffer_mut().set_string(x, y, GLYPH_ITEM, style);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let head_color = snapshot
        .effect_tint
        .map_or(theme.snake_head, |tint| theme.tint_color(tint));

    let buffer = frame.buffer_mut();
    // Draw tail first so the head stays visible when segments overlap.
    for (index, segment) in snapshot.segments.iter().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(head_color)
                .bg(theme.play_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body).bg(theme.play_bg)
        };
        buffer.set_string(x, y, GLYPH_SEGMENT, style);
    }
}

fn render_banner(frame: &mut Frame<'_>, inner: Rect, text: &str, theme: &Theme) {
    let padded = format!(" {text} ");
    let width = u16::try_from(padded.width()).unwrap_or(u16::MAX).min(inner.width);
    let x = inner.x + (inner.width - width) / 2;
    let y = inner.y + inner.height / 3;

    frame.render_widget(
        Paragraph::new(padded).style(
            Style::new()
                .fg(theme.accent)
                .bg(theme.panel_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Rect::new(x, y, width, 1).intersection(inner),
    );
}

fn cell_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.saturating_mul(CELL_COLUMNS);
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
