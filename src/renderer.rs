use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{App, Screen};
use crate::config::{
    GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, PALETTE,
};
use crate::game::{DiscreteState, GameStatus};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::interpolation::RenderPoint;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_difficulty_menu, render_game_over_menu};

/// Renders the full frame from immutable state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let session = &app.session;
    let state = session.discrete_state();
    let label = session.preset().map_or("-", |preset| preset.label.as_str());

    let area = frame.area();
    let play_area = render_hud(frame, area, HudInfo::new(label, &state));
    let field = field_rect(play_area, session.bounds());

    let block = Block::bordered().border_style(Style::new().fg(PALETTE.border));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    match app.screen {
        Screen::Menu { selected } => {
            render_difficulty_menu(frame, play_area, session.presets(), selected);
        }
        Screen::Playing => {
            render_food(frame, inner, session.bounds(), state.food);
            render_snake(
                frame,
                inner,
                session.bounds(),
                &state,
                session.render_positions(),
                session.render_cell_size(),
            );

            if state.status == GameStatus::GameOver {
                render_game_over_menu(frame, play_area, state.score, state.game_over_reason);
            }
        }
    }
}

/// Bordered rectangle sized to the grid, centered in `area`.
fn field_rect(area: Rect, bounds: GridSize) -> Rect {
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(bounds.width.saturating_add(2)),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, field, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(bounds.height.saturating_add(2)),
        Constraint::Fill(1),
    ])
    .areas(column);

    field
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, food: Cell) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(PALETTE.food));
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    state: &DiscreteState,
    points: &[RenderPoint],
    cell_size: f32,
) {
    let last = points.len().saturating_sub(1);
    let buffer = frame.buffer_mut();

    // Tail first so the head is drawn on top when segments overlap.
    for (index, point) in points.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, nearest_cell(*point, cell_size))
        else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(state.direction),
                Style::new()
                    .fg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(PALETTE.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(PALETTE.snake_body))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn nearest_cell(point: RenderPoint, cell_size: f32) -> Cell {
    Cell {
        x: (point.x / cell_size).round() as i32,
        y: (point.y / cell_size).round() as i32,
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !bounds.in_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
