use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::PALETTE;
use crate::difficulty::PresetTable;
use crate::game::GameOverReason;

/// Draws the difficulty selection screen as a centered popup.
pub fn render_difficulty_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    presets: &PresetTable,
    selected: usize,
) {
    let popup = centered_popup(area, 60, 70);
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
                    .fg(PALETTE.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let lines: Vec<Line<'_>> = presets
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            let text = format!("{} ({} ms)", preset.label, preset.tick_interval_ms);
            if index == selected {
                Line::styled(
                    format!("> {text} <"),
                    Style::default()
                        .fg(PALETTE.menu_selected)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(text)
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" select difficulty ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("[Up/Down] Choose  [Enter] Start  [Q] Quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.menu_footer)),
        footer_row,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reason: Option<GameOverReason>,
) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match reason {
            Some(GameOverReason::WallCollision) => "Cause: hit wall",
            Some(GameOverReason::SelfCollision) => "Cause: hit yourself",
            Some(GameOverReason::BoardFull) => "The board is full!",
            None => "",
        }),
        Line::from(""),
        Line::from("[Enter] Play Again"),
        Line::from("[M] Main Menu  [Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
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
