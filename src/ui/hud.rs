use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;
use crate::game::DiscreteState;

/// Values shown on the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub difficulty: &'a str,
    pub score: u32,
    pub length: usize,
}

impl<'a> HudInfo<'a> {
    #[must_use]
    pub fn new(difficulty: &'a str, state: &DiscreteState) -> Self {
        Self {
            difficulty,
            score: state.score,
            length: state.body.len(),
        }
    }
}

/// Renders the one-line HUD and returns the play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(info, usize::from(hud_area.width))),
        hud_area,
    );

    play_area
}

/// Difficulty on the left, length and score on the right, padded to `width`.
fn hud_line(info: HudInfo<'_>, width: usize) -> Line<'static> {
    let label_style = Style::default().fg(PALETTE.hud_label);
    let value_style = Style::default()
        .fg(PALETTE.hud_value)
        .add_modifier(Modifier::BOLD);

    let left = vec![
        Span::styled(" Difficulty: ", label_style),
        Span::styled(info.difficulty.to_owned(), value_style),
    ];
    let right = vec![
        Span::styled("Length: ", label_style),
        Span::styled(info.length.to_string(), value_style),
        Span::styled("  Score: ", label_style),
        Span::styled(info.score.to_string(), value_style),
        Span::raw(" "),
    ];

    let used: usize = left
        .iter()
        .chain(&right)
        .map(|span| span.content.as_ref().width())
        .sum();
    let padding = width.saturating_sub(used).max(1);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(right);
    Line::from(spans)
}
