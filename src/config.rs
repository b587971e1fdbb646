use ratatui::style::Color;

use crate::grid::{Cell, GridSize};
use crate::input::Direction;

/// Play field width in cells.
pub const GRID_WIDTH: u16 = 30;

/// Play field height in cells.
pub const GRID_HEIGHT: u16 = 20;

/// Default play field.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: GRID_WIDTH,
    height: GRID_HEIGHT,
};

/// Edge length of one cell in render units.
///
/// Render positions are expressed in these units, so a segment sitting on
/// cell `(x, y)` has the target `(x * CELL_SIZE, y * CELL_SIZE)`.
pub const CELL_SIZE: f32 = 20.0;

/// A second, opposite key press within this many milliseconds of the
/// previous one is read as a quick U-turn.
pub const TURN_WINDOW_MS: u64 = 150;

/// Maximum number of pending direction commands.
pub const INPUT_BUFFER_CAPACITY: usize = 2;

/// Frame rate the easing coefficients are tuned against.
pub const ANIMATION_FPS: u32 = 60;

/// Remaining distance below which a render coordinate snaps onto its target.
pub const SNAP_EPSILON: f32 = 0.01;

/// Upper bound for one frame's delta-time ratio (a 10 fps floor at 60 fps).
pub const MAX_FRAME_DELTA: f32 = 6.0;

/// Snake body at the start of every game, head first.
pub const INITIAL_BODY: [Cell; 3] = [Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)];

/// Heading at the start of every game.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// First food cell of every game.
pub const INITIAL_FOOD: Cell = Cell::new(15, 10);

/// Terminal colors used by the presentation layer.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_selected: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    border: Color::Green,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_selected: Color::LightGreen,
    menu_footer: Color::DarkGray,
};

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▓";
pub const GLYPH_FOOD: &str = "●";
