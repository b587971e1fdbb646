//! Grid snake with a fixed-interval simulation, a quick-turn input buffer,
//! and eased render positions decoupled from the tick rate.

pub mod app;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod input_buffer;
pub mod interpolation;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
