pub mod app;
pub mod camera;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod rule_set;
pub mod sim;

pub type ScreenSize = u16;
pub type CellOffset = isize;
