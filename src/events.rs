use crate::ScreenSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RunEvent(RunEvent),
    SeedEvent(SeedEvent),
    PointerEvent(PointerEvent),
    AppEvent(AppEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    Start,
    Stop,

    /// Start if stopped, stop if running
    Toggle,

    /// Advance a single generation
    Step,

    /// Start over with a fresh grid
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedEvent {
    /// Raise the seed percentage
    Increase,

    /// Lower the seed percentage
    Decrease,

    /// Whether a reset seeds the grid or leaves it empty
    ToggleRandomize,
}

/// Pointer positions are in terminal characters, relative to the top left of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { column: ScreenSize, row: ScreenSize },
    Drag { column: ScreenSize, row: ScreenSize },
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Resize { cols: ScreenSize, rows: ScreenSize },

    /// Exit the application
    Exit,
}
