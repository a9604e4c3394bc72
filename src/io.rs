use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::events::AppEvent;
use crate::events::Event;
use crate::events::PointerEvent;
use crate::events::RunEvent;
use crate::events::SeedEvent;

/// One line summary of the key bindings, for the status bar
pub const KEYS_HELP: &str =
    "space run/stop, n step, r reset, t random/empty, +/- seed %, drag to draw, q quit";

/// Converts a crossterm event into a torus-life event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event),
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    // some terminals report releases too
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } => Some(Event::AppEvent(AppEvent::Exit)),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Some(Event::RunEvent(RunEvent::Toggle)),
        KeyEvent {
            code: KeyCode::Char('s'),
            ..
        } => Some(Event::RunEvent(RunEvent::Start)),
        KeyEvent {
            code: KeyCode::Char('p'),
            ..
        } => Some(Event::RunEvent(RunEvent::Stop)),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => Some(Event::RunEvent(RunEvent::Step)),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Some(Event::RunEvent(RunEvent::Reset)),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Some(Event::SeedEvent(SeedEvent::Increase)),
        KeyEvent {
            code: KeyCode::Char('-' | '_'),
            ..
        } => Some(Event::SeedEvent(SeedEvent::Decrease)),
        KeyEvent {
            code: KeyCode::Char('t'),
            ..
        } => Some(Event::SeedEvent(SeedEvent::ToggleRandomize)),
        _ => None,
    }
}

fn convert_mouse(mouse_event: MouseEvent) -> Option<Event> {
    let MouseEvent {
        kind, column, row, ..
    } = mouse_event;

    let pointer = match kind {
        MouseEventKind::Down(MouseButton::Left) => PointerEvent::Press { column, row },
        MouseEventKind::Drag(MouseButton::Left) => PointerEvent::Drag { column, row },
        MouseEventKind::Up(MouseButton::Left) => PointerEvent::Release,
        _ => return None,
    };

    Some(Event::PointerEvent(pointer))
}
