use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ripple::Command;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    Sim(Command),
    /// Primary button went down at a terminal cell.
    Press { col: u16, row: u16 },
    /// Pointer moved with the primary button held.
    Drag { col: u16, row: u16 },
    Release,
    Quit,
}

/// Drain pending terminal events without blocking the frame.
pub(crate) fn collect_nonblocking() -> anyhow::Result<Vec<Action>> {
    let mut out = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        if let Some(a) = map_event(event::read()?) {
            out.push(a);
            if out.len() >= 64 {
                break;
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event(ev: Event) -> Option<Action> {
    match ev {
        Event::Key(k) => map_key(k),
        Event::Mouse(m) => map_mouse(m),
        _ => None,
    }
}

fn map_key(k: KeyEvent) -> Option<Action> {
    if k.kind != KeyEventKind::Press {
        return None;
    }
    if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Sim(Command::Reset)),
        KeyCode::Char('j') | KeyCode::Char('J') => Some(Action::Sim(Command::Jostle)),
        KeyCode::Char('i') | KeyCode::Char('I') => {
            Some(Action::Sim(Command::ToggleInterference))
        }
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Sim(Command::ToggleAutomatic)),
        _ => None,
    }
}

fn map_mouse(m: MouseEvent) -> Option<Action> {
    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Press {
            col: m.column,
            row: m.row,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::Drag {
            col: m.column,
            row: m.row,
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::Release),
        _ => None,
    }
}
