//! Terminal input → `TuiEvent`, and the key binding table.
//!
//! The binding table is presenter configuration, not engine logic: it maps a
//! physical key to a [`Command`] (or a presenter-local intent such as moving
//! the TOC highlight). The engine only ever sees commands.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::core::action::Command;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Right,
    Left,
    Up,
    Down,
    Enter,
    Space,
    Escape,
    Home,
    End,
    Char(char),
    /// Left mouse button pressed at (column, row).
    Click(u16, u16),
    Resize,
    /// Ctrl+C: always quits.
    ForceQuit,
}

/// What a key means in the current presenter context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Command(Command),
    Quit,
}

/// Default binding table.
///
/// | keys                | command          |
/// |---------------------|------------------|
/// | Right, Enter, Space | next             |
/// | Left                | previous         |
/// | Down                | open TOC         |
/// | Up, Esc             | close TOC        |
/// | f                   | toggle fullscreen|
/// | Home / End          | first / last     |
/// | t                   | toggle TOC       |
/// | q, Ctrl+C           | quit             |
pub fn binding_for(event: &TuiEvent) -> Option<Binding> {
    let command = match event {
        TuiEvent::Right | TuiEvent::Enter | TuiEvent::Space => Command::Next,
        TuiEvent::Left => Command::Previous,
        TuiEvent::Down => Command::OpenToc,
        TuiEvent::Up | TuiEvent::Escape => Command::CloseToc,
        TuiEvent::Home => Command::First,
        TuiEvent::End => Command::Last,
        TuiEvent::Char('f') => Command::ToggleFullscreen,
        TuiEvent::Char('t') => Command::ToggleToc,
        TuiEvent::Char('l') => Command::Next,
        TuiEvent::Char('h') => Command::Previous,
        TuiEvent::Char('q') | TuiEvent::ForceQuit => return Some(Binding::Quit),
        _ => return None,
    };
    Some(Binding::Command(command))
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {e}");
            return None;
        }
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            log::warn!("Event read failed: {e}");
            None
        }
    }
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Right) => Some(TuiEvent::Right),
                (_, KeyCode::Left) => Some(TuiEvent::Left),
                (_, KeyCode::Up) => Some(TuiEvent::Up),
                (_, KeyCode::Down) => Some(TuiEvent::Down),
                (_, KeyCode::Enter) => Some(TuiEvent::Enter),
                (_, KeyCode::Char(' ')) => Some(TuiEvent::Space),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Home) => Some(TuiEvent::Home),
                (_, KeyCode::End) => Some(TuiEvent::End),
                (_, KeyCode::Char(c)) => Some(TuiEvent::Char(c)),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::Click(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn next_keys() {
        for ev in [TuiEvent::Right, TuiEvent::Enter, TuiEvent::Space] {
            assert_eq!(binding_for(&ev), Some(Binding::Command(Command::Next)));
        }
    }

    #[test]
    fn toc_keys() {
        assert_eq!(
            binding_for(&TuiEvent::Down),
            Some(Binding::Command(Command::OpenToc))
        );
        assert_eq!(
            binding_for(&TuiEvent::Up),
            Some(Binding::Command(Command::CloseToc))
        );
        assert_eq!(
            binding_for(&TuiEvent::Escape),
            Some(Binding::Command(Command::CloseToc))
        );
    }

    #[test]
    fn quit_and_unbound() {
        assert_eq!(binding_for(&TuiEvent::Char('q')), Some(Binding::Quit));
        assert_eq!(binding_for(&TuiEvent::ForceQuit), Some(Binding::Quit));
        assert_eq!(binding_for(&TuiEvent::Char('z')), None);
        assert_eq!(binding_for(&TuiEvent::Click(0, 0)), None);
    }

    #[test]
    fn translate_keys() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            translate(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(TuiEvent::Space)
        );
        assert_eq!(
            translate(key(KeyCode::Right, KeyModifiers::SHIFT)),
            Some(TuiEvent::Right)
        );
    }

    #[test]
    fn translate_ignores_key_release() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(release), None);
    }

    #[test]
    fn translate_left_click() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(click), Some(TuiEvent::Click(4, 7)));
    }
}
