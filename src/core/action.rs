//! # Commands
//!
//! Everything a user can ask the deck to do becomes a `Command`.
//! Right arrow? That's `Command::Next`. Click on a TOC row? `Command::GoTo(i)`.
//!
//! `dispatch()` is the input gate: while a transition is in flight every
//! command is dropped, never queued. Otherwise it forwards to the navigator
//! and returns the resulting event for the render coordinator.
//!
//! ```text
//! Command  →  dispatch()  →  Navigator  →  Option<DeckEvent>
//! ```

use log::debug;

use crate::core::fullscreen::FullscreenProvider;
use crate::core::navigation::{DeckEvent, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    OpenToc,
    CloseToc,
    ToggleToc,
    ToggleFullscreen,
}

pub fn dispatch<C>(
    navigator: &mut Navigator<C>,
    command: Command,
    fullscreen: &mut dyn FullscreenProvider,
) -> Option<DeckEvent> {
    if navigator.is_transitioning() {
        debug!("Dropped {:?}: transition in flight", command);
        return None;
    }

    match command {
        Command::Next => navigator.next(),
        Command::Previous => navigator.previous(),
        Command::First => navigator.first(),
        Command::Last => navigator.last(),
        Command::GoTo(index) => navigator.go_to_index(index),
        Command::OpenToc => navigator.open_toc(),
        Command::CloseToc => navigator.close_toc(),
        Command::ToggleToc => navigator.toggle_toc(),
        Command::ToggleFullscreen => {
            fullscreen.toggle();
            None
        }
    }
}
