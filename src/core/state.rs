//! # Application State
//!
//! The one owned context for a presentation session. Nothing here is global:
//! the presenter constructs an `App` and hands it to the dispatcher and the
//! render coordinator explicitly.
//!
//! ```text
//! App
//! ├── navigator: Navigator<C>           // deck + position + gate + toc flag
//! ├── fullscreen: Box<dyn Fullscreen..> // resolved once at startup
//! ├── source: String                    // where the document came from
//! └── load_error: Option<String>        // CompileFailure shown as placeholder
//! ```

use log::warn;

use crate::core::action::{Command, dispatch};
use crate::core::deck::Deck;
use crate::core::fullscreen::FullscreenProvider;
use crate::core::navigation::{DeckEvent, Navigator};
use crate::core::source::CompileFailure;

pub struct App<C = String> {
    pub navigator: Navigator<C>,
    pub fullscreen: Box<dyn FullscreenProvider>,
    pub source: String,
    /// Set when the document could not be loaded; the deck is then empty.
    pub load_error: Option<String>,
}

impl<C> App<C> {
    pub fn new(
        loaded: Result<Deck<C>, CompileFailure>,
        source: String,
        fullscreen: Box<dyn FullscreenProvider>,
    ) -> Self {
        let (deck, load_error) = match loaded {
            Ok(deck) => (deck, None),
            Err(e) => {
                warn!("Presenting empty deck: {e}");
                (Deck::new(), Some(e.to_string()))
            }
        };
        Self {
            navigator: Navigator::new(deck),
            fullscreen,
            source,
            load_error,
        }
    }

    /// Run a command through the input gate.
    pub fn dispatch(&mut self, command: Command) -> Option<DeckEvent> {
        dispatch(&mut self.navigator, command, self.fullscreen.as_mut())
    }

    pub fn status_line(&self) -> String {
        let deck = self.navigator.deck();
        if deck.is_empty() {
            return "no content".to_string();
        }
        format!(
            "{} / {}",
            self.navigator.current_index() + 1,
            deck.len()
        )
    }
}
