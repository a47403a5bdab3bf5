//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::{CliOverrides, DeckConfig, ResolvedConfig, StartupLog, resolve};
use crate::core::coordinator::RenderCoordinator;
use crate::core::deck::Deck;
use crate::core::navigation::{Direction, Navigator};
use crate::core::slide::Slide;

/// A deck of `n` slides titled `S0..S{n-1}` with empty HTML content.
pub fn deck_of(n: usize) -> Deck {
    Deck::from_slides(
        (0..n)
            .map(|i| Slide::new(format!("S{i}"), String::new()))
            .collect(),
    )
}

pub fn navigator_of(n: usize) -> Navigator {
    Navigator::new(deck_of(n))
}

/// Defaults with presenter chrome shown.
pub fn resolved_config() -> ResolvedConfig {
    resolve(
        &DeckConfig::default(),
        &CliOverrides::default(),
        &mut StartupLog::default(),
    )
}

/// Records every callback as a short string, in order.
#[derive(Default)]
pub struct RecordingCoordinator {
    pub calls: Vec<String>,
}

impl RenderCoordinator for RecordingCoordinator {
    fn on_transition_started(&mut self, from: usize, to: usize, direction: Direction) {
        self.calls.push(format!("started {from}->{to} {direction:?}"));
    }

    fn on_navigation_settled(&mut self, current_index: usize) {
        self.calls.push(format!("settled {current_index}"));
    }

    fn on_toc_opened(&mut self) {
        self.calls.push("toc opened".to_string());
    }

    fn on_toc_closed(&mut self) {
        self.calls.push("toc closed".to_string());
    }
}
