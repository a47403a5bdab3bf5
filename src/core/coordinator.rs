//! # Render Coordinator contract
//!
//! The presentation layer implements [`RenderCoordinator`] to project engine
//! state into visuals. For every `TransitionStarted` it receives, it must call
//! [`Navigator::settle_transition`](crate::core::navigation::Navigator::settle_transition)
//! exactly once when its own animation finishes; until then all input stays
//! gated.

use crate::core::navigation::{DeckEvent, Direction};

pub trait RenderCoordinator {
    fn on_transition_started(&mut self, from: usize, to: usize, direction: Direction);

    fn on_navigation_settled(&mut self, current_index: usize);

    fn on_toc_opened(&mut self);

    fn on_toc_closed(&mut self);
}

/// Route one engine event to the matching coordinator callback.
pub fn deliver<R: RenderCoordinator + ?Sized>(coordinator: &mut R, event: DeckEvent) {
    match event {
        DeckEvent::TransitionStarted {
            from,
            to,
            direction,
        } => coordinator.on_transition_started(from, to, direction),
        DeckEvent::NavigationSettled { current_index } => {
            coordinator.on_navigation_settled(current_index)
        }
        DeckEvent::TocOpened => coordinator.on_toc_opened(),
        DeckEvent::TocClosed => coordinator.on_toc_closed(),
    }
}
