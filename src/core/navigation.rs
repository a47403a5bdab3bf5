//! # Navigation State Machine
//!
//! Owns the deck and the current position, and serializes slide changes
//! against a single in-flight transition.
//!
//! ```text
//!            go_to(i), i valid and != current
//!   ┌──────┐ ─────────────────────────────────▶ ┌───────────────┐
//!   │ Idle │                                    │ Transitioning │
//!   └──────┘ ◀───────────────────────────────── └───────────────┘
//!                    settle_transition()
//! ```
//!
//! `toc_open` is an orthogonal flag. Every operation returns the event it
//! produced (if any) so the caller can hand it to the render coordinator.
//! Rejected and out-of-range requests produce nothing.

use log::{debug, warn};

use crate::core::deck::Deck;
use crate::core::slide::Slide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

/// Lifecycle events consumed by the render coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    TransitionStarted {
        from: usize,
        to: usize,
        direction: Direction,
    },
    NavigationSettled {
        current_index: usize,
    },
    TocOpened,
    TocClosed,
}

/// Derived snapshot of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub animating: bool,
    pub toc_open: bool,
}

pub struct Navigator<C = String> {
    deck: Deck<C>,
    current: usize,
    phase: Phase,
    toc_open: bool,
}

impl<C> Navigator<C> {
    pub fn new(deck: Deck<C>) -> Self {
        Self {
            deck,
            current: 0,
            phase: Phase::Idle,
            toc_open: false,
        }
    }

    pub fn deck(&self) -> &Deck<C> {
        &self.deck
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// `None` only when the deck is empty.
    pub fn current_slide(&self) -> Option<&Slide<C>> {
        self.deck.get(self.current).ok()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    pub fn toc_open(&self) -> bool {
        self.toc_open
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_index: self.current,
            animating: self.is_transitioning(),
            toc_open: self.toc_open,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        !self.deck.is_empty() && self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.deck.len()
    }

    /// Fraction of the deck reached, counting the current slide (0.0 when empty).
    pub fn progress(&self) -> f64 {
        if self.deck.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f64 / self.deck.len() as f64
    }

    /// Start a transition to `target`.
    ///
    /// Dropped while transitioning; silently ignored when `target` is out of
    /// range or already current.
    pub fn go_to(&mut self, target: isize) -> Option<DeckEvent> {
        if self.is_transitioning() {
            debug!("go_to({target}) dropped: transition in flight");
            return None;
        }
        let to = match self.deck.checked_index(target) {
            Ok(i) => i,
            Err(e) => {
                debug!("go_to ignored: {e}");
                return None;
            }
        };
        if to == self.current {
            return None;
        }

        let from = self.current;
        let direction = if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.phase = Phase::Transitioning {
            from,
            to,
            direction,
        };
        self.current = to;
        debug!("Transition started: {from} -> {to} ({direction:?})");
        Some(DeckEvent::TransitionStarted {
            from,
            to,
            direction,
        })
    }

    pub fn go_to_index(&mut self, index: usize) -> Option<DeckEvent> {
        self.go_to(isize::try_from(index).unwrap_or(isize::MAX))
    }

    pub fn next(&mut self) -> Option<DeckEvent> {
        self.go_to(self.signed_current() + 1)
    }

    pub fn previous(&mut self) -> Option<DeckEvent> {
        self.go_to(self.signed_current() - 1)
    }

    pub fn first(&mut self) -> Option<DeckEvent> {
        self.go_to(0)
    }

    pub fn last(&mut self) -> Option<DeckEvent> {
        let last = self.deck.len().checked_sub(1)?;
        self.go_to_index(last)
    }

    /// Acknowledgement from the render coordinator that the visual
    /// transition finished. Releases the gate.
    pub fn settle_transition(&mut self) -> Option<DeckEvent> {
        match self.phase {
            Phase::Transitioning { .. } => {
                self.phase = Phase::Idle;
                debug!("Navigation settled at {}", self.current);
                Some(DeckEvent::NavigationSettled {
                    current_index: self.current,
                })
            }
            Phase::Idle => {
                warn!("settle_transition called with no transition in flight");
                None
            }
        }
    }

    pub fn open_toc(&mut self) -> Option<DeckEvent> {
        if self.toc_open || self.is_transitioning() {
            return None;
        }
        self.toc_open = true;
        Some(DeckEvent::TocOpened)
    }

    pub fn close_toc(&mut self) -> Option<DeckEvent> {
        if !self.toc_open || self.is_transitioning() {
            return None;
        }
        self.toc_open = false;
        Some(DeckEvent::TocClosed)
    }

    pub fn toggle_toc(&mut self) -> Option<DeckEvent> {
        if self.toc_open {
            self.close_toc()
        } else {
            self.open_toc()
        }
    }

    fn signed_current(&self) -> isize {
        isize::try_from(self.current).unwrap_or(isize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::navigator_of;

    fn settled(nav: &mut Navigator) {
        assert!(matches!(
            nav.settle_transition(),
            Some(DeckEvent::NavigationSettled { .. })
        ));
    }

    #[test]
    fn starts_idle_at_zero() {
        let nav = navigator_of(3);
        assert_eq!(
            nav.state(),
            NavigationState {
                current_index: 0,
                animating: false,
                toc_open: false
            }
        );
    }

    #[test]
    fn go_to_every_index_then_settle() {
        for i in 0..5 {
            let mut nav = navigator_of(5);
            nav.go_to(i as isize);
            if i != 0 {
                settled(&mut nav);
            }
            assert_eq!(nav.current_index(), i);
            assert_eq!(nav.phase(), Phase::Idle);
        }
    }

    #[test]
    fn go_to_emits_transition_started() {
        let mut nav = navigator_of(4);
        assert_eq!(
            nav.go_to(2),
            Some(DeckEvent::TransitionStarted {
                from: 0,
                to: 2,
                direction: Direction::Forward
            })
        );
        assert!(nav.is_transitioning());
        assert_eq!(nav.current_index(), 2);
        assert_eq!(
            nav.settle_transition(),
            Some(DeckEvent::NavigationSettled { current_index: 2 })
        );
        assert_eq!(
            nav.go_to(1),
            Some(DeckEvent::TransitionStarted {
                from: 2,
                to: 1,
                direction: Direction::Backward
            })
        );
    }

    #[test]
    fn out_of_range_is_inert() {
        let mut nav = navigator_of(3);
        assert_eq!(nav.go_to(-1), None);
        assert_eq!(nav.go_to(3), None);
        assert_eq!(nav.go_to(isize::MAX), None);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.phase(), Phase::Idle);
    }

    #[test]
    fn go_to_current_is_noop() {
        let mut nav = navigator_of(3);
        assert_eq!(nav.go_to(0), None);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn requests_dropped_while_transitioning() {
        let mut nav = navigator_of(5);
        nav.next();
        assert_eq!(nav.next(), None);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.go_to(4), None);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn next_from_last_is_idempotent() {
        let mut nav = navigator_of(2);
        nav.next();
        settled(&mut nav);
        for _ in 0..3 {
            assert_eq!(nav.next(), None);
            assert_eq!(nav.current_index(), 1);
            assert!(!nav.is_transitioning());
        }
    }

    #[test]
    fn previous_from_first_is_inert() {
        let mut nav = navigator_of(2);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn next_previous_round_trip() {
        for k in 0..3 {
            let mut nav = navigator_of(4);
            if k > 0 {
                nav.go_to(k);
                settled(&mut nav);
            }
            nav.next();
            settled(&mut nav);
            nav.previous();
            settled(&mut nav);
            assert_eq!(nav.current_index(), k as usize);
        }
    }

    #[test]
    fn empty_deck_navigation_is_noop() {
        let mut nav: Navigator = Navigator::new(Deck::new());
        assert_eq!(nav.next(), None);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.first(), None);
        assert_eq!(nav.last(), None);
        assert_eq!(nav.go_to(0), None);
        assert!(nav.current_slide().is_none());
        assert_eq!(nav.progress(), 0.0);
        assert!(!nav.can_go_next());
        assert!(!nav.can_go_previous());
    }

    #[test]
    fn stray_settle_emits_nothing() {
        let mut nav = navigator_of(3);
        assert_eq!(nav.settle_transition(), None);
        nav.next();
        settled(&mut nav);
        assert_eq!(nav.settle_transition(), None);
    }

    #[test]
    fn toc_open_close_idempotent() {
        let mut nav = navigator_of(3);
        assert_eq!(nav.open_toc(), Some(DeckEvent::TocOpened));
        assert_eq!(nav.open_toc(), None);
        assert!(nav.toc_open());
        assert_eq!(nav.close_toc(), Some(DeckEvent::TocClosed));
        assert_eq!(nav.close_toc(), None);
        assert!(!nav.toc_open());
    }

    #[test]
    fn toc_refused_while_transitioning() {
        let mut nav = navigator_of(3);
        nav.next();
        assert_eq!(nav.open_toc(), None);
        assert!(!nav.toc_open());
        settled(&mut nav);
        assert_eq!(nav.toggle_toc(), Some(DeckEvent::TocOpened));
        nav.next();
        assert_eq!(nav.close_toc(), None);
        assert!(nav.toc_open());
    }

    #[test]
    fn navigation_allowed_with_toc_open() {
        let mut nav = navigator_of(3);
        nav.open_toc();
        assert!(nav.next().is_some());
    }

    #[test]
    fn first_and_last() {
        let mut nav = navigator_of(4);
        assert_eq!(
            nav.last(),
            Some(DeckEvent::TransitionStarted {
                from: 0,
                to: 3,
                direction: Direction::Forward
            })
        );
        settled(&mut nav);
        assert_eq!(nav.last(), None);
        nav.first();
        settled(&mut nav);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn progress_and_controls() {
        let mut nav = navigator_of(4);
        assert_eq!(nav.progress(), 0.25);
        assert!(!nav.can_go_previous());
        assert!(nav.can_go_next());
        nav.last();
        settled(&mut nav);
        assert_eq!(nav.progress(), 1.0);
        assert!(nav.can_go_previous());
        assert!(!nav.can_go_next());
    }
}
