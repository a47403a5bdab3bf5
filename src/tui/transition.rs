//! # Slide transition animation
//!
//! The presenter's half of the transition handshake. When the engine starts
//! a transition the animator plays three phases:
//!
//! ```text
//!   Shrink          Move                      Grow
//!   ┌──────┐        ┌────┐  ┌────┐            ┌──────┐
//!   │ from │  →     │from│←─│ to │   →        │  to  │
//!   └──────┘        └────┘  └────┘            └──────┘
//!   both slides     tiles slide past          incoming tile
//!   become tiles    each other                fills the frame
//! ```
//!
//! Moving forward, the incoming slide enters from the right; backward, from
//! the left. The event loop polls [`TransitionAnimator::take_finished`] and
//! calls `settle_transition()` when it returns `true`, exactly once per
//! transition.
//!
//! [`StuckWatchdog`] makes a transition that never settles visible in the
//! log. It never releases the gate itself.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::core::config::TransitionTiming;
use crate::core::navigation::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimPhase {
    Shrink,
    Move,
    Grow,
}

/// One frame of an in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub phase: AnimPhase,
    /// 0.0..=1.0 within `phase`.
    pub progress: f32,
}

#[derive(Debug, Clone, Copy)]
struct Active {
    from: usize,
    to: usize,
    direction: Direction,
    started: Instant,
}

#[derive(Debug)]
pub struct TransitionAnimator {
    timing: TransitionTiming,
    active: Option<Active>,
}

impl TransitionAnimator {
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            timing,
            active: None,
        }
    }

    pub fn start(&mut self, from: usize, to: usize, direction: Direction, now: Instant) {
        if self.active.is_some() {
            warn!("Transition {from}->{to} started while another was animating");
        }
        self.active = Some(Active {
            from,
            to,
            direction,
            started: now,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn frame(&self, now: Instant) -> Option<TransitionFrame> {
        let active = self.active?;
        let elapsed = now.saturating_duration_since(active.started);
        let (phase, progress) = self.phase_at(elapsed);
        Some(TransitionFrame {
            from: active.from,
            to: active.to,
            direction: active.direction,
            phase,
            progress,
        })
    }

    /// Returns `true` once, when the running animation has played out.
    pub fn take_finished(&mut self, now: Instant) -> bool {
        match self.active {
            Some(active) if now.saturating_duration_since(active.started) >= self.timing.total() => {
                debug!("Transition {}->{} animation finished", active.from, active.to);
                self.active = None;
                true
            }
            _ => false,
        }
    }

    fn phase_at(&self, elapsed: Duration) -> (AnimPhase, f32) {
        let t = &self.timing;
        if elapsed < t.shrink {
            (AnimPhase::Shrink, ratio(elapsed, t.shrink))
        } else if elapsed < t.shrink + t.moving {
            (AnimPhase::Move, ratio(elapsed - t.shrink, t.moving))
        } else {
            let into_grow = elapsed.saturating_sub(t.shrink + t.moving);
            (AnimPhase::Grow, ratio(into_grow, t.grow))
        }
    }
}

fn ratio(part: Duration, whole: Duration) -> f32 {
    if whole.is_zero() {
        return 1.0;
    }
    (part.as_secs_f32() / whole.as_secs_f32()).clamp(0.0, 1.0)
}

/// Logs once when the engine stays gated longer than `threshold`.
#[derive(Debug)]
pub struct StuckWatchdog {
    threshold: Duration,
    since: Option<Instant>,
    warned: bool,
}

impl StuckWatchdog {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            since: None,
            warned: false,
        }
    }

    /// Feed the current gate state. Returns `true` on the tick that first
    /// detects a stuck transition.
    pub fn observe(&mut self, transitioning: bool, now: Instant) -> bool {
        if !transitioning {
            self.since = None;
            self.warned = false;
            return false;
        }
        let since = *self.since.get_or_insert(now);
        if !self.warned && now.saturating_duration_since(since) >= self.threshold {
            self.warned = true;
            warn!(
                "Transition has not settled after {:?}; input stays gated",
                self.threshold
            );
            return true;
        }
        false
    }
}
