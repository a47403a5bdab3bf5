//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the deck,
//! and translates keyboard and mouse input into `core::action::Command`s.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! engine reports what changed through `DeckEvent`s; `TuiState` receives them
//! as the [`RenderCoordinator`] and owns every visual concern: the transition
//! animation, the TOC highlight, chrome visibility.
//!
//! ## Transition handshake
//!
//! ```text
//! Command::Next ─► Navigator (gate closes) ─► TransitionStarted ─► animator.start()
//!                                                                        │
//!   NavigationSettled ◄── settle_transition() ◄── take_finished() ◄──────┘
//! ```
//!
//! Every key press during the animation is dropped by the engine.
//!
//! ## Redraw Strategy
//!
//! - **Animating**: draws every ~16ms while a transition plays.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
pub mod markdown;
mod transition;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::text::Text;

use crate::core::action::Command;
use crate::core::config::ResolvedConfig;
use crate::core::coordinator::{RenderCoordinator, deliver};
use crate::core::deck::Deck;
use crate::core::fullscreen;
use crate::core::navigation::Direction;
use crate::core::source::CompileFailure;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Control, TocEvent, TocHit, TocState};
use crate::tui::event::{Binding, TuiEvent, binding_for, poll_event_immediate, poll_event_timeout};
use crate::tui::transition::{StuckWatchdog, TransitionAnimator};
use crate::tui::ui::Hit;

const ANIMATING_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core engine logic)
pub(crate) struct TuiState {
    pub animator: TransitionAnimator,
    pub watchdog: StuckWatchdog,
    pub toc: TocState,
    pub show_progress: bool,
    pub show_controls: bool,
    /// Mirrors the engine's position as reported through events.
    pub current_index: usize,
    pub slide_count: usize,
    /// Mirrors the engine's TOC flag as reported through events.
    pub toc_visible: bool,
}

impl TuiState {
    pub fn new<C>(config: &ResolvedConfig, app: &App<C>) -> Self {
        Self {
            animator: TransitionAnimator::new(config.timing),
            watchdog: StuckWatchdog::new(config.stuck_warn_after),
            toc: TocState::default(),
            show_progress: config.show_progress,
            show_controls: config.show_controls,
            current_index: app.navigator.current_index(),
            slide_count: app.navigator.deck().len(),
            toc_visible: app.navigator.toc_open(),
        }
    }
}

impl RenderCoordinator for TuiState {
    fn on_transition_started(&mut self, from: usize, to: usize, direction: Direction) {
        self.animator.start(from, to, direction, Instant::now());
    }

    fn on_navigation_settled(&mut self, current_index: usize) {
        self.current_index = current_index;
        // Arrows still navigate under an open TOC; keep its highlight on the slide shown
        if self.toc_visible {
            self.toc.reset(current_index, self.slide_count);
        }
    }

    fn on_toc_opened(&mut self) {
        self.toc_visible = true;
        self.toc.reset(self.current_index, self.slide_count);
    }

    fn on_toc_closed(&mut self) {
        self.toc_visible = false;
        debug!("TOC closed");
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Route one event into the engine and on to the coordinator.
fn apply(app: &mut App<Text<'static>>, tui: &mut TuiState, command: Command) {
    if let Some(event) = app.dispatch(command) {
        deliver(tui, event);
    }
}

/// Translate one input event. Returns `true` when the presenter should quit.
fn handle_event(
    app: &mut App<Text<'static>>,
    tui: &mut TuiState,
    event: TuiEvent,
    frame_area: ratatui::layout::Rect,
) -> bool {
    // TOC keys only while the overlay is up and input isn't gated
    if app.navigator.toc_open() && !app.navigator.is_transitioning() {
        if let Some(TocEvent::Select(index)) = tui.toc.handle_event(&event) {
            apply(app, tui, Command::CloseToc);
            apply(app, tui, Command::GoTo(index));
            return false;
        }
        if matches!(event, TuiEvent::Char('j' | 'k') | TuiEvent::Enter) {
            return false;
        }
    }

    if let TuiEvent::Click(column, row) = event {
        let command = match ui::hit_test(frame_area, app, tui, column, row) {
            Some(Hit::Control(Control::Previous)) => Some(Command::Previous),
            Some(Hit::Control(Control::Next)) => Some(Command::Next),
            Some(Hit::Control(Control::Menu)) => Some(Command::ToggleToc),
            Some(Hit::Toc(TocHit::Row(index))) => {
                apply(app, tui, Command::CloseToc);
                Some(Command::GoTo(index))
            }
            Some(Hit::Toc(TocHit::Outside)) => Some(Command::CloseToc),
            Some(Hit::Toc(TocHit::Inside)) | None => None,
        };
        if let Some(command) = command {
            apply(app, tui, command);
        }
        return false;
    }

    match binding_for(&event) {
        Some(Binding::Quit) => true,
        Some(Binding::Command(command)) => {
            apply(app, tui, command);
            false
        }
        None => false,
    }
}

pub fn run(
    config: ResolvedConfig,
    loaded: Result<Deck<Text<'static>>, CompileFailure>,
) -> std::io::Result<()> {
    let mut app = App::new(
        loaded,
        config.source.clone(),
        fullscreen::resolve(config.fullscreen),
    );
    let mut tui = TuiState::new(&config, &app);
    info!(
        "Presenting {} slides from {}",
        app.navigator.deck().len(),
        app.source
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();

        // Release the gate once the animation has played out
        if tui.animator.take_finished(now) {
            if let Some(event) = app.navigator.settle_transition() {
                deliver(&mut tui, event);
            }
            needs_redraw = true;
        }
        tui.watchdog.observe(app.navigator.is_transitioning(), now);

        let animating = tui.animator.is_animating();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATING_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if handle_event(&mut app, &mut tui, event, frame_area) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fullscreen::ChromeFullscreen;
    use crate::core::navigation::DeckEvent;
    use crate::core::slide::Slide;
    use crate::test_support::resolved_config;
    use ratatui::layout::Rect;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 41,
        height: 20,
    };

    /// Play the coordinator's part: acknowledge the finished animation.
    fn settle(app: &mut App<Text<'static>>, tui: &mut TuiState) -> Option<DeckEvent> {
        let event = app.navigator.settle_transition()?;
        deliver(tui, event);
        Some(event)
    }

    fn setup(n: usize) -> (App<Text<'static>>, TuiState) {
        let deck = Deck::from_slides(
            (0..n)
                .map(|i| Slide::new(format!("S{i}"), Text::from("body")))
                .collect(),
        );
        let app = App::new(Ok(deck), "data.md".to_string(), Box::new(ChromeFullscreen::default()));
        let tui = TuiState::new(&resolved_config(), &app);
        (app, tui)
    }

    #[test]
    fn test_next_starts_animation_and_gates_input() {
        let (mut app, mut tui) = setup(3);
        assert!(!handle_event(&mut app, &mut tui, TuiEvent::Right, AREA));
        assert!(tui.animator.is_animating());
        assert!(app.navigator.is_transitioning());

        handle_event(&mut app, &mut tui, TuiEvent::Right, AREA);
        assert_eq!(app.navigator.current_index(), 1);

        assert_eq!(
            settle(&mut app, &mut tui),
            Some(DeckEvent::NavigationSettled { current_index: 1 })
        );
        assert_eq!(tui.current_index, 1);
        handle_event(&mut app, &mut tui, TuiEvent::Right, AREA);
        assert_eq!(app.navigator.current_index(), 2);
    }

    #[test]
    fn test_quit_bindings() {
        let (mut app, mut tui) = setup(1);
        assert!(handle_event(&mut app, &mut tui, TuiEvent::Char('q'), AREA));
        assert!(handle_event(&mut app, &mut tui, TuiEvent::ForceQuit, AREA));
    }

    #[test]
    fn test_toc_opens_at_current_and_selects() {
        let (mut app, mut tui) = setup(4);
        handle_event(&mut app, &mut tui, TuiEvent::End, AREA);
        settle(&mut app, &mut tui);

        handle_event(&mut app, &mut tui, TuiEvent::Down, AREA);
        assert!(app.navigator.toc_open());
        assert_eq!(tui.toc.selected, 3);

        handle_event(&mut app, &mut tui, TuiEvent::Char('k'), AREA);
        handle_event(&mut app, &mut tui, TuiEvent::Char('k'), AREA);
        // Enter selects inside the TOC instead of advancing
        handle_event(&mut app, &mut tui, TuiEvent::Enter, AREA);
        assert!(!app.navigator.toc_open());
        assert_eq!(app.navigator.current_index(), 1);
        assert!(tui.animator.is_animating());
    }

    #[test]
    fn test_toc_does_not_block_arrow_navigation() {
        let (mut app, mut tui) = setup(3);
        handle_event(&mut app, &mut tui, TuiEvent::Down, AREA);
        handle_event(&mut app, &mut tui, TuiEvent::Right, AREA);
        assert_eq!(app.navigator.current_index(), 1);
        assert!(app.navigator.toc_open());
    }

    #[test]
    fn test_toc_highlight_follows_arrow_navigation() {
        let (mut app, mut tui) = setup(4);
        handle_event(&mut app, &mut tui, TuiEvent::Down, AREA);
        for _ in 0..2 {
            handle_event(&mut app, &mut tui, TuiEvent::Right, AREA);
            settle(&mut app, &mut tui);
        }
        assert_eq!(tui.toc.selected, 2);

        // Enter on the highlighted row stays put instead of jumping back
        handle_event(&mut app, &mut tui, TuiEvent::Enter, AREA);
        assert_eq!(app.navigator.current_index(), 2);
        assert!(!app.navigator.is_transitioning());
        assert!(!app.navigator.toc_open());
    }

    #[test]
    fn test_settle_with_toc_closed_leaves_highlight() {
        let (mut app, mut tui) = setup(3);
        handle_event(&mut app, &mut tui, TuiEvent::Right, AREA);
        settle(&mut app, &mut tui);
        assert!(!tui.toc_visible);
        assert_eq!(tui.toc.list_state.selected(), None);
    }

    #[test]
    fn test_escape_closes_toc() {
        let (mut app, mut tui) = setup(3);
        handle_event(&mut app, &mut tui, TuiEvent::Char('t'), AREA);
        assert!(app.navigator.toc_open());
        handle_event(&mut app, &mut tui, TuiEvent::Escape, AREA);
        assert!(!app.navigator.toc_open());
    }

    #[test]
    fn test_clicks_on_controls() {
        let (mut app, mut tui) = setup(3);
        // strip centred at x = 15 on the last row
        handle_event(&mut app, &mut tui, TuiEvent::Click(24, 19), AREA);
        assert_eq!(app.navigator.current_index(), 1);
        settle(&mut app, &mut tui);

        handle_event(&mut app, &mut tui, TuiEvent::Click(20, 19), AREA);
        assert!(app.navigator.toc_open());

        // click on the curtain closes the overlay
        handle_event(&mut app, &mut tui, TuiEvent::Click(0, 0), AREA);
        assert!(!app.navigator.toc_open());

        handle_event(&mut app, &mut tui, TuiEvent::Click(16, 19), AREA);
        assert_eq!(app.navigator.current_index(), 0);
    }

    #[test]
    fn test_fullscreen_toggle_leaves_position() {
        let (mut app, mut tui) = setup(3);
        handle_event(&mut app, &mut tui, TuiEvent::Char('f'), AREA);
        assert!(app.fullscreen.is_active());
        assert_eq!(app.navigator.current_index(), 0);
        assert!(!app.navigator.is_transitioning());
    }
}
