use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may borrow persistent
/// state, and render into a `Rect` of the frame.
///
/// `render` takes `&mut self` so stateful components (e.g. the TOC list) can
/// update their presentation state during the render pass, in the spirit of
/// ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    /// Returning `None` lets the caller fall through to the global bindings.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
