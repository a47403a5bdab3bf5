//! # Table of Contents overlay
//!
//! Numbered list of slide titles drawn over the slide while the engine's
//! `toc_open` flag is set. Opened with Down or `t`, dismissed with Up or Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TocState` lives in `TuiState` and keeps the highlight between frames
//! - `TocView` is created each frame with borrowed state and the deck titles

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the TOC overlay.
#[derive(Debug, Default)]
pub struct TocState {
    pub selected: usize,
    pub len: usize,
    pub list_state: ListState,
}

impl TocState {
    /// Highlight the current slide; called whenever the overlay opens.
    pub fn reset(&mut self, current: usize, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state = ListState::default();
            return;
        }
        self.selected = current.min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    /// Map a click to a list row. `area` is the full slide area the overlay
    /// was rendered over.
    pub fn hit(&self, area: Rect, column: u16, row: u16) -> TocHit {
        let overlay = overlay_rect(area);
        if !contains(overlay, column, row) {
            return TocHit::Outside;
        }
        let rows = list_rect(overlay);
        if !contains(rows, column, row) {
            return TocHit::Inside;
        }
        let index = self.list_state.offset() + usize::from(row - rows.y);
        if index < self.len {
            TocHit::Row(index)
        } else {
            TocHit::Inside
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(self.len - 1);
        self.list_state.select(Some(self.selected));
    }
}

impl EventHandler for TocState {
    type Event = TocEvent;

    /// `j`/`k` move the highlight and Enter jumps to it. Everything else,
    /// including Up/Esc (close), falls through to the global bindings.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<TocEvent> {
        match event {
            TuiEvent::Char('j') => {
                self.move_by(1);
                None
            }
            TuiEvent::Char('k') => {
                self.move_by(-1);
                None
            }
            TuiEvent::Enter if self.len > 0 => Some(TocEvent::Select(self.selected)),
            _ => None,
        }
    }
}

/// Events emitted by the TOC overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocEvent {
    Select(usize),
}

/// Where a click landed relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocHit {
    Row(usize),
    /// On the overlay frame or below the last row.
    Inside,
    /// On the curtain around the overlay.
    Outside,
}

/// Transient render wrapper for the TOC overlay.
pub struct TocView<'a> {
    state: &'a mut TocState,
    titles: Vec<&'a str>,
    current: usize,
}

impl<'a> TocView<'a> {
    pub fn new(state: &'a mut TocState, titles: Vec<&'a str>, current: usize) -> Self {
        Self {
            state,
            titles,
            current,
        }
    }
}

impl Component for TocView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = overlay_rect(area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Contents ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" j/k Move  Enter Go  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let number_width = self.titles.len().to_string().len();
        let title_width = usize::from(list_rect(overlay).width).saturating_sub(number_width + 2);

        let items: Vec<ListItem> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let style = if i == self.current {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>width$}. ", i + 1, width = number_width),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(truncate_to_width(title, title_width), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate to `max_width` display columns, ending in "…" when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Overlay occupies the centre of the slide area (70% by 80%).
fn overlay_rect(outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage(10),
        Constraint::Percentage(80),
        Constraint::Percentage(10),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage(15),
        Constraint::Percentage(70),
        Constraint::Percentage(15),
    ])
    .areas(center_v);
    center
}

/// Rows area inside the overlay: borders plus one column of padding per side.
fn list_rect(overlay: Rect) -> Rect {
    Rect {
        x: overlay.x.saturating_add(2),
        y: overlay.y.saturating_add(1),
        width: overlay.width.saturating_sub(4),
        height: overlay.height.saturating_sub(2),
    }
}
