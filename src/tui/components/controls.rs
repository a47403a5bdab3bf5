//! # Controls Component
//!
//! One-line control strip under the slide:
//!
//! ```text
//!                       ◀   ≡   ▶                       3 / 12
//! ```
//!
//! Arrows dim when the deck edge is reached. The same geometry backs
//! [`control_at`], so mouse clicks land on what was drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const STRIP: [(&str, Control); 3] = [
    ("◀", Control::Previous),
    ("≡", Control::Menu),
    ("▶", Control::Next),
];
/// Each control owns a 3-column cell with its glyph in the middle.
const CELL: u16 = 3;
const GAP: u16 = 1;
const STRIP_WIDTH: u16 = CELL * 3 + GAP * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Menu,
    Next,
}

pub struct Controls<'a> {
    pub can_previous: bool,
    pub can_next: bool,
    pub toc_open: bool,
    pub status: &'a str,
}

impl Component for Controls<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);

        let strip_x = strip_origin(area);
        let mut spans = vec![Span::raw(" ".repeat(usize::from(strip_x - area.x)))];
        for (i, (glyph, control)) in STRIP.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" ".repeat(usize::from(GAP))));
            }
            let style = match control {
                Control::Previous if !self.can_previous => disabled,
                Control::Next if !self.can_next => disabled,
                Control::Menu if self.toc_open => enabled.add_modifier(Modifier::REVERSED),
                _ => enabled,
            };
            spans.push(Span::styled(format!(" {glyph} "), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        let status = Paragraph::new(Span::styled(
            format!("{} ", self.status),
            Style::default().fg(Color::DarkGray),
        ))
        .right_aligned();
        frame.render_widget(status, area);
    }
}

/// Which control (if any) sits at `column` of a strip rendered into `area`.
pub fn control_at(area: Rect, column: u16, row: u16) -> Option<Control> {
    if row < area.y || row >= area.bottom() || area.width < STRIP_WIDTH {
        return None;
    }
    let offset = column.checked_sub(strip_origin(area))?;
    STRIP
        .iter()
        .enumerate()
        .find(|(i, _)| {
            let start = *i as u16 * (CELL + GAP);
            offset >= start && offset < start + CELL
        })
        .map(|(_, (_, control))| *control)
}

fn strip_origin(area: Rect) -> u16 {
    area.x + area.width.saturating_sub(STRIP_WIDTH) / 2
}
