//! # Progress Component
//!
//! Thin bar showing how far into the deck the presenter is.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct ProgressBar {
    /// Fraction of the deck reached, 0.0..=1.0.
    pub ratio: f64,
}

impl ProgressBar {
    fn filled_width(&self, width: u16) -> u16 {
        (f64::from(width) * self.ratio.clamp(0.0, 1.0)).round() as u16
    }
}

impl Component for ProgressBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let filled = self.filled_width(area.width);
        let rest = area.width - filled;
        let line = Line::from(vec![
            Span::styled(
                "━".repeat(usize::from(filled)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                "─".repeat(usize::from(rest)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
