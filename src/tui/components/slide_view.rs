//! # SlideView Component
//!
//! Renders one slide: a bordered card with the title in the border and the
//! pre-rendered body inside. During a transition the card is drawn as a
//! smaller "tile" (dimmed border, no padding) at whatever rect the
//! animation geometry hands it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Wrap};

use crate::core::slide::Slide;
use crate::tui::component::Component;

pub struct SlideView<'a> {
    pub slide: &'a Slide<Text<'static>>,
    /// Drawn as a shrunken tile mid-transition.
    pub tile: bool,
}

impl<'a> SlideView<'a> {
    pub fn new(slide: &'a Slide<Text<'static>>, tile: bool) -> Self {
        Self { slide, tile }
    }
}

impl Component for SlideView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        let border_style = if self.tile {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let title = Line::from(Span::styled(
            format!(" {} ", self.slide.title()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        let padding = if self.tile {
            Padding::ZERO
        } else {
            Padding::new(2, 2, 1, 0)
        };
        let block = Block::bordered()
            .title(title)
            .border_style(border_style)
            .padding(padding);

        let body = Paragraph::new(self.slide.content().clone())
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(Clear, area);
        frame.render_widget(body, area);
    }
}

/// Placeholder shown when the deck is empty (document missing or without slides).
pub fn render_placeholder(frame: &mut Frame, area: Rect, source: &str, reason: Option<&str>) {
    let mut lines = vec![
        Line::from(Span::styled(
            "no content",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("source: {source}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(reason) = reason {
        lines.push(Line::from(Span::styled(
            reason.to_owned(),
            Style::default().fg(Color::Red),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::bordered().title(" deckrun "))
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
