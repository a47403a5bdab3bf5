//! # Slide
//!
//! One titled, pre-rendered unit of presentation content.
//!
//! The content type is generic so the same compiler can feed different
//! presentation layers: HTML strings for export, styled `Text` for the TUI.

use serde::Serialize;

/// An immutable slide. Fields are fixed at construction; the compiler is the
/// only producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide<C = String> {
    title: String,
    content: C,
}

impl<C> Slide<C> {
    pub fn new(title: impl Into<String>, content: C) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Plain-text title (already stripped of the heading marker).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Pre-rendered content, ready for display.
    pub fn content(&self) -> &C {
        &self.content
    }
}
