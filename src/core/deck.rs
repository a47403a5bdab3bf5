//! # Deck Store
//!
//! The ordered slides of a presentation. Append-only during compilation,
//! read-only afterwards; the navigator owns the current position.

use std::fmt;

use crate::core::slide::Slide;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// Requested index is outside `[0, len)`.
    OutOfRange { index: isize, len: usize },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::OutOfRange { index, len } => {
                write!(f, "slide index {index} out of range (deck has {len} slides)")
            }
        }
    }
}

impl std::error::Error for DeckError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck<C = String> {
    slides: Vec<Slide<C>>,
}

impl<C> Default for Deck<C> {
    fn default() -> Self {
        Self { slides: Vec::new() }
    }
}

impl<C> Deck<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slides(slides: Vec<Slide<C>>) -> Self {
        Self { slides }
    }

    /// Push a slide to the end, returning its index.
    pub fn append(&mut self, slide: Slide<C>) -> usize {
        self.slides.push(slide);
        self.slides.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&Slide<C>, DeckError> {
        self.slides.get(index).ok_or(DeckError::OutOfRange {
            index: isize::try_from(index).unwrap_or(isize::MAX),
            len: self.slides.len(),
        })
    }

    /// Validate a signed index (e.g. `current - 1`) against the deck bounds.
    pub fn checked_index(&self, index: isize) -> Result<usize, DeckError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.slides.len())
            .ok_or(DeckError::OutOfRange {
                index,
                len: self.slides.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide<C>> {
        self.slides.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|s| s.title())
    }
}
