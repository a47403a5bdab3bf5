//! # Fullscreen capability
//!
//! One seam for every way a presentation layer can go fullscreen, resolved
//! once at startup. Toggling never touches navigation state.

use log::info;
use serde::{Deserialize, Serialize};

pub trait FullscreenProvider {
    fn enter(&mut self);

    fn exit(&mut self);

    fn is_active(&self) -> bool;

    fn toggle(&mut self) {
        if self.is_active() {
            self.exit();
        } else {
            self.enter();
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenMode {
    /// Hide presenter chrome (progress bar, controls) so the slide fills the terminal.
    #[default]
    Chrome,
    /// Fullscreen unavailable; toggling does nothing.
    None,
}

/// Presenter fullscreen: the slide takes the whole frame.
#[derive(Debug, Default)]
pub struct ChromeFullscreen {
    active: bool,
}

impl FullscreenProvider for ChromeFullscreen {
    fn enter(&mut self) {
        self.active = true;
        info!("Fullscreen on");
    }

    fn exit(&mut self) {
        self.active = false;
        info!("Fullscreen off");
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Default)]
pub struct Unsupported;

impl FullscreenProvider for Unsupported {
    fn enter(&mut self) {}

    fn exit(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}

pub fn resolve(mode: FullscreenMode) -> Box<dyn FullscreenProvider> {
    match mode {
        FullscreenMode::Chrome => Box::new(ChromeFullscreen::default()),
        FullscreenMode::None => Box::new(Unsupported),
    }
}
