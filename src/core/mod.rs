//! # Core Deck Engine
//!
//! This module contains the slide-deck engine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!   markdown text
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────┐   ┌────────────┐   Command   ┌────────────┐
//!   │ compiler │──▶│ Deck │──▶│ Navigator  │◀────────────│ dispatch() │
//!   └──────────┘   └──────┘   └─────┬──────┘             └────────────┘
//!                                   │ DeckEvent
//!                                   ▼
//!                        ┌────────────────────┐
//!                        │ RenderCoordinator  │  (TUI, HTML export, …)
//!                        └─────────┬──────────┘
//!                                  │ settle_transition()
//!                                  └──────────▶ Navigator
//! ```
//!
//! ## Modules
//!
//! - [`compiler`]: document → `Vec<Slide>` via a pluggable [`compiler::SlideRenderer`]
//! - [`deck`]: the ordered slide store
//! - [`navigation`]: the `Navigator` state machine and its events
//! - [`action`]: the `Command` enum and the input gate
//! - [`coordinator`]: the render-coordinator callback contract

pub mod action;
pub mod compiler;
pub mod config;
pub mod coordinator;
pub mod deck;
pub mod export;
pub mod fullscreen;
pub mod markup;
pub mod navigation;
pub mod slide;
pub mod source;
pub mod state;
