//! # TUI Components
//!
//! Everything the presenter draws, one file per component.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh every frame from the data they need:
//! - `SlideView`: one slide card, full size or as a transition tile
//! - `ProgressBar`: deck progress line
//! - `Controls`: ◀ ≡ ▶ strip plus the "3 / 12" status
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep presentation state in `TuiState` between frames and emit events:
//! - `TocState` / `TocView`: table of contents overlay
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! Controls { can_previous, can_next, toc_open, status: &status }.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── slide_view.rs   (slide card and empty-deck placeholder)
//! ├── progress.rs     (progress line)
//! ├── controls.rs     (navigation strip and click zones)
//! └── toc.rs          (contents overlay)
//! ```

pub mod controls;
pub mod progress;
pub mod slide_view;
pub mod toc;

pub use controls::{Control, Controls, control_at};
pub use progress::ProgressBar;
pub use slide_view::SlideView;
pub use toc::{TocEvent, TocHit, TocState, TocView};
