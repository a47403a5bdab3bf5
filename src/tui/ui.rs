use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Text;

use crate::core::navigation::Direction;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::slide_view::render_placeholder;
use crate::tui::components::{
    Control, Controls, ProgressBar, SlideView, TocHit, TocView, control_at,
};
use crate::tui::transition::{AnimPhase, TransitionFrame};

/// Tile size relative to the full slide area while slides move.
const TILE_SCALE: f32 = 0.6;

/// Screen regions for one frame. Chrome rows are `None` when hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub slide: Rect,
    pub progress: Option<Rect>,
    pub controls: Option<Rect>,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Control(Control),
    Toc(TocHit),
}

pub fn layout(frame_area: Rect, show_progress: bool, show_controls: bool) -> Areas {
    use Constraint::{Length, Min};
    let progress_height = if show_progress { 1 } else { 0 };
    let controls_height = if show_controls { 1 } else { 0 };
    let [slide, progress, controls] =
        Layout::vertical([Min(0), Length(progress_height), Length(controls_height)])
            .areas(frame_area);
    Areas {
        slide,
        progress: show_progress.then_some(progress),
        controls: show_controls.then_some(controls),
    }
}

fn current_layout<C>(frame_area: Rect, app: &App<C>, tui: &TuiState) -> Areas {
    let chrome = !app.fullscreen.is_active();
    layout(
        frame_area,
        chrome && tui.show_progress,
        chrome && tui.show_controls,
    )
}

pub fn draw_ui(frame: &mut Frame, app: &App<Text<'static>>, tui: &mut TuiState, now: Instant) {
    let areas = current_layout(frame.area(), app, tui);
    let navigator = &app.navigator;
    let deck = navigator.deck();

    if deck.is_empty() {
        render_placeholder(frame, areas.slide, &app.source, app.load_error.as_deref());
    } else if let Some(transition) = tui.animator.frame(now) {
        for (index, rect) in tile_rects(areas.slide, &transition) {
            if let Ok(slide) = deck.get(index) {
                SlideView::new(slide, true).render(frame, rect);
            }
        }
    } else if let Some(slide) = navigator.current_slide() {
        SlideView::new(slide, false).render(frame, areas.slide);
    }

    if navigator.toc_open() && !deck.is_empty() {
        let titles: Vec<&str> = deck.titles().collect();
        TocView::new(&mut tui.toc, titles, navigator.current_index()).render(frame, areas.slide);
    }

    if let Some(area) = areas.progress {
        ProgressBar {
            ratio: navigator.progress(),
        }
        .render(frame, area);
    }

    if let Some(area) = areas.controls {
        let status = app.status_line();
        Controls {
            can_previous: navigator.can_go_previous(),
            can_next: navigator.can_go_next(),
            toc_open: navigator.toc_open(),
            status: &status,
        }
        .render(frame, area);
    }
}

/// Map a click to a control or TOC row. Controls win over the TOC curtain.
pub fn hit_test<C>(
    frame_area: Rect,
    app: &App<C>,
    tui: &TuiState,
    column: u16,
    row: u16,
) -> Option<Hit> {
    let areas = current_layout(frame_area, app, tui);
    if let Some(control) = areas
        .controls
        .and_then(|area| control_at(area, column, row))
    {
        return Some(Hit::Control(control));
    }
    if app.navigator.toc_open() && row >= areas.slide.y && row < areas.slide.bottom() {
        return Some(Hit::Toc(tui.toc.hit(areas.slide, column, row)));
    }
    None
}

/// Slides to draw, back to front, for one transition frame.
///
/// Shrink: the outgoing slide contracts to a tile. Move: both tiles slide
/// horizontally, the incoming one entering from the right when moving
/// forward. Grow: the incoming tile expands back to full size.
pub fn tile_rects(area: Rect, frame: &TransitionFrame) -> Vec<(usize, Rect)> {
    let p = frame.progress;
    match frame.phase {
        AnimPhase::Shrink => vec![(frame.from, scaled(area, 1.0 - (1.0 - TILE_SCALE) * p))],
        AnimPhase::Grow => vec![(frame.to, scaled(area, TILE_SCALE + (1.0 - TILE_SCALE) * p))],
        AnimPhase::Move => {
            let tile = scaled(area, TILE_SCALE);
            let travel = f32::from(area.width);
            let sign = match frame.direction {
                Direction::Forward => -1.0,
                Direction::Backward => 1.0,
            };
            let outgoing = (sign * travel * p).round() as i32;
            let incoming = (-sign * travel * (1.0 - p)).round() as i32;
            [(frame.from, outgoing), (frame.to, incoming)]
                .into_iter()
                .filter_map(|(index, dx)| shifted(tile, dx, area).map(|r| (index, r)))
                .collect()
        }
    }
}

/// `area` scaled about its centre.
fn scaled(area: Rect, scale: f32) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = (f32::from(area.width) * scale).round() as u16;
    let height = (f32::from(area.height) * scale).round() as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// `rect` moved `dx` columns and clipped to `bounds`; `None` once fully off-screen.
fn shifted(rect: Rect, dx: i32, bounds: Rect) -> Option<Rect> {
    let left = (i32::from(rect.x) + dx).max(i32::from(bounds.x));
    let right = (i32::from(rect.right()) + dx).min(i32::from(bounds.right()));
    if right <= left {
        return None;
    }
    Some(Rect {
        x: u16::try_from(left).ok()?,
        y: rect.y,
        width: u16::try_from(right - left).ok()?,
        height: rect.height,
    })
}
