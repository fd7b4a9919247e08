//! Turns the raw gesture stream into viewport mutations and single-cell
//! toggle requests.
//!
//! Each stroke is one thing only: one contact paints, two or more navigate
//! (pan + zoom). The interpretation locks at gesture begin; changing the
//! contact count mid-stroke never retroactively reinterprets updates already
//! applied. Navigation updates are recomputed from the state captured at
//! gesture begin, so projection error cannot compound across samples.

mod mouse;

pub use mouse::MouseDriver;

use std::sync::Arc;

use crate::application::{Config, ContainerGeometry, SharedViewport, ViewportState};
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::domain::Coord;

/// Lifecycle phase of a gesture sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Begin,
    Update,
    End,
}

/// One sample of the host's pointer/gesture stream.
#[derive(Clone, Copy, Debug)]
pub struct GestureSample {
    /// Simultaneous contact points; selects paint vs navigate at Begin
    pub contacts: u8,
    pub phase: GesturePhase,
    /// Translation since the previous sample, in display units
    pub delta_x: f64,
    pub delta_y: f64,
    /// Cumulative scale factor since gesture begin (1.0 = unchanged)
    pub scale: f64,
    /// Pinch/zoom focal point, in display units
    pub focal_x: f64,
    pub focal_y: f64,
    /// Absolute pointer position, in display units
    pub x: f64,
    pub y: f64,
    /// Sample timestamp, in seconds from an arbitrary epoch
    pub time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GestureMode {
    Paint,
    Navigate,
}

/// Per-stroke snapshot captured at gesture begin and discarded at end.
#[derive(Clone, Copy, Debug)]
struct GestureContext {
    start: ViewportState,
    focal_x: f64,
    focal_y: f64,
    total_dx: f64,
    total_dy: f64,
}

/// Routes gesture samples to the shared viewport or to paint requests.
pub struct InputCoordinator {
    config: Config,
    sink: Arc<dyn DiagnosticsSink>,
    mode: Option<GestureMode>,
    context: Option<GestureContext>,
    last_painted: Option<Coord>,
    last_paint_time: f64,
}

impl InputCoordinator {
    pub fn new(config: Config, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            config,
            sink,
            mode: None,
            context: None,
            last_painted: None,
            last_paint_time: f64::NEG_INFINITY,
        }
    }

    /// Process one sample. Navigation is applied to `viewport` directly;
    /// a returned coordinate is a request to toggle that cell.
    pub fn handle(
        &mut self,
        sample: &GestureSample,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
    ) -> Option<Coord> {
        match sample.phase {
            GesturePhase::Begin => self.begin(sample, container, viewport),
            GesturePhase::Update => self.update(sample, container, viewport),
            GesturePhase::End => {
                self.reset();
                None
            }
        }
    }

    fn begin(
        &mut self,
        sample: &GestureSample,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
    ) -> Option<Coord> {
        self.reset();
        self.context = Some(GestureContext {
            start: *viewport.load(),
            focal_x: sample.focal_x,
            focal_y: sample.focal_y,
            total_dx: 0.0,
            total_dy: 0.0,
        });
        if sample.contacts <= 1 {
            self.mode = Some(GestureMode::Paint);
            self.paint(sample, container, viewport)
        } else {
            self.mode = Some(GestureMode::Navigate);
            None
        }
    }

    fn update(
        &mut self,
        sample: &GestureSample,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
    ) -> Option<Coord> {
        // Mode was locked at Begin; a stray update without one is dropped.
        match self.mode? {
            GestureMode::Paint => self.paint(sample, container, viewport),
            GestureMode::Navigate => {
                self.navigate(sample, container, viewport);
                None
            }
        }
    }

    fn paint(
        &mut self,
        sample: &GestureSample,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
    ) -> Option<Coord> {
        if !container.is_usable() {
            // Normal before first layout; nothing to report.
            return None;
        }
        let vp = viewport.load();
        let Some((row, col)) = vp.screen_to_logical(sample.x, sample.y, container) else {
            self.sink
                .report(Diagnostic::DegenerateViewportUpdate { op: "paint" });
            return None;
        };
        let coord = Coord::new_bounded(
            row.floor() as i32,
            col.floor() as i32,
            self.config.coord_bound,
        );

        // Suppress repeats on the same cell within one stroke, then throttle.
        if self.last_painted == Some(coord) {
            return None;
        }
        let throttle = self.config.paint_throttle_ms as f64 / 1000.0;
        if sample.time - self.last_paint_time < throttle {
            return None;
        }
        self.last_painted = Some(coord);
        self.last_paint_time = sample.time;
        Some(coord)
    }

    fn navigate(
        &mut self,
        sample: &GestureSample,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
    ) {
        let Some(ctx) = self.context.as_mut() else {
            return;
        };
        ctx.total_dx += sample.delta_x;
        ctx.total_dy += sample.delta_y;
        if !container.is_usable() {
            return;
        }

        let ctx = *ctx;
        let zoomed = ctx.start.zoom(
            sample.scale,
            (ctx.focal_x, ctx.focal_y),
            container,
            &self.config,
        );
        let Some(zoomed) = zoomed else {
            self.sink
                .report(Diagnostic::DegenerateViewportUpdate { op: "zoom" });
            return;
        };
        let Some(next) = zoomed.pan(ctx.total_dx, ctx.total_dy, &self.config) else {
            self.sink
                .report(Diagnostic::DegenerateViewportUpdate { op: "pan" });
            return;
        };
        viewport.replace(next);
    }

    fn reset(&mut self) {
        self.mode = None;
        self.context = None;
        self.last_painted = None;
        self.last_paint_time = f64::NEG_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink(AtomicUsize);

    impl DiagnosticsSink for CountingSink {
        fn report(&self, _event: Diagnostic) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn container() -> ContainerGeometry {
        ContainerGeometry::new(0.0, 0.0, 800.0, 600.0)
    }

    fn shared_viewport() -> SharedViewport {
        SharedViewport::new(ViewportState::home(&Config::default()))
    }

    fn coordinator() -> InputCoordinator {
        InputCoordinator::new(Config::default(), Arc::new(NullSink))
    }

    fn sample(contacts: u8, phase: GesturePhase, x: f64, y: f64, time: f64) -> GestureSample {
        GestureSample {
            contacts,
            phase,
            delta_x: 0.0,
            delta_y: 0.0,
            scale: 1.0,
            focal_x: x,
            focal_y: y,
            x,
            y,
            time,
        }
    }

    #[test]
    fn test_single_contact_paints_the_cell_under_the_pointer() {
        let mut ic = coordinator();
        let vp = shared_viewport();
        let c = container();
        // Container center maps to logical (0, 0); the home cell size is 12,
        // so a point one cell right of center lands in column 1.
        let toggled = ic.handle(&sample(1, GesturePhase::Begin, 412.0, 300.0, 0.0), &c, &vp);
        assert_eq!(toggled, Some(Coord::new(0, 1)));
    }

    #[test]
    fn test_repeat_paints_on_same_cell_are_suppressed() {
        let mut ic = coordinator();
        let vp = shared_viewport();
        let c = container();
        assert!(ic.handle(&sample(1, GesturePhase::Begin, 400.0, 300.0, 0.0), &c, &vp).is_some());
        // Still inside the same cell, well past the throttle window.
        assert!(ic.handle(&sample(1, GesturePhase::Update, 402.0, 302.0, 1.0), &c, &vp).is_none());
        // A new stroke resets the suppression memory.
        assert!(ic.handle(&sample(1, GesturePhase::End, 402.0, 302.0, 1.1), &c, &vp).is_none());
        assert!(ic.handle(&sample(1, GesturePhase::Begin, 400.0, 300.0, 2.0), &c, &vp).is_some());
    }

    #[test]
    fn test_fast_drag_is_throttled() {
        let mut ic = coordinator();
        let vp = shared_viewport();
        let c = container();
        assert!(ic.handle(&sample(1, GesturePhase::Begin, 400.0, 300.0, 0.000), &c, &vp).is_some());
        // Different cell but inside the 30 ms throttle window.
        assert!(ic.handle(&sample(1, GesturePhase::Update, 440.0, 300.0, 0.010), &c, &vp).is_none());
        // Same cell again once the window has passed.
        assert!(ic.handle(&sample(1, GesturePhase::Update, 440.0, 300.0, 0.050), &c, &vp).is_some());
    }

    #[test]
    fn test_two_contacts_navigate_and_never_paint() {
        let mut ic = coordinator();
        let vp = shared_viewport();
        let c = container();
        let before = *vp.load();

        assert!(ic.handle(&sample(2, GesturePhase::Begin, 400.0, 300.0, 0.0), &c, &vp).is_none());
        let mut drag = sample(2, GesturePhase::Update, 420.0, 300.0, 0.1);
        drag.delta_x = 20.0;
        assert!(ic.handle(&drag, &c, &vp).is_none());

        let after = *vp.load();
        assert!((after.center_col - (before.center_col - 20.0 / before.cell_size)).abs() < 1e-9);
        assert_eq!(after.center_row, before.center_row);
    }

    #[test]
    fn test_mode_locks_for_the_whole_stroke() {
        let mut ic = coordinator();
        let vp = shared_viewport();
        let c = container();
        let before = *vp.load();

        // Begins as paint; a second finger landing mid-stroke must not start
        // navigating.
        ic.handle(&sample(1, GesturePhase::Begin, 400.0, 300.0, 0.0), &c, &vp);
        let mut two_finger = sample(2, GesturePhase::Update, 500.0, 300.0, 0.1);
        two_finger.delta_x = 100.0;
        let toggled = ic.handle(&two_finger, &c, &vp);

        assert_eq!(*vp.load(), before, "viewport untouched by a paint stroke");
        assert!(toggled.is_some(), "still interpreted as paint");
    }

    #[test]
    fn test_zoom_recomputes_from_gesture_start() {
        let mut ic = coordinator();
        let vp = shared_viewport();
        let c = container();
        let focal = (500.0, 200.0);
        let start = *vp.load();
        let anchor = start.screen_to_logical(focal.0, focal.1, &c).unwrap();

        ic.handle(&sample(2, GesturePhase::Begin, focal.0, focal.1, 0.0), &c, &vp);
        for (i, scale) in [1.2, 1.5, 2.0].iter().enumerate() {
            let mut s = sample(2, GesturePhase::Update, focal.0, focal.1, 0.1 * (i + 1) as f64);
            s.scale = *scale;
            ic.handle(&s, &c, &vp);
        }

        let end = *vp.load();
        assert_eq!(end.cell_size, start.cell_size * 2.0);
        let anchor_after = end.screen_to_logical(focal.0, focal.1, &c).unwrap();
        assert!((anchor.0 - anchor_after.0).abs() < 1e-9);
        assert!((anchor.1 - anchor_after.1).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_zoom_is_dropped_and_reported() {
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let mut ic = InputCoordinator::new(Config::default(), sink.clone());
        let vp = shared_viewport();
        let c = container();
        let before = *vp.load();

        ic.handle(&sample(2, GesturePhase::Begin, 400.0, 300.0, 0.0), &c, &vp);
        let mut s = sample(2, GesturePhase::Update, 400.0, 300.0, 0.1);
        s.scale = f64::NAN;
        ic.handle(&s, &c, &vp);

        assert_eq!(*vp.load(), before);
        assert_eq!(sink.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_unusable_geometry_is_a_silent_no_op() {
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let mut ic = InputCoordinator::new(Config::default(), sink.clone());
        let vp = shared_viewport();
        let pending = ContainerGeometry::unavailable();

        assert!(ic.handle(&sample(1, GesturePhase::Begin, 10.0, 10.0, 0.0), &pending, &vp).is_none());
        ic.handle(&sample(2, GesturePhase::Begin, 10.0, 10.0, 1.0), &pending, &vp);
        ic.handle(&sample(2, GesturePhase::Update, 20.0, 10.0, 1.1), &pending, &vp);
        assert_eq!(sink.0.load(Ordering::Relaxed), 0, "preconditions are not errors");
    }
}
