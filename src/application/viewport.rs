//! Camera state and the mapping between the unbounded logical plane and the
//! on-screen container.
//!
//! Centers are fractional so panning stays smooth below one cell, and all
//! math runs in f64 so a center near the coordinate bound still resolves
//! sub-cell motion. Every operation validates its result for finiteness and
//! returns `None` instead of publishing a corrupt state; fractional camera
//! state compounds error across frames, so one bad update must never land.

use super::Config;
use crate::domain::clamp_fractional;

/// The single source of truth for camera state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Fractional logical row at the container center
    pub center_row: f64,
    /// Fractional logical column at the container center
    pub center_col: f64,
    /// On-screen size of one cell, in display units
    pub cell_size: f64,
}

impl ViewportState {
    /// Camera at the origin at the configured default scale.
    pub fn home(config: &Config) -> Self {
        Self {
            center_row: 0.0,
            center_col: 0.0,
            cell_size: config.initial_cell_size.clamp(config.min_cell_size, config.max_cell_size),
        }
    }

    /// Inverse-project a physical point into fractional logical space.
    ///
    /// Returns `None` when the geometry is unusable or the result is
    /// non-finite; callers floor and clamp for cell addressing.
    pub fn screen_to_logical(
        &self,
        screen_x: f64,
        screen_y: f64,
        container: &ContainerGeometry,
    ) -> Option<(f64, f64)> {
        if !container.is_usable() {
            return None;
        }
        let (cx, cy) = container.center();
        let row = self.center_row + (screen_y - cy) / self.cell_size;
        let col = self.center_col + (screen_x - cx) / self.cell_size;
        (row.is_finite() && col.is_finite()).then_some((row, col))
    }

    /// Forward-project a fractional logical point onto the container.
    pub fn logical_to_screen(
        &self,
        row: f64,
        col: f64,
        container: &ContainerGeometry,
    ) -> Option<(f64, f64)> {
        if !container.is_usable() {
            return None;
        }
        let (cx, cy) = container.center();
        let x = cx + (col - self.center_col) * self.cell_size;
        let y = cy + (row - self.center_row) * self.cell_size;
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }

    /// Shift the center against a screen-space drag delta.
    ///
    /// Subtracted because dragging content right moves the logical center
    /// left. The center is clamped to the coordinate bound.
    pub fn pan(&self, delta_x: f64, delta_y: f64, config: &Config) -> Option<ViewportState> {
        let row = self.center_row - delta_y / self.cell_size * config.pan_sensitivity;
        let col = self.center_col - delta_x / self.cell_size * config.pan_sensitivity;
        if !row.is_finite() || !col.is_finite() {
            return None;
        }
        Some(Self {
            center_row: clamp_fractional(row, config.coord_bound),
            center_col: clamp_fractional(col, config.coord_bound),
            cell_size: self.cell_size,
        })
    }

    /// Rescale about a focal point, keeping the logical point that was under
    /// the focal screen position at gesture start pinned under it.
    ///
    /// `self` is the viewport captured at gesture begin and `scale` the
    /// cumulative factor since then, so repeated calls do not compound error.
    pub fn zoom(
        &self,
        scale: f64,
        focal: (f64, f64),
        container: &ContainerGeometry,
        config: &Config,
    ) -> Option<ViewportState> {
        let (focal_row, focal_col) = self.screen_to_logical(focal.0, focal.1, container)?;

        let raw_size = self.cell_size * scale;
        if !raw_size.is_finite() || raw_size <= 0.0 {
            return None;
        }
        let cell_size = raw_size.clamp(config.min_cell_size, config.max_cell_size);

        // Solve for the center that projects the focal logical point back
        // onto the focal screen point at the new scale.
        let (cx, cy) = container.center();
        let row = focal_row - (focal.1 - cy) / cell_size;
        let col = focal_col - (focal.0 - cx) / cell_size;
        if !row.is_finite() || !col.is_finite() {
            return None;
        }
        Some(Self {
            center_row: clamp_fractional(row, config.coord_bound),
            center_col: clamp_fractional(col, config.coord_bound),
            cell_size,
        })
    }
}

/// The on-screen rectangle available for drawing, in the same physical units
/// as pointer events. Produced by the host's layout collaborator.
///
/// `is_valid = false` is a normal transient state (before first layout,
/// during a resize); consumers no-op until geometry arrives.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContainerGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
    pub is_valid: bool,
}

impl ContainerGeometry {
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
            is_valid: true,
        }
    }

    /// Placeholder geometry for before the first layout pass.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Whether screen mappings can be computed at all: flagged valid, with a
    /// positive, finite area.
    pub fn is_usable(&self) -> bool {
        self.is_valid
            && self.width > 0.0
            && self.height > 0.0
            && [self.origin_x, self.origin_y, self.width, self.height]
                .iter()
                .all(|v| v.is_finite())
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.origin_x + self.width / 2.0,
            self.origin_y + self.height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerGeometry {
        ContainerGeometry::new(0.0, 0.0, 800.0, 600.0)
    }

    fn viewport() -> ViewportState {
        ViewportState {
            center_row: 4.5,
            center_col: -2.25,
            cell_size: 10.0,
        }
    }

    #[test]
    fn test_projection_round_trip() {
        let vp = viewport();
        let c = container();
        for &(row, col) in &[(0.0, 0.0), (4.5, -2.25), (-731.5, 999_999.0), (123.75, -0.5)] {
            let (x, y) = vp.logical_to_screen(row, col, &c).unwrap();
            let (r2, c2) = vp.screen_to_logical(x, y, &c).unwrap();
            assert!((r2 - row).abs() < 1e-6, "row {row} -> {r2}");
            assert!((c2 - col).abs() < 1e-6, "col {col} -> {c2}");
        }
    }

    #[test]
    fn test_center_projects_to_container_center() {
        let vp = viewport();
        let c = container();
        let (x, y) = vp.logical_to_screen(vp.center_row, vp.center_col, &c).unwrap();
        assert_eq!((x, y), c.center());
    }

    #[test]
    fn test_pan_moves_center_against_drag() {
        let vp = viewport();
        let panned = vp.pan(20.0, -10.0, &Config::default()).unwrap();
        assert!((panned.center_col - (vp.center_col - 2.0)).abs() < 1e-9);
        assert!((panned.center_row - (vp.center_row + 1.0)).abs() < 1e-9);
        assert_eq!(panned.cell_size, vp.cell_size);
    }

    #[test]
    fn test_pan_clamps_to_coordinate_bound() {
        let config = Config::default();
        let vp = ViewportState {
            center_row: config.coord_bound as f64,
            center_col: 0.0,
            cell_size: 10.0,
        };
        let panned = vp.pan(0.0, -1e9, &config).unwrap();
        assert_eq!(panned.center_row, config.coord_bound as f64);
    }

    #[test]
    fn test_zoom_keeps_focal_point_fixed() {
        let config = Config::default();
        let start = viewport();
        let c = container();
        let focal = (150.0, 420.0);

        let before = start.screen_to_logical(focal.0, focal.1, &c).unwrap();
        let zoomed = start.zoom(2.0, focal, &c, &config).unwrap();
        let after = zoomed.screen_to_logical(focal.0, focal.1, &c).unwrap();

        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
        assert_eq!(zoomed.cell_size, 20.0);
    }

    #[test]
    fn test_zoom_clamps_cell_size() {
        let config = Config::default();
        let c = container();
        let vp = viewport();
        let huge = vp.zoom(1e9, (400.0, 300.0), &c, &config).unwrap();
        assert_eq!(huge.cell_size, config.max_cell_size);
        let tiny = vp.zoom(1e-9, (400.0, 300.0), &c, &config).unwrap();
        assert_eq!(tiny.cell_size, config.min_cell_size);
    }

    #[test]
    fn test_degenerate_inputs_leave_state_unchanged() {
        let config = Config::default();
        let c = container();
        let broken = ViewportState {
            center_row: 0.0,
            center_col: 0.0,
            cell_size: 0.0,
        };
        assert_eq!(broken.pan(5.0, 5.0, &config), None);
        assert_eq!(broken.screen_to_logical(10.0, 10.0, &c), None);
        assert_eq!(viewport().zoom(f64::NAN, (1.0, 1.0), &c, &config), None);
        assert_eq!(viewport().zoom(0.0, (1.0, 1.0), &c, &config), None);
    }

    #[test]
    fn test_unusable_geometry_is_a_quiet_precondition() {
        let vp = viewport();
        let pending = ContainerGeometry::unavailable();
        assert_eq!(vp.screen_to_logical(10.0, 10.0, &pending), None);
        assert_eq!(vp.logical_to_screen(1.0, 1.0, &pending), None);

        let zero_area = ContainerGeometry::new(0.0, 0.0, 0.0, 600.0);
        assert!(!zero_area.is_usable());
    }
}
