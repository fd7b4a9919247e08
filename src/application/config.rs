use crate::domain::COORD_BOUND;

/// Numeric tuning surface for the whole core. Plain values, no file format.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Milliseconds between generations while the simulation is running
    pub step_interval_ms: u64,
    /// Unitless multiplier applied to pan deltas
    pub pan_sensitivity: f64,
    /// Smallest on-screen cell size, in display units
    pub min_cell_size: f64,
    /// Largest on-screen cell size, in display units
    pub max_cell_size: f64,
    /// Cell size at startup and on camera reset
    pub initial_cell_size: f64,
    /// Clamp limit for logical coordinates, in cells from the origin
    pub coord_bound: i32,
    /// Half-width of the default randomize region, in cells
    pub randomize_radius: i32,
    /// Per-cell live probability for randomize, in [0, 1]
    pub randomize_density: f64,
    /// Minimum interval between paint-mode toggles during a drag
    pub paint_throttle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_interval_ms: 100,
            pan_sensitivity: 1.0,
            min_cell_size: 2.0,
            max_cell_size: 64.0,
            initial_cell_size: 12.0,
            coord_bound: COORD_BOUND,
            randomize_radius: 40,
            randomize_density: 0.3,
            paint_throttle_ms: 30,
        }
    }
}
