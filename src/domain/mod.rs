mod coord;
mod live_set;
mod patterns;
mod step_mode;
pub mod engine;

pub use coord::{CellKey, Coord, CoordError, COORD_BOUND, clamp_fractional};
pub use engine::{EngineError, MAX_RANDOMIZE_CELLS};
pub use live_set::LiveSet;
pub use patterns::{Pattern, presets};
pub use step_mode::StepMode;
