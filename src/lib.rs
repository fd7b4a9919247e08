// Domain layer - Core simulation logic over the sparse infinite plane
pub mod domain;

// Application layer - Camera state, configuration, coordination
pub mod application;

// Infrastructure layer - rendering, input, diagnostics
pub mod diagnostics;
pub mod input;
pub mod rendering;

// Re-exports for convenience
pub use application::{Config, ContainerGeometry, Shared, SharedLiveSet, SharedViewport, SimState, ViewportState};
pub use diagnostics::{Diagnostic, DiagnosticsSink, NullSink, TracingSink};
pub use domain::{Coord, LiveSet, Pattern, StepMode, presets};
pub use input::{GesturePhase, GestureSample, InputCoordinator, MouseDriver};
