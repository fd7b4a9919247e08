mod config;
mod shared;
mod sim;
mod viewport;

pub use config::Config;
pub use shared::{Shared, SharedLiveSet, SharedViewport};
pub use sim::SimState;
pub use viewport::{ContainerGeometry, ViewportState};
