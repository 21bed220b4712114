// Adapters - External system implementations

pub mod simulated_surface;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use simulated_surface::{SimulatedSurfaceAdapter, SimulatedSurfaceSettings};
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::init_logging;
