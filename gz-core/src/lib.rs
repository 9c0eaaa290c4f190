//! gz-core: board geometry, colors, and configuration for the gA0ban engine.

pub mod board;
pub mod config;

pub use board::{Color, Vertex, BOARD_SIZE, NUM_INTERSECTIONS, PASS};
pub use config::{Config, ConfigError, SearchConfig, TelemetryConfig};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
