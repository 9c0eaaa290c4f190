//! Benchmark-only crate; see `benches/`.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
