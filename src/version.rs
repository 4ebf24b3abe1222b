//! Adorad front-end version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The Adorad front-end version string (for example, `0.1.0-alpha.1`).
pub const ADORAD_VERSION: &str = env!("CARGO_PKG_VERSION");
