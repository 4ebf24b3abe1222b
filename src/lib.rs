#![forbid(unsafe_code)]
//! Adorad Programming Language front end
//!
//! This crate ties the token vocabulary (`adorad_core`) and the syntax front end (`adorad_syntax`) together and
//! parses batches of files in parallel.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Nothing in the workspace
//!   terminates the process on a grammar violation; every failure is a [`diagnostics::ParseError`].
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//! ```rust
//! use adorad::{Frontend, FrontendConfig, SourceUnit};
//!
//! let frontend = Frontend::new(FrontendConfig::new().with_jobs(1)).unwrap();
//! let report = frontend.parse_files(&[
//!     SourceUnit::from_words("main.ad", "func main ( ) { return ; }"),
//!     SourceUnit::from_words("broken.ad", "x = ;"),
//! ]);
//! assert_eq!(report.files().count(), 1);
//! assert_eq!(report.error_count(), 1);
//! ```

pub mod config;
pub mod frontend;
pub mod version;

pub use adorad_core::lang;
pub use adorad_syntax::{ast, diagnostics, location, parser, token};

pub use config::FrontendConfig;
pub use frontend::{FileDiagnostics, Frontend, FrontendError, ParseReport, SourceUnit};
