//! Provide the canonical token vocabulary for the Adorad compiler and its tooling.
//!
//! This crate is intentionally small and dependency-free. It owns the closed set of token kinds, the band layout that
//! partitions them into families, and the canonical spelling of every kind.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no AST types.
//! - The scanner and the parser both speak [`lang::kinds::TokenKind`]; classification lives next to the enum so the
//!   two can never drift apart.

pub mod lang;

pub use lang::kinds::{Family, TokenKind};
