//! Adorad language vocabulary.
//!
//! This module is the “front door” for lexical vocabulary: every token kind the scanner may produce, the families
//! those kinds belong to, and how each kind is spelled.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler/tooling. Callers work with the
//! stable [`kinds::TokenKind`] enum and ask it questions (`is_keyword()`, `as_str()`) instead of comparing text.
//!
//! ## Examples
//! ```rust
//! use adorad_core::lang::kinds::TokenKind;
//!
//! assert_eq!(TokenKind::from_spelling("func"), Some(TokenKind::Func));
//! assert_eq!(TokenKind::Func.as_str(), "func");
//! assert!(TokenKind::Func.is_keyword());
//! ```

pub mod classify;
pub mod kinds;
pub mod spelling;
