//! Shared syntax frontend for the Adorad language: tokens, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler and future tooling (formatters,
//! linters).
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not scan source text, resolve names, or check types.
//! - Vocabulary identity (token kinds, bands, spellings) comes from `adorad_core::lang`.
//!
//! ## Examples
//! ```rust
//! use adorad_syntax::{ast::AstNodeKind, parser, token};
//!
//! let tokens = token::from_words("main.ad", "x = 1 + 2 ;");
//! let items = parser::parse(&tokens).unwrap();
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].kind_tag(), AstNodeKind::Assignment);
//! ```
//!
//! ## See also
//! - `adorad_core::lang` for the token-kind vocabulary and classification predicates.

pub mod ast;
pub mod diagnostics;
pub mod location;
pub mod parser;
pub mod token;
