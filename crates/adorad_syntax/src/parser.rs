//! Parser for the Adorad programming language
//!
//! Converts a token stream into a list of top-level [`AstNode`]s by recursive descent with one token of lookahead
//! (two for keyword arguments and `test` items).
//!
//! ## Examples
//!
//! ```rust
//! use adorad_syntax::{parser, token};
//!
//! let tokens = token::from_words("demo.ad", "func main ( ) { return ; }");
//! let items = parser::parse(&tokens).unwrap();
//! assert_eq!(items.len(), 1);
//!
//! let tokens = token::from_words("demo.ad", "foo ( 1 , 2");
//! let errors = parser::parse(&tokens).unwrap_err();
//! assert_eq!(errors[0].to_string(), "demo.ad:1:11: expected `)`, found `EOF`");
//! ```

use std::path::Path;

use crate::ast::*;
use crate::diagnostics::{Expected, ParseError};
use crate::location::Location;
use crate::token::{Token, TokenKind};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
