//! Parse diagnostics.
//!
//! Every grammar violation becomes a [`ParseError`] value; nothing in the parser panics or terminates the process.
//! Errors render as a single line (`file:line:column: expected `)`, found `EOF``) through `Display`, and carry a
//! labeled byte span plus a stable code for [`miette`] reports.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::location::Location;
use crate::token::{Token, TokenKind};

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token kind (`expect` failures).
    Token(TokenKind),
    Expression,
    Statement,
    Declaration,
    Type,
    Identifier,
    AssignmentOperator,
    /// `name = value` after an earlier keyword argument.
    KeywordArgument,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "`{kind}`"),
            Expected::Expression => f.write_str("an expression"),
            Expected::Statement => f.write_str("a statement"),
            Expected::Declaration => f.write_str("a declaration"),
            Expected::Type => f.write_str("a type"),
            Expected::Identifier => f.write_str("an identifier"),
            Expected::AssignmentOperator => f.write_str("an assignment operator"),
            Expected::KeywordArgument => f.write_str("a keyword argument"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error("{location}: expected {expected}, found `{found}`")]
    #[diagnostic(code(adorad::parse::unexpected_token))]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        location: Location,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("{location}: illegal token `{text}`")]
    #[diagnostic(code(adorad::parse::illegal_token), help("the scanner could not recognize this lexeme"))]
    IllegalToken {
        text: String,
        location: Location,
        #[label("not a valid token")]
        span: SourceSpan,
    },

    #[error("{location}: expected {expected}, found end of input")]
    #[diagnostic(code(adorad::parse::premature_end_of_input))]
    PrematureEndOfInput {
        expected: Expected,
        location: Location,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("{location}: `{kind}` literals are not supported")]
    #[diagnostic(code(adorad::parse::unsupported_literal))]
    UnsupportedLiteral {
        kind: TokenKind,
        location: Location,
        #[label("unsupported literal")]
        span: SourceSpan,
    },

    #[error("{location}: nesting is too deep")]
    #[diagnostic(code(adorad::parse::nesting_too_deep), help("break the nested construct up into smaller parts"))]
    NestingTooDeep {
        location: Location,
        #[label("nested too deeply")]
        span: SourceSpan,
    },

    #[error("token sequence must end with exactly one end-of-input token")]
    #[diagnostic(code(adorad::parse::missing_end_of_input))]
    MissingEndOfInput,
}

impl ParseError {
    /// `expected` was required but `found` is the current token.
    pub fn unexpected(expected: Expected, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            found: found.kind,
            location: found.location(),
            span: found.span(),
        }
    }

    pub fn illegal(token: &Token) -> Self {
        ParseError::IllegalToken {
            text: token.text.clone(),
            location: token.location(),
            span: token.span(),
        }
    }

    pub fn premature_end(expected: Expected, eof: &Token) -> Self {
        ParseError::PrematureEndOfInput {
            expected,
            location: eof.location(),
            span: eof.span(),
        }
    }

    pub fn unsupported_literal(token: &Token) -> Self {
        ParseError::UnsupportedLiteral {
            kind: token.kind,
            location: token.location(),
            span: token.span(),
        }
    }

    pub fn nesting_too_deep(token: &Token) -> Self {
        ParseError::NestingTooDeep {
            location: token.location(),
            span: token.span(),
        }
    }

    /// Source location of the error, if it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::IllegalToken { location, .. }
            | ParseError::PrematureEndOfInput { location, .. }
            | ParseError::UnsupportedLiteral { location, .. }
            | ParseError::NestingTooDeep { location, .. } => Some(location),
            ParseError::MissingEndOfInput => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Arc::from("main.ad"), 10, 2, 4)
    }

    #[test]
    fn unexpected_token_renders_spellings_and_position() {
        let err = ParseError::unexpected(Expected::Token(TokenKind::RParen), &Token::eof(Arc::from("main.ad"), 8, 1, 8));
        insta::assert_snapshot!(err.to_string(), @"main.ad:1:8: expected `)`, found `EOF`");
    }

    #[test]
    fn construct_expectations_render_as_prose() {
        let err = ParseError::unexpected(Expected::Expression, &token(TokenKind::Semicolon, ";"));
        insta::assert_snapshot!(err.to_string(), @"main.ad:2:4: expected an expression, found `;`");
    }

    #[test]
    fn illegal_and_unsupported_render_their_subject() {
        let err = ParseError::illegal(&token(TokenKind::Illegal, "$"));
        assert_eq!(err.to_string(), "main.ad:2:4: illegal token `$`");
        let err = ParseError::unsupported_literal(&token(TokenKind::Imag, "3i"));
        assert_eq!(err.to_string(), "main.ad:2:4: `IMAG` literals are not supported");
    }

    #[test]
    fn diagnostics_carry_codes_and_spans() {
        let err = ParseError::illegal(&token(TokenKind::Illegal, "$$"));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("adorad::parse::illegal_token"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 10);
        assert_eq!(labels[0].len(), 2);
        assert!(ParseError::MissingEndOfInput.location().is_none());
    }

    #[test]
    fn nesting_error_points_at_the_token() {
        let err = ParseError::nesting_too_deep(&token(TokenKind::LParen, "("));
        insta::assert_snapshot!(err.to_string(), @"main.ad:2:4: nesting is too deep");
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("adorad::parse::nesting_too_deep"));
        assert_eq!(err.location().map(|l| l.line), Some(2));
    }
}
