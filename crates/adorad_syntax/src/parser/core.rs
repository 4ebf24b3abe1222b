/// Parser core types and entrypoint.
///
/// This chunk defines [`ParseOptions`], the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Error-recovery settings for one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep parsing after a grammar violation (skipping to the next statement boundary).
    pub recover: bool,
    /// Stop after this many diagnostics (0 = unlimited).
    pub max_errors: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover: true,
            max_errors: 100,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first grammar violation.
    pub fn fail_fast() -> Self {
        Self {
            recover: false,
            max_errors: 1,
        }
    }

    pub fn with_recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Maximum nesting of expressions, blocks and types before the parser reports
/// [`ParseError::NestingTooDeep`]. A parenthesized operand counts two levels (the expression and its prefix).
pub const MAX_NESTING_DEPTH: usize = 256;

/// Remaining stack below which a nested routine continues on a fresh heap-allocated segment.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT_SIZE: usize = 1024 * 1024;

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass over a borrowed token slice; it never backtracks.
/// - The slice is validated on construction to end with exactly one [`TokenKind::Eof`], so the cursor can always
///   rest on a real token.
/// - Comment tokens are trivia: the cursor never rests on one.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<ParseError>,
    options: ParseOptions,
    /// Current nesting depth (see [`MAX_NESTING_DEPTH`]).
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream with default options.
    ///
    /// ## Errors
    /// Returns [`ParseError::MissingEndOfInput`] unless the last token, and only the last token, is end-of-input.
    pub fn new(tokens: &'a [Token]) -> Result<Self, ParseError> {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: &'a [Token], options: ParseOptions) -> Result<Self, ParseError> {
        let eof_count = tokens.iter().filter(|t| t.is_eof()).count();
        if eof_count != 1 || !tokens.last().is_some_and(Token::is_eof) {
            return Err(ParseError::MissingEndOfInput);
        }
        let mut parser = Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            options,
            depth: 0,
        };
        parser.skip_trivia();
        Ok(parser)
    }

    /// Parse the entire token stream into its top-level items.
    ///
    /// ## Errors
    /// Returns every [`ParseError`] recorded, in source order. With `recover` enabled the parser skips to the next
    /// statement boundary after each error and keeps going until `max_errors` is reached.
    ///
    /// After a successful parse the end-of-input token has been consumed, so [`Parser::cursor`] equals the token
    /// count.
    pub fn parse(&mut self) -> Result<Vec<AstNode>, Vec<ParseError>> {
        let mut items = Vec::new();

        while !self.is_at_end() {
            let start = self.pos;
            match self.item() {
                Ok(item) => items.push(item),
                Err(e) => {
                    if let Err(fatal) = self.recover(e, start) {
                        self.errors.push(fatal);
                        break;
                    }
                }
            }
        }

        if self.errors.is_empty() {
            self.finish();
            Ok(items)
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    /// Location of the end-of-input token.
    pub fn eof_location(&self) -> Location {
        self.tokens[self.tokens.len() - 1].location()
    }
}
