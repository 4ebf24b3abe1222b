/// Token-stream primitives and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`, `advance_if`, `expect`)
/// - Diagnostics construction for the current token
/// - Error recovery (`recover`, `synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Primitives
    // ========================================================================

    /// Kind of the current token, without consuming it.
    pub fn peek(&self) -> TokenKind {
        self.current().kind
    }

    /// Consume the current token and return its kind.
    ///
    /// ## Notes
    /// - At end-of-input this is a no-op that returns [`TokenKind::Eof`]: the cursor never moves past the final token.
    pub fn advance(&mut self) -> TokenKind {
        self.bump().kind
    }

    /// Consume the current token only if it is `kind`.
    pub fn advance_if(&mut self, kind: TokenKind) -> Option<TokenKind> {
        if self.check(kind) { Some(self.advance()) } else { None }
    }

    /// Consume the current token if it is `kind`, otherwise fail without moving the cursor.
    ///
    /// ## Errors
    /// [`ParseError::UnexpectedToken`] naming `kind` and the kind actually found, at the current token's location.
    pub fn expect(&mut self, kind: TokenKind) -> Result<TokenKind, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(Expected::Token(kind)))
        }
    }

    /// Index of the current token in the input slice.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn current(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    /// Advance to the next non-trivia token and return the token we just consumed.
    fn bump(&mut self) -> &'a Token {
        let token = self.current();
        if !token.is_eof() {
            self.pos += 1;
            self.skip_trivia();
        }
        token
    }

    fn skip_trivia(&mut self) {
        while self.tokens.get(self.pos).is_some_and(Token::is_trivia) {
            self.pos += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Consume the end-of-input token once every item has been parsed.
    fn finish(&mut self) {
        if self.is_at_end() {
            self.pos = self.tokens.len();
        }
    }

    fn loc(&self) -> Location {
        self.current().location()
    }

    fn unexpected(&self, expected: Expected) -> ParseError {
        ParseError::unexpected(expected, self.current())
    }

    /// Error for a construct that cannot start at the current token.
    ///
    /// End-of-input and illegal tokens get their own diagnostics; anything else is an unexpected token.
    fn construct_error(&self, expected: Expected) -> ParseError {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => ParseError::premature_end(expected, token),
            TokenKind::Illegal => ParseError::illegal(token),
            _ => ParseError::unexpected(expected, token),
        }
    }

    /// Kind of the first non-trivia token after the current one.
    fn peek_next(&self) -> TokenKind {
        self.tokens[self.pos.min(self.tokens.len() - 1)..]
            .iter()
            .skip(1)
            .find(|t| !t.is_trivia())
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Run a recursive routine one nesting level deeper.
    ///
    /// Fails with [`ParseError::NestingTooDeep`] at the current token once [`MAX_NESTING_DEPTH`] is reached, and
    /// moves onto a heap-allocated stack segment when the thread's own stack runs low.
    fn nested<T>(&mut self, routine: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::nesting_too_deep(self.current()));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || routine(self));
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Record `err` and skip to the next statement boundary, or hand `err` back if the parse must stop.
    fn recover(&mut self, err: ParseError, start: usize) -> Result<(), ParseError> {
        let limit_reached = self.options.max_errors != 0 && self.errors.len() + 1 >= self.options.max_errors;
        if !self.options.recover || limit_reached {
            return Err(err);
        }
        tracing::debug!(error = %err, cursor = self.pos, "recovering from parse error");
        self.errors.push(err);
        self.synchronize();
        if self.pos == start {
            self.advance();
        }
        Ok(())
    }

    /// Skip to a statement boundary: past the next `;`, or up to an unmatched `}` or end-of-input.
    ///
    /// A brace-delimited group is skipped as a unit; closing it also ends the skip.
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }
}
