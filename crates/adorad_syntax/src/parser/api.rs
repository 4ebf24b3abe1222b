/// Parse a token stream into its top-level items.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: a token sequence terminated by exactly one [`TokenKind::Eof`].
///
/// ## Errors
/// Returns `Err(Vec<ParseError>)` with every diagnostic, in source order, if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Vec<AstNode>, Vec<ParseError>> {
    parse_with_options(tokens, ParseOptions::default())
}

/// Like [`parse`], with explicit error-recovery settings.
pub fn parse_with_options(tokens: &[Token], options: ParseOptions) -> Result<Vec<AstNode>, Vec<ParseError>> {
    Parser::with_options(tokens, options).map_err(|e| vec![e])?.parse()
}

/// Parse one file's token stream into an [`AstFile`].
///
/// File metadata (module name, test flag, size) is derived from `path`, a leading `module` statement and the
/// end-of-input token's position.
#[tracing::instrument(skip_all, fields(path = %path.display(), token_count = tokens.len()))]
pub fn parse_file(path: &Path, tokens: &[Token], options: ParseOptions) -> Result<AstFile, Vec<ParseError>> {
    let mut parser = Parser::with_options(tokens, options).map_err(|e| vec![e])?;
    let eof = parser.eof_location();
    let items = parser.parse()?;
    Ok(AstFile::new(path, &eof, items))
}
