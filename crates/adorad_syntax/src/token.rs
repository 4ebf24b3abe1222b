//! Tokens as delivered by the scanner.
//!
//! The scanner itself lives outside this crate; the parser only needs an ordered token sequence terminated by exactly
//! one [`TokenKind::Eof`]. [`from_words`] builds such a sequence from whitespace-separated spellings for fixtures,
//! fuzzing and tooling.

use std::sync::Arc;

use miette::SourceSpan;

use crate::location::Location;

pub use adorad_core::lang::kinds::TokenKind;

/// One classified lexical unit.
///
/// Offsets, lengths and positions are `u32`; values beyond `u32::MAX` (inputs of 4 GiB or more) saturate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub byte_offset: u32,
    pub byte_length: u32,
    /// 1-based.
    pub line: u32,
    /// 0-based.
    pub column: u32,
    pub utf8_length: u32,
    pub file_name: Arc<str>,
    pub text: String,
}

impl Token {
    /// Create a token whose byte and UTF-8 lengths are taken from `text`.
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        file_name: Arc<str>,
        byte_offset: u32,
        line: u32,
        column: u32,
    ) -> Self {
        let text = text.into();
        Self {
            kind,
            byte_offset,
            byte_length: saturating_u32(text.len()),
            line,
            column,
            utf8_length: saturating_u32(text.chars().count()),
            file_name,
            text,
        }
    }

    /// The end-of-input token.
    pub fn eof(file_name: Arc<str>, byte_offset: u32, line: u32, column: u32) -> Self {
        Self::new(TokenKind::Eof, "", file_name, byte_offset, line, column)
    }

    pub fn location(&self) -> Location {
        Location::new(Arc::clone(&self.file_name), self.byte_offset, self.line, self.column)
    }

    /// Byte span of the token, for diagnostics labels.
    pub fn span(&self) -> SourceSpan {
        (self.byte_offset as usize, self.byte_length as usize).into()
    }

    pub fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }

    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    pub fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }

    pub fn is_separator(&self) -> bool {
        self.kind.is_separator()
    }

    /// Return `true` for tokens the parser steps over (comments).
    pub fn is_trivia(&self) -> bool {
        self.kind.is_comment()
    }
}

/// Build a token sequence from whitespace-separated words.
///
/// Each word is classified on its own: punctuation and keywords by spelling, then numbers (with `0x`/`0b` prefixes
/// and `i8`..`u64`/`f32`/`f64`/`f128`/`u`/`i` suffixes), quoted literals (`"..."`, `r"..."`, `f"..."`, `"""..."""`,
/// `'c'`, `b'c'`), identifiers, and otherwise [`TokenKind::Illegal`]. A single end-of-input token positioned after the
/// last word is always appended.
///
/// ## Notes
/// - This is not a scanner: there is no way to express a literal containing whitespace, and adjacent punctuation
///   must be separated (`foo ( 1 )`, not `foo(1)`).
///
/// ## Examples
/// ```rust
/// use adorad_syntax::token::{from_words, TokenKind};
///
/// let tokens = from_words("demo.ad", "x = 1 ;");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Identifier, TokenKind::Equals, TokenKind::Integer, TokenKind::Semicolon, TokenKind::Eof]
/// );
/// ```
pub fn from_words(file: &str, source: &str) -> Vec<Token> {
    let file: Arc<str> = Arc::from(file);
    let mut tokens = Vec::new();
    let mut line = 1u32;
    let mut column = 0u32;
    let mut word_start: Option<(usize, u32, u32)> = None;

    for (idx, ch) in source.char_indices() {
        if ch.is_whitespace() {
            if let Some((begin, l, c)) = word_start.take() {
                tokens.push(word_token(&file, &source[begin..idx], begin, l, c));
            }
            if ch == '\n' {
                line = line.saturating_add(1);
                column = 0;
            } else {
                column = column.saturating_add(1);
            }
        } else {
            if word_start.is_none() {
                word_start = Some((idx, line, column));
            }
            column = column.saturating_add(1);
        }
    }
    if let Some((begin, l, c)) = word_start {
        tokens.push(word_token(&file, &source[begin..], begin, l, c));
    }

    tokens.push(Token::eof(file, saturating_u32(source.len()), line, column));
    tokens
}

fn word_token(file: &Arc<str>, word: &str, offset: usize, line: u32, column: u32) -> Token {
    Token::new(classify_word(word), word, Arc::clone(file), saturating_u32(offset), line, column)
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn classify_word(word: &str) -> TokenKind {
    if let Some(kind) = TokenKind::from_spelling(word) {
        return kind;
    }
    let mut chars = word.chars();
    let (first, second) = (chars.next(), chars.next());
    match (first, second) {
        (Some(c), _) if c.is_ascii_digit() => classify_number(word),
        (Some('"'), _) if word.starts_with("\"\"\"") => TokenKind::TripleString,
        (Some('"'), _) => TokenKind::String,
        (Some('\''), _) => TokenKind::Rune,
        (Some('r'), Some('"')) => TokenKind::RawString,
        (Some('f'), Some('"')) => TokenKind::String,
        (Some('b'), Some('\'')) => TokenKind::Rune,
        (Some(c), _) if c.is_alphabetic() || c == '_' => {
            if word.chars().all(|c| c.is_alphanumeric() || c == '_') {
                TokenKind::Identifier
            } else {
                TokenKind::Illegal
            }
        }
        _ => TokenKind::Illegal,
    }
}

const NUMBER_SUFFIXES: &[(&str, TokenKind)] = &[
    ("f128", TokenKind::Float128Lit),
    ("i16", TokenKind::Int16Lit),
    ("i32", TokenKind::Int32Lit),
    ("i64", TokenKind::Int64Lit),
    ("u16", TokenKind::Uint16Lit),
    ("u32", TokenKind::Uint32Lit),
    ("u64", TokenKind::Uint64Lit),
    ("f32", TokenKind::Float32Lit),
    ("f64", TokenKind::Float64Lit),
    ("i8", TokenKind::Int8Lit),
    ("u8", TokenKind::Uint8Lit),
    ("u", TokenKind::UintLit),
    ("i", TokenKind::Imag),
];

fn classify_number(word: &str) -> TokenKind {
    if word.starts_with("0x") || word.starts_with("0X") {
        return TokenKind::HexInt;
    }
    if word.starts_with("0b") || word.starts_with("0B") {
        return TokenKind::BinInt;
    }
    for &(suffix, kind) in NUMBER_SUFFIXES {
        if let Some(digits) = word.strip_suffix(suffix) {
            return if is_decimal(digits) { kind } else { TokenKind::Illegal };
        }
    }
    if !is_decimal(word) {
        TokenKind::Illegal
    } else if word.contains(['.', 'e', 'E']) {
        TokenKind::Float
    } else {
        TokenKind::Integer
    }
}

fn is_decimal(digits: &str) -> bool {
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '_' | 'e' | 'E'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        from_words("t.ad", source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let tokens = from_words("t.ad", "");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!((tokens[0].line, tokens[0].column, tokens[0].byte_offset), (1, 0, 0));
    }

    #[test]
    fn positions_follow_lines_and_columns() {
        let tokens = from_words("t.ad", "a\n  bb c");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 0));
        assert_eq!((tokens[1].line, tokens[1].column, tokens[1].byte_offset), (2, 2, 4));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 5));
        let eof = tokens.last().unwrap();
        assert_eq!((eof.line, eof.column, eof.byte_offset), (2, 6, 8));
    }

    #[test]
    fn numbers_are_classified_by_prefix_and_suffix() {
        assert_eq!(
            kinds("1 0x1F 0b10 1.5 2i8 3u64 4u 2.0f64 1.0f128 3i 1x"),
            [
                TokenKind::Integer,
                TokenKind::HexInt,
                TokenKind::BinInt,
                TokenKind::Float,
                TokenKind::Int8Lit,
                TokenKind::Uint64Lit,
                TokenKind::UintLit,
                TokenKind::Float64Lit,
                TokenKind::Float128Lit,
                TokenKind::Imag,
                TokenKind::Illegal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn quoted_literals_keywords_and_identifiers() {
        assert_eq!(
            kinds(r#""hi" r"raw" f"{x}" 'c' b'c' func my_var true null $"#),
            [
                TokenKind::String,
                TokenKind::RawString,
                TokenKind::String,
                TokenKind::Rune,
                TokenKind::Rune,
                TokenKind::Func,
                TokenKind::Identifier,
                TokenKind::True,
                TokenKind::Null,
                TokenKind::Illegal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn oversized_positions_saturate() {
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        assert_eq!(saturating_u32(7), 7);
    }

    #[test]
    fn token_lengths_count_bytes_and_chars() {
        let tokens = from_words("t.ad", "é");
        assert_eq!(tokens[0].byte_length, 2);
        assert_eq!(tokens[0].utf8_length, 1);
        assert_eq!(tokens[0].location().to_string(), "t.ad:1:0");
    }
}
