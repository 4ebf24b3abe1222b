//! Canonical spellings for [`TokenKind`].
//!
//! Punctuation (operators and separators) renders as its literal symbol, keywords as their reserved word, and the
//! remaining kinds (specials, literal classes, sentinels) as an upper-case name. The same spelling is used in
//! diagnostics (“expected `)`, found `EOF`”).
//!
//! ## Notes
//! - Lookup via [`TokenKind::from_spelling`] is **case-sensitive** and only resolves punctuation and keywords: the
//!   upper-case names of literal classes are descriptive, not source text.

use std::fmt;

use super::kinds::TokenKind;

impl TokenKind {
    /// Return the canonical spelling of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            // Special
            TokenKind::Eof => "EOF",
            TokenKind::Null => "null",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Comment => "COMMENT",

            // Literals
            TokenKind::LiteralsBegin => "LITERALS_BEGIN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::BinInt => "BIN_INT",
            TokenKind::HexInt => "HEX_INT",
            TokenKind::Int8Lit => "INT8_LIT",
            TokenKind::Int16Lit => "INT16_LIT",
            TokenKind::Int32Lit => "INT32_LIT",
            TokenKind::Int64Lit => "INT64_LIT",
            TokenKind::UintLit => "UINT_LIT",
            TokenKind::Uint8Lit => "UINT8_LIT",
            TokenKind::Uint16Lit => "UINT16_LIT",
            TokenKind::Uint32Lit => "UINT32_LIT",
            TokenKind::Uint64Lit => "UINT64_LIT",
            TokenKind::Float => "FLOAT",
            TokenKind::Float32Lit => "FLOAT32_LIT",
            TokenKind::Float64Lit => "FLOAT64_LIT",
            TokenKind::Float128Lit => "FLOAT128_LIT",
            TokenKind::Imag => "IMAG",
            TokenKind::Rune => "RUNE",
            TokenKind::String => "STRING",
            TokenKind::RawString => "RAW_STRING",
            TokenKind::TripleString => "TRIPLE_STRING",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::LiteralsEnd => "LITERALS_END",

            // Operators
            TokenKind::OperatorsBegin => "OPERATORS_BEGIN",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mult => "*",
            TokenKind::Slash => "/",
            TokenKind::Mod => "%",
            TokenKind::ModMod => "%%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::MultMult => "**",
            TokenKind::SlashSlash => "//",
            TokenKind::AtSign => "@",
            TokenKind::HashSign => "#",
            TokenKind::Question => "?",
            TokenKind::Tilda => "~",

            TokenKind::ComparisonBegin => "COMPARISON_BEGIN",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThanOrEqualTo => ">=",
            TokenKind::LessThanOrEqualTo => "<=",
            TokenKind::EqualsEquals => "==",
            TokenKind::ExclamationEquals => "!=",
            TokenKind::ComparisonEnd => "COMPARISON_END",

            TokenKind::AssignmentBegin => "ASSIGNMENT_BEGIN",
            TokenKind::Equals => "=",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::MultEquals => "*=",
            TokenKind::SlashEquals => "/=",
            TokenKind::ModEquals => "%=",
            TokenKind::AndEquals => "&=",
            TokenKind::OrEquals => "|=",
            TokenKind::XorEquals => "^=",
            TokenKind::LbitshiftEquals => "<<=",
            TokenKind::RbitshiftEquals => ">>=",
            TokenKind::AssignmentEnd => "ASSIGNMENT_END",

            TokenKind::ArrowBegin => "ARROW_BEGIN",
            TokenKind::EqualsArrow => "=>",
            TokenKind::RArrow => "->",
            TokenKind::LArrow => "<-",
            TokenKind::ArrowEnd => "ARROW_END",

            TokenKind::DelimitersBegin => "DELIMITERS_BEGIN",
            TokenKind::LSquareBrack => "[",
            TokenKind::RSquareBrack => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::DelimitersEnd => "DELIMITERS_END",

            TokenKind::BitwiseBegin => "BITWISE_BEGIN",
            TokenKind::Lbitshift => "<<",
            TokenKind::Rbitshift => ">>",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Exclamation => "!",
            TokenKind::Xor => "^",
            TokenKind::AndNot => "&^",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::BitwiseEnd => "BITWISE_END",
            TokenKind::OperatorsEnd => "OPERATORS_END",

            // Separators
            TokenKind::SeparatorsBegin => "SEPARATORS_BEGIN",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DDot => "..",
            TokenKind::Ellipsis => "...",
            TokenKind::Backslash => "\\",
            TokenKind::SeparatorsEnd => "SEPARATORS_END",

            // Keywords
            TokenKind::KeywordsBegin => "KEYWORDS_BEGIN",
            TokenKind::Align => "align",
            TokenKind::Any => "any",
            TokenKind::As => "as",
            TokenKind::Await => "await",
            TokenKind::Begin => "begin",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Cast => "cast",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Do => "do",
            TokenKind::Decl => "decl",
            TokenKind::Default => "default",
            TokenKind::Defer => "defer",
            TokenKind::Enum => "enum",
            TokenKind::Else => "else",
            TokenKind::Elseif => "elseif",
            TokenKind::Except => "except",
            TokenKind::Export => "export",
            TokenKind::Extern => "extern",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::From => "from",
            TokenKind::Func => "func",
            TokenKind::Global => "global",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Include => "include",
            TokenKind::Inline => "inline",
            TokenKind::Isa => "isa",
            TokenKind::Macro => "macro",
            TokenKind::Map => "map",
            TokenKind::Match => "match",
            TokenKind::Mixin => "mixin",
            TokenKind::Module => "module",
            TokenKind::Mutable => "mutable",
            TokenKind::NoInline => "noinline",
            TokenKind::Not => "not",
            TokenKind::NotIn => "notin",
            TokenKind::Raise => "raise",
            TokenKind::Range => "range",
            TokenKind::Return => "return",
            TokenKind::Struct => "struct",
            TokenKind::Try => "try",
            TokenKind::Tuple => "tuple",
            TokenKind::Type => "type",
            TokenKind::Typeof => "typeof",
            TokenKind::Union => "union",
            TokenKind::Unreachable => "unreachable",
            TokenKind::Use => "use",
            TokenKind::Volatile => "volatile",
            TokenKind::When => "when",
            TokenKind::Where => "where",
            TokenKind::While => "while",
            TokenKind::KeywordsEnd => "KEYWORDS_END",
        }
    }

    /// Return `true` if the spelling of this kind is source text (punctuation, keywords, `true`/`false`/`null`).
    pub const fn has_source_spelling(self) -> bool {
        self.is_operator()
            || self.is_separator()
            || self.is_keyword()
            || matches!(self, TokenKind::True | TokenKind::False | TokenKind::Null)
    }

    /// Resolve source text to the kind it spells, if it is punctuation, a keyword, or `true`/`false`/`null`.
    ///
    /// ## Examples
    /// ```rust
    /// use adorad_core::lang::kinds::TokenKind;
    ///
    /// assert_eq!(TokenKind::from_spelling("<<="), Some(TokenKind::LbitshiftEquals));
    /// assert_eq!(TokenKind::from_spelling("while"), Some(TokenKind::While));
    /// assert_eq!(TokenKind::from_spelling("IDENTIFIER"), None);
    /// ```
    pub fn from_spelling(text: &str) -> Option<TokenKind> {
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.has_source_spelling() && kind.as_str() == text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn punctuation_round_trips_through_spelling() {
        for &kind in TokenKind::ALL {
            if kind.is_operator() || kind.is_separator() {
                assert_eq!(TokenKind::from_spelling(kind.as_str()), Some(kind), "{kind:?}");
            }
        }
    }

    #[test]
    fn source_spellings_are_unique() {
        let mut seen: HashMap<&'static str, TokenKind> = HashMap::new();
        for &kind in TokenKind::ALL {
            if let Some(prev) = seen.insert(kind.as_str(), kind) {
                panic!("duplicate spelling {:?}: {:?} and {:?}", kind.as_str(), prev, kind);
            }
        }
    }

    #[test]
    fn comma_spells_as_comma() {
        assert_eq!(TokenKind::Comma.to_string(), ",");
    }

    #[test]
    fn literal_class_names_do_not_resolve() {
        assert_eq!(TokenKind::from_spelling("STRING"), None);
        assert_eq!(TokenKind::from_spelling("EOF"), None);
        assert_eq!(TokenKind::from_spelling("true"), Some(TokenKind::True));
        assert_eq!(TokenKind::from_spelling("null"), Some(TokenKind::Null));
    }
}
