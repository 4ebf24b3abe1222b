//! Define the closed set of token kinds for the Adorad language.
//!
//! Kinds are laid out in **bands**: every family of kinds (literals, operators, separators, keywords) is a contiguous
//! ordinal range delimited by a `*Begin` and a `*End` sentinel. Classifying a kind is then a pair of integer
//! comparisons against the sentinels (see [`Band::contains`]).
//!
//! ## Notes
//! - Sentinels are part of the enum so that the band layout is visible in one place, but they are never produced by
//!   a scanner and never accepted by the parser. [`TokenKind::is_sentinel`] identifies them.
//! - The operator band nests five sub-bands (comparison, assignment, arrow, delimiter, bitwise). Nested sentinels
//!   are still inside the operator band's ordinal range, so every *real* kind inside a sub-band is also an operator.
//! - Band ordering is checked at compile time at the bottom of this file. Adding a kind in the wrong place breaks
//!   the build instead of silently changing classification.
//!
//! ## Examples
//! ```rust
//! use adorad_core::lang::kinds::{Family, TokenKind};
//!
//! assert_eq!(TokenKind::Plus.family(), Some(Family::Operator));
//! assert_eq!(TokenKind::LiteralsBegin.family(), None);
//! ```

macro_rules! token_kinds {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        /// Kind of a lexical token.
        ///
        /// ## Notes
        /// - The discriminant order is significant: classification is band-based (see module docs).
        /// - The canonical spelling of each kind is available via [`TokenKind::as_str`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum TokenKind {
            $($(#[$meta])* $name),*
        }

        impl TokenKind {
            /// Every kind, sentinels included, in ordinal order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$name),*];
        }
    };
}

token_kinds! {
    // ========== Special (outside every band) ==========
    /// End of input. Exactly one terminates every token sequence.
    Eof,
    /// The `null` value (also the kind of an absent token).
    Null,
    /// A lexeme the scanner could not recognize.
    Illegal,
    Comment,

    // ========== Literals ==========
    LiteralsBegin,
    Identifier,
    Integer,
    BinInt,
    HexInt,
    Int8Lit,
    Int16Lit,
    Int32Lit,
    Int64Lit,
    UintLit,
    Uint8Lit,
    Uint16Lit,
    Uint32Lit,
    Uint64Lit,
    Float,
    Float32Lit,
    Float64Lit,
    Float128Lit,
    Imag,
    Rune,
    String,
    RawString,
    TripleString,
    True,
    False,
    LiteralsEnd,

    // ========== Operators ==========
    OperatorsBegin,
    Plus,
    Minus,
    Mult,
    Slash,
    Mod,
    ModMod,
    PlusPlus,
    MinusMinus,
    MultMult,
    SlashSlash,
    AtSign,
    HashSign,
    Question,
    Tilda,

    ComparisonBegin,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
    EqualsEquals,
    ExclamationEquals,
    ComparisonEnd,

    AssignmentBegin,
    Equals,
    PlusEquals,
    MinusEquals,
    MultEquals,
    SlashEquals,
    ModEquals,
    AndEquals,
    OrEquals,
    XorEquals,
    LbitshiftEquals,
    RbitshiftEquals,
    AssignmentEnd,

    ArrowBegin,
    EqualsArrow,
    RArrow,
    LArrow,
    ArrowEnd,

    DelimitersBegin,
    LSquareBrack,
    RSquareBrack,
    LBrace,
    RBrace,
    LParen,
    RParen,
    DelimitersEnd,

    BitwiseBegin,
    Lbitshift,
    Rbitshift,
    And,
    Or,
    Exclamation,
    Xor,
    AndNot,
    AndAnd,
    OrOr,
    BitwiseEnd,
    OperatorsEnd,

    // ========== Separators ==========
    SeparatorsBegin,
    Colon,
    Semicolon,
    Comma,
    Dot,
    DDot,
    Ellipsis,
    Backslash,
    SeparatorsEnd,

    // ========== Keywords ==========
    KeywordsBegin,
    Align,
    Any,
    As,
    Await,
    Begin,
    Break,
    Case,
    Cast,
    Catch,
    Class,
    Const,
    Continue,
    Do,
    Decl,
    Default,
    Defer,
    Enum,
    Else,
    Elseif,
    Except,
    Export,
    Extern,
    Finally,
    For,
    From,
    Func,
    Global,
    If,
    Import,
    In,
    Include,
    Inline,
    Isa,
    Macro,
    Map,
    Match,
    Mixin,
    Module,
    Mutable,
    NoInline,
    Not,
    NotIn,
    Raise,
    Range,
    Return,
    Struct,
    Try,
    Tuple,
    Type,
    Typeof,
    Union,
    Unreachable,
    Use,
    Volatile,
    When,
    Where,
    While,
    KeywordsEnd,
}

/// Top-level family of a token kind.
///
/// Sub-bands of the operator band (comparison, assignment, ...) are not families of their own; query them with the
/// dedicated predicates in [`crate::lang::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Special,
    Literal,
    Operator,
    Separator,
    Keyword,
}

/// A contiguous ordinal range of kinds, delimited by two sentinels (both exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub begin: TokenKind,
    pub end: TokenKind,
}

impl Band {
    pub const fn new(begin: TokenKind, end: TokenKind) -> Self {
        Self { begin, end }
    }

    /// Return `true` if `kind` lies strictly between the band's sentinels.
    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        let k = kind.ordinal();
        k > self.begin.ordinal() && k < self.end.ordinal()
    }

    /// Return `true` if `inner` is nested strictly inside `self`.
    pub const fn encloses(self, inner: Band) -> bool {
        self.contains(inner.begin) && self.contains(inner.end) && inner.begin.ordinal() < inner.end.ordinal()
    }
}

pub const LITERALS: Band = Band::new(TokenKind::LiteralsBegin, TokenKind::LiteralsEnd);
pub const OPERATORS: Band = Band::new(TokenKind::OperatorsBegin, TokenKind::OperatorsEnd);
pub const COMPARISON: Band = Band::new(TokenKind::ComparisonBegin, TokenKind::ComparisonEnd);
pub const ASSIGNMENT: Band = Band::new(TokenKind::AssignmentBegin, TokenKind::AssignmentEnd);
pub const ARROW: Band = Band::new(TokenKind::ArrowBegin, TokenKind::ArrowEnd);
pub const DELIMITERS: Band = Band::new(TokenKind::DelimitersBegin, TokenKind::DelimitersEnd);
pub const BITWISE: Band = Band::new(TokenKind::BitwiseBegin, TokenKind::BitwiseEnd);
pub const SEPARATORS: Band = Band::new(TokenKind::SeparatorsBegin, TokenKind::SeparatorsEnd);
pub const KEYWORDS: Band = Band::new(TokenKind::KeywordsBegin, TokenKind::KeywordsEnd);

/// Top-level bands in ordinal order.
pub const TOP_LEVEL_BANDS: [Band; 4] = [LITERALS, OPERATORS, SEPARATORS, KEYWORDS];

/// Sub-bands of [`OPERATORS`] in ordinal order.
pub const OPERATOR_SUB_BANDS: [Band; 5] = [COMPARISON, ASSIGNMENT, ARROW, DELIMITERS, BITWISE];

impl TokenKind {
    /// Ordinal of this kind (its discriminant).
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TokenKind::ordinal`].
    pub fn from_ordinal(ordinal: u8) -> Option<TokenKind> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Return `true` for band sentinels, which are never valid token kinds.
    pub const fn is_sentinel(self) -> bool {
        matches!(
            self,
            TokenKind::LiteralsBegin
                | TokenKind::LiteralsEnd
                | TokenKind::OperatorsBegin
                | TokenKind::OperatorsEnd
                | TokenKind::ComparisonBegin
                | TokenKind::ComparisonEnd
                | TokenKind::AssignmentBegin
                | TokenKind::AssignmentEnd
                | TokenKind::ArrowBegin
                | TokenKind::ArrowEnd
                | TokenKind::DelimitersBegin
                | TokenKind::DelimitersEnd
                | TokenKind::BitwiseBegin
                | TokenKind::BitwiseEnd
                | TokenKind::SeparatorsBegin
                | TokenKind::SeparatorsEnd
                | TokenKind::KeywordsBegin
                | TokenKind::KeywordsEnd
        )
    }

    /// Top-level family of this kind, or `None` for sentinels.
    pub const fn family(self) -> Option<Family> {
        if self.is_sentinel() {
            None
        } else if self.is_special() {
            Some(Family::Special)
        } else if LITERALS.contains(self) {
            Some(Family::Literal)
        } else if OPERATORS.contains(self) {
            Some(Family::Operator)
        } else if SEPARATORS.contains(self) {
            Some(Family::Separator)
        } else if KEYWORDS.contains(self) {
            Some(Family::Keyword)
        } else {
            None
        }
    }
}

// Band layout guardrails: top-level bands are ordered and disjoint, operator sub-bands are ordered, disjoint and
// nested inside the operator band, and the specials sit before the first band.
const _: () = {
    let mut i = 1;
    while i < TOP_LEVEL_BANDS.len() {
        assert!(TOP_LEVEL_BANDS[i - 1].end.ordinal() < TOP_LEVEL_BANDS[i].begin.ordinal());
        i += 1;
    }
    let mut j = 0;
    while j < OPERATOR_SUB_BANDS.len() {
        assert!(OPERATORS.encloses(OPERATOR_SUB_BANDS[j]));
        if j > 0 {
            assert!(OPERATOR_SUB_BANDS[j - 1].end.ordinal() < OPERATOR_SUB_BANDS[j].begin.ordinal());
        }
        j += 1;
    }
    assert!(TokenKind::Comment.ordinal() < LITERALS.begin.ordinal());
    assert!(TokenKind::ALL.len() == TokenKind::KeywordsEnd.ordinal() as usize + 1);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_ordinal_order() {
        for (i, kind) in TokenKind::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal() as usize, i, "{kind:?} is out of place in TokenKind::ALL");
        }
    }

    #[test]
    fn from_ordinal_inverts_ordinal() {
        for &kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_ordinal(kind.ordinal()), Some(kind));
        }
        assert_eq!(TokenKind::from_ordinal(u8::MAX), None);
    }

    #[test]
    fn sentinels_have_no_family() {
        for band in TOP_LEVEL_BANDS.iter().chain(OPERATOR_SUB_BANDS.iter()) {
            assert!(band.begin.is_sentinel());
            assert!(band.end.is_sentinel());
            assert_eq!(band.begin.family(), None);
            assert_eq!(band.end.family(), None);
        }
    }

    #[test]
    fn nested_sub_band_members_are_operators() {
        assert_eq!(TokenKind::EqualsEquals.family(), Some(Family::Operator));
        assert_eq!(TokenKind::PlusEquals.family(), Some(Family::Operator));
        assert_eq!(TokenKind::RParen.family(), Some(Family::Operator));
        assert_eq!(TokenKind::OrOr.family(), Some(Family::Operator));
    }

    #[test]
    fn specials_are_outside_every_band() {
        for kind in [TokenKind::Eof, TokenKind::Null, TokenKind::Illegal, TokenKind::Comment] {
            assert_eq!(kind.family(), Some(Family::Special));
            assert!(TOP_LEVEL_BANDS.iter().all(|band| !band.contains(kind)));
        }
    }
}
