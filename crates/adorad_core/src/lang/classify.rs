//! Classification predicates over [`TokenKind`].
//!
//! Every predicate here is a pure, total function of the kind alone. Family predicates compare the kind's ordinal
//! against band sentinels (see [`crate::lang::kinds`]); the remaining predicates are small explicit sets the parser
//! uses to pick a production with one token of lookahead.

use super::kinds::{ARROW, ASSIGNMENT, BITWISE, COMPARISON, DELIMITERS, KEYWORDS, LITERALS, OPERATORS, SEPARATORS};
use super::kinds::TokenKind;

impl TokenKind {
    // ========================================================================
    // Families
    // ========================================================================

    /// End of input, `null`, illegal and comment kinds.
    #[inline]
    pub const fn is_special(self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Null | TokenKind::Illegal | TokenKind::Comment)
    }

    #[inline]
    pub const fn is_literal(self) -> bool {
        LITERALS.contains(self)
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        KEYWORDS.contains(self)
    }

    #[inline]
    pub const fn is_operator(self) -> bool {
        OPERATORS.contains(self) && !self.is_sentinel()
    }

    #[inline]
    pub const fn is_comparison_operator(self) -> bool {
        COMPARISON.contains(self)
    }

    #[inline]
    pub const fn is_assignment_operator(self) -> bool {
        ASSIGNMENT.contains(self)
    }

    #[inline]
    pub const fn is_arrow(self) -> bool {
        ARROW.contains(self)
    }

    #[inline]
    pub const fn is_delimiter(self) -> bool {
        DELIMITERS.contains(self)
    }

    #[inline]
    pub const fn is_bitwise(self) -> bool {
        BITWISE.contains(self)
    }

    #[inline]
    pub const fn is_separator(self) -> bool {
        SEPARATORS.contains(self)
    }

    // ========================================================================
    // Singletons
    // ========================================================================

    #[inline]
    pub const fn is_identifier(self) -> bool {
        matches!(self, TokenKind::Identifier)
    }

    #[inline]
    pub const fn is_eof(self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, TokenKind::Null)
    }

    #[inline]
    pub const fn is_illegal(self) -> bool {
        matches!(self, TokenKind::Illegal)
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment)
    }

    #[inline]
    pub const fn is_macro(self) -> bool {
        matches!(self, TokenKind::Macro)
    }

    #[inline]
    pub const fn is_import(self) -> bool {
        matches!(self, TokenKind::Import)
    }

    #[inline]
    pub const fn is_include(self) -> bool {
        matches!(self, TokenKind::Include)
    }

    #[inline]
    pub const fn is_semicolon(self) -> bool {
        matches!(self, TokenKind::Semicolon)
    }

    // ========================================================================
    // Composites used for production selection
    // ========================================================================

    /// `break`, `continue` and `return`.
    pub const fn is_jump_statement(self) -> bool {
        matches!(self, TokenKind::Break | TokenKind::Continue | TokenKind::Return)
    }

    /// `while` and `for`.
    pub const fn is_loop_statement(self) -> bool {
        matches!(self, TokenKind::While | TokenKind::For)
    }

    /// `if` and `match`.
    pub const fn is_flow_statement(self) -> bool {
        matches!(self, TokenKind::If | TokenKind::Match)
    }

    /// Keywords that introduce or continue a `match`.
    pub const fn is_match_statement(self) -> bool {
        matches!(self, TokenKind::Match | TokenKind::Case | TokenKind::Default)
    }

    /// Return `true` if a primary expression may start with this kind.
    ///
    /// Covers every literal kind, identifiers, `null`, `func` (lambdas), `(` and `Illegal` (so the parser can
    /// report the illegal lexeme where an operand was expected).
    pub const fn is_primary_expression_start(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                TokenKind::Null | TokenKind::Func | TokenKind::Illegal | TokenKind::LParen
            )
    }

    /// Return `true` if this kind starts a declaration (including the empty declaration `;`).
    pub const fn is_decl_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Any
                | TokenKind::Func
                | TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Module
                | TokenKind::Semicolon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::kinds::Family;

    #[test]
    fn exactly_one_family_holds_for_real_kinds() {
        for &kind in TokenKind::ALL {
            let hits = [
                kind.is_literal(),
                kind.is_operator(),
                kind.is_separator(),
                kind.is_keyword(),
                kind.is_special(),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            if kind.is_sentinel() {
                assert!(
                    !kind.is_literal() && !kind.is_separator() && !kind.is_keyword() && !kind.is_special(),
                    "sentinel {kind:?} classified into a family"
                );
                assert!(!kind.is_operator(), "sentinel {kind:?} classified as operator");
            } else {
                assert_eq!(hits, 1, "{kind:?} belongs to {hits} families");
            }
        }
    }

    #[test]
    fn family_agrees_with_predicates() {
        for &kind in TokenKind::ALL {
            match kind.family() {
                Some(Family::Literal) => assert!(kind.is_literal()),
                Some(Family::Operator) => assert!(kind.is_operator()),
                Some(Family::Separator) => assert!(kind.is_separator()),
                Some(Family::Keyword) => assert!(kind.is_keyword()),
                Some(Family::Special) => assert!(kind.is_special()),
                None => assert!(kind.is_sentinel()),
            }
        }
    }

    #[test]
    fn sub_band_samples() {
        assert!(TokenKind::LessThanOrEqualTo.is_comparison_operator());
        assert!(!TokenKind::Equals.is_comparison_operator());
        assert!(TokenKind::RbitshiftEquals.is_assignment_operator());
        assert!(!TokenKind::Tilda.is_assignment_operator());
        assert!(TokenKind::EqualsArrow.is_arrow());
        assert!(TokenKind::LBrace.is_delimiter());
        assert!(TokenKind::AndNot.is_bitwise());
        assert!(TokenKind::Ellipsis.is_separator());
    }

    #[test]
    fn composite_predicates() {
        assert!(TokenKind::Return.is_jump_statement());
        assert!(!TokenKind::Defer.is_jump_statement());
        assert!(TokenKind::For.is_loop_statement());
        assert!(TokenKind::Match.is_flow_statement());
        assert!(TokenKind::Default.is_match_statement());
        assert!(TokenKind::HexInt.is_primary_expression_start());
        assert!(TokenKind::LParen.is_primary_expression_start());
        assert!(!TokenKind::RParen.is_primary_expression_start());
        assert!(TokenKind::Semicolon.is_decl_statement());
        assert!(!TokenKind::Import.is_decl_statement());
    }
}
