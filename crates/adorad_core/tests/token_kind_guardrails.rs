use std::collections::HashMap;

use adorad_core::lang::kinds::{self, Family, TokenKind};
use proptest::prelude::*;

#[test]
fn keyword_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, TokenKind> = HashMap::new();

    for &kind in TokenKind::ALL.iter().filter(|k| k.is_keyword()) {
        let spelling = kind.as_str();
        assert_eq!(
            TokenKind::from_spelling(spelling),
            Some(kind),
            "keyword spelling not resolvable: {}",
            spelling
        );
        assert!(
            spelling.chars().all(|c| c.is_ascii_lowercase()),
            "keyword spelling must be lower-case ascii: {}",
            spelling
        );
        if let Some(prev) = seen.insert(spelling, kind) {
            panic!("duplicate keyword spelling {:?}: {:?} and {:?}", spelling, prev, kind);
        }
    }
}

#[test]
fn sub_band_members_partition_cleanly() {
    let sub_predicates: [fn(TokenKind) -> bool; 5] = [
        TokenKind::is_comparison_operator,
        TokenKind::is_assignment_operator,
        TokenKind::is_arrow,
        TokenKind::is_delimiter,
        TokenKind::is_bitwise,
    ];
    for &kind in TokenKind::ALL {
        let hits = sub_predicates.iter().filter(|p| p(kind)).count();
        assert!(hits <= 1, "{kind:?} is in {hits} operator sub-bands");
        if hits == 1 {
            assert!(kind.is_operator(), "{kind:?} is in a sub-band but not an operator");
        }
    }
}

#[test]
fn band_boundaries_match_layout() {
    assert_eq!(kinds::LITERALS.begin, TokenKind::LiteralsBegin);
    assert_eq!(kinds::KEYWORDS.end, TokenKind::KeywordsEnd);
    assert_eq!(TokenKind::ALL.last(), Some(&TokenKind::KeywordsEnd));
    assert_eq!(TokenKind::ALL.first(), Some(&TokenKind::Eof));
    assert_eq!(TokenKind::ALL.iter().filter(|k| k.is_sentinel()).count(), 18);
}

#[test]
fn specific_classifications() {
    assert!(TokenKind::Identifier.is_literal());
    assert!(TokenKind::True.is_literal());
    assert!(!TokenKind::Null.is_literal());
    assert_eq!(TokenKind::Null.family(), Some(Family::Special));
    assert!(TokenKind::Tilda.is_operator());
    assert!(TokenKind::DDot.is_separator());
    assert!(!TokenKind::DDot.is_operator());
    assert!(TokenKind::Comma.is_separator());
}

proptest! {
    #[test]
    fn classification_is_total_over_ordinals(ordinal in any::<u8>()) {
        match TokenKind::from_ordinal(ordinal) {
            Some(kind) => {
                prop_assert_eq!(kind.ordinal(), ordinal);
                prop_assert_eq!(kind.family().is_none(), kind.is_sentinel());
                prop_assert!(!kind.as_str().is_empty());
            }
            None => prop_assert!(ordinal as usize >= TokenKind::ALL.len()),
        }
    }

    #[test]
    fn source_spellings_resolve_to_themselves(idx in 0usize..TokenKind::ALL.len()) {
        let kind = TokenKind::ALL[idx];
        if kind.has_source_spelling() {
            prop_assert_eq!(TokenKind::from_spelling(kind.as_str()), Some(kind));
        } else {
            prop_assert_eq!(TokenKind::from_spelling(kind.as_str()), None);
        }
    }
}
