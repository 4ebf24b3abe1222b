//! Property-based tests for the Adorad front end
//!
//! These tests use proptest to verify invariants of multi-file parsing across many randomly generated batches.

use adorad::{Frontend, FrontendConfig, SourceUnit};
use proptest::prelude::*;

// Strategy for generating valid Adorad identifiers
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}".prop_filter("Not a keyword", |s| adorad::lang::kinds::TokenKind::from_spelling(s).is_none())
}

// Strategy for generating small files, some of them broken
fn file_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (ident_strategy(), ident_strategy())
            .prop_map(|(name, param)| format!("func {name} ( {param} i32 ) -> i32 {{ return {param} + 1 ; }}")),
        (ident_strategy(), 0u32..1000).prop_map(|(name, n)| format!("{name} = {n} * 2 ;")),
        ident_strategy().prop_map(|name| format!("{name} = ( 1 ;")),
        ident_strategy().prop_map(|name| format!("for {name} in 0 .. 3 {{ {name} += 1 ;")),
    ]
}

fn batch_strategy() -> impl Strategy<Value = Vec<SourceUnit>> {
    prop::collection::vec(file_strategy(), 0..12).prop_map(|sources| {
        sources
            .iter()
            .enumerate()
            .map(|(i, source)| SourceUnit::from_words(format!("file_{i}.ad"), source))
            .collect()
    })
}

proptest! {
    /// Property: the thread count never changes the outcome.
    #[test]
    fn parallel_matches_sequential(units in batch_strategy()) {
        let sequential = Frontend::new(FrontendConfig::new().with_jobs(1)).unwrap();
        let parallel = Frontend::new(FrontendConfig::new().with_jobs(4)).unwrap();
        prop_assert_eq!(sequential.parse_files(&units).results, parallel.parse_files(&units).results);
    }

    /// Property: one result per input, in input order.
    #[test]
    fn results_follow_input_order(units in batch_strategy()) {
        let frontend = Frontend::new(FrontendConfig::default()).unwrap();
        let report = frontend.parse_files(&units);
        prop_assert_eq!(report.results.len(), units.len());
        for (unit, result) in units.iter().zip(&report.results) {
            let path = match result {
                Ok(file) => &file.path,
                Err(diagnostics) => &diagnostics.path,
            };
            prop_assert_eq!(path, &unit.path);
        }
    }

    /// Property: each file is parsed on its own; batching does not change its result.
    #[test]
    fn batching_does_not_change_per_file_results(units in batch_strategy()) {
        let frontend = Frontend::new(FrontendConfig::default()).unwrap();
        let report = frontend.parse_files(&units);
        for (unit, result) in units.iter().zip(&report.results) {
            prop_assert_eq!(&frontend.parse_unit(unit), result);
        }
    }
}
