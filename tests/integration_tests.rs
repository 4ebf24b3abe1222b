//! Integration tests for the Adorad front end
//!
//! Fixtures under `tests/fixtures/` are written as whitespace-separated words so they can be turned into tokens
//! without a scanner.

use std::fs;
use std::path::{Path, PathBuf};

use adorad::ast::{AstNodeKind, Decl, NodeKind};
use adorad::diagnostics::{Expected, ParseError};
use adorad::token::TokenKind;
use adorad::{Frontend, FrontendConfig, SourceUnit};

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "ad"))
        .collect();
    paths.sort();
    paths
}

fn load(paths: &[PathBuf]) -> Vec<SourceUnit> {
    paths
        .iter()
        .map(|path| SourceUnit::from_words(path.clone(), &fs::read_to_string(path).unwrap()))
        .collect()
}

/// Test that all valid fixtures parse successfully
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty());
    let frontend = Frontend::new(FrontendConfig::default()).unwrap();
    let report = frontend.parse_files(&load(&paths));
    for result in &report.results {
        if let Err(diagnostics) = result {
            panic!("{} failed to parse: {:#?}", diagnostics.path.display(), diagnostics.errors);
        }
    }
}

/// Test that all invalid fixtures produce diagnostics
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty());
    let frontend = Frontend::new(FrontendConfig::new().with_jobs(2)).unwrap();
    let report = frontend.parse_files(&load(&paths));
    assert_eq!(report.diagnostics().count(), paths.len());
    assert_eq!(report.files().count(), 0);
}

#[test]
fn test_file_metadata_from_fixtures() {
    let frontend = Frontend::new(FrontendConfig::new().with_jobs(1)).unwrap();
    let report = frontend.parse_files(&load(&fixtures("valid")));
    let by_name = |name: &str| report.files().find(|f| f.display_name == name).unwrap();

    let hello = by_name("hello.ad");
    assert_eq!(hello.module, "hello");
    assert!(!hello.is_test);
    assert_eq!(hello.num_lines, 9);

    let loops = by_name("test_loops.ad");
    assert!(loops.is_test);
    assert_eq!(loops.module, "test_loops");
}

#[test]
fn test_struct_fixture_shape() {
    let frontend = Frontend::new(FrontendConfig::default()).unwrap();
    let report = frontend.parse_files(&load(&fixtures("valid")));
    let shapes = report.files().find(|f| f.module == "shapes").unwrap();
    let tags: Vec<_> = shapes.items.iter().map(|item| item.kind_tag()).collect();
    assert_eq!(
        tags,
        [
            AstNodeKind::Module,
            AstNodeKind::EnumDecl,
            AstNodeKind::StructDecl,
            AstNodeKind::SumTypeDecl,
            AstNodeKind::ConstDecl,
        ]
    );
    let NodeKind::Decl(Decl::Struct(shape)) = &shapes.items[2].kind else {
        panic!("expected struct");
    };
    let NodeKind::Decl(Decl::Func(area)) = &shape.methods[0].kind else {
        panic!("expected method");
    };
    assert_eq!(area.parent_type.as_deref(), Some("Shape"));
    assert_eq!(area.attributes, ["inline"]);
}

#[test]
fn test_unclosed_call_fixture_points_at_the_semicolon() {
    let paths: Vec<_> = fixtures("invalid").into_iter().filter(|p| p.ends_with("unclosed_call.ad")).collect();
    let frontend = Frontend::new(FrontendConfig::default()).unwrap();
    let diagnostics = frontend.parse_unit(&load(&paths)[0]).unwrap_err();
    assert_eq!(diagnostics.len(), 1);
    match &diagnostics.errors[0] {
        ParseError::UnexpectedToken {
            expected,
            found,
            location,
            ..
        } => {
            assert_eq!(*expected, Expected::Token(TokenKind::RParen));
            assert_eq!(*found, TokenKind::Semicolon);
            assert_eq!((location.line, location.column), (2, 18));
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[test]
fn test_fail_fast_config_reaches_every_file() {
    let paths = fixtures("invalid");
    let frontend = Frontend::new(FrontendConfig::new().with_recover(false)).unwrap();
    let report = frontend.parse_files(&load(&paths));
    assert!(report.diagnostics().all(|d| d.len() == 1));
}

#[test]
fn test_invalid_fixture_diagnostics_render() {
    let units: Vec<SourceUnit> = fixtures("invalid")
        .iter()
        .map(|path| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            SourceUnit::from_words(name, &fs::read_to_string(path).unwrap())
        })
        .collect();
    let frontend = Frontend::new(FrontendConfig::default()).unwrap();
    let report = frontend.parse_files(&units);
    let rendered: Vec<String> = report
        .diagnostics()
        .flat_map(|d| d.errors.iter().map(ToString::to_string))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    bad_statements.ad:1:4: expected an expression, found `;`
    bad_statements.ad:3:4: expected an expression, found `)`
    unclosed_call.ad:2:18: expected `)`, found `;`
    ");
}
