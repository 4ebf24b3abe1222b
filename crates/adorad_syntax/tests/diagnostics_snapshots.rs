//! Snapshot tests for parser diagnostics.
//!
//! Each case parses a small broken program and pins the rendered `file:line:column: message` text, so wording or
//! position regressions show up as snapshot diffs.

use adorad_syntax::{parser, token};

fn diagnostics(source: &str) -> String {
    let tokens = token::from_words("broken.ad", source);
    match parser::parse(&tokens) {
        Ok(items) => format!("ok: {} item(s)", items.len()),
        Err(errors) => errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"),
    }
}

#[test]
fn unclosed_call() {
    insta::assert_snapshot!(diagnostics("foo ( 1 , 2"), @"broken.ad:1:11: expected `)`, found `EOF`");
}

#[test]
fn one_diagnostic_per_broken_statement() {
    insta::assert_snapshot!(diagnostics("x = ;\ny = ) ;\nz = 1 ;"), @r"
    broken.ad:1:4: expected an expression, found `;`
    broken.ad:2:4: expected an expression, found `)`
    ");
}

#[test]
fn missing_terminator_inside_function_body() {
    insta::assert_snapshot!(
        diagnostics("func main ( ) {\n  return 1 $ ;\n}"),
        @"broken.ad:2:11: expected `;`, found `ILLEGAL`"
    );
}

#[test]
fn illegal_operand() {
    insta::assert_snapshot!(diagnostics("x = $ ;"), @"broken.ad:1:4: illegal token `$`");
}

#[test]
fn truncated_expression() {
    insta::assert_snapshot!(diagnostics("x = 1 +"), @"broken.ad:1:7: expected an expression, found end of input");
}

#[test]
fn reserved_literal_kind() {
    insta::assert_snapshot!(
        diagnostics("x = 1.0f128 ;"),
        @"broken.ad:1:4: `FLOAT128_LIT` literals are not supported"
    );
}

#[test]
fn misplaced_attribute() {
    insta::assert_snapshot!(diagnostics("[ inline ] const x = 1 ;"), @"broken.ad:1:11: expected `func`, found `const`");
}

#[test]
fn well_formed_program() {
    let source = "module demo ;\nimport std . io ;\n\nfunc main ( ) -> i32 {\n  any mutable n = 0 ;\n  for i in 0 .. 10 { n += i ; }\n  return n ;\n}\n";
    insta::assert_snapshot!(diagnostics(source), @"ok: 3 item(s)");
}
