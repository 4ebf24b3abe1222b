#![no_main]

use std::sync::Arc;

use adorad_syntax::parser;
use adorad_syntax::token::{Token, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Each byte selects a token kind; sentinels and end-of-input are skipped so the stream stays well-formed.
    let file: Arc<str> = Arc::from("fuzz.ad");
    let mut tokens: Vec<Token> = data
        .iter()
        .filter_map(|&b| TokenKind::from_ordinal(b))
        .filter(|k| !k.is_sentinel() && !k.is_eof())
        .enumerate()
        .map(|(i, kind)| Token::new(kind, kind.as_str(), Arc::clone(&file), i as u32, 1, i as u32))
        .collect();
    let end = tokens.len() as u32;
    tokens.push(Token::eof(file, end, 1, end));

    let _ = parser::parse(&tokens);
});
