#![no_main]

use libfuzzer_sys::fuzz_target;
use mova_syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Tokenization is total; the parser must cope with whatever it produces.
        let tokens = lexer::tokenize(s);
        let _ = parser::parse(&tokens);
    }
});
