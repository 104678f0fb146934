#![no_main]

use libfuzzer_sys::fuzz_target;
use minic::frontend::{SourceParser, lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Exercise the reader path, including invalid UTF-8
    let _ = SourceParser::new().reader(data).parse();

    if let Ok(s) = std::str::from_utf8(data) {
        // Lex, then parse whatever lexed cleanly
        if let Ok(tokens) = lexer::lex(s) {
            if let Ok(tree) = parser::parse(&tokens) {
                // Leaves must be the token stream minus EOF
                assert_eq!(tree.leaves().count(), tokens.len() - 1);
                let _ = tree.to_string();
            }
        }
    }
});
