//! Fuzz target: Parse never panics
//!
//! Any UTF-8 input, however malformed, must produce a tree and a list of
//! diagnostics. A small token budget is exercised on every other input so
//! the cancellation path is fuzzed too.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plsql_parser::{parse, parse_with_options, ParseOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse(s);

        if data.len() % 2 == 0 {
            let options = ParseOptions::default().with_max_tokens(data.len() / 4);
            let _ = parse_with_options(s, &options);
        }
    }
});
