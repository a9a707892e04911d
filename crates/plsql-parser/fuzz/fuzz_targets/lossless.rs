//! Fuzz target: Lossless tree
//!
//! The concrete syntax tree must print back to exactly the input, with or
//! without errors, with or without error-node marking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plsql_parser::{parse, parse_with_options, ParseOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let parse1 = parse(source);
        let printed = parse1.syntax().to_string();
        if printed != source {
            panic!(
                "Tree is not lossless!\nInput:   {:?}\nPrinted: {:?}\nErrors: {:?}",
                source, printed, parse1.errors
            );
        }

        let marked = parse_with_options(source, &ParseOptions::default().with_error_nodes());
        assert_eq!(marked.syntax().to_string(), source);
    }
});
