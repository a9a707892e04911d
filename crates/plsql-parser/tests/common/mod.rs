//! Shared helpers for the integration tests.
#![allow(dead_code)]

use plsql_parser::{parse, Parse, SyntaxKind, SyntaxNode};

/// Parse, and fail the test on any diagnostic or if the tree is not
/// lossless.
pub fn parse_ok(input: &str) -> SyntaxNode {
    let parse = parse(input);
    assert!(
        parse.errors.is_empty(),
        "unexpected errors for {:?}: {:?}",
        input,
        parse.errors
    );
    assert_lossless(input, &parse);
    parse.syntax()
}

pub fn assert_lossless(input: &str, parse: &Parse) {
    assert_eq!(parse.syntax().to_string(), input, "tree is not lossless");
}

/// Kinds of the child nodes of `node`, tokens excluded.
pub fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|n| n.kind()).collect()
}

pub fn find(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    root.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {:?} in {}", kind, root))
}

pub fn find_all(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    root.descendants().filter(|n| n.kind() == kind).collect()
}

/// Wrap statements in an anonymous block.
pub fn in_block(statements: &str) -> String {
    format!("BEGIN\n{}\nEND;\n", statements)
}

/// Messages of all diagnostics for `input`.
pub fn messages(input: &str) -> Vec<String> {
    parse(input).errors.into_iter().map(|e| e.message).collect()
}
