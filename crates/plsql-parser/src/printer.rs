/// S-expression rendering of a syntax tree
///
/// Output follows the tree-sitter test-corpus convention: one parenthesised
/// form per named node, anonymous tokens (keywords, punctuation,
/// whitespace) omitted, and field names as `name: ` prefixes:
///
/// ```text
/// (binary_expression left: (accessor accessor_identifier: (identifier))
///   operator: (binary_operator) right: (number))
/// ```
///
/// Printed on a single line; tests compare it verbatim.
use crate::fields::fields;
use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode};
use crate::SyntaxKind::*;
use rowan::NodeOrToken;
use std::fmt::{self, Display};

/// Render `node` and everything below it.
pub fn to_sexp(node: &SyntaxNode) -> String {
    Sexp(node).to_string()
}

/// `Display` adapter over a node, so callers can `write!` a tree without
/// building an intermediate string.
pub struct Sexp<'a>(pub &'a SyntaxNode);

impl Display for Sexp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0)
    }
}

/// Tokens that appear in the output. Everything else is anonymous.
fn is_named_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        IDENT | QUOTED_IDENT | STRING_OPEN | STRING_PART | STRING_MARKER | STRING_CLOSE | COMMENT
    )
}

fn is_named(element: &SyntaxElement) -> bool {
    match element {
        NodeOrToken::Node(_) => true,
        NodeOrToken::Token(token) => is_named_token(token.kind()),
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &SyntaxNode) -> fmt::Result {
    write!(f, "({}", node.kind().rule_name())?;
    let labels = fields(node);
    for (idx, child) in node.children_with_tokens().enumerate() {
        if !is_named(&child) {
            continue;
        }
        f.write_str(" ")?;
        if let Some((field, _)) = labels.iter().find(|(_, i)| *i == idx) {
            write!(f, "{}: ", field.as_str())?;
        }
        match child {
            NodeOrToken::Node(child) => write_node(f, &child)?,
            NodeOrToken::Token(token) => write!(f, "({})", token.kind().rule_name())?,
        }
    }
    f.write_str(")")
}
