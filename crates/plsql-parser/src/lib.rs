/// plsql-parser - Rowan-based syntax analyzer for PL/SQL (Oracle dialect)
///
/// Turns PL/SQL source text, including embedded SQL queries, Oracle
/// alternate-quote literals and `{% include %}` template directives, into a
/// concrete syntax tree.
///
/// The parser is built on Rowan, providing:
/// - Lossless concrete syntax tree (CST): the tree prints back to the input
/// - Error recovery: every input yields a tree plus positioned diagnostics
/// - Named fields on nodes (`program_name`, `left`, `table_alias`, ...)
/// - Cooperative cancellation via a token budget or deadline
///
/// ```
/// let parse = plsql_parser::parse("BEGIN x := 1; END;");
/// assert!(parse.errors.is_empty());
/// assert_eq!(parse.syntax().to_string(), "BEGIN x := 1; END;");
/// ```
pub mod syntax_kind;
pub mod lexer;
pub mod builtins;
pub mod error;
pub mod line_index;
pub mod options;
pub mod parser;
pub mod precedence;
pub mod fields;
pub mod ast;
pub mod printer;
mod grammar;

pub use syntax_kind::{PlSqlLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use parser::{parse, parse_with_options, Parse, ParseStatus};
pub use options::ParseOptions;
pub use error::{ConfigError, LexError, ParseError, ParseErrorKind};
pub use fields::Field;
pub use printer::to_sexp;

/// Re-export Rowan types for convenience
pub use rowan::{TextRange, TextSize};
