//! Diagnostic types.
//!
//! Nothing here is fatal: the lexer turns a [`LexError`] into one malformed
//! token and keeps going, and the parser records a [`ParseError`] and still
//! returns a tree.

use crate::syntax_kind::SyntaxKind;
use rowan::TextRange;
use thiserror::Error;

/// Malformed input detected by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { range: TextRange },

    #[error("unterminated quoted identifier")]
    UnterminatedIdentifier { range: TextRange },

    #[error("unterminated block comment")]
    UnterminatedComment { range: TextRange },

    #[error("invalid numeric literal")]
    InvalidNumber { range: TextRange },

    #[error("alternate-quote literal needs a non-alphanumeric delimiter after q'")]
    UnmatchedDelimiter { range: TextRange },

    #[error("unexpected character {ch:?}")]
    UnexpectedCharacter { ch: char, range: TextRange },
}

impl LexError {
    /// Source range covered by the malformed token.
    pub fn range(&self) -> TextRange {
        match self {
            Self::UnterminatedString { range }
            | Self::UnterminatedIdentifier { range }
            | Self::UnterminatedComment { range }
            | Self::InvalidNumber { range }
            | Self::UnmatchedDelimiter { range }
            | Self::UnexpectedCharacter { range, .. } => *range,
        }
    }
}

/// What went wrong at a diagnostic position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {}", found.describe())]
    Expected { expected: String, found: SyntaxKind },

    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("expected {context}, found {}", found.describe())]
    NoAlternative { context: String, found: SyntaxKind },

    #[error("{message}")]
    Invalid { message: String },

    #[error(transparent)]
    Lex(#[from] LexError),
}

/// A positioned diagnostic. Lines and columns are 1-based; columns count
/// characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub range: TextRange,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, range: TextRange, (line, column): (u32, u32)) -> Self {
        Self {
            message: kind.to_string(),
            kind,
            range,
            line,
            column,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lex(_))
    }
}

/// Failure to load [`crate::ParseOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parse options: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
