/// Parser implementation with error recovery
use crate::ast::SourceFile;
use crate::error::{ParseError, ParseErrorKind};
use crate::grammar;
use crate::lexer::{string_segments, tokenize, Token};
use crate::line_index::LineIndex;
use crate::options::{Budget, ParseOptions};
use crate::syntax_kind::{PlSqlLanguage, SyntaxKind};
use crate::SyntaxKind::*;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Nesting limit for statements and expressions combined.
const MAX_DEPTH: u32 = 128;

/// Result of parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green_node: GreenNode,
    pub errors: Vec<ParseError>,
    pub status: ParseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Complete,
    /// The budget ran out; everything after the stop point is one `ERROR`
    /// node at the end of the file.
    Cancelled,
}

impl Parse {
    pub fn syntax(&self) -> rowan::SyntaxNode<PlSqlLanguage> {
        rowan::SyntaxNode::new_root(self.green_node.clone())
    }

    pub fn source_file(&self) -> SourceFile {
        SourceFile::from_root(self.syntax())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ParseStatus::Cancelled
    }
}

/// Parse input text into a CST
pub fn parse(input: &str) -> Parse {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse with an explicit budget and error-node policy
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Parse {
    let lexed = tokenize(input);
    let line_index = LineIndex::new(input);
    let mut parser = Parser::new(input, &lexed.tokens, &line_index, options);
    parser.parse_source_file();

    let mut parse = parser.finish();
    let lex_errors = lexed.errors.into_iter().map(|err| {
        let range = err.range();
        ParseError::new(err.into(), range, line_index.line_col(range.start()))
    });
    parse.errors.extend(lex_errors);
    parse.errors.sort_by_key(|err| err.range.start());
    parse
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    tokens: &'a [Token],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
    line_index: &'a LineIndex,
    budget: Budget,
    mark_error_nodes: bool,
    consumed: usize,
    depth: u32,
    /// Set once the nesting limit has been reported, until the parser is
    /// back at the top level.
    too_deep: bool,
    cancelled: bool,
}

impl<'a> Parser<'a> {
    fn new(
        input: &'a str,
        tokens: &'a [Token],
        line_index: &'a LineIndex,
        options: &ParseOptions,
    ) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            line_index,
            budget: Budget::new(options),
            mark_error_nodes: options.mark_error_nodes,
            consumed: 0,
            depth: 0,
            too_deep: false,
            cancelled: false,
        }
    }

    fn parse_source_file(&mut self) {
        // The root starts before any leading trivia so that nothing is
        // emitted outside it.
        self.builder.start_node(SOURCE_FILE.into());
        grammar::source_file(self);
        self.eat_trivia();
        self.drain_remaining();
        self.finish_node();
    }

    fn finish(self) -> Parse {
        Parse {
            green_node: self.builder.finish(),
            errors: self.errors,
            status: if self.cancelled {
                ParseStatus::Cancelled
            } else {
                ParseStatus::Complete
            },
        }
    }

    // ===== Token inspection =====

    /// Index of the `n`th non-trivia token at or after the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| self.pos + idx)
    }

    /// Kind of the `n`th upcoming non-trivia token. A cancelled parser sees
    /// only `EOF`.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        if self.cancelled {
            return EOF;
        }
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(EOF)
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'a str {
        if self.cancelled {
            return "";
        }
        self.nth_index(n)
            .map(|idx| &self.input[self.tokens[idx].range])
            .unwrap_or("")
    }

    /// Current token kind
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Check if at specific token kind
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Check if at any of the given kinds
    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    /// Identifier, quoted identifier, or a soft keyword used as a name.
    pub(crate) fn nth_at_ident(&self, n: usize) -> bool {
        let kind = self.nth(n);
        kind.is_identifier() || kind.is_soft_keyword()
    }

    pub(crate) fn at_ident(&self) -> bool {
        self.nth_at_ident(0)
    }

    /// Case-insensitive check of the current token's text.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.current() == IDENT && self.nth_text(0).eq_ignore_ascii_case(word)
    }

    /// Offset of the cursor in tokens; used as a progress marker.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    // ===== Tree building =====

    /// Attach leading whitespace and comments to the currently open node
    pub(crate) fn eat_trivia(&mut self) {
        if self.cancelled {
            return;
        }
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), &self.input[token.range]);
            self.pos += 1;
        }
    }

    /// Consume the current token as-is
    pub(crate) fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consume the current token, retagging it as `kind`
    pub(crate) fn bump_remap(&mut self, kind: SyntaxKind) {
        if self.at(EOF) {
            return;
        }
        self.eat_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), &self.input[token.range]);
            self.pos += 1;
            self.consumed += 1;
        }
    }

    /// Consume the token if it matches
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Expect a specific token kind, report error if not present
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error_expected(&kind.describe());
            false
        }
    }

    /// Consume a name. Soft keywords are retagged as `IDENT`; quoted
    /// identifiers keep their kind.
    pub(crate) fn bump_ident(&mut self) {
        if self.at(QUOTED_IDENT) {
            self.bump();
        } else {
            self.bump_remap(IDENT);
        }
    }

    pub(crate) fn expect_ident(&mut self) -> bool {
        if self.at_ident() {
            self.bump_ident();
            true
        } else {
            self.error_expected("identifier");
            false
        }
    }

    /// Name after a `.`: any keyword is accepted and retagged as `IDENT`.
    pub(crate) fn expect_member(&mut self) -> bool {
        let kind = self.current();
        if kind.is_identifier() || kind.is_keyword() {
            self.bump_ident();
            true
        } else {
            self.error_expected("identifier");
            false
        }
    }

    /// Consume a `STRING` token as a `string` node split into its parts
    pub(crate) fn bump_string(&mut self) {
        if !self.at(STRING) {
            return;
        }
        self.eat_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            let text = &self.input[token.range];
            self.builder.start_node(STRING_LITERAL.into());
            for segment in string_segments(text) {
                self.builder
                    .token(segment.kind.into(), &text[segment.range]);
            }
            self.builder.finish_node();
            self.pos += 1;
            self.consumed += 1;
        }
    }

    /// Start a composite node after any pending trivia
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    /// Checkpoint for wrapping already-parsed children later
    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    /// Start a composite node at a checkpoint (for left-recursive shapes)
    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Finish current node
    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // ===== Diagnostics =====

    /// Range and position of the next non-trivia token
    fn error_site(&self) -> TextRange {
        match self.nth_index(0) {
            Some(idx) => self.tokens[idx].range,
            None => {
                let end = TextSize::of(self.input);
                TextRange::empty(end)
            }
        }
    }

    /// Report a parse error at the next token. Nothing is reported after
    /// cancellation, at a malformed token (the lexer already reported it),
    /// or at a position that already has an error.
    pub(crate) fn error(&mut self, kind: ParseErrorKind) {
        if self.cancelled || self.at(ERROR) {
            return;
        }
        let range = self.error_site();
        if self
            .errors
            .last()
            .is_some_and(|last| last.range.start() == range.start())
        {
            return;
        }
        let position = self.line_index.line_col(range.start());
        self.errors.push(ParseError::new(kind, range, position));
    }

    pub(crate) fn error_expected(&mut self, expected: &str) {
        let found = self.current();
        let kind = if found == EOF {
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            }
        } else {
            ParseErrorKind::Expected {
                expected: expected.to_string(),
                found,
            }
        };
        self.error(kind);
    }

    pub(crate) fn error_no_alternative(&mut self, context: &str) {
        let found = self.current();
        if found == EOF {
            self.error_expected(context);
        } else {
            self.error(ParseErrorKind::NoAlternative {
                context: context.to_string(),
                found,
            });
        }
    }

    pub(crate) fn error_invalid(&mut self, message: &str) {
        self.error(ParseErrorKind::Invalid {
            message: message.to_string(),
        });
    }

    /// Skip to the next statement boundary, wrapping the skipped tokens in
    /// an `ERROR` node. Always consumes at least one token unless at EOF;
    /// a `;` is consumed and ends the skip.
    pub(crate) fn recover(&mut self) {
        if self.at(EOF) {
            return;
        }
        self.start_node(ERROR);
        let mut skipped = 0usize;
        loop {
            let kind = self.current();
            if kind == EOF || (skipped > 0 && is_recovery_point(kind)) {
                break;
            }
            self.bump();
            skipped += 1;
            if kind == SEMICOLON {
                break;
            }
        }
        self.finish_node();
        tracing::debug!(skipped, offset = ?self.error_site().start(), "resynchronised after syntax error");
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub(crate) fn marks_error_nodes(&self) -> bool {
        self.mark_error_nodes
    }

    // ===== Limits =====

    /// Enter a nested production. Returns false when the nesting limit is
    /// hit; the caller must not recurse further and should `recover`. The
    /// limit is reported once per top-level item.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            if !self.too_deep {
                self.error_invalid("nesting too deep");
                self.too_deep = true;
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.too_deep = false;
        }
    }

    /// Check the cancellation budget. Called between statement-level
    /// productions only; returns true once the parse has been cancelled.
    pub(crate) fn out_of_budget(&mut self) -> bool {
        if self.cancelled {
            return true;
        }
        if self.nth_index(0).is_none() {
            return false;
        }
        if let Some(reason) = self.budget.exceeded(self.consumed) {
            tracing::debug!(reason, consumed = self.consumed, "parse cancelled");
            self.cancelled = true;
        }
        self.cancelled
    }

    /// After cancellation: attach every remaining token, trivia included,
    /// to one trailing `ERROR` node so the tree stays lossless.
    pub(crate) fn drain_remaining(&mut self) {
        if self.pos >= self.tokens.len() {
            return;
        }
        self.builder.start_node(ERROR.into());
        while let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), &self.input[token.range]);
            self.pos += 1;
        }
        self.builder.finish_node();
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Tokens at which error recovery stops skipping.
fn is_recovery_point(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        BEGIN_KW
            | DECLARE_KW
            | IF_KW
            | CASE_KW
            | LOOP_KW
            | WHILE_KW
            | FOR_KW
            | FORALL_KW
            | RETURN_KW
            | EXIT_KW
            | CONTINUE_KW
            | RAISE_KW
            | SELECT_KW
            | INSERT_KW
            | UPDATE_KW
            | PROCEDURE_KW
            | FUNCTION_KW
            | CREATE_KW
            | DIRECTIVE_OPEN
            | END_KW
            | ELSE_KW
            | ELSIF_KW
            | WHEN_KW
            | EXCEPTION_KW
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_block() {
        let input = "BEGIN NULL; END;";
        let parse = parse(input);

        assert!(parse.errors.is_empty(), "errors: {:?}", parse.errors);
        assert_eq!(parse.status, ParseStatus::Complete);

        let root = parse.syntax();
        assert_eq!(root.kind(), SOURCE_FILE);
        assert_eq!(root.to_string(), input);
    }

    #[test]
    fn test_empty_input() {
        let parse = parse("");
        assert!(parse.errors.is_empty());
        assert_eq!(parse.syntax().kind(), SOURCE_FILE);

        let parse = super::parse("  -- only a comment\n");
        assert!(parse.errors.is_empty());
        assert_eq!(parse.syntax().to_string(), "  -- only a comment\n");
    }

    #[test]
    fn test_error_positions_are_one_based() {
        let parse = parse("BEGIN\n  x := ;\nEND;");
        assert_eq!(parse.errors.len(), 1);
        let err = &parse.errors[0];
        assert_eq!((err.line, err.column), (2, 8));
        assert_eq!(err.range, TextRange::new(13.into(), 14.into()));
    }

    #[test]
    fn test_lex_errors_are_merged_in_order() {
        let parse = parse("BEGIN x := 'abc; END;");
        assert!(!parse.errors.is_empty());
        assert!(parse.errors.iter().any(ParseError::is_lexical));
        let starts: Vec<_> = parse.errors.iter().map(|e| e.range.start()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_cancellation_keeps_tree_lossless() {
        let input = "BEGIN NULL; END;\n".repeat(50);
        let options = ParseOptions::default().with_max_tokens(10);
        let parse = parse_with_options(&input, &options);

        assert_eq!(parse.status, ParseStatus::Cancelled);
        assert_eq!(parse.syntax().to_string(), input);
        let last = parse.syntax().last_child().map(|n| n.kind());
        assert_eq!(last, Some(ERROR));
    }

    #[test]
    fn test_budget_not_reached() {
        let options = ParseOptions::default().with_max_tokens(1000);
        let parse = parse_with_options("BEGIN NULL; END;", &options);
        assert_eq!(parse.status, ParseStatus::Complete);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let input = format!("BEGIN x := {}1{}; END;", "(".repeat(500), ")".repeat(500));
        let parse = parse(&input);
        assert!(!parse.errors.is_empty());
        assert_eq!(parse.syntax().to_string(), input);
    }
}
