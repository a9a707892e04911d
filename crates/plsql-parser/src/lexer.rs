//! Lexer for PL/SQL source with Oracle literal forms and `{% %}` directives.
//!
//! The scanner is hand-written rather than table driven because three parts
//! of the lexicon are not regular: alternate-quote strings (`q'[...]'`) need
//! a delimiter stack, numbers must stop before a `..` range operator, and the
//! meaning of `"..."` and `include` depends on being inside a directive.
use crate::error::LexError;
use crate::syntax_kind::SyntaxKind;
use crate::SyntaxKind::*;
use rowan::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// 1-based line of the first character
    pub line: u32,
    /// 1-based column (in characters) of the first character
    pub column: u32,
}

impl Token {
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range]
    }
}

/// Output of [`tokenize`]: every token including trivia and malformed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

/// Tokenize input text into a stream of tokens.
///
/// Lexical errors do not stop scanning: each one becomes a single `ERROR`
/// token covering the malformed text, and the error is recorded alongside.
pub fn tokenize(input: &str) -> Tokens {
    let mut lexer = Lexer::new(input);
    let mut out = Tokens::default();

    loop {
        let start = lexer.pos;
        let (line, column) = (lexer.line, lexer.column);
        match lexer.next_token() {
            Ok(token) if token.kind == EOF => break,
            Ok(token) => out.tokens.push(token),
            Err(err) => {
                out.tokens.push(Token {
                    kind: ERROR,
                    range: range(start, lexer.pos),
                    line,
                    column,
                });
                out.errors.push(err);
            }
        }
    }

    out
}

/// Pull-based scanner. Each call to [`Lexer::next_token`] advances the
/// cursor past exactly one token (or one malformed region).
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    in_directive: bool,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            in_directive: false,
            done: false,
        }
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Scan the next token. Returns an `EOF` token (empty range) at the end
    /// of input. On error the cursor has already moved past the bad text.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let (line, column) = (self.line, self.column);

        if self.pos >= self.input.len() {
            return Ok(Token {
                kind: EOF,
                range: range(start, start),
                line,
                column,
            });
        }

        let kind = self.scan(start)?;

        Ok(Token {
            kind,
            range: range(start, self.pos),
            line,
            column,
        })
    }

    fn scan(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        let c = self.current_char();

        let kind = match c {
            // Whitespace
            c if c.is_whitespace() => self.consume_whitespace(),

            // Comments
            '-' if self.peek_char() == Some('-') => self.consume_line_comment(),
            '/' if self.peek_char() == Some('*') => self.consume_block_comment(start)?,

            // Directive brackets
            '{' if self.peek_char() == Some('%') => {
                self.advance_n(2);
                self.in_directive = true;
                DIRECTIVE_OPEN
            }
            '%' if self.peek_char() == Some('}') => {
                self.advance_n(2);
                self.in_directive = false;
                DIRECTIVE_CLOSE
            }

            // Strings
            'q' | 'Q' if self.peek_char() == Some('\'') => self.consume_alt_string(start)?,
            '\'' => self.consume_string(start)?,
            '"' if self.in_directive => self.consume_directive_string(start)?,
            '"' => self.consume_quoted_ident(start)?,

            // Numbers and dots
            c if c.is_ascii_digit() => self.consume_number(start)?,
            '.' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => {
                self.consume_number(start)?
            }
            '.' if self.peek_char() == Some('.') => {
                self.advance_n(2);
                DOT2
            }
            '.' => self.single(DOT),

            // Identifiers and keywords
            c if is_ident_start(c) => self.consume_ident_or_keyword(),

            // Operators & punctuation
            ';' => self.single(SEMICOLON),
            ',' => self.single(COMMA),
            '(' => self.single(LPAREN),
            ')' => self.single(RPAREN),
            '[' => self.single(LBRACKET),
            ']' => self.single(RBRACKET),
            '{' => self.single(LBRACE),
            '}' => self.single(RBRACE),
            '%' => self.single(PERCENT),
            '+' => self.single(PLUS),
            '-' => self.single(MINUS),
            '*' => self.single(STAR),
            '/' => self.single(SLASH),
            ':' if self.peek_char() == Some('=') => self.double(ASSIGN),
            ':' => self.single(COLON),
            '|' if self.peek_char() == Some('|') => self.double(CONCAT),
            '=' if self.peek_char() == Some('>') => self.double(ARROW),
            '=' => self.single(EQ),
            '!' if self.peek_char() == Some('=') => self.double(NE),
            '<' if self.peek_char() == Some('=') => self.double(LE),
            '<' if self.peek_char() == Some('>') => self.double(NE),
            '<' => self.single(LT),
            '>' if self.peek_char() == Some('=') => self.double(GE),
            '>' => self.single(GT),

            // Unknown character
            ch => {
                self.advance();
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    range: range(start, self.pos),
                });
            }
        };

        Ok(kind)
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance(&mut self) {
        if let Some(c) = self.input[self.pos..].chars().next() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.advance();
        kind
    }

    fn double(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.advance_n(2);
        kind
    }

    /// A directive never spans lines: a newline ends directive mode even
    /// when the closing `%}` is missing.
    fn consume_whitespace(&mut self) -> SyntaxKind {
        while !self.at_end() && self.current_char().is_whitespace() {
            if self.current_char() == '\n' {
                self.in_directive = false;
            }
            self.advance();
        }
        WHITESPACE
    }

    fn consume_line_comment(&mut self) -> SyntaxKind {
        // Consume until newline or EOF; the newline stays whitespace
        while !self.at_end() && self.current_char() != '\n' {
            self.advance();
        }
        COMMENT
    }

    fn consume_block_comment(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        self.advance_n(2);
        while !self.at_end() {
            if self.current_char() == '*' && self.peek_char() == Some('/') {
                self.advance_n(2);
                return Ok(COMMENT);
            }
            self.advance();
        }
        Err(LexError::UnterminatedComment {
            range: range(start, self.pos),
        })
    }

    /// `'...'` with `''` as an escaped quote.
    fn consume_string(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        self.advance();
        while !self.at_end() {
            if self.current_char() == '\'' {
                self.advance();
                if self.current_char() == '\'' && !self.at_end() {
                    self.advance();
                    continue;
                }
                return Ok(STRING);
            }
            self.advance();
        }
        Err(LexError::UnterminatedString {
            range: range(start, self.pos),
        })
    }

    /// `q'<open>...<close>'`. Bracket delimiters nest: every inner opening
    /// bracket is pushed, every matching close pops, and only a close
    /// followed by `'` at the outermost level ends the literal.
    ///
    /// An alphanumeric delimiter is invalid. The literal is still scanned
    /// to its end so that one error token covers it.
    fn consume_alt_string(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        self.advance_n(2);
        let open = self.current_char();
        if self.at_end() || open.is_whitespace() {
            return Err(LexError::UnmatchedDelimiter {
                range: range(start, self.pos),
            });
        }
        let close = closing_delimiter(open);
        self.advance();

        let mut stack = vec![close];
        while !self.at_end() {
            let c = self.current_char();
            if c == close {
                if stack.len() == 1 {
                    if self.peek_char() == Some('\'') {
                        self.advance_n(2);
                        if open.is_alphanumeric() {
                            return Err(LexError::UnmatchedDelimiter {
                                range: range(start, self.pos),
                            });
                        }
                        return Ok(STRING);
                    }
                } else {
                    stack.pop();
                }
            } else if c == open && open != close {
                stack.push(close);
            }
            self.advance();
        }
        Err(LexError::UnterminatedString {
            range: range(start, self.pos),
        })
    }

    /// `"path"` inside `{% include ... %}`.
    fn consume_directive_string(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        self.advance();
        while !self.at_end() {
            if self.current_char() == '"' {
                self.advance();
                return Ok(STRING);
            }
            self.advance();
        }
        Err(LexError::UnterminatedString {
            range: range(start, self.pos),
        })
    }

    fn consume_quoted_ident(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        self.advance();
        while !self.at_end() {
            if self.current_char() == '"' {
                self.advance();
                return Ok(QUOTED_IDENT);
            }
            self.advance();
        }
        Err(LexError::UnterminatedIdentifier {
            range: range(start, self.pos),
        })
    }

    /// `\d+`, `\d+\.\d*` or `\.\d+`. A dot followed by another dot is a
    /// range operator and is not part of the number (`1..10`).
    fn consume_number(&mut self, start: usize) -> Result<SyntaxKind, LexError> {
        while self.current_char().is_ascii_digit() {
            self.advance();
        }

        if self.current_char() == '.' && self.peek_char() != Some('.') {
            self.advance(); // consume '.'
            while self.current_char().is_ascii_digit() {
                self.advance();
            }
        }

        // Exponents and type suffixes are not part of this grammar
        if is_ident_continue(self.current_char()) && !self.at_end() {
            while !self.at_end() && is_ident_continue(self.current_char()) {
                self.advance();
            }
            return Err(LexError::InvalidNumber {
                range: range(start, self.pos),
            });
        }

        Ok(NUMBER)
    }

    fn consume_ident_or_keyword(&mut self) -> SyntaxKind {
        let start = self.pos;

        while !self.at_end() && is_ident_continue(self.current_char()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        if self.in_directive && text.eq_ignore_ascii_case("include") {
            return INCLUDE_KW;
        }
        SyntaxKind::from_keyword(text).unwrap_or(IDENT)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind == EOF => {
                self.done = true;
                None
            }
            other => Some(other),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn closing_delimiter(open: char) -> char {
    match open {
        '[' => ']',
        '(' => ')',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new((start as u32).into(), (end as u32).into())
}

/// One piece of a string literal, relative to the literal's own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSegment {
    /// `STRING_OPEN`, `STRING_PART`, `STRING_MARKER` or `STRING_CLOSE`
    pub kind: SyntaxKind,
    pub range: TextRange,
}

/// Split the text of a `STRING` token into open marker, content parts,
/// `%s`/`%1` placeholder markers and close marker. The segments cover the
/// text exactly, in order.
pub fn string_segments(text: &str) -> Vec<StringSegment> {
    let (open_len, close_len) = delimiter_lengths(text);
    let mut segments = Vec::new();
    let body_end = text.len() - close_len;

    segments.push(StringSegment {
        kind: STRING_OPEN,
        range: range(0, open_len),
    });

    let bytes = text.as_bytes();
    let mut part_start = open_len;
    let mut idx = open_len;
    while idx < body_end {
        if bytes[idx] == b'%'
            && idx + 1 < body_end
            && (bytes[idx + 1].is_ascii_digit() || bytes[idx + 1] == b's')
        {
            if part_start < idx {
                segments.push(StringSegment {
                    kind: STRING_PART,
                    range: range(part_start, idx),
                });
            }
            segments.push(StringSegment {
                kind: STRING_MARKER,
                range: range(idx, idx + 2),
            });
            idx += 2;
            part_start = idx;
        } else {
            idx += 1;
        }
    }
    if part_start < body_end {
        segments.push(StringSegment {
            kind: STRING_PART,
            range: range(part_start, body_end),
        });
    }

    if close_len > 0 {
        segments.push(StringSegment {
            kind: STRING_CLOSE,
            range: range(body_end, text.len()),
        });
    }

    segments
}

/// The text between the opening and closing delimiters of a string literal.
pub fn string_content(text: &str) -> &str {
    let (open_len, close_len) = delimiter_lengths(text);
    &text[open_len..text.len() - close_len]
}

fn delimiter_lengths(text: &str) -> (usize, usize) {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('q' | 'Q'), Some('\''), Some(open)) => {
            let open_len = 2 + open.len_utf8();
            let close_len = closing_delimiter(open).len_utf8() + 1;
            if text.len() >= open_len + close_len {
                (open_len, close_len)
            } else {
                (open_len.min(text.len()), 0)
            }
        }
        (Some('\'' | '"'), _, _) if text.len() >= 2 => (1, 1),
        _ => (text.len().min(1), 0),
    }
}
