//! Token and node kinds for PL/SQL source files.

/// Every token and node in the concrete syntax tree carries one of these.
///
/// Tokens come first (keywords, punctuation, literals, trivia), then the
/// composite node kinds. `EOF` must stay last: the rowan language impl
/// relies on it as the upper bound of the raw representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // Keywords
    ALL_KW,
    AND_KW,
    AS_KW,
    ASC_KW,
    BEGIN_KW,
    BETWEEN_KW,
    BODY_KW,
    BULK_KW,
    BY_KW,
    CASE_KW,
    COLLECT_KW,
    CONNECT_KW,
    CONSTANT_KW,
    CONTINUE_KW,
    CREATE_KW,
    DECLARE_KW,
    DEFAULT_KW,
    DENSE_RANK_KW,
    DESC_KW,
    DETERMINISTIC_KW,
    DISTINCT_KW,
    DUAL_KW,
    ELSE_KW,
    ELSIF_KW,
    END_KW,
    EXCEPTION_KW,
    EXISTS_KW,
    EXIT_KW,
    FALSE_KW,
    FIRST_KW,
    FOR_KW,
    FORALL_KW,
    FROM_KW,
    FUNCTION_KW,
    GROUP_KW,
    IF_KW,
    IN_KW,
    INCLUDE_KW, // only inside {% ... %}
    INDEX_KW,
    INNER_KW,
    INSERT_KW,
    INTO_KW,
    IS_KW,
    JOIN_KW,
    KEEP_KW,
    LAST_KW,
    LEFT_KW,
    LEVEL_KW,
    LIKE_KW,
    LOOP_KW,
    MEMBER_KW,
    NO_DATA_FOUND_KW,
    NOCOPY_KW,
    NOT_KW,
    NULL_KW,
    NULLS_KW,
    OBJECT_KW,
    OF_KW,
    ON_KW,
    OR_KW,
    ORDER_KW,
    OUT_KW,
    OVER_KW,
    PACKAGE_KW,
    PARTITION_KW,
    PIPE_KW,
    PIPELINED_KW,
    PRIOR_KW,
    PROCEDURE_KW,
    RAISE_KW,
    RANK_KW,
    RECORD_KW,
    REPLACE_KW,
    RETURN_KW,
    RETURNING_KW,
    ROW_KW,
    SELECT_KW,
    SET_KW,
    START_KW,
    TABLE_KW,
    THEN_KW,
    TRUE_KW,
    TYPE_KW,
    UNION_KW,
    UPDATE_KW,
    VALUES_KW,
    WHEN_KW,
    WHERE_KW,
    WHILE_KW,
    WITH_KW,
    WITHIN_KW,

    // Operators & punctuation
    SEMICOLON,       // ;
    COLON,           // :
    DOT,             // .
    DOT2,            // ..
    COMMA,           // ,
    LPAREN,          // (
    RPAREN,          // )
    LBRACKET,        // [
    RBRACKET,        // ]
    LBRACE,          // {
    RBRACE,          // }
    DIRECTIVE_OPEN,  // {%
    DIRECTIVE_CLOSE, // %}
    PERCENT,         // % (as in %ROWTYPE)
    ASSIGN,          // :=
    PLUS,            // +
    MINUS,           // -
    STAR,            // *
    SLASH,           // /
    CONCAT,          // ||
    EQ,              // =
    NE,              // <> or !=
    LT,              // <
    LE,              // <=
    GT,              // >
    GE,              // >=
    ARROW,           // => (named argument)

    // Literals & identifiers
    STRING,        // 'text', q'[text]' or "text" inside a directive
    NUMBER,        // 42, 3.14, .5, 7.
    IDENT,         // l_total, $x, my_pkg
    QUOTED_IDENT,  // "Mixed Case"
    STRING_OPEN,   // ' or q'[ (children of a string node)
    STRING_PART,   // literal text between markers
    STRING_MARKER, // %s, %1 placeholders
    STRING_CLOSE,  // ' or ]'
    WHITESPACE,
    COMMENT, // -- line or /* block */

    // Composite nodes: top level
    SOURCE_FILE,
    PACKAGE_SPEC,
    PACKAGE_BODY,
    DIRECTIVE_STMT,
    UDT_DEF,

    // Declarations
    PROCEDURE_DEF,
    FUNCTION_DEF,
    PARAM_LIST,
    PARAM_DECL,
    VARIABLE_DECL,
    RECORD_TYPE_DEF,
    COLLECTION_TYPE_DEF,
    RECORD_FIELD,
    TYPE,
    BUILTIN_TYPE,
    UDT,

    // Statements
    BLOCK_STMT,
    EXCEPTION_HANDLER,
    IF_STMT,
    ELSIF_CLAUSE,
    ELSE_CLAUSE,
    CASE_STMT,
    CASE_WHEN,
    CASE_ELSE,
    LOOP_STMT,
    WHILE_STMT,
    FOR_STMT,
    FORALL_STMT,
    EXPRESSION_STMT,
    ASSIGNMENT_STMT,
    RETURN_STMT,
    PIPE_ROW_STMT,
    EXIT_STMT,
    CONTINUE_STMT,
    RAISE_STMT,
    SELECT_STMT,
    INSERT_STMT,
    UPDATE_STMT,

    // Embedded SQL
    SELECT,
    UNION_SELECT,
    WITH_TABLE,
    SELECT_COLUMN,
    INTO_CLAUSE,
    SELECT_TABLES,
    SELECT_TABLE,
    JOIN_CLAUSE,
    WHERE_CLAUSE,
    HIERARCHICAL_CLAUSE,
    GROUP_BY_CLAUSE,
    ORDER_BY_CLAUSE,
    ORDER_BY_ITEM,
    PARTITION_BY_CLAUSE,
    COLUMN_LIST,
    VALUES_CLAUSE,
    RETURNING_CLAUSE,
    UPDATE_ASSIGNMENT,

    // Expressions
    STRING_LITERAL,
    NUMBER_LITERAL,
    BOOLEAN_LITERAL,
    CONSTANT,
    BUILTIN_PROGRAM,
    ACCESSOR,
    CHAIN_ACCESSOR,
    CHAIN_EXPR,
    SEQUENCE_EXPR,
    SELECT_EXPR,
    EXISTS_EXPR,
    PRIOR_EXPR,
    LEVEL_EXPR,
    UNARY_EXPR,
    ANALYTIC_EXPR,
    BETWEEN_EXPR,
    BINARY_EXPR,
    OPERATOR,
    CALL_EXPR,
    ARGUMENTS,
    ARROW_ARG,
    CASE_EXPR,

    // Error handling
    ERROR, // Malformed token or skipped region

    // Special
    EOF, // End of file
}

use SyntaxKind::*;

/// Reserved words, sorted by spelling so the lexer can binary-search them.
pub(crate) const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("ALL", ALL_KW),
    ("AND", AND_KW),
    ("AS", AS_KW),
    ("ASC", ASC_KW),
    ("BEGIN", BEGIN_KW),
    ("BETWEEN", BETWEEN_KW),
    ("BODY", BODY_KW),
    ("BULK", BULK_KW),
    ("BY", BY_KW),
    ("CASE", CASE_KW),
    ("COLLECT", COLLECT_KW),
    ("CONNECT", CONNECT_KW),
    ("CONSTANT", CONSTANT_KW),
    ("CONTINUE", CONTINUE_KW),
    ("CREATE", CREATE_KW),
    ("DECLARE", DECLARE_KW),
    ("DEFAULT", DEFAULT_KW),
    ("DENSE_RANK", DENSE_RANK_KW),
    ("DESC", DESC_KW),
    ("DETERMINISTIC", DETERMINISTIC_KW),
    ("DISTINCT", DISTINCT_KW),
    ("DUAL", DUAL_KW),
    ("ELSE", ELSE_KW),
    ("ELSIF", ELSIF_KW),
    ("END", END_KW),
    ("EXCEPTION", EXCEPTION_KW),
    ("EXISTS", EXISTS_KW),
    ("EXIT", EXIT_KW),
    ("FALSE", FALSE_KW),
    ("FIRST", FIRST_KW),
    ("FOR", FOR_KW),
    ("FORALL", FORALL_KW),
    ("FROM", FROM_KW),
    ("FUNCTION", FUNCTION_KW),
    ("GROUP", GROUP_KW),
    ("IF", IF_KW),
    ("IN", IN_KW),
    ("INDEX", INDEX_KW),
    ("INNER", INNER_KW),
    ("INSERT", INSERT_KW),
    ("INTO", INTO_KW),
    ("IS", IS_KW),
    ("JOIN", JOIN_KW),
    ("KEEP", KEEP_KW),
    ("LAST", LAST_KW),
    ("LEFT", LEFT_KW),
    ("LEVEL", LEVEL_KW),
    ("LIKE", LIKE_KW),
    ("LOOP", LOOP_KW),
    ("MEMBER", MEMBER_KW),
    ("NOCOPY", NOCOPY_KW),
    ("NOT", NOT_KW),
    ("NO_DATA_FOUND", NO_DATA_FOUND_KW),
    ("NULL", NULL_KW),
    ("NULLS", NULLS_KW),
    ("OBJECT", OBJECT_KW),
    ("OF", OF_KW),
    ("ON", ON_KW),
    ("OR", OR_KW),
    ("ORDER", ORDER_KW),
    ("OUT", OUT_KW),
    ("OVER", OVER_KW),
    ("PACKAGE", PACKAGE_KW),
    ("PARTITION", PARTITION_KW),
    ("PIPE", PIPE_KW),
    ("PIPELINED", PIPELINED_KW),
    ("PRIOR", PRIOR_KW),
    ("PROCEDURE", PROCEDURE_KW),
    ("RAISE", RAISE_KW),
    ("RANK", RANK_KW),
    ("RECORD", RECORD_KW),
    ("REPLACE", REPLACE_KW),
    ("RETURN", RETURN_KW),
    ("RETURNING", RETURNING_KW),
    ("ROW", ROW_KW),
    ("SELECT", SELECT_KW),
    ("SET", SET_KW),
    ("START", START_KW),
    ("TABLE", TABLE_KW),
    ("THEN", THEN_KW),
    ("TRUE", TRUE_KW),
    ("TYPE", TYPE_KW),
    ("UNION", UNION_KW),
    ("UPDATE", UPDATE_KW),
    ("VALUES", VALUES_KW),
    ("WHEN", WHEN_KW),
    ("WHERE", WHERE_KW),
    ("WHILE", WHILE_KW),
    ("WITH", WITH_KW),
    ("WITHIN", WITHIN_KW),
];

impl SyntaxKind {
    /// Case-insensitive keyword lookup. Quoted identifiers never reach here.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let upper = text.to_ascii_uppercase();
        KEYWORDS
            .binary_search_by(|(word, _)| (*word).cmp(upper.as_str()))
            .ok()
            .map(|idx| KEYWORDS[idx].1)
    }

    pub fn is_keyword(&self) -> bool {
        (*self as u16) <= (WITHIN_KW as u16)
    }

    /// Keywords that may still be used as plain identifiers
    /// (`replace(...)`, a column called `type`, a record field `row`).
    pub fn is_soft_keyword(&self) -> bool {
        matches!(
            self,
            REPLACE_KW
                | TYPE_KW
                | RECORD_KW
                | BODY_KW
                | ROW_KW
                | MEMBER_KW
                | INDEX_KW
                | OBJECT_KW
                | KEEP_KW
                | NULLS_KW
                | COLLECT_KW
                | BULK_KW
                | PIPE_KW
                | PIPELINED_KW
                | DETERMINISTIC_KW
                | NOCOPY_KW
                | CONSTANT_KW
                | WITHIN_KW
                | PARTITION_KW
        )
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self, WHITESPACE | COMMENT)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, STRING | NUMBER)
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, IDENT | QUOTED_IDENT)
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            STRING_LITERAL
                | NUMBER_LITERAL
                | BOOLEAN_LITERAL
                | CONSTANT
                | BUILTIN_PROGRAM
                | ACCESSOR
                | CHAIN_EXPR
                | SEQUENCE_EXPR
                | SELECT_EXPR
                | EXISTS_EXPR
                | PRIOR_EXPR
                | LEVEL_EXPR
                | UNARY_EXPR
                | ANALYTIC_EXPR
                | BETWEEN_EXPR
                | BINARY_EXPR
                | CALL_EXPR
                | CASE_EXPR
        )
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            BLOCK_STMT
                | IF_STMT
                | CASE_STMT
                | LOOP_STMT
                | WHILE_STMT
                | FOR_STMT
                | FORALL_STMT
                | EXPRESSION_STMT
                | ASSIGNMENT_STMT
                | RETURN_STMT
                | PIPE_ROW_STMT
                | EXIT_STMT
                | CONTINUE_STMT
                | RAISE_STMT
                | SELECT_STMT
                | INSERT_STMT
                | UPDATE_STMT
                | PROCEDURE_DEF
                | FUNCTION_DEF
                | DIRECTIVE_STMT
                | PACKAGE_SPEC
                | PACKAGE_BODY
                | UDT_DEF
        )
    }

    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            PROCEDURE_DEF
                | FUNCTION_DEF
                | VARIABLE_DECL
                | RECORD_TYPE_DEF
                | COLLECTION_TYPE_DEF
                | DIRECTIVE_STMT
        )
    }

    /// Source spelling of fixed tokens, used in diagnostics.
    pub fn token_text(&self) -> Option<&'static str> {
        if let Some((word, _)) = KEYWORDS.iter().find(|(_, kind)| kind == self) {
            return Some(word);
        }
        let text = match self {
            INCLUDE_KW => "include",
            SEMICOLON => ";",
            COLON => ":",
            DOT => ".",
            DOT2 => "..",
            COMMA => ",",
            LPAREN => "(",
            RPAREN => ")",
            LBRACKET => "[",
            RBRACKET => "]",
            LBRACE => "{",
            RBRACE => "}",
            DIRECTIVE_OPEN => "{%",
            DIRECTIVE_CLOSE => "%}",
            PERCENT => "%",
            ASSIGN => ":=",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            CONCAT => "||",
            EQ => "=",
            NE => "<>",
            LT => "<",
            LE => "<=",
            GT => ">",
            GE => ">=",
            ARROW => "=>",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable name for diagnostics: `';'`, `END`, `identifier`.
    pub fn describe(&self) -> String {
        match self.token_text() {
            Some(text) => format!("'{}'", text),
            None => match self {
                IDENT | QUOTED_IDENT => "identifier".to_string(),
                STRING => "string literal".to_string(),
                NUMBER => "number".to_string(),
                EOF => "end of file".to_string(),
                ERROR => "malformed token".to_string(),
                other => other.rule_name().to_string(),
            },
        }
    }

    /// Stable rule name for named nodes, as consumers query them.
    pub fn rule_name(&self) -> &'static str {
        match self {
            SOURCE_FILE => "source_file",
            PACKAGE_SPEC => "package_specification",
            PACKAGE_BODY => "package_body_statement",
            DIRECTIVE_STMT => "directive_statement",
            UDT_DEF => "user_defined_type_definition",
            PROCEDURE_DEF => "procedure_definition",
            FUNCTION_DEF => "function_definition",
            PARAM_LIST => "param_declaration_list",
            PARAM_DECL => "param_declaration",
            VARIABLE_DECL => "variable_declaration",
            RECORD_TYPE_DEF => "record_type_definition",
            COLLECTION_TYPE_DEF => "collection_type_definition",
            RECORD_FIELD => "record_field",
            TYPE => "type",
            BUILTIN_TYPE => "builtin_type",
            UDT => "udt",
            BLOCK_STMT => "block_statement",
            EXCEPTION_HANDLER => "exception_handler",
            IF_STMT => "if_statement",
            ELSIF_CLAUSE => "elsif_clause",
            ELSE_CLAUSE => "else_clause",
            CASE_STMT => "case_statement",
            CASE_WHEN => "case_when",
            CASE_ELSE => "case_else",
            LOOP_STMT => "loop_statement",
            WHILE_STMT => "while_statement",
            FOR_STMT => "for_statement",
            FORALL_STMT => "forall_statement",
            EXPRESSION_STMT => "expression_statement",
            ASSIGNMENT_STMT => "assignment_statement",
            RETURN_STMT => "return_statement",
            PIPE_ROW_STMT => "pipe_row_statement",
            EXIT_STMT => "exit_statement",
            CONTINUE_STMT => "continue_statement",
            RAISE_STMT => "raise_statement",
            SELECT_STMT => "select_statement",
            INSERT_STMT => "insert_statement",
            UPDATE_STMT => "update_statement",
            SELECT => "select",
            UNION_SELECT => "union_select",
            WITH_TABLE => "with_table",
            SELECT_COLUMN => "select_column",
            INTO_CLAUSE => "into_clause",
            SELECT_TABLES => "select_tables",
            SELECT_TABLE => "select_table",
            JOIN_CLAUSE => "join_clause",
            WHERE_CLAUSE => "where_clause",
            HIERARCHICAL_CLAUSE => "hierarchical_clause",
            GROUP_BY_CLAUSE => "group_by_clause",
            ORDER_BY_CLAUSE => "order_by_clause",
            ORDER_BY_ITEM => "order_by_item",
            PARTITION_BY_CLAUSE => "partition_by_clause",
            COLUMN_LIST => "column_list",
            VALUES_CLAUSE => "values_clause",
            RETURNING_CLAUSE => "returning_clause",
            UPDATE_ASSIGNMENT => "update_assignment",
            STRING_LITERAL => "string",
            NUMBER_LITERAL => "number",
            BOOLEAN_LITERAL => "boolean",
            CONSTANT => "constant",
            BUILTIN_PROGRAM => "builtin_program",
            ACCESSOR => "accessor",
            CHAIN_ACCESSOR => "chain_accessor",
            CHAIN_EXPR => "chain_expression",
            SEQUENCE_EXPR => "sequence_expression",
            SELECT_EXPR => "select_expression",
            EXISTS_EXPR => "exists_expression",
            PRIOR_EXPR => "prior_expression",
            LEVEL_EXPR => "level_expression",
            UNARY_EXPR => "unary_expression",
            ANALYTIC_EXPR => "analytic_expression",
            BETWEEN_EXPR => "between_expression",
            BINARY_EXPR => "binary_expression",
            OPERATOR => "binary_operator",
            CALL_EXPR => "call_expression",
            ARGUMENTS => "arguments",
            ARROW_ARG => "arrow_argument",
            CASE_EXPR => "case_expression",
            IDENT | QUOTED_IDENT => "identifier",
            STRING_OPEN => "string_bracket__open",
            STRING_PART => "string_part",
            STRING_MARKER => "string_marker",
            STRING_CLOSE => "string_bracket__close",
            COMMENT => "comment",
            ERROR => "ERROR",
            _ => "token",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlSqlLanguage {}

impl rowan::Language for PlSqlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::EOF as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Convenient type aliases
pub type SyntaxNode = rowan::SyntaxNode<PlSqlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<PlSqlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<PlSqlLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_sorted() {
        for pair in KEYWORDS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_keyword_lookup_ignores_case() {
        assert_eq!(SyntaxKind::from_keyword("begin"), Some(BEGIN_KW));
        assert_eq!(SyntaxKind::from_keyword("Dense_Rank"), Some(DENSE_RANK_KW));
        assert_eq!(SyntaxKind::from_keyword("l_total"), None);
        // include is only a keyword inside a directive
        assert_eq!(SyntaxKind::from_keyword("include"), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(SEMICOLON.describe(), "';'");
        assert_eq!(END_KW.describe(), "'END'");
        assert_eq!(IDENT.describe(), "identifier");
        assert_eq!(BLOCK_STMT.describe(), "block_statement");
    }

    #[test]
    fn test_raw_round_trip() {
        use rowan::Language;
        for kind in [ALL_KW, SEMICOLON, STRING, SOURCE_FILE, ERROR, EOF] {
            assert_eq!(PlSqlLanguage::kind_from_raw(kind.into()), kind);
        }
    }
}
