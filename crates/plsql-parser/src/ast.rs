/// Typed AST wrappers over the rowan CST
use crate::fields::{field, Field};
use crate::lexer::string_content;
use crate::precedence::BinaryOp;
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::SyntaxKind::*;
use rowan::TextRange;

fn field_node(node: &SyntaxNode, f: Field) -> Option<SyntaxNode> {
    field(node, f).into_iter().find_map(|e| e.into_node())
}

fn field_text(node: &SyntaxNode, f: Field) -> Option<String> {
    field(node, f)
        .into_iter()
        .find_map(|e| e.into_token())
        .map(|t| t.text().to_string())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Root file node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile(SyntaxNode);

impl SourceFile {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == SOURCE_FILE {
            Some(Self(node))
        } else {
            None
        }
    }

    /// Wrap the root of a parse. The parser always produces a
    /// `SOURCE_FILE` root.
    pub(crate) fn from_root(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SOURCE_FILE);
        Self(node)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// Top-level items, in source order. Skipped regions are not items.
    pub fn items(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind() != ERROR)
    }

    pub fn blocks(&self) -> impl Iterator<Item = BlockStatement> + '_ {
        self.0.children().filter_map(BlockStatement::cast)
    }

    pub fn programs(&self) -> impl Iterator<Item = ProgramDefinition> + '_ {
        self.0.children().filter_map(ProgramDefinition::cast)
    }

    pub fn package_bodies(&self) -> impl Iterator<Item = PackageBody> + '_ {
        self.0.children().filter_map(PackageBody::cast)
    }

    pub fn package_specs(&self) -> impl Iterator<Item = PackageSpec> + '_ {
        self.0.children().filter_map(PackageSpec::cast)
    }

    /// Every `{% include %}` in the file, at any depth
    pub fn directives(&self) -> impl Iterator<Item = DirectiveStatement> + '_ {
        self.0.descendants().filter_map(DirectiveStatement::cast)
    }

    /// Regions the parser skipped or wrapped because of errors
    pub fn error_nodes(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.descendants().filter(|n| n.kind() == ERROR)
    }
}

/// `[DECLARE ...] BEGIN ... [EXCEPTION ...] END;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockStatement(SyntaxNode);

impl BlockStatement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == BLOCK_STMT {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn declarations(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_declaration())
    }

    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_statement())
    }

    pub fn exception_handlers(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind() == EXCEPTION_HANDLER)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn text_range(&self) -> TextRange {
        self.0.text_range()
    }
}

/// A procedure or function, standalone, nested, or inside a package body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramDefinition(SyntaxNode);

impl ProgramDefinition {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            PROCEDURE_DEF | FUNCTION_DEF => Some(Self(node)),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        self.0.kind() == FUNCTION_DEF
    }

    pub fn name(&self) -> Option<String> {
        field_text(&self.0, Field::ProgramName)
    }

    /// The name repeated after `END`, if any
    pub fn closing_name(&self) -> Option<String> {
        field_text(&self.0, Field::ClosingIdentifier)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        field_node(&self.0, Field::ReturnType).and_then(TypeRef::cast)
    }

    pub fn params(&self) -> impl Iterator<Item = ParamDeclaration> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == PARAM_LIST)
            .flat_map(|list| list.children())
            .filter_map(ParamDeclaration::cast)
    }

    /// A signature with no body: `PROCEDURE p(x NUMBER);`
    pub fn is_forward_declaration(&self) -> bool {
        !has_token(&self.0, BEGIN_KW)
    }

    pub fn is_pipelined(&self) -> bool {
        has_token(&self.0, PIPELINED_KW)
    }

    pub fn declarations(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_declaration())
    }

    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_statement())
    }
}

/// `name [IN] [OUT [NOCOPY]] type [DEFAULT expr]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamDeclaration(SyntaxNode);

impl ParamDeclaration {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == PARAM_DECL {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<String> {
        field_text(&self.0, Field::DeclarationIdentifier)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn mode(&self) -> ParamMode {
        match (has_token(&self.0, IN_KW), has_token(&self.0, OUT_KW)) {
            (true, true) => ParamMode::InOut,
            (false, true) => ParamMode::Out,
            _ => ParamMode::In,
        }
    }

    pub fn default_value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamMode {
    In,
    Out,
    InOut,
}

/// `CREATE [OR REPLACE] PACKAGE BODY name IS ... END [name];`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageBody(SyntaxNode);

impl PackageBody {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == PACKAGE_BODY {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<String> {
        field_text(&self.0, Field::PackageIdentifier)
    }

    pub fn closing_name(&self) -> Option<String> {
        field_text(&self.0, Field::ClosingIdentifier)
    }

    pub fn declarations(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_declaration())
    }

    pub fn programs(&self) -> impl Iterator<Item = ProgramDefinition> + '_ {
        self.0.children().filter_map(ProgramDefinition::cast)
    }
}

/// `CREATE [OR REPLACE] PACKAGE name AS ... END [name];`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpec(SyntaxNode);

impl PackageSpec {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == PACKAGE_SPEC {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<String> {
        field_text(&self.0, Field::PackageIdentifier)
    }

    pub fn closing_name(&self) -> Option<String> {
        field_text(&self.0, Field::ClosingIdentifier)
    }

    /// Record and collection type declarations
    pub fn types(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| matches!(n.kind(), RECORD_TYPE_DEF | COLLECTION_TYPE_DEF))
    }
}

/// `name [CONSTANT] type [NOT NULL] [:= expr];` or `name EXCEPTION;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableDeclaration(SyntaxNode);

impl VariableDeclaration {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == VARIABLE_DECL {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<String> {
        field_text(&self.0, Field::DeclarationIdentifier)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn is_constant(&self) -> bool {
        has_token(&self.0, CONSTANT_KW)
    }

    pub fn is_exception(&self) -> bool {
        has_token(&self.0, EXCEPTION_KW)
    }

    pub fn default_value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

/// `TYPE name IS RECORD (field type, ...);`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordTypeDefinition(SyntaxNode);

impl RecordTypeDefinition {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == RECORD_TYPE_DEF {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<String> {
        field_text(&self.0, Field::TypeIdentifier)
    }

    /// `(field name, field type)` pairs
    pub fn fields(&self) -> Vec<(String, Option<TypeRef>)> {
        self.0
            .children()
            .filter(|n| n.kind() == RECORD_FIELD)
            .filter_map(|f| {
                let name = field_text(&f, Field::DeclarationIdentifier)?;
                Some((name, f.children().find_map(TypeRef::cast)))
            })
            .collect()
    }
}

/// A `type` node: builtin (`NUMBER(10)`) or user-defined (`emp%ROWTYPE`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(SyntaxNode);

impl TypeRef {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == TYPE {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.0.children().any(|n| n.kind() == BUILTIN_TYPE)
    }

    /// `%ROWTYPE` or `%TYPE` anchoring
    pub fn is_anchored(&self) -> bool {
        self.0
            .children()
            .any(|n| n.kind() == UDT && has_token(&n, PERCENT))
    }

    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

/// `IF cond THEN ... {ELSIF ...} [ELSE ...] END IF;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IfStatement(SyntaxNode);

impl IfStatement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == IF_STMT {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn then_statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_statement())
    }

    pub fn elsif_clauses(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind() == ELSIF_CLAUSE)
    }

    pub fn else_clause(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == ELSE_CLAUSE)
    }
}

/// CASE statement or CASE expression; both have the same shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Case(SyntaxNode);

impl Case {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            CASE_STMT | CASE_EXPR => Some(Self(node)),
            _ => None,
        }
    }

    pub fn is_statement(&self) -> bool {
        self.0.kind() == CASE_STMT
    }

    /// The selector of a simple CASE; `None` for a searched CASE
    pub fn selector(&self) -> Option<Expr> {
        field_node(&self.0, Field::CaseCondition).and_then(Expr::cast)
    }

    pub fn whens(&self) -> Vec<SyntaxNode> {
        field(&self.0, Field::CaseWhen)
            .into_iter()
            .filter_map(|e| e.into_node())
            .collect()
    }

    pub fn else_branch(&self) -> Option<SyntaxNode> {
        field_node(&self.0, Field::CaseElse)
    }
}

/// One query block, or a `UNION` of them
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Select(SyntaxNode);

impl Select {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SELECT | UNION_SELECT => Some(Self(node)),
            _ => None,
        }
    }

    pub fn is_union(&self) -> bool {
        self.0.kind() == UNION_SELECT
    }

    /// The query blocks of a union, left to right; a single block otherwise
    pub fn branches(&self) -> Vec<Select> {
        if !self.is_union() {
            return vec![self.clone()];
        }
        self.0
            .children()
            .filter_map(Select::cast)
            .flat_map(|s| s.branches())
            .collect()
    }

    /// Names bound by `WITH name AS (...)`
    pub fn with_tables(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|n| n.kind() == WITH_TABLE)
            .filter_map(|n| field_text(&n, Field::TableAlias))
            .collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind() == SELECT_COLUMN)
    }

    pub fn is_bulk_collect(&self) -> bool {
        self.0
            .children()
            .any(|n| n.kind() == INTO_CLAUSE && has_token(&n, BULK_KW))
    }

    /// Targets of the `INTO` clause
    pub fn into_targets(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|n| n.kind() == INTO_CLAUSE)
            .flat_map(|n| n.children())
            .filter(|n| n.kind() == CHAIN_ACCESSOR)
            .map(|n| n.text().to_string())
            .collect()
    }

    /// Tables in `FROM`, including joined ones
    pub fn tables(&self) -> Vec<SelectTable> {
        self.0
            .children()
            .filter(|n| n.kind() == SELECT_TABLES)
            .flat_map(|n| n.descendants())
            .filter_map(SelectTable::cast)
            .filter(|t| {
                // Only tables of this query block, not of subqueries
                t.0.ancestors()
                    .find(|a| a.kind() == SELECT)
                    .is_some_and(|a| a == self.0)
            })
            .collect()
    }

    pub fn where_clause(&self) -> Option<Expr> {
        self.0
            .children()
            .find(|n| n.kind() == WHERE_CLAUSE)
            .and_then(|w| w.children().find_map(Expr::cast))
    }
}

/// A table source in `FROM` or a `JOIN`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectTable(SyntaxNode);

impl SelectTable {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == SELECT_TABLE {
            Some(Self(node))
        } else {
            None
        }
    }

    /// The (possibly qualified) table name; `None` for `DUAL`, `TABLE(...)`
    /// and subqueries
    pub fn name(&self) -> Option<String> {
        field_node(&self.0, Field::TableName).map(|n| n.text().to_string())
    }

    pub fn alias(&self) -> Option<String> {
        field_text(&self.0, Field::TableAlias)
    }

    pub fn is_dual(&self) -> bool {
        has_token(&self.0, DUAL_KW)
    }
}

/// `INSERT INTO table [(cols)] ...;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertStatement(SyntaxNode);

impl InsertStatement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == INSERT_STMT {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn table(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == CHAIN_ACCESSOR)
            .map(|n| n.text().to_string())
    }

    pub fn columns(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|n| n.kind() == COLUMN_LIST)
            .flat_map(|n| n.children_with_tokens())
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_identifier())
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn values(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == VALUES_CLAUSE)
            .flat_map(|n| n.children())
            .filter_map(Expr::cast)
    }

    pub fn select(&self) -> Option<Select> {
        self.0.children().find_map(Select::cast)
    }
}

/// `UPDATE table [alias] SET ...;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateStatement(SyntaxNode);

impl UpdateStatement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == UPDATE_STMT {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn table(&self) -> Option<String> {
        field_node(&self.0, Field::TableName).map(|n| n.text().to_string())
    }

    pub fn alias(&self) -> Option<String> {
        field_text(&self.0, Field::TableAlias)
    }

    /// `(target, value)` per `SET` entry
    pub fn assignments(&self) -> Vec<(String, Option<Expr>)> {
        self.0
            .children()
            .filter(|n| n.kind() == UPDATE_ASSIGNMENT)
            .filter_map(|a| {
                let target = a.children().find(|n| n.kind() == CHAIN_ACCESSOR)?;
                Some((target.text().to_string(), a.children().find_map(Expr::cast)))
            })
            .collect()
    }
}

/// `{% include [:type] "path" %}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveStatement(SyntaxNode);

impl DirectiveStatement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == DIRECTIVE_STMT {
            Some(Self(node))
        } else {
            None
        }
    }

    /// The included path, without quotes
    pub fn path(&self) -> Option<String> {
        self.0
            .children()
            .find_map(StringLiteral::cast)
            .map(|s| s.content())
    }

    /// `include:type` pulls in type declarations only
    pub fn is_type_include(&self) -> bool {
        has_token(&self.0, TYPE_KW)
    }
}

/// A string literal, split into parts and `%s`/`%1` markers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral(SyntaxNode);

impl StringLiteral {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == STRING_LITERAL {
            Some(Self(node))
        } else {
            None
        }
    }

    /// Text between the delimiters. `''` escapes are kept as written.
    pub fn content(&self) -> String {
        string_content(&self.0.text().to_string()).to_string()
    }

    pub fn markers(&self) -> Vec<String> {
        self.segments(STRING_MARKER)
    }

    pub fn parts(&self) -> Vec<String> {
        self.segments(STRING_PART)
    }

    fn segments(&self, kind: SyntaxKind) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == kind)
            .map(|t| t.text().to_string())
            .collect()
    }
}

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr(SyntaxNode);

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind().is_expression() {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn text(&self) -> String {
        self.0.text().to_string()
    }

    pub fn as_binary(&self) -> Option<BinaryExpression> {
        BinaryExpression::cast(self.0.clone())
    }

    pub fn as_between(&self) -> Option<BetweenExpression> {
        BetweenExpression::cast(self.0.clone())
    }

    pub fn as_unary(&self) -> Option<UnaryExpression> {
        UnaryExpression::cast(self.0.clone())
    }

    pub fn as_call(&self) -> Option<CallExpression> {
        CallExpression::cast(self.0.clone())
    }

    pub fn as_case(&self) -> Option<Case> {
        Case::cast(self.0.clone())
    }

    pub fn as_string(&self) -> Option<StringLiteral> {
        StringLiteral::cast(self.0.clone())
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryExpression(SyntaxNode);

impl BinaryExpression {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == BINARY_EXPR {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn lhs(&self) -> Option<Expr> {
        field_node(&self.0, Field::Left).and_then(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        field_node(&self.0, Field::Right).and_then(Expr::cast)
    }

    pub fn op(&self) -> Option<BinaryOp> {
        let operator = field_node(&self.0, Field::Operator)?;
        let mut kinds = [EOF; 3];
        let significant = operator
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia());
        for (slot, token) in kinds.iter_mut().zip(significant) {
            *slot = token.kind();
        }
        BinaryOp::from_tokens(kinds).map(|(op, _)| op)
    }
}

/// `operand BETWEEN low AND high`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BetweenExpression(SyntaxNode);

impl BetweenExpression {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == BETWEEN_EXPR {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn operand(&self) -> Option<Expr> {
        field_node(&self.0, Field::Operand).and_then(Expr::cast)
    }

    pub fn low(&self) -> Option<Expr> {
        field_node(&self.0, Field::Low).and_then(Expr::cast)
    }

    pub fn high(&self) -> Option<Expr> {
        field_node(&self.0, Field::High).and_then(Expr::cast)
    }
}

/// `NOT expr` or `- expr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnaryExpression(SyntaxNode);

impl UnaryExpression {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == UNARY_EXPR {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| matches!(t.kind(), NOT_KW | MINUS))
    }

    pub fn operand(&self) -> Option<Expr> {
        field_node(&self.0, Field::Operand).and_then(Expr::cast)
    }
}

/// `function(arguments)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallExpression(SyntaxNode);

impl CallExpression {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == CALL_EXPR {
            Some(Self(node))
        } else {
            None
        }
    }

    pub fn function(&self) -> Option<Expr> {
        field_node(&self.0, Field::Function).and_then(Expr::cast)
    }

    /// Name of the called program when it is a plain or dotted name
    pub fn function_name(&self) -> Option<String> {
        let function = self.function()?;
        match function.kind() {
            ACCESSOR | CHAIN_EXPR | BUILTIN_PROGRAM => Some(function.text()),
            _ => None,
        }
    }

    /// Positional arguments, in order
    pub fn arguments(&self) -> Vec<Expr> {
        self.argument_list()
            .map(|args| args.children().filter_map(Expr::cast).collect())
            .unwrap_or_default()
    }

    /// `name => value` arguments
    pub fn named_arguments(&self) -> Vec<(String, Option<Expr>)> {
        let Some(args) = self.argument_list() else {
            return Vec::new();
        };
        args.children()
            .filter(|n| n.kind() == ARROW_ARG)
            .filter_map(|arg| {
                let name = arg
                    .children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .find(|t| t.kind().is_identifier())?;
                Some((name.text().to_string(), arg.children().find_map(Expr::cast)))
            })
            .collect()
    }

    /// `COUNT(*)`
    pub fn is_star(&self) -> bool {
        self.argument_list().is_some_and(|args| has_token(&args, STAR))
    }

    fn argument_list(&self) -> Option<SyntaxNode> {
        field_node(&self.0, Field::Arguments)
    }
}
