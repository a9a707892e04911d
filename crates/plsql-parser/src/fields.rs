//! Named fields on CST nodes.
//!
//! rowan trees have no notion of field names, so they are computed from a
//! static table: for each parent kind, a field is located among the node's
//! direct children (tokens included) by a small [`Locator`]. Consumers
//! query fields by name instead of by child position.

use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode};
use crate::SyntaxKind::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PackageIdentifier,
    ClosingIdentifier,
    ProgramName,
    ReturnType,
    DeclarationIdentifier,
    TypeIdentifier,
    CaseCondition,
    CaseWhen,
    CaseElse,
    CaseThen,
    TableName,
    TableAlias,
    AccessorIdentifier,
    AccessorMember,
    ChainMember,
    Left,
    Operator,
    Right,
    Operand,
    Low,
    High,
    Function,
    Arguments,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::PackageIdentifier,
        Field::ClosingIdentifier,
        Field::ProgramName,
        Field::ReturnType,
        Field::DeclarationIdentifier,
        Field::TypeIdentifier,
        Field::CaseCondition,
        Field::CaseWhen,
        Field::CaseElse,
        Field::CaseThen,
        Field::TableName,
        Field::TableAlias,
        Field::AccessorIdentifier,
        Field::AccessorMember,
        Field::ChainMember,
        Field::Left,
        Field::Operator,
        Field::Right,
        Field::Operand,
        Field::Low,
        Field::High,
        Field::Function,
        Field::Arguments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::PackageIdentifier => "package_identifier",
            Field::ClosingIdentifier => "closing_identifier",
            Field::ProgramName => "program_name",
            Field::ReturnType => "return_type",
            Field::DeclarationIdentifier => "declaration_identifier",
            Field::TypeIdentifier => "type_identifier",
            Field::CaseCondition => "case_condition",
            Field::CaseWhen => "case_when",
            Field::CaseElse => "case_else",
            Field::CaseThen => "case_then",
            Field::TableName => "table_name",
            Field::TableAlias => "table_alias",
            Field::AccessorIdentifier => "accessor_identifier",
            Field::AccessorMember => "accessor_member",
            Field::ChainMember => "chain_member",
            Field::Left => "left",
            Field::Operator => "operator",
            Field::Right => "right",
            Field::Operand => "operand",
            Field::Low => "low",
            Field::High => "high",
            Field::Function => "function",
            Field::Arguments => "arguments",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

/// Which children a locator may pick.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// A node or token of exactly this kind
    Kind(SyntaxKind),
    /// An identifier token
    Ident,
    /// Any expression node
    Expression,
    /// Any statement node
    Statement,
}

impl Matcher {
    fn matches(self, element: &SyntaxElement) -> bool {
        let kind = element.kind();
        match self {
            Matcher::Kind(expected) => kind == expected,
            Matcher::Ident => element.as_token().is_some() && kind.is_identifier(),
            Matcher::Expression => element.as_node().is_some() && kind.is_expression(),
            Matcher::Statement => element.as_node().is_some() && kind.is_statement(),
        }
    }
}

/// Where a field sits among a node's direct children.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    First(Matcher),
    All(Matcher),
    Last(Matcher),
    /// First match following the first child of the given kind
    After(SyntaxKind, Matcher),
    /// Every match following the first child of the given kind
    AllAfter(SyntaxKind, Matcher),
    /// First match preceding the first child of the given kind
    Before(SyntaxKind, Matcher),
}

impl Locator {
    fn locate(self, children: &[SyntaxElement]) -> Vec<usize> {
        let matching = |m: Matcher, range: std::ops::Range<usize>| {
            range
                .filter(|&i| m.matches(&children[i]))
                .collect::<Vec<_>>()
        };
        let anchor = |kind: SyntaxKind| children.iter().position(|c| c.kind() == kind);
        let all = 0..children.len();

        match self {
            Locator::First(m) => matching(m, all).into_iter().take(1).collect(),
            Locator::All(m) => matching(m, all),
            Locator::Last(m) => matching(m, all).into_iter().last().into_iter().collect(),
            Locator::After(kind, m) => match anchor(kind) {
                Some(at) => matching(m, at + 1..children.len())
                    .into_iter()
                    .take(1)
                    .collect(),
                None => Vec::new(),
            },
            Locator::AllAfter(kind, m) => match anchor(kind) {
                Some(at) => matching(m, at + 1..children.len()),
                None => Vec::new(),
            },
            Locator::Before(kind, m) => match anchor(kind) {
                Some(at) => matching(m, 0..at).into_iter().take(1).collect(),
                None => Vec::new(),
            },
        }
    }
}

struct FieldSpec {
    parents: &'static [SyntaxKind],
    field: Field,
    locator: Locator,
}

const fn spec(parents: &'static [SyntaxKind], field: Field, locator: Locator) -> FieldSpec {
    FieldSpec {
        parents,
        field,
        locator,
    }
}

const PACKAGES: &[SyntaxKind] = &[PACKAGE_BODY, PACKAGE_SPEC];
const PROGRAMS: &[SyntaxKind] = &[PROCEDURE_DEF, FUNCTION_DEF];
const TYPE_DEFS: &[SyntaxKind] = &[RECORD_TYPE_DEF, COLLECTION_TYPE_DEF, UDT_DEF];
const CASES: &[SyntaxKind] = &[CASE_STMT, CASE_EXPR];

const FIELD_TABLE: &[FieldSpec] = &[
    spec(PACKAGES, Field::PackageIdentifier, Locator::First(Matcher::Ident)),
    spec(PACKAGES, Field::ClosingIdentifier, Locator::After(END_KW, Matcher::Ident)),
    spec(PROGRAMS, Field::ProgramName, Locator::First(Matcher::Ident)),
    spec(
        &[FUNCTION_DEF],
        Field::ReturnType,
        Locator::After(RETURN_KW, Matcher::Kind(TYPE)),
    ),
    spec(PROGRAMS, Field::ClosingIdentifier, Locator::After(END_KW, Matcher::Ident)),
    spec(
        &[VARIABLE_DECL, PARAM_DECL, FOR_STMT, FORALL_STMT, RECORD_FIELD],
        Field::DeclarationIdentifier,
        Locator::First(Matcher::Ident),
    ),
    spec(TYPE_DEFS, Field::TypeIdentifier, Locator::First(Matcher::Ident)),
    spec(CASES, Field::CaseCondition, Locator::First(Matcher::Expression)),
    spec(CASES, Field::CaseWhen, Locator::All(Matcher::Kind(CASE_WHEN))),
    spec(CASES, Field::CaseElse, Locator::First(Matcher::Kind(CASE_ELSE))),
    spec(
        &[CASE_WHEN],
        Field::CaseThen,
        Locator::AllAfter(THEN_KW, Matcher::Statement),
    ),
    spec(
        &[SELECT_TABLE, UPDATE_STMT],
        Field::TableName,
        Locator::First(Matcher::Kind(CHAIN_ACCESSOR)),
    ),
    spec(
        &[SELECT_TABLE, UPDATE_STMT, WITH_TABLE],
        Field::TableAlias,
        Locator::First(Matcher::Ident),
    ),
    spec(&[ACCESSOR], Field::AccessorIdentifier, Locator::First(Matcher::Ident)),
    spec(&[CHAIN_ACCESSOR], Field::AccessorMember, Locator::All(Matcher::Ident)),
    spec(&[CHAIN_EXPR], Field::ChainMember, Locator::Last(Matcher::Ident)),
    spec(&[BINARY_EXPR], Field::Left, Locator::Before(OPERATOR, Matcher::Expression)),
    spec(&[BINARY_EXPR], Field::Operator, Locator::First(Matcher::Kind(OPERATOR))),
    spec(&[BINARY_EXPR], Field::Right, Locator::After(OPERATOR, Matcher::Expression)),
    spec(
        &[BETWEEN_EXPR],
        Field::Operand,
        Locator::Before(BETWEEN_KW, Matcher::Expression),
    ),
    spec(&[BETWEEN_EXPR], Field::Low, Locator::After(BETWEEN_KW, Matcher::Expression)),
    spec(&[BETWEEN_EXPR], Field::High, Locator::After(AND_KW, Matcher::Expression)),
    spec(&[UNARY_EXPR], Field::Operand, Locator::First(Matcher::Expression)),
    spec(&[CALL_EXPR], Field::Function, Locator::First(Matcher::Expression)),
    spec(&[CALL_EXPR], Field::Arguments, Locator::First(Matcher::Kind(ARGUMENTS))),
];

/// Every field present on `node`, as `(field, child index)` pairs in child
/// order. Indices count tokens (trivia included) as well as nodes.
pub fn fields(node: &SyntaxNode) -> Vec<(Field, usize)> {
    let children: Vec<SyntaxElement> = node.children_with_tokens().collect();
    let mut found: Vec<(Field, usize)> = FIELD_TABLE
        .iter()
        .filter(|spec| spec.parents.contains(&node.kind()))
        .flat_map(|spec| {
            spec.locator
                .locate(&children)
                .into_iter()
                .map(move |idx| (spec.field, idx))
        })
        .collect();
    found.sort_by_key(|&(_, idx)| idx);
    found
}

/// The children of `node` carrying `field`. Empty if the node kind has no
/// such field or the field is absent (an optional part, or an error).
pub fn field(node: &SyntaxNode, field: Field) -> Vec<SyntaxElement> {
    let children: Vec<SyntaxElement> = node.children_with_tokens().collect();
    FIELD_TABLE
        .iter()
        .filter(|spec| spec.field == field && spec.parents.contains(&node.kind()))
        .flat_map(|spec| spec.locator.locate(&children))
        .map(|idx| children[idx].clone())
        .collect()
}

/// The field, if any, under which `child` appears in its parent.
pub fn field_of(child: &SyntaxElement) -> Option<Field> {
    let parent = child.parent()?;
    let idx = child.index();
    fields(&parent)
        .into_iter()
        .find(|&(_, i)| i == idx)
        .map(|(f, _)| f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn first(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
        root.descendants()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {:?}", kind))
    }

    fn text(elements: &[SyntaxElement]) -> Vec<String> {
        elements.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_names_round_trip() {
        for &f in Field::ALL {
            assert_eq!(Field::from_name(f.as_str()), Some(f));
        }
        assert_eq!(Field::from_name("nope"), None);
    }

    #[test]
    fn test_binary_fields() {
        let root = parse("BEGIN x := a + b; END;").syntax();
        let binary = first(&root, BINARY_EXPR);
        assert_eq!(text(&field(&binary, Field::Left)), vec!["a"]);
        assert_eq!(text(&field(&binary, Field::Operator)), vec!["+"]);
        assert_eq!(text(&field(&binary, Field::Right)), vec!["b"]);

        let names: Vec<_> = fields(&binary).into_iter().map(|(f, _)| f).collect();
        assert_eq!(names, vec![Field::Left, Field::Operator, Field::Right]);
    }

    #[test]
    fn test_between_fields() {
        let root = parse("BEGIN x := a BETWEEN 1 AND 2; END;").syntax();
        let between = first(&root, BETWEEN_EXPR);
        assert_eq!(text(&field(&between, Field::Operand)), vec!["a"]);
        assert_eq!(text(&field(&between, Field::Low)), vec!["1"]);
        assert_eq!(text(&field(&between, Field::High)), vec!["2"]);
    }

    #[test]
    fn test_chain_fields() {
        let root = parse("DECLARE x pkg.sub.t_rec; BEGIN y := a.b; END;").syntax();
        let chain = first(&root, CHAIN_ACCESSOR);
        assert_eq!(text(&field(&chain, Field::AccessorMember)), vec!["sub", "t_rec"]);
        let accessor = first(&chain, ACCESSOR);
        assert_eq!(text(&field(&accessor, Field::AccessorIdentifier)), vec!["pkg"]);

        let expr = first(&root, CHAIN_EXPR);
        assert_eq!(text(&field(&expr, Field::ChainMember)), vec!["b"]);
    }

    #[test]
    fn test_case_fields() {
        let root = parse(
            "BEGIN CASE l_x WHEN 1 THEN a := 1; b := 2; WHEN 2 THEN NULL; ELSE NULL; END CASE; END;",
        )
        .syntax();
        let case = first(&root, CASE_STMT);
        assert_eq!(text(&field(&case, Field::CaseCondition)), vec!["l_x"]);
        assert_eq!(field(&case, Field::CaseWhen).len(), 2);
        assert_eq!(field(&case, Field::CaseElse).len(), 1);

        let when = first(&case, CASE_WHEN);
        assert_eq!(text(&field(&when, Field::CaseThen)), vec!["a := 1;", "b := 2;"]);
    }

    #[test]
    fn test_searched_case_has_no_condition() {
        let root = parse("BEGIN x := CASE WHEN a THEN 1 END; END;").syntax();
        let case = first(&root, CASE_EXPR);
        assert!(field(&case, Field::CaseCondition).is_empty());
    }

    #[test]
    fn test_table_fields() {
        let root = parse("BEGIN SELECT 1 INTO x FROM hr.emp e; END;").syntax();
        let table = first(&root, SELECT_TABLE);
        assert_eq!(text(&field(&table, Field::TableName)), vec!["hr.emp"]);
        assert_eq!(text(&field(&table, Field::TableAlias)), vec!["e"]);
    }

    #[test]
    fn test_call_fields() {
        let root = parse("BEGIN log_it('x', 2); END;").syntax();
        let call = first(&root, CALL_EXPR);
        assert_eq!(text(&field(&call, Field::Function)), vec!["log_it"]);
        assert_eq!(text(&field(&call, Field::Arguments)), vec!["'x', 2"]);
    }

    #[test]
    fn test_field_of_child() {
        let root = parse("BEGIN x := a * b; END;").syntax();
        let binary = first(&root, BINARY_EXPR);
        let operator = first(&binary, OPERATOR);
        assert_eq!(field_of(&operator.into()), Some(Field::Operator));
    }

    #[test]
    fn test_kinds_without_fields() {
        let root = parse("BEGIN NULL; END;").syntax();
        assert!(fields(&root).is_empty());
        assert!(field(&root, Field::Left).is_empty());
    }
}
