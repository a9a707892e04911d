//! Expression parsing by precedence climbing.
//!
//! `expr_bp(min)` parses a prefix (unary operator or a primary with its
//! postfix member accesses and calls), then repeatedly extends it with any
//! infix construct whose level is at least `min`: analytic windows,
//! `BETWEEN`, and the binary operators. Levels and associativity come from
//! [`crate::precedence`].

use super::select;
use crate::builtins;
use crate::parser::Parser;
use crate::precedence::{BinaryOp, ANALYTIC, BETWEEN, UNARY};
use crate::SyntaxKind::*;
use rowan::Checkpoint;

/// Parse one full expression. Returns false (after reporting) if no
/// expression starts here.
pub(crate) fn expression(p: &mut Parser<'_>) -> bool {
    expr_bp(p, 0)
}

/// Whether an expression can start at the current token.
pub(crate) fn at_expression_start(p: &Parser<'_>) -> bool {
    matches!(
        p.current(),
        STRING
            | NUMBER
            | TRUE_KW
            | FALSE_KW
            | NULL_KW
            | NO_DATA_FOUND_KW
            | FIRST_KW
            | LAST_KW
            | RANK_KW
            | DENSE_RANK_KW
            | COLON
            | LPAREN
            | PRIOR_KW
            | LEVEL_KW
            | CASE_KW
            | EXISTS_KW
            | NOT_KW
            | MINUS
    ) || p.at_ident()
}

fn expr_bp(p: &mut Parser<'_>, min: u8) -> bool {
    nested_expr(p, min, false)
}

/// One nesting level of expression. `stop_at_and` leaves a binary `AND`
/// unconsumed, which is how a `BETWEEN` lower bound ends.
fn nested_expr(p: &mut Parser<'_>, min: u8, stop_at_and: bool) -> bool {
    if !p.enter() {
        p.recover();
        return false;
    }
    let parsed = climb(p, min, stop_at_and);
    p.exit();
    parsed
}

/// Right operands of binary operators are parsed in this loop rather than
/// by recursion, so a flat chain like `a || b || c ...` is not nesting.
/// `open` holds, for each unfinished `BINARY_EXPR`, the checkpoint and
/// minimum level of its left side.
fn climb(p: &mut Parser<'_>, min: u8, stop_at_and: bool) -> bool {
    let mut checkpoint = p.checkpoint();
    let mut min = min;
    let mut open: Vec<(Checkpoint, u8)> = Vec::new();

    if !prefix(p) {
        return false;
    }

    loop {
        if at_analytic(p) && ANALYTIC.level >= min {
            p.start_node_at(checkpoint, ANALYTIC_EXPR);
            analytic_window(p);
            p.finish_node();
            continue;
        }

        if p.at(BETWEEN_KW) && BETWEEN.level >= min {
            p.start_node_at(checkpoint, BETWEEN_EXPR);
            p.bump();
            // The lower bound takes any operator but the AND that ends it;
            // the upper bound stops before any binary operator.
            nested_expr(p, 0, true);
            p.expect(AND_KW);
            expr_bp(p, BETWEEN.next_min());
            p.finish_node();
            continue;
        }

        let operator = BinaryOp::from_tokens([p.nth(0), p.nth(1), p.nth(2)])
            .filter(|(op, _)| op.precedence().level >= min)
            .filter(|(op, _)| !(stop_at_and && *op == BinaryOp::And));
        if let Some((op, len)) = operator {
            p.start_node_at(checkpoint, BINARY_EXPR);
            p.start_node(OPERATOR);
            for _ in 0..len {
                p.bump();
            }
            p.finish_node();
            open.push((checkpoint, min));
            checkpoint = p.checkpoint();
            min = op.precedence().next_min();
            if prefix(p) {
                continue;
            }
        }

        // Nothing more binds here: close the innermost operator and keep
        // extending it at the level of its left side.
        let Some((outer, outer_min)) = open.pop() else {
            break;
        };
        p.finish_node();
        checkpoint = outer;
        min = outer_min;
    }

    true
}

/// Unary operator or a primary with its postfix suffixes.
fn prefix(p: &mut Parser<'_>) -> bool {
    if p.at_any(&[NOT_KW, MINUS]) {
        unary(p)
    } else {
        postfix(p)
    }
}

/// `NOT expr` or `- expr`
fn unary(p: &mut Parser<'_>) -> bool {
    p.start_node(UNARY_EXPR);
    p.bump();
    expr_bp(p, UNARY.next_min());
    p.finish_node();
    true
}

fn at_analytic(p: &Parser<'_>) -> bool {
    match p.current() {
        OVER_KW | KEEP_KW => p.nth_at(1, LPAREN),
        WITHIN_KW => p.nth_at(1, GROUP_KW) && p.nth_at(2, LPAREN),
        _ => false,
    }
}

/// `(OVER | WITHIN GROUP | KEEP) ( [PARTITION BY ...] [ORDER BY ...] )`
/// or `KEEP (DENSE_RANK FIRST ORDER BY ...)`
fn analytic_window(p: &mut Parser<'_>) {
    if p.at(WITHIN_KW) {
        p.bump();
    }
    p.bump();
    p.expect(LPAREN);

    if p.at_any(&[RANK_KW, DENSE_RANK_KW]) {
        builtin_program(p);
        if p.at_any(&[FIRST_KW, LAST_KW]) {
            builtin_program(p);
        } else {
            p.error_expected("'FIRST' or 'LAST'");
        }
        if p.at(ORDER_KW) {
            select::order_by_clause(p);
        } else {
            p.error_expected("'ORDER'");
        }
    } else {
        if p.at(PARTITION_KW) {
            select::partition_by_clause(p);
        }
        if p.at(ORDER_KW) {
            select::order_by_clause(p);
        }
    }

    p.expect(RPAREN);
}

/// A primary followed by any number of `.member` and `(args)` suffixes.
fn postfix(p: &mut Parser<'_>) -> bool {
    let checkpoint = p.checkpoint();
    if !primary(p) {
        return false;
    }

    loop {
        if p.at(DOT) && (p.nth(1).is_identifier() || p.nth(1).is_keyword()) {
            p.start_node_at(checkpoint, CHAIN_EXPR);
            p.bump();
            p.expect_member();
            p.finish_node();
        } else if p.at(LPAREN) {
            p.start_node_at(checkpoint, CALL_EXPR);
            p.bump();
            arguments(p);
            p.expect(RPAREN);
            p.finish_node();
        } else {
            break;
        }
    }

    true
}

fn primary(p: &mut Parser<'_>) -> bool {
    match p.current() {
        STRING => p.bump_string(),
        NUMBER => wrap(p, NUMBER_LITERAL),
        TRUE_KW | FALSE_KW => wrap(p, BOOLEAN_LITERAL),
        NULL_KW | NO_DATA_FOUND_KW => wrap(p, CONSTANT),
        LEVEL_KW => wrap(p, LEVEL_EXPR),
        FIRST_KW | LAST_KW | RANK_KW | DENSE_RANK_KW => builtin_program(p),
        IDENT if builtins::is_builtin_program(p.nth_text(0)) => builtin_program(p),
        LPAREN if p.nth_at(1, SELECT_KW) || p.nth_at(1, WITH_KW) => select_expression(p),
        LPAREN => sequence_expression(p),
        PRIOR_KW => {
            p.start_node(PRIOR_EXPR);
            p.bump();
            chain_accessor(p);
            p.finish_node();
        }
        CASE_KW => case_expression(p),
        EXISTS_KW => {
            p.start_node(EXISTS_EXPR);
            p.bump();
            p.expect(LPAREN);
            select::select(p);
            p.expect(RPAREN);
            p.finish_node();
        }
        COLON => accessor(p),
        // Already reported by the lexer
        ERROR => wrap(p, ERROR),
        _ if p.at_ident() => accessor(p),
        _ => {
            p.error_expected("expression");
            return false;
        }
    }
    true
}

/// A single token wrapped in a node of `kind`.
fn wrap(p: &mut Parser<'_>, kind: crate::SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.finish_node();
}

fn builtin_program(p: &mut Parser<'_>) {
    wrap(p, BUILTIN_PROGRAM);
}

/// `[:]name`
fn accessor(p: &mut Parser<'_>) {
    p.start_node(ACCESSOR);
    p.eat(COLON);
    p.expect_ident();
    p.finish_node();
}

/// `[:]name {. name}` as used by types, targets and table names.
pub(crate) fn chain_accessor(p: &mut Parser<'_>) {
    if !p.at_ident() && !p.at(COLON) {
        p.error_expected("identifier");
        return;
    }
    p.start_node(CHAIN_ACCESSOR);
    accessor(p);
    while p.at(DOT) && (p.nth(1).is_identifier() || p.nth(1).is_keyword()) {
        p.bump();
        p.expect_member();
    }
    p.finish_node();
}

/// `(select)`
fn select_expression(p: &mut Parser<'_>) {
    p.start_node(SELECT_EXPR);
    p.bump();
    select::select(p);
    p.expect(RPAREN);
    p.finish_node();
}

/// `(expr {, expr})`
fn sequence_expression(p: &mut Parser<'_>) {
    p.start_node(SEQUENCE_EXPR);
    p.bump();
    super::comma_list(p, |p| {
        expression(p);
    });
    p.expect(RPAREN);
    p.finish_node();
}

/// `CASE [selector] {WHEN expr THEN expr} [ELSE expr] END`
fn case_expression(p: &mut Parser<'_>) {
    p.start_node(CASE_EXPR);
    p.bump();
    if !p.at(WHEN_KW) {
        expression(p);
    }

    if !p.at(WHEN_KW) {
        p.error_expected("'WHEN'");
    }
    while p.at(WHEN_KW) {
        p.start_node(CASE_WHEN);
        p.bump();
        expression(p);
        p.expect(THEN_KW);
        expression(p);
        p.finish_node();
    }

    if p.at(ELSE_KW) {
        p.start_node(CASE_ELSE);
        p.bump();
        expression(p);
        p.finish_node();
    }

    p.expect(END_KW);
    p.finish_node();
}

/// Call arguments after `(`: `[DISTINCT | ALL]`, positional arguments,
/// then named `name => expr` arguments. A positional argument after a
/// named one is reported but still parsed.
fn arguments(p: &mut Parser<'_>) {
    if p.at(RPAREN) {
        return;
    }
    p.start_node(ARGUMENTS);
    if p.at_any(&[DISTINCT_KW, ALL_KW]) {
        p.bump();
    }

    let mut named = false;
    super::comma_list(p, |p| {
        if p.at_ident() && p.nth_at(1, ARROW) {
            named = true;
            p.start_node(ARROW_ARG);
            p.bump_ident();
            p.bump();
            expression(p);
            p.finish_node();
            return;
        }
        if named {
            p.error_invalid("positional argument follows named argument");
        }
        if p.at(STAR) {
            p.bump();
        } else {
            expression(p);
        }
    });
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::printer::to_sexp;
    use crate::{parse, SyntaxKind::*, SyntaxNode};

    /// The right-hand side of `x := <expr>;`
    fn expr(src: &str) -> SyntaxNode {
        let input = format!("BEGIN x := {}; END;", src);
        let parse = parse(&input);
        assert!(parse.errors.is_empty(), "{}: {:?}", src, parse.errors);
        let assignment = parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == ASSIGNMENT_STMT)
            .expect("assignment");
        assignment.children().nth(1).expect("value")
    }

    #[test]
    fn test_multiplication_binds_right() {
        assert_eq!(
            to_sexp(&expr("a + b * c")),
            "(binary_expression left: (accessor accessor_identifier: (identifier)) \
             operator: (binary_operator) \
             right: (binary_expression \
             left: (accessor accessor_identifier: (identifier)) \
             operator: (binary_operator) \
             right: (accessor accessor_identifier: (identifier))))"
        );
    }

    #[test]
    fn test_flattened_levels_group_right() {
        // One shared level: the tail is grouped, whatever the operators
        let e = expr("a * b + c");
        assert_eq!(e.kind(), BINARY_EXPR);
        let rhs = e.children().nth(2).expect("rhs");
        assert_eq!(rhs.kind(), BINARY_EXPR);
        assert_eq!(rhs.to_string(), "b + c");
    }

    #[test]
    fn test_between_binds_tighter_than_and() {
        let e = expr("a between b and c and d");
        assert_eq!(e.kind(), BINARY_EXPR);
        let children: Vec<_> = e.children().collect();
        assert_eq!(children[0].kind(), BETWEEN_EXPR);
        assert_eq!(children[0].to_string(), "a between b and c");
        assert_eq!(children[1].to_string(), "and");
        assert_eq!(children[2].to_string(), "d");
    }

    #[test]
    fn test_unary_binds_tightest() {
        let e = expr("NOT a = b");
        assert_eq!(e.kind(), BINARY_EXPR);
        assert_eq!(e.first_child().map(|n| n.kind()), Some(UNARY_EXPR));

        let e = expr("-x * 2");
        assert_eq!(e.first_child().map(|n| n.kind()), Some(UNARY_EXPR));
    }

    #[test]
    fn test_multi_word_operators() {
        for (src, op) in [
            ("a IS NOT NULL", "IS NOT NULL"),
            ("a NOT IN (1, 2)", "NOT IN"),
            ("a MEMBER OF l_set", "MEMBER OF"),
            ("a NOT MEMBER OF l_set", "NOT MEMBER OF"),
            ("a NOT LIKE 'x%'", "NOT LIKE"),
        ] {
            let e = expr(src);
            assert_eq!(e.kind(), BINARY_EXPR, "{}", src);
            let operator = e
                .children()
                .find(|n| n.kind() == OPERATOR)
                .expect("operator");
            assert!(op.starts_with(&operator.to_string()), "{}", src);
        }
    }

    #[test]
    fn test_calls_and_chains() {
        let e = expr("pkg.util.fmt(a, b => 1)(2).field");
        assert_eq!(e.kind(), CHAIN_EXPR);
        let call = e.first_child().expect("call");
        assert_eq!(call.kind(), CALL_EXPR);
        let inner = call.first_child().expect("inner call");
        assert_eq!(inner.kind(), CALL_EXPR);
        let args = inner
            .children()
            .find(|n| n.kind() == ARGUMENTS)
            .expect("args");
        assert_eq!(args.children().filter(|n| n.kind() == ARROW_ARG).count(), 1);
    }

    #[test]
    fn test_keyword_after_dot_is_identifier() {
        let e = expr("l_tab.first + l_tab.count");
        let chain = e.first_child().expect("chain");
        assert_eq!(chain.kind(), CHAIN_EXPR);
        assert!(chain
            .children_with_tokens()
            .filter_map(|c| c.into_token())
            .any(|t| t.kind() == IDENT && t.text() == "first"));
    }

    #[test]
    fn test_positional_after_named_is_reported() {
        let parse = parse("BEGIN f(a => 1, 2); END;");
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(
            parse.errors[0].message,
            "positional argument follows named argument"
        );
    }

    #[test]
    fn test_aggregates() {
        assert_eq!(expr("COUNT(*)").kind(), CALL_EXPR);
        assert_eq!(expr("count(DISTINCT id)").kind(), CALL_EXPR);
        let e = expr("COUNT(*)");
        assert_eq!(e.first_child().map(|n| n.kind()), Some(BUILTIN_PROGRAM));
    }

    #[test]
    fn test_analytic_forms() {
        assert_eq!(
            expr("ROW_NUMBER() OVER (PARTITION BY dept ORDER BY sal DESC)").kind(),
            ANALYTIC_EXPR
        );
        assert_eq!(
            expr("LISTAGG(name, ',') WITHIN GROUP (ORDER BY name)").kind(),
            ANALYTIC_EXPR
        );
        assert_eq!(
            expr("MAX(sal) KEEP (DENSE_RANK FIRST ORDER BY hired)").kind(),
            ANALYTIC_EXPR
        );
    }

    #[test]
    fn test_primaries() {
        assert_eq!(expr("'abc'").kind(), STRING_LITERAL);
        assert_eq!(expr("42").kind(), NUMBER_LITERAL);
        assert_eq!(expr("TRUE").kind(), BOOLEAN_LITERAL);
        assert_eq!(expr("NULL").kind(), CONSTANT);
        assert_eq!(expr("SYSDATE").kind(), BUILTIN_PROGRAM);
        assert_eq!(expr(":new.id").kind(), CHAIN_EXPR);
        assert_eq!(expr("(1, 2, 3)").kind(), SEQUENCE_EXPR);
        assert_eq!(expr("(SELECT 1 FROM dual)").kind(), SELECT_EXPR);
        assert_eq!(expr("EXISTS (SELECT 1 FROM dual)").kind(), EXISTS_EXPR);
        assert_eq!(expr("LEVEL").kind(), LEVEL_EXPR);
        assert_eq!(
            expr("CASE WHEN a THEN 1 ELSE 2 END").kind(),
            CASE_EXPR
        );
        assert_eq!(expr("CASE a WHEN 1 THEN 'x' END").kind(), CASE_EXPR);
    }

    #[test]
    fn test_missing_operand() {
        let parse = parse("BEGIN x := 1 + ; END;");
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "expected expression, found ';'");
    }
}
