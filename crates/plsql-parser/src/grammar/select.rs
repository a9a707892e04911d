//! Embedded SQL queries: `WITH`, select lists, `INTO`, table sources,
//! joins, filters, hierarchical queries, grouping, ordering, `UNION`.

use super::expressions::{self, chain_accessor};
use super::{choose, comma_list, Lookahead, Rule};
use crate::parser::Parser;
use crate::SyntaxKind::*;

/// Column shapes, tried in order.
const SELECT_COLUMN_RULES: &[Rule] = &[
    Rule::new(
        "wildcard_column",
        Lookahead::Test(at_wildcard_column),
        wildcard_column,
    ),
    Rule::new(
        "expression_column",
        Lookahead::Test(expressions::at_expression_start),
        expression_column,
    ),
];

/// `[WITH name AS (select) {, ...}] select_body {UNION [ALL] select_body}`
pub(crate) fn select(p: &mut Parser<'_>) {
    if !p.enter() {
        p.recover();
        return;
    }

    let checkpoint = p.checkpoint();
    p.start_node(SELECT);
    if p.eat(WITH_KW) {
        comma_list(p, with_table);
    }
    select_body(p);
    p.finish_node();

    while p.at(UNION_KW) {
        p.start_node_at(checkpoint, UNION_SELECT);
        p.bump();
        p.eat(ALL_KW);
        p.start_node(SELECT);
        select_body(p);
        p.finish_node();
        p.finish_node();
    }

    p.exit();
}

/// `name AS (select)`
fn with_table(p: &mut Parser<'_>) {
    p.start_node(WITH_TABLE);
    p.expect_ident();
    p.expect(AS_KW);
    p.expect(LPAREN);
    select(p);
    p.expect(RPAREN);
    p.finish_node();
}

fn select_body(p: &mut Parser<'_>) {
    p.expect(SELECT_KW);
    if p.at_any(&[DISTINCT_KW, ALL_KW]) {
        p.bump();
    }

    if !p.eat(STAR) {
        comma_list(p, select_column);
    }

    if p.at(INTO_KW) || (p.at(BULK_KW) && p.nth_at(1, COLLECT_KW)) {
        into_clause(p);
    }

    if p.at(FROM_KW) {
        select_tables(p);
    } else {
        p.error_expected("'FROM'");
    }

    if p.at(WHERE_KW) {
        p.start_node(WHERE_CLAUSE);
        p.bump();
        expressions::expression(p);
        p.finish_node();
    }

    if p.at(CONNECT_KW) || p.at(START_KW) {
        hierarchical_clause(p);
    }

    if p.at(GROUP_KW) {
        p.start_node(GROUP_BY_CLAUSE);
        p.bump();
        p.expect(BY_KW);
        comma_list(p, |p| {
            expressions::expression(p);
        });
        p.finish_node();
    }

    if p.at(ORDER_KW) {
        order_by_clause(p);
    }
}

fn select_column(p: &mut Parser<'_>) {
    if !choose(p, SELECT_COLUMN_RULES) {
        p.error_expected("column");
    }
}

fn at_wildcard_column(p: &Parser<'_>) -> bool {
    p.at_ident() && p.nth_at(1, DOT) && p.nth_at(2, STAR)
}

/// `name.*`
fn wildcard_column(p: &mut Parser<'_>) {
    p.start_node(SELECT_COLUMN);
    p.bump_ident();
    p.bump();
    p.bump();
    p.finish_node();
}

/// `expr [[AS] alias]`
fn expression_column(p: &mut Parser<'_>) {
    p.start_node(SELECT_COLUMN);
    expressions::expression(p);
    if p.eat(AS_KW) {
        p.expect_ident();
    } else if at_alias(p) {
        p.bump_ident();
    }
    p.finish_node();
}

/// An identifier that names the preceding column or table. `BULK COLLECT`
/// is never an alias.
pub(crate) fn at_alias(p: &Parser<'_>) -> bool {
    p.at_ident() && !(p.at(BULK_KW) && p.nth_at(1, COLLECT_KW))
}

/// `[BULK COLLECT] INTO target {, target}`
fn into_clause(p: &mut Parser<'_>) {
    p.start_node(INTO_CLAUSE);
    if p.eat(BULK_KW) {
        p.expect(COLLECT_KW);
    }
    p.expect(INTO_KW);
    comma_list(p, chain_accessor);
    p.finish_node();
}

/// `FROM table {(, table | [INNER | LEFT] JOIN table ON expr)}`
fn select_tables(p: &mut Parser<'_>) {
    p.start_node(SELECT_TABLES);
    p.bump();
    select_table(p);

    loop {
        if p.eat(COMMA) {
            select_table(p);
        } else if p.at_any(&[JOIN_KW, INNER_KW, LEFT_KW]) {
            join_clause(p);
        } else {
            break;
        }
    }
    p.finish_node();
}

/// `DUAL | TABLE(expr) | (select) | name.name` followed by an optional alias.
fn select_table(p: &mut Parser<'_>) {
    p.start_node(SELECT_TABLE);
    match p.current() {
        DUAL_KW => p.bump(),
        TABLE_KW if p.nth_at(1, LPAREN) => {
            p.bump();
            p.bump();
            expressions::expression(p);
            p.expect(RPAREN);
        }
        LPAREN => {
            p.bump();
            select(p);
            p.expect(RPAREN);
        }
        _ => chain_accessor(p),
    }
    if at_alias(p) {
        p.bump_ident();
    }
    p.finish_node();
}

fn join_clause(p: &mut Parser<'_>) {
    p.start_node(JOIN_CLAUSE);
    if p.at_any(&[INNER_KW, LEFT_KW]) {
        p.bump();
    }
    p.expect(JOIN_KW);
    select_table(p);
    p.expect(ON_KW);
    expressions::expression(p);
    p.finish_node();
}

/// `[START WITH expr] CONNECT BY expr [START WITH expr]`
fn hierarchical_clause(p: &mut Parser<'_>) {
    p.start_node(HIERARCHICAL_CLAUSE);
    let started = start_with(p);
    p.expect(CONNECT_KW);
    p.expect(BY_KW);
    expressions::expression(p);
    if !started {
        start_with(p);
    }
    p.finish_node();
}

fn start_with(p: &mut Parser<'_>) -> bool {
    if !p.at(START_KW) {
        return false;
    }
    p.bump();
    p.expect(WITH_KW);
    expressions::expression(p);
    true
}

/// `ORDER BY expr [ASC | DESC] [NULLS (FIRST | LAST)] {, ...}`
pub(crate) fn order_by_clause(p: &mut Parser<'_>) {
    p.start_node(ORDER_BY_CLAUSE);
    p.bump();
    p.expect(BY_KW);
    comma_list(p, order_by_item);
    p.finish_node();
}

fn order_by_item(p: &mut Parser<'_>) {
    p.start_node(ORDER_BY_ITEM);
    expressions::expression(p);
    if p.at_any(&[ASC_KW, DESC_KW]) {
        p.bump();
    }
    if p.eat(NULLS_KW) {
        if p.at_any(&[FIRST_KW, LAST_KW]) {
            p.bump();
        } else {
            p.error_expected("'FIRST' or 'LAST'");
        }
    }
    p.finish_node();
}

/// `PARTITION BY expr {, expr}`
pub(crate) fn partition_by_clause(p: &mut Parser<'_>) {
    p.start_node(PARTITION_BY_CLAUSE);
    p.bump();
    p.expect(BY_KW);
    comma_list(p, |p| {
        expressions::expression(p);
    });
    p.finish_node();
}
