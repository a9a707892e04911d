//! `INSERT` and `UPDATE` statements.

use super::expressions::{self, chain_accessor};
use super::{comma_list, select};
use crate::parser::Parser;
use crate::SyntaxKind::*;

/// `INSERT INTO table [(columns)] (VALUES (exprs) | VALUES record | select)
/// [RETURNING ... INTO ...];`
pub(crate) fn insert_statement(p: &mut Parser<'_>) {
    p.start_node(INSERT_STMT);
    p.bump();
    p.expect(INTO_KW);
    chain_accessor(p);

    if p.at(LPAREN) {
        p.start_node(COLUMN_LIST);
        p.bump();
        comma_list(p, |p| {
            p.expect_ident();
        });
        p.expect(RPAREN);
        p.finish_node();
    }

    if p.at(VALUES_KW) {
        p.start_node(VALUES_CLAUSE);
        p.bump();
        if p.eat(LPAREN) {
            comma_list(p, |p| {
                expressions::expression(p);
            });
            p.expect(RPAREN);
        } else {
            chain_accessor(p);
        }
        p.finish_node();
    } else if p.at_any(&[SELECT_KW, WITH_KW]) {
        select::select(p);
    } else {
        p.error_expected("'VALUES' or 'SELECT'");
    }

    returning_clause(p);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `UPDATE table [alias] SET target = expr {, ...} [WHERE expr]
/// [RETURNING ... INTO ...];`
pub(crate) fn update_statement(p: &mut Parser<'_>) {
    p.start_node(UPDATE_STMT);
    p.bump();
    chain_accessor(p);
    if select::at_alias(p) {
        p.bump_ident();
    }

    p.expect(SET_KW);
    comma_list(p, update_assignment);

    if p.at(WHERE_KW) {
        p.start_node(WHERE_CLAUSE);
        p.bump();
        expressions::expression(p);
        p.finish_node();
    }

    returning_clause(p);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `target = expr`
fn update_assignment(p: &mut Parser<'_>) {
    p.start_node(UPDATE_ASSIGNMENT);
    chain_accessor(p);
    p.expect(EQ);
    expressions::expression(p);
    p.finish_node();
}

/// `(RETURN | RETURNING) expr {, expr} [BULK COLLECT] INTO target {, target}`
fn returning_clause(p: &mut Parser<'_>) {
    if !p.at_any(&[RETURN_KW, RETURNING_KW]) {
        return;
    }
    p.start_node(RETURNING_CLAUSE);
    p.bump();
    comma_list(p, |p| {
        expressions::expression(p);
    });
    if p.eat(BULK_KW) {
        p.expect(COLLECT_KW);
    }
    p.expect(INTO_KW);
    comma_list(p, chain_accessor);
    p.finish_node();
}
