//! Statements: blocks, control flow, loops, and simple statements.

use super::declarations::{self, DECLARATIONS};
use super::{directives, dml, expressions, items, list, list1, select, Lookahead, Rule};
use crate::parser::Parser;
use crate::SyntaxKind::*;

/// Tokens that end a statement list without belonging to it.
const STATEMENT_LIST_END: &[crate::SyntaxKind] = &[END_KW, ELSE_KW, ELSIF_KW, WHEN_KW, EXCEPTION_KW];

/// Attempted in this order at every statement position.
pub(crate) const STATEMENTS: &[Rule] = &[
    Rule::new(
        "block_statement",
        Lookahead::AnyOf(&[DECLARE_KW, BEGIN_KW]),
        block_statement,
    ),
    Rule::new(
        "program_definition",
        Lookahead::AnyOf(&[FUNCTION_KW, PROCEDURE_KW]),
        declarations::program_definition,
    ),
    Rule::new("if_statement", Lookahead::Kind(IF_KW), if_statement),
    Rule::new("case_statement", Lookahead::Kind(CASE_KW), case_statement),
    Rule::new("return_statement", Lookahead::Kind(RETURN_KW), return_statement),
    Rule::new(
        "pipe_row_statement",
        Lookahead::Seq(&[PIPE_KW, ROW_KW]),
        pipe_row_statement,
    ),
    Rule::new(
        "select_statement",
        Lookahead::AnyOf(&[SELECT_KW, WITH_KW]),
        select_statement,
    ),
    Rule::new("insert_statement", Lookahead::Kind(INSERT_KW), dml::insert_statement),
    Rule::new("update_statement", Lookahead::Kind(UPDATE_KW), dml::update_statement),
    Rule::new("forall_statement", Lookahead::Kind(FORALL_KW), forall_statement),
    Rule::new("for_statement", Lookahead::Kind(FOR_KW), for_statement),
    Rule::new("while_statement", Lookahead::Kind(WHILE_KW), while_statement),
    Rule::new("loop_statement", Lookahead::Kind(LOOP_KW), loop_statement),
    Rule::new(
        "exit_statement",
        Lookahead::AnyOf(&[EXIT_KW, CONTINUE_KW]),
        exit_statement,
    ),
    Rule::new("raise_statement", Lookahead::Kind(RAISE_KW), raise_statement),
    Rule::new(
        "directive_statement",
        Lookahead::Kind(DIRECTIVE_OPEN),
        directives::directive,
    ),
    Rule::new("create_statement", Lookahead::Kind(CREATE_KW), items::create_item),
    Rule::new(
        "expression_statement",
        Lookahead::Test(expressions::at_expression_start),
        expression_statement,
    ),
];

/// One or more statements up to `END`, `ELSE`, `ELSIF`, `WHEN` or
/// `EXCEPTION`.
fn statement_list(p: &mut Parser<'_>) {
    list1(p, STATEMENTS, STATEMENT_LIST_END, "statement");
}

/// `[DECLARE declaration*] BEGIN ... END;`
pub(crate) fn block_statement(p: &mut Parser<'_>) {
    p.start_node(BLOCK_STMT);
    if p.eat(DECLARE_KW) {
        list(p, DECLARATIONS, &[BEGIN_KW, END_KW], "declaration");
    }
    body(p, false);
    p.finish_node();
}

/// `BEGIN statement+ [EXCEPTION handler+] END [name];`
///
/// Shared by blocks and program definitions; only the latter may repeat
/// their name after `END`.
pub(crate) fn body(p: &mut Parser<'_>, named: bool) {
    p.expect(BEGIN_KW);
    statement_list(p);

    if p.eat(EXCEPTION_KW) {
        if !p.at(WHEN_KW) {
            p.error_expected("'WHEN'");
        }
        while p.at(WHEN_KW) && !p.out_of_budget() {
            exception_handler(p);
        }
    }

    p.expect(END_KW);
    if named && p.at_ident() {
        p.bump_ident();
    }
    p.expect(SEMICOLON);
}

/// `WHEN expr THEN statement+`
fn exception_handler(p: &mut Parser<'_>) {
    p.start_node(EXCEPTION_HANDLER);
    p.bump();
    expressions::expression(p);
    p.expect(THEN_KW);
    statement_list(p);
    p.finish_node();
}

/// `IF expr THEN ... {ELSIF expr THEN ...} [ELSE ...] END IF;`
fn if_statement(p: &mut Parser<'_>) {
    p.start_node(IF_STMT);
    p.bump();
    expressions::expression(p);
    p.expect(THEN_KW);
    statement_list(p);

    while p.at(ELSIF_KW) {
        p.start_node(ELSIF_CLAUSE);
        p.bump();
        expressions::expression(p);
        p.expect(THEN_KW);
        statement_list(p);
        p.finish_node();
    }

    if p.at(ELSE_KW) {
        p.start_node(ELSE_CLAUSE);
        p.bump();
        statement_list(p);
        p.finish_node();
    }

    p.expect(END_KW);
    p.expect(IF_KW);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `CASE [selector] {WHEN expr THEN statement+} [ELSE statement+] END CASE;`
fn case_statement(p: &mut Parser<'_>) {
    p.start_node(CASE_STMT);
    p.bump();
    if !p.at(WHEN_KW) {
        expressions::expression(p);
    }

    if !p.at(WHEN_KW) {
        p.error_expected("'WHEN'");
    }
    while p.at(WHEN_KW) {
        p.start_node(CASE_WHEN);
        p.bump();
        expressions::expression(p);
        p.expect(THEN_KW);
        statement_list(p);
        p.finish_node();
    }

    if p.at(ELSE_KW) {
        p.start_node(CASE_ELSE);
        p.bump();
        statement_list(p);
        p.finish_node();
    }

    p.expect(END_KW);
    p.expect(CASE_KW);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `LOOP statement+ END LOOP;`
fn loop_statement(p: &mut Parser<'_>) {
    p.start_node(LOOP_STMT);
    p.bump();
    statement_list(p);
    p.expect(END_KW);
    p.expect(LOOP_KW);
    p.expect(SEMICOLON);
    p.finish_node();
}

fn loop_body(p: &mut Parser<'_>) {
    if p.at(LOOP_KW) {
        loop_statement(p);
    } else {
        p.error_expected("'LOOP'");
    }
}

/// `WHILE expr LOOP ... END LOOP;`
fn while_statement(p: &mut Parser<'_>) {
    p.start_node(WHILE_STMT);
    p.bump();
    expressions::expression(p);
    loop_body(p);
    p.finish_node();
}

/// `FOR name IN ((select) | expr .. expr) LOOP ... END LOOP;`
fn for_statement(p: &mut Parser<'_>) {
    p.start_node(FOR_STMT);
    p.bump();
    p.expect_ident();
    p.expect(IN_KW);

    if p.at(LPAREN) && (p.nth_at(1, SELECT_KW) || p.nth_at(1, WITH_KW)) {
        p.bump();
        select::select(p);
        p.expect(RPAREN);
    } else {
        range(p);
    }

    loop_body(p);
    p.finish_node();
}

/// `FORALL name IN expr .. expr (insert | update)`
fn forall_statement(p: &mut Parser<'_>) {
    p.start_node(FORALL_STMT);
    p.bump();
    p.expect_ident();
    p.expect(IN_KW);
    range(p);

    if p.at(INSERT_KW) {
        dml::insert_statement(p);
    } else if p.at(UPDATE_KW) {
        dml::update_statement(p);
    } else {
        p.error_expected("'INSERT' or 'UPDATE'");
    }
    p.finish_node();
}

/// `expr .. expr`
fn range(p: &mut Parser<'_>) {
    expressions::expression(p);
    p.expect(DOT2);
    expressions::expression(p);
}

/// `RETURN [expr];`
fn return_statement(p: &mut Parser<'_>) {
    p.start_node(RETURN_STMT);
    p.bump();
    if !p.at(SEMICOLON) {
        expressions::expression(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `PIPE ROW (expr);`
fn pipe_row_statement(p: &mut Parser<'_>) {
    p.start_node(PIPE_ROW_STMT);
    p.bump();
    p.bump();
    p.expect(LPAREN);
    expressions::expression(p);
    p.expect(RPAREN);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `(EXIT | CONTINUE) [WHEN expr];`
fn exit_statement(p: &mut Parser<'_>) {
    p.start_node(if p.at(EXIT_KW) { EXIT_STMT } else { CONTINUE_STMT });
    p.bump();
    if p.eat(WHEN_KW) {
        expressions::expression(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `RAISE [exception];`
fn raise_statement(p: &mut Parser<'_>) {
    p.start_node(RAISE_STMT);
    p.bump();
    if !p.at(SEMICOLON) {
        expressions::expression(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `select;`
fn select_statement(p: &mut Parser<'_>) {
    p.start_node(SELECT_STMT);
    select::select(p);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// `expr;` or `target := expr;`
fn expression_statement(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    expressions::expression(p);

    if p.at(ASSIGN) {
        p.start_node_at(checkpoint, ASSIGNMENT_STMT);
        p.bump();
        expressions::expression(p);
    } else {
        p.start_node_at(checkpoint, EXPRESSION_STMT);
    }

    p.expect(SEMICOLON);
    p.finish_node();
}
