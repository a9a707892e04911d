//! Declarations: variables, record and collection types, procedures and
//! functions, parameter lists and type references.

use super::{comma_list, directives, expect_is_or_as, expressions, items, list, statements};
use super::{Lookahead, Rule};
use crate::builtins;
use crate::parser::Parser;
use crate::SyntaxKind::*;

/// Declaration section of a block, a program, or a package body.
pub(crate) const DECLARATIONS: &[Rule] = &[
    Rule::new(
        "procedure_definition",
        Lookahead::Kind(PROCEDURE_KW),
        program_definition,
    ),
    Rule::new(
        "function_definition",
        Lookahead::Kind(FUNCTION_KW),
        program_definition,
    ),
    Rule::new(
        "type_declaration",
        Lookahead::Test(at_type_declaration),
        type_declaration,
    ),
    Rule::new(
        "directive_statement",
        Lookahead::Kind(DIRECTIVE_OPEN),
        directives::directive,
    ),
    Rule::new(
        "variable_declaration",
        Lookahead::Test(at_variable_declaration),
        variable_declaration,
    ),
];

pub(crate) fn at_type_declaration(p: &Parser<'_>) -> bool {
    p.at(TYPE_KW) && p.nth_at_ident(1)
}

fn at_variable_declaration(p: &Parser<'_>) -> bool {
    p.at_ident()
}

/// `[CREATE [OR REPLACE]] (PROCEDURE | FUNCTION) name [(params)]
/// [RETURN type [DETERMINISTIC | PIPELINED]] (IS | AS) declarations body`
///
/// A signature followed directly by `;` is a forward declaration.
pub(crate) fn program_definition(p: &mut Parser<'_>) {
    let keyword = match items::after_create(p) {
        Some((kind, _)) => kind,
        None => p.current(),
    };
    let is_function = keyword == FUNCTION_KW;

    p.start_node(if is_function { FUNCTION_DEF } else { PROCEDURE_DEF });
    items::create_prefix(p);
    p.expect(if is_function { FUNCTION_KW } else { PROCEDURE_KW });
    p.expect_ident();

    if p.at(LPAREN) {
        param_list(p);
    }

    if is_function {
        p.expect(RETURN_KW);
        type_ref(p);
        while p.at_any(&[DETERMINISTIC_KW, PIPELINED_KW]) {
            p.bump();
        }
    }

    if p.eat(SEMICOLON) {
        p.finish_node();
        return;
    }

    expect_is_or_as(p);
    list(p, DECLARATIONS, &[BEGIN_KW, END_KW], "declaration");
    statements::body(p, true);
    p.finish_node();
}

/// `( param {, param} )`; the list node is omitted for `()`.
fn param_list(p: &mut Parser<'_>) {
    p.bump();
    if !p.at(RPAREN) {
        p.start_node(PARAM_LIST);
        comma_list(p, param_declaration);
        p.finish_node();
    }
    p.expect(RPAREN);
}

/// `name [IN] [OUT [NOCOPY]] type [(DEFAULT | :=) expr]`
fn param_declaration(p: &mut Parser<'_>) {
    p.start_node(PARAM_DECL);
    p.expect_ident();
    p.eat(IN_KW);
    if p.eat(OUT_KW) {
        p.eat(NOCOPY_KW);
    }
    type_ref(p);
    default_value(p);
    p.finish_node();
}

/// `name [CONSTANT] (type | EXCEPTION) [NOT NULL] [(:= | DEFAULT) expr];`
fn variable_declaration(p: &mut Parser<'_>) {
    p.start_node(VARIABLE_DECL);
    p.bump_ident();
    p.eat(CONSTANT_KW);
    if !p.eat(EXCEPTION_KW) {
        type_ref(p);
    }
    if p.at(NOT_KW) && p.nth_at(1, NULL_KW) {
        p.bump();
        p.bump();
    }
    default_value(p);
    p.expect(SEMICOLON);
    p.finish_node();
}

fn default_value(p: &mut Parser<'_>) {
    if p.at_any(&[ASSIGN, DEFAULT_KW]) {
        p.bump();
        expressions::expression(p);
    }
}

/// `TYPE name IS RECORD (field {, field});` or
/// `TYPE name IS TABLE OF type [INDEX BY type];`
pub(crate) fn type_declaration(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    p.bump();
    p.expect_ident();
    expect_is_or_as(p);

    if p.at(RECORD_KW) {
        p.start_node_at(checkpoint, RECORD_TYPE_DEF);
        p.bump();
        p.expect(LPAREN);
        comma_list(p, record_field);
        p.expect(RPAREN);
    } else {
        p.start_node_at(checkpoint, COLLECTION_TYPE_DEF);
        if p.eat(TABLE_KW) {
            p.expect(OF_KW);
            type_ref(p);
            if p.eat(INDEX_KW) {
                p.expect(BY_KW);
                type_ref(p);
            }
        } else {
            p.error_expected("'RECORD' or 'TABLE'");
        }
    }

    p.expect(SEMICOLON);
    p.finish_node();
}

/// `name type [(:= | DEFAULT) expr]`
pub(crate) fn record_field(p: &mut Parser<'_>) {
    p.start_node(RECORD_FIELD);
    p.expect_ident();
    type_ref(p);
    default_value(p);
    p.finish_node();
}

/// A `type` node: a builtin type with optional size, or a user-defined
/// type (accessor chain with optional `%ROWTYPE` / `%TYPE`).
pub(crate) fn type_ref(p: &mut Parser<'_>) {
    let builtin =
        p.at(IDENT) && builtins::is_builtin_type(p.nth_text(0)) && !p.nth_at(1, DOT);
    if !builtin && !p.at_ident() && !p.at(COLON) {
        p.error_expected("type");
        return;
    }

    p.start_node(TYPE);
    if builtin {
        p.start_node(BUILTIN_TYPE);
        p.bump();
        if p.at(LPAREN) {
            type_size(p);
        }
        p.finish_node();
    } else {
        p.start_node(UDT);
        expressions::chain_accessor(p);
        if p.eat(PERCENT) {
            if p.at(TYPE_KW) || p.at_word("ROWTYPE") {
                p.bump();
            } else {
                p.error_expected("'ROWTYPE' or 'TYPE'");
            }
        }
        p.finish_node();
    }
    p.finish_node();
}

/// `(n [, m] [BYTE | CHAR])`
fn type_size(p: &mut Parser<'_>) {
    p.bump();
    p.expect(NUMBER);
    if p.eat(COMMA) {
        p.expect(NUMBER);
    }
    if p.at_word("BYTE") || p.at_word("CHAR") {
        p.bump();
    }
    p.expect(RPAREN);
}
