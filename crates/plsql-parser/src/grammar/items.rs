//! Top-level items: blocks, program definitions, types, packages.

use super::{declarations, directives, expect_is_or_as, list, list1, statements, Lookahead, Rule};
use crate::parser::Parser;
use crate::SyntaxKind::{self, *};

/// Attempted in this order at every top-level position.
pub(crate) const TOP_LEVEL: &[Rule] = &[
    Rule::new(
        "block_statement",
        Lookahead::AnyOf(&[DECLARE_KW, BEGIN_KW]),
        statements::block_statement,
    ),
    Rule::new(
        "program_definition",
        Lookahead::Test(at_program_definition),
        declarations::program_definition,
    ),
    Rule::new(
        "user_defined_type_definition",
        Lookahead::Test(at_type_definition),
        type_definition,
    ),
    Rule::new(
        "package_specification",
        Lookahead::Test(at_package_spec),
        package_spec,
    ),
    Rule::new(
        "package_body_statement",
        Lookahead::Test(at_package_body),
        package_body,
    ),
    Rule::new(
        "directive_statement",
        Lookahead::Kind(DIRECTIVE_OPEN),
        directives::directive,
    ),
];

/// A package specification only declares types and pulls in directives.
const SPEC_ITEMS: &[Rule] = &[
    Rule::new(
        "type_declaration",
        Lookahead::Test(declarations::at_type_declaration),
        declarations::type_declaration,
    ),
    Rule::new(
        "directive_statement",
        Lookahead::Kind(DIRECTIVE_OPEN),
        directives::directive,
    ),
];

/// The two kinds following `CREATE [OR REPLACE]`, if at `CREATE`.
pub(crate) fn after_create(p: &Parser<'_>) -> Option<(SyntaxKind, SyntaxKind)> {
    if !p.at(CREATE_KW) {
        return None;
    }
    let n = if p.nth_at(1, OR_KW) && p.nth_at(2, REPLACE_KW) {
        3
    } else {
        1
    };
    Some((p.nth(n), p.nth(n + 1)))
}

/// `CREATE [OR REPLACE]`
pub(crate) fn create_prefix(p: &mut Parser<'_>) {
    if p.eat(CREATE_KW) && p.eat(OR_KW) {
        p.expect(REPLACE_KW);
    }
}

fn at_program_definition(p: &Parser<'_>) -> bool {
    match after_create(p) {
        Some((kind, _)) => matches!(kind, FUNCTION_KW | PROCEDURE_KW),
        None => p.at_any(&[FUNCTION_KW, PROCEDURE_KW]),
    }
}

fn at_type_definition(p: &Parser<'_>) -> bool {
    match after_create(p) {
        Some((kind, _)) => kind == TYPE_KW,
        None => declarations::at_type_declaration(p),
    }
}

fn at_package_spec(p: &Parser<'_>) -> bool {
    matches!(after_create(p), Some((PACKAGE_KW, next)) if next != BODY_KW)
}

fn at_package_body(p: &Parser<'_>) -> bool {
    matches!(after_create(p), Some((PACKAGE_KW, BODY_KW)))
}

/// Any `CREATE ...` item appearing in statement position.
pub(crate) fn create_item(p: &mut Parser<'_>) {
    if at_package_body(p) {
        package_body(p);
    } else if at_package_spec(p) {
        package_spec(p);
    } else if at_type_definition(p) {
        udt_definition(p);
    } else if at_program_definition(p) {
        declarations::program_definition(p);
    } else {
        p.error_no_alternative("'PACKAGE', 'TYPE', 'FUNCTION' or 'PROCEDURE' after 'CREATE'");
    }
}

/// `CREATE TYPE ...` or a bare `TYPE name IS ...` at top level.
fn type_definition(p: &mut Parser<'_>) {
    if p.at(CREATE_KW) {
        udt_definition(p);
    } else {
        declarations::type_declaration(p);
    }
}

/// `CREATE [OR REPLACE] TYPE name (AS|IS) (OBJECT (fields) | TABLE OF type);`
fn udt_definition(p: &mut Parser<'_>) {
    p.start_node(UDT_DEF);
    create_prefix(p);
    p.expect(TYPE_KW);
    p.expect_ident();
    expect_is_or_as(p);

    if p.eat(OBJECT_KW) {
        p.expect(LPAREN);
        super::comma_list(p, declarations::record_field);
        p.expect(RPAREN);
    } else if p.eat(TABLE_KW) {
        p.expect(OF_KW);
        declarations::type_ref(p);
    } else {
        p.error_expected("'OBJECT' or 'TABLE'");
    }

    p.expect(SEMICOLON);
    p.finish_node();
}

/// `CREATE [OR REPLACE] PACKAGE name (AS|IS) {type | directive} END [name];`
fn package_spec(p: &mut Parser<'_>) {
    p.start_node(PACKAGE_SPEC);
    create_prefix(p);
    p.expect(PACKAGE_KW);
    p.expect_ident();
    expect_is_or_as(p);
    list(p, SPEC_ITEMS, &[END_KW], "type declaration or directive");
    package_end(p);
    p.finish_node();
}

/// `CREATE [OR REPLACE] PACKAGE BODY name (IS|AS) declaration+ END [name];`
fn package_body(p: &mut Parser<'_>) {
    p.start_node(PACKAGE_BODY);
    create_prefix(p);
    p.expect(PACKAGE_KW);
    p.expect(BODY_KW);
    p.expect_ident();
    expect_is_or_as(p);
    list1(p, declarations::DECLARATIONS, &[END_KW], "declaration");
    package_end(p);
    p.finish_node();
}

fn package_end(p: &mut Parser<'_>) {
    p.expect(END_KW);
    if p.at_ident() {
        p.bump_ident();
    }
    p.expect(SEMICOLON);
}
