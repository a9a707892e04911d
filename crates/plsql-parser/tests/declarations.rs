//! Declaration sections, parameters and type references.

mod common;

use common::*;
use plsql_parser::ast::{
    ParamMode, ProgramDefinition, RecordTypeDefinition, SourceFile, VariableDeclaration,
};
use plsql_parser::fields::{field, Field};
use plsql_parser::parse;
use plsql_parser::SyntaxKind::*;

#[test]
fn test_declaration_section() {
    let root = parse_ok(
        "DECLARE\n\
           l_count    PLS_INTEGER := 0;\n\
           l_name     VARCHAR2(100 CHAR) NOT NULL DEFAULT 'none';\n\
           l_amount   NUMBER(12, 2);\n\
           l_emp      employees%ROWTYPE;\n\
           l_salary   employees.salary%TYPE;\n\
           c_limit    CONSTANT NUMBER := 10;\n\
           e_overflow EXCEPTION;\n\
           TYPE t_ids IS TABLE OF NUMBER INDEX BY PLS_INTEGER;\n\
           l_ids      t_ids;\n\
         BEGIN\n\
           NULL;\n\
         END;",
    );
    let decls: Vec<_> = root.descendants().filter_map(VariableDeclaration::cast).collect();
    let names: Vec<_> = decls.iter().filter_map(|d| d.name()).collect();
    assert_eq!(
        names,
        vec!["l_count", "l_name", "l_amount", "l_emp", "l_salary", "c_limit", "e_overflow", "l_ids"]
    );

    assert!(decls[0].type_ref().is_some_and(|t| t.is_builtin()));
    assert!(decls[3].type_ref().is_some_and(|t| t.is_anchored()));
    assert_eq!(
        decls[4].type_ref().map(|t| t.text()).as_deref(),
        Some("employees.salary%TYPE")
    );
    assert!(decls[5].is_constant());
    assert!(decls[6].is_exception());
    assert!(!decls[7].type_ref().is_some_and(|t| t.is_builtin()));

    let collection = find(&root, COLLECTION_TYPE_DEF);
    assert_eq!(field(&collection, Field::TypeIdentifier)[0].to_string(), "t_ids");
}

#[test]
fn test_soft_keywords_as_names() {
    let root = parse_ok(
        "DECLARE\n\
           record  VARCHAR2(10);\n\
           body    CLOB;\n\
           row     NUMBER;\n\
           index   PLS_INTEGER;\n\
         BEGIN\n\
           body := record || index;\n\
         END;",
    );
    let names: Vec<_> = root
        .descendants()
        .filter_map(VariableDeclaration::cast)
        .filter_map(|d| d.name())
        .collect();
    assert_eq!(names, vec!["record", "body", "row", "index"]);
}

#[test]
fn test_parameters() {
    let file = SourceFile::cast(parse_ok(
        "CREATE OR REPLACE PROCEDURE transfer(\n\
           p_from    IN  accounts.id%TYPE,\n\
           p_to      IN  accounts.id%TYPE,\n\
           p_amount      NUMBER DEFAULT 0,\n\
           p_status  OUT VARCHAR2,\n\
           p_log     IN OUT NOCOPY t_log\n\
         ) IS\n\
         BEGIN\n\
           NULL;\n\
         END transfer;",
    ))
    .expect("source file");
    let program = file.programs().next().expect("procedure");
    assert_eq!(program.name().as_deref(), Some("transfer"));
    assert_eq!(program.closing_name().as_deref(), Some("transfer"));

    let params: Vec<_> = program.params().collect();
    assert_eq!(params.len(), 5);
    let modes: Vec<_> = params.iter().map(|p| p.mode()).collect();
    assert_eq!(
        modes,
        vec![ParamMode::In, ParamMode::In, ParamMode::In, ParamMode::Out, ParamMode::InOut]
    );
    assert_eq!(
        params[2].default_value().map(|e| e.text()).as_deref(),
        Some("0")
    );
}

#[test]
fn test_function_signature_fields() {
    let root = parse_ok(
        "CREATE FUNCTION full_name(p_id NUMBER) RETURN VARCHAR2 DETERMINISTIC IS\n\
           l_first VARCHAR2(50);\n\
         BEGIN\n\
           RETURN l_first;\n\
         END full_name;",
    );
    let function = find(&root, FUNCTION_DEF);
    assert_eq!(field(&function, Field::ProgramName)[0].to_string(), "full_name");
    assert_eq!(field(&function, Field::ReturnType)[0].to_string(), "VARCHAR2");
    assert_eq!(field(&function, Field::ClosingIdentifier)[0].to_string(), "full_name");

    let program = ProgramDefinition::cast(function).expect("function");
    assert_eq!(program.declarations().count(), 1);
    assert_eq!(program.statements().count(), 1);
}

#[test]
fn test_forward_declarations_in_a_package_body() {
    let root = parse_ok(
        "CREATE PACKAGE BODY p IS\n\
           PROCEDURE b;\n\
           PROCEDURE a IS BEGIN b; END;\n\
           PROCEDURE b IS BEGIN NULL; END;\n\
         END p;",
    );
    let programs: Vec<_> = root.descendants().filter_map(ProgramDefinition::cast).collect();
    let forward: Vec<_> = programs.iter().map(|p| p.is_forward_declaration()).collect();
    assert_eq!(forward, vec![true, false, false]);
}

#[test]
fn test_record_and_object_types() {
    let root = parse_ok(
        "CREATE OR REPLACE TYPE t_point AS OBJECT (x NUMBER, y NUMBER);\n\
         CREATE OR REPLACE PACKAGE geometry AS\n\
           TYPE t_segment IS RECORD (\n\
             start_point t_point,\n\
             end_point   t_point,\n\
             label       VARCHAR2(30) := 'unnamed'\n\
           );\n\
           TYPE t_segments IS TABLE OF t_segment;\n\
           {% include:type \"geometry_types.sql\" %}\n\
         END geometry;",
    );
    let udt = find(&root, UDT_DEF);
    assert_eq!(field(&udt, Field::TypeIdentifier)[0].to_string(), "t_point");
    assert_eq!(find_all(&udt, RECORD_FIELD).len(), 2);

    let record = root
        .descendants()
        .find_map(RecordTypeDefinition::cast)
        .expect("record");
    let fields: Vec<_> = record.fields().into_iter().map(|(name, _)| name).collect();
    assert_eq!(fields, vec!["start_point", "end_point", "label"]);

    let spec = find(&root, PACKAGE_SPEC);
    assert_eq!(
        child_kinds(&spec),
        vec![RECORD_TYPE_DEF, COLLECTION_TYPE_DEF, DIRECTIVE_STMT]
    );
}

#[test]
fn test_package_spec_rejects_variables() {
    let parse = parse("CREATE PACKAGE p AS l_x NUMBER; END p;");
    assert_eq!(parse.errors.len(), 1);
    assert!(
        parse.errors[0].message.starts_with("expected type declaration or directive"),
        "{}",
        parse.errors[0].message
    );
    assert_eq!(parse.syntax().to_string(), "CREATE PACKAGE p AS l_x NUMBER; END p;");
}

#[test]
fn test_empty_declare_section() {
    let root = parse_ok("DECLARE BEGIN NULL; END;");
    assert_eq!(child_kinds(&root), vec![BLOCK_STMT]);
}

#[test]
fn test_package_specs_and_type_includes() {
    let parse = parse(
        "{% include \"setup.sql\" %}\n\
         CREATE OR REPLACE PACKAGE billing AS\n\
           TYPE t_invoice IS RECORD (id NUMBER, amount NUMBER(10, 2));\n\
           TYPE t_invoices IS TABLE OF t_invoice;\n\
           {% include:type \"billing_types.sql\" %}\n\
         END billing;",
    );
    assert!(parse.errors.is_empty(), "{:?}", parse.errors);
    let file = parse.source_file();

    let specs: Vec<_> = file.package_specs().collect();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name().as_deref(), Some("billing"));
    assert_eq!(specs[0].closing_name().as_deref(), Some("billing"));
    assert_eq!(specs[0].types().count(), 2);

    let includes: Vec<_> = file
        .directives()
        .map(|d| (d.path(), d.is_type_include()))
        .collect();
    assert_eq!(
        includes,
        vec![
            (Some("setup.sql".to_string()), false),
            (Some("billing_types.sql".to_string()), true),
        ]
    );
}
