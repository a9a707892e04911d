//! Statements, blocks, programs and packages.

mod common;

use common::*;
use plsql_parser::ast::{BlockStatement, Expr, IfStatement, ProgramDefinition};
use plsql_parser::fields::{field, Field};
use plsql_parser::SyntaxKind::*;
use plsql_parser::{parse, SyntaxNode};

#[test]
fn test_balanced_block() {
    let root = parse_ok("BEGIN NULL; END;");
    let block = BlockStatement::cast(root.first_child().expect("block")).expect("block");
    assert_eq!(block.statements().count(), 1);
    assert_eq!(block.declarations().count(), 0);
}

#[test]
fn test_package_body_structure() {
    let root = parse_ok("CREATE PACKAGE BODY p IS PROCEDURE q IS BEGIN NULL; END; END;");
    let body = find(&root, PACKAGE_BODY);
    assert_eq!(field(&body, Field::PackageIdentifier)[0].to_string(), "p");

    let declarations: Vec<_> = body.children().filter(|n| n.kind().is_declaration()).collect();
    assert_eq!(declarations.len(), 1);
    let procedure = ProgramDefinition::cast(declarations[0].clone()).expect("procedure");
    assert_eq!(procedure.name().as_deref(), Some("q"));
}

#[test]
fn test_realistic_package_body() {
    let source = r#"
CREATE OR REPLACE PACKAGE BODY emp_api AS
  g_batch_size CONSTANT PLS_INTEGER := 500;

  FUNCTION salary_of(p_emp_id IN employees.employee_id%TYPE) RETURN NUMBER IS
    l_salary employees.salary%TYPE;
  BEGIN
    SELECT salary INTO l_salary FROM employees WHERE employee_id = p_emp_id;
    RETURN l_salary;
  EXCEPTION
    WHEN NO_DATA_FOUND THEN
      RETURN NULL;
  END salary_of;

  PROCEDURE raise_all(p_pct NUMBER DEFAULT 5) IS
    TYPE t_ids IS TABLE OF employees.employee_id%TYPE;
    l_ids t_ids;
  BEGIN
    SELECT employee_id BULK COLLECT INTO l_ids FROM employees;
    FORALL i IN 1 .. l_ids.count
      UPDATE employees SET salary = salary * (1 + p_pct / 100) WHERE employee_id = l_ids(i);
    FOR r IN (SELECT employee_id, salary FROM employees WHERE salary > 10000) LOOP
      IF r.salary > 20000 THEN
        log_pkg.info('big earner %s', r.employee_id);
      ELSIF r.salary > 15000 THEN
        NULL;
      ELSE
        CONTINUE;
      END IF;
    END LOOP;
  END raise_all;
END emp_api;
"#;
    let root = parse_ok(source);
    let body = find(&root, PACKAGE_BODY);
    assert_eq!(field(&body, Field::ClosingIdentifier)[0].to_string(), "emp_api");

    let programs: Vec<_> = body.children().filter_map(ProgramDefinition::cast).collect();
    let names: Vec<_> = programs.iter().filter_map(|p| p.name()).collect();
    assert_eq!(names, vec!["salary_of", "raise_all"]);
    assert!(programs[0].is_function());
    assert_eq!(find_all(&root, EXCEPTION_HANDLER).len(), 1);
    assert_eq!(find_all(&root, FORALL_STMT).len(), 1);

    let if_stmt = IfStatement::cast(find(&root, IF_STMT)).expect("if");
    assert_eq!(if_stmt.elsif_clauses().count(), 1);
    assert!(if_stmt.else_clause().is_some());
}

#[test]
fn test_standalone_procedure_with_nested_block() {
    let root = parse_ok(
        "CREATE OR REPLACE PROCEDURE cleanup AS\n\
         BEGIN\n\
           DECLARE\n\
             l_count NUMBER;\n\
           BEGIN\n\
             DELETE_OLD_ROWS(l_count);\n\
           END;\n\
           WHILE l_more LOOP\n\
             EXIT WHEN l_done;\n\
           END LOOP;\n\
         END cleanup;",
    );
    let procedure = find(&root, PROCEDURE_DEF);
    let statements: Vec<_> = procedure
        .children()
        .filter(|n| n.kind().is_statement())
        .map(|n| n.kind())
        .collect();
    assert_eq!(statements, vec![BLOCK_STMT, WHILE_STMT]);
}

#[test]
fn test_pipelined_function() {
    let root = parse_ok(
        "CREATE FUNCTION numbers(p_n NUMBER) RETURN t_numbers PIPELINED IS\n\
         BEGIN\n\
           FOR i IN 1 .. p_n LOOP\n\
             PIPE ROW (i);\n\
           END LOOP;\n\
           RETURN;\n\
         END;",
    );
    assert_eq!(find_all(&root, PIPE_ROW_STMT).len(), 1);
    assert_eq!(find_all(&root, RETURN_STMT).len(), 1);
}

#[test]
fn test_case_statement_fields() {
    let root = parse_ok(&in_block(
        "CASE l_grade\n\
           WHEN 'A' THEN l_points := 4;\n\
           WHEN 'B' THEN l_points := 3;\n\
           ELSE RAISE e_bad_grade;\n\
         END CASE;",
    ));
    let case = find(&root, CASE_STMT);
    assert_eq!(field(&case, Field::CaseCondition)[0].to_string(), "l_grade");
    assert_eq!(field(&case, Field::CaseWhen).len(), 2);
    let else_branch = field(&case, Field::CaseElse);
    assert_eq!(else_branch.len(), 1);
    assert_eq!(
        else_branch[0].as_node().and_then(|n| n.first_child()).map(|n| n.kind()),
        Some(RAISE_STMT)
    );
}

#[test]
fn test_top_level_mix() {
    let root = parse_ok(
        "{% include \"setup.sql\" %}\n\
         CREATE OR REPLACE TYPE t_name_list AS TABLE OF VARCHAR2(100);\n\
         CREATE OR REPLACE PACKAGE names AS\n\
           TYPE t_pair IS RECORD (first_name VARCHAR2(50), last_name VARCHAR2(50));\n\
         END names;\n\
         DECLARE\n\
           l_pair names.t_pair;\n\
         BEGIN\n\
           l_pair.first_name := 'Ada';\n\
         END;\n",
    );
    assert_eq!(
        child_kinds(&root),
        vec![DIRECTIVE_STMT, UDT_DEF, PACKAGE_SPEC, BLOCK_STMT]
    );
}

#[test]
fn test_loop_forms() {
    let root = parse_ok(&in_block(
        "LOOP\n\
           l_i := l_i + 1;\n\
           EXIT WHEN l_i > 10;\n\
           CONTINUE WHEN MOD(l_i, 2) = 0;\n\
         END LOOP;\n\
         FOR i IN REVERSE_START .. 0 LOOP NULL; END LOOP;\n\
         WHILE NOT l_done LOOP l_done := TRUE; END LOOP;",
    ));
    assert_eq!(find_all(&root, LOOP_STMT).len(), 3);
    assert_eq!(find_all(&root, EXIT_STMT).len(), 1);
    assert_eq!(find_all(&root, CONTINUE_STMT).len(), 1);
    let for_stmt = find(&root, FOR_STMT);
    assert_eq!(field(&for_stmt, Field::DeclarationIdentifier)[0].to_string(), "i");
}

#[test]
fn test_if_statement_accessors() {
    let root = parse_ok(&in_block(
        "IF l_total > 100 THEN\n\
           l_discount := 10;\n\
           l_tier := 'gold';\n\
         ELSIF l_total > 50 THEN\n\
           l_discount := 5;\n\
         ELSE\n\
           l_discount := 0;\n\
         END IF;",
    ));
    let if_stmt = IfStatement::cast(find(&root, IF_STMT)).expect("if");
    assert_eq!(if_stmt.condition().map(|e| e.text()).as_deref(), Some("l_total > 100"));
    let then_kinds: Vec<_> = if_stmt.then_statements().map(|n| n.kind()).collect();
    assert_eq!(then_kinds, vec![ASSIGNMENT_STMT, ASSIGNMENT_STMT]);
    assert_eq!(if_stmt.elsif_clauses().count(), 1);
    assert!(if_stmt.else_clause().is_some());
}

#[test]
fn test_block_exception_handlers() {
    let root = parse_ok(
        "BEGIN\n\
           SELECT name INTO l_name FROM users WHERE id = l_id;\n\
         EXCEPTION\n\
           WHEN NO_DATA_FOUND THEN l_name := NULL;\n\
           WHEN e_locked THEN RAISE;\n\
         END;",
    );
    let block = BlockStatement::cast(find(&root, BLOCK_STMT)).expect("block");
    let handlers: Vec<_> = block.exception_handlers().collect();
    assert_eq!(handlers.len(), 2);
    assert!(handlers[1].to_string().starts_with("WHEN e_locked"));
    // Handler bodies are not statements of the block itself
    assert_eq!(block.statements().count(), 1);
}

/// Right-hand side of the first assignment in `root`.
fn assigned(root: &SyntaxNode) -> Expr {
    find(root, ASSIGNMENT_STMT)
        .children()
        .filter_map(Expr::cast)
        .nth(1)
        .expect("right-hand side")
}

#[test]
fn test_expression_views() {
    let root = parse_ok(&in_block(
        "l_label := CASE WHEN l_n > 0 THEN 'pos' WHEN l_n < 0 THEN 'neg' ELSE 'zero' END;",
    ));
    let case = assigned(&root).as_case().expect("case");
    assert!(!case.is_statement());
    assert!(case.selector().is_none());
    assert_eq!(case.whens().len(), 2);
    assert!(case.whens().iter().all(|n| n.kind() == CASE_WHEN));
    assert!(case.else_branch().is_some());

    let root = parse_ok(&in_block("l_total := compute_total(l_order, 0);"));
    let call = assigned(&root).as_call().expect("call");
    assert_eq!(call.function_name().as_deref(), Some("compute_total"));
    assert_eq!(call.arguments().len(), 2);

    let root = parse_ok(&in_block("l_msg := 'Order %s shipped';"));
    let string = assigned(&root).as_string().expect("string");
    assert_eq!(string.content(), "Order %s shipped");
    assert_eq!(string.markers(), vec!["%s"]);
    assert!(assigned(&root).as_call().is_none());
}

#[test]
fn test_error_nodes_of_a_file() {
    let clean = parse("BEGIN NULL; END;");
    assert_eq!(clean.source_file().error_nodes().count(), 0);

    let broken = parse("l_x BEGIN NULL; END;");
    let file = broken.source_file();
    let skipped: Vec<_> = file.error_nodes().map(|n| n.to_string()).collect();
    assert_eq!(skipped, vec!["l_x"]);
    assert_eq!(file.blocks().count(), 1);
}
