//! Closed tables of builtin program and data type names.
//!
//! These are ordinary identifiers to the lexer. The parser looks them up by
//! text (case-insensitively) to tag `builtin_program` and `builtin_type`
//! nodes. `FIRST`, `LAST`, `RANK` and `DENSE_RANK` are keywords and are
//! handled by the parser directly.

/// Builtin functions and pseudo-columns, sorted.
const PROGRAMS: &[&str] = &[
    "ABS",
    "ADD_MONTHS",
    "AVG",
    "CEIL",
    "COALESCE",
    "COUNT",
    "CURRENT_DATE",
    "CURRENT_TIMESTAMP",
    "DECODE",
    "FLOOR",
    "GREATEST",
    "INITCAP",
    "INSTR",
    "LAG",
    "LEAD",
    "LEAST",
    "LENGTH",
    "LISTAGG",
    "LOWER",
    "LPAD",
    "LTRIM",
    "MAX",
    "MIN",
    "MOD",
    "MONTHS_BETWEEN",
    "NVL",
    "NVL2",
    "POWER",
    "REGEXP_LIKE",
    "REGEXP_REPLACE",
    "REGEXP_SUBSTR",
    "ROUND",
    "ROW_NUMBER",
    "RPAD",
    "RTRIM",
    "SIGN",
    "SQLCODE",
    "SQLERRM",
    "SQRT",
    "SUBSTR",
    "SUM",
    "SYSDATE",
    "SYSTIMESTAMP",
    "TO_CHAR",
    "TO_DATE",
    "TO_NUMBER",
    "TO_TIMESTAMP",
    "TRIM",
    "TRUNC",
    "UPPER",
    "USER",
];

/// Builtin scalar data types, sorted.
const DATA_TYPES: &[&str] = &[
    "BINARY_DOUBLE",
    "BINARY_FLOAT",
    "BINARY_INTEGER",
    "BLOB",
    "BOOLEAN",
    "CHAR",
    "CLOB",
    "DATE",
    "DECIMAL",
    "FLOAT",
    "INT",
    "INTEGER",
    "LONG",
    "NATURAL",
    "NCHAR",
    "NCLOB",
    "NUMBER",
    "NVARCHAR2",
    "PLS_INTEGER",
    "POSITIVE",
    "RAW",
    "ROWID",
    "SIMPLE_INTEGER",
    "SYS_REFCURSOR",
    "TIMESTAMP",
    "VARCHAR",
    "VARCHAR2",
];

fn lookup(table: &[&str], text: &str) -> bool {
    // Longest entry is well under this; anything longer cannot match
    if text.len() > 32 {
        return false;
    }
    let upper = text.to_ascii_uppercase();
    table.binary_search(&upper.as_str()).is_ok()
}

pub fn is_builtin_program(text: &str) -> bool {
    lookup(PROGRAMS, text)
}

pub fn is_builtin_type(text: &str) -> bool {
    lookup(DATA_TYPES, text)
}
