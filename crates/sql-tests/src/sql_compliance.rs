//! Pipeline compliance tests
//!
//! End-to-end checks of the SELECT dialect: the exact shell text produced
//! for each supported construct, and the exact message and stage of every
//! kind of failure.

use std::io::Write;

use sql_parser::{CompareOp, Comparison, Condition, Literal, LogicalCondition, LogicalOp};
use sql_semantic::{DataType, Schema, SemanticError};
use transpiler::{Stage, TranspileError, Transpiler};

fn users_schema() -> Schema {
    Schema::new()
        .with_table(
            "users",
            [
                ("id", DataType::Int),
                ("name", DataType::String),
                ("age", DataType::Int),
                ("city", DataType::String),
            ],
        )
        .with_table(
            "orders",
            [("id", DataType::Int), ("status", DataType::String)],
        )
}

/// Helper to compile a query that must succeed
fn mongo(sql: &str) -> String {
    Transpiler::new(users_schema())
        .transpile(sql)
        .unwrap_or_else(|e| panic!("Query failed: {} - Error: {}", sql, e))
}

/// Helper to compile a query that must fail
fn error(sql: &str) -> TranspileError {
    match Transpiler::new(users_schema()).transpile(sql) {
        Ok(output) => panic!("Query should fail: {} - got {}", sql, output),
        Err(e) => e,
    }
}

fn compare(identifier: &str, op: CompareOp, value: i64) -> Condition {
    Condition::Comparison(Comparison {
        identifier: identifier.to_string(),
        op,
        value: Literal::Int(value),
    })
}

// =============================================================================
// Section 1: Generated commands
// =============================================================================

mod generation {
    use super::*;

    #[test]
    fn test_select_star_has_no_projection() {
        assert_eq!(mongo("SELECT * FROM users;"), "db.users.find({  })");
    }

    #[test]
    fn test_select_columns_projects_each() {
        let output = mongo("SELECT name, age FROM users;");
        assert_eq!(output, "db.users.find({  }, { name: 1, age: 1 })");
        assert!(output.contains("name: 1"));
        assert!(output.contains("age: 1"));
    }

    #[test]
    fn test_greater_than() {
        let output = mongo("SELECT * FROM users WHERE age > 25;");
        assert!(output.contains("{ age: { $gt: 25 } }"));
    }

    #[test]
    fn test_string_quoted_number_bare() {
        assert_eq!(
            mongo("SELECT * FROM users WHERE city = 'Delhi';"),
            r#"db.users.find({ city: "Delhi" })"#
        );
        assert_eq!(
            mongo("SELECT * FROM users WHERE id = 7;"),
            "db.users.find({ id: 7 })"
        );
    }

    #[test]
    fn test_filter_and_projection() {
        assert_eq!(
            mongo("SELECT name FROM users WHERE age >= 18 AND city != 'Pune';"),
            r#"db.users.find({ $and: [ { age: { $gte: 18 } }, { city: { $ne: "Pune" } } ] }, { name: 1 })"#
        );
    }

    #[test]
    fn test_or_of_and() {
        assert_eq!(
            mongo("SELECT * FROM users WHERE id = 1 OR age < 5 AND age <= 3;"),
            "db.users.find({ $or: [ { id: 1 }, { $and: [ { age: { $lt: 5 } }, { age: { $lte: 3 } } ] } ] })"
        );
    }

    #[test]
    fn test_keywords_any_case() {
        assert_eq!(
            mongo("select name from users where age > 1 and id = 2;"),
            mongo("SELECT name FROM users WHERE age > 1 AND id = 2;")
        );
    }

    #[test]
    fn test_multiline_query() {
        assert_eq!(
            mongo("SELECT id\nFROM orders\nWHERE status = 'open';"),
            r#"db.orders.find({ status: "open" }, { id: 1 })"#
        );
    }

    #[test]
    fn test_compile_json_matches_shell() {
        let command = Transpiler::new(users_schema())
            .compile("SELECT name FROM users WHERE age > 25;")
            .unwrap();
        assert_eq!(
            command.to_string(),
            "db.users.find({ age: { $gt: 25 } }, { name: 1 })"
        );
        assert_eq!(command.collection, "users");
    }
}

// =============================================================================
// Section 2: Parse trees
// =============================================================================

mod syntax_tree {
    use super::*;

    #[test]
    fn test_and_binds_tighter_than_or() {
        let query = transpiler::parse("SELECT * FROM t WHERE a = 1 OR b = 2 AND c = 3;").unwrap();
        assert_eq!(
            query.where_clause,
            Some(Condition::Logical(LogicalCondition::new(
                compare("a", CompareOp::Eq, 1),
                LogicalOp::Or,
                Condition::Logical(LogicalCondition::new(
                    compare("b", CompareOp::Eq, 2),
                    LogicalOp::And,
                    compare("c", CompareOp::Eq, 3),
                )),
            )))
        );
    }

    #[test]
    fn test_identifier_case_preserved() {
        let query = transpiler::parse("select Name from Users;").unwrap();
        assert_eq!(query.table, "Users");
        assert_eq!(query.columns.names(), ["Name".to_string()]);
    }
}

// =============================================================================
// Section 3: Failures, one stage at a time
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_illegal_character() {
        let err = error("SELECT $ FROM users;");
        assert_eq!(err.stage(), Stage::Lexical);
        assert_eq!(
            err.to_string(),
            "Lexical Error: Illegal character '$' at line 1, column 8"
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = error("SELECT * FROM users WHERE name = 'abc;");
        assert_eq!(
            err.to_string(),
            "Lexical Error: Unterminated string literal at line 1, column 34"
        );
    }

    #[test]
    fn test_syntax_error_names_token() {
        let err = error("SELECT FROM users;");
        assert_eq!(err.stage(), Stage::Syntax);
        assert_eq!(err.to_string(), "Syntax Error: Syntax error at 'FROM', line 1");
    }

    #[test]
    fn test_syntax_error_names_string_token() {
        let err = error("SELECT * FROM 'users';");
        assert_eq!(
            err.to_string(),
            "Syntax Error: Syntax error at string 'users', line 1"
        );
    }

    #[test]
    fn test_syntax_error_at_eof() {
        let err = error("SELECT * FROM users");
        assert_eq!(err.to_string(), "Syntax Error: Syntax error at EOF");
    }

    #[test]
    fn test_unknown_table() {
        let err = error("SELECT * FROM products;");
        assert_eq!(err.stage(), Stage::Semantic);
        assert_eq!(
            err.to_string(),
            "Semantic Error: Table 'products' does not exist"
        );
    }

    #[test]
    fn test_unknown_column() {
        let err = error("SELECT email FROM users;");
        assert_eq!(
            err,
            TranspileError::Semantic(SemanticError::ColumnNotFound {
                column: "email".to_string(),
                table: "users".to_string(),
            })
        );
        assert_eq!(
            err.to_string(),
            "Semantic Error: Column 'email' does not exist in table 'users'"
        );
    }

    #[test]
    fn test_unknown_column_in_where() {
        let err = error("SELECT * FROM users WHERE salary > 10;");
        assert!(err.to_string().contains("'salary'"));
    }

    #[test]
    fn test_duplicate_column() {
        let err = error("SELECT name, name FROM users;");
        assert_eq!(
            err.to_string(),
            "Semantic Error: Duplicate column 'name' in SELECT list"
        );
    }

    #[test]
    fn test_type_mismatch() {
        let err = error("SELECT * FROM users WHERE age = 'old';");
        assert_eq!(
            err.to_string(),
            "Semantic Error: Type mismatch for column 'age'. Expected int but got string."
        );

        let err = error("SELECT * FROM users WHERE city = 5;");
        assert_eq!(
            err.to_string(),
            "Semantic Error: Type mismatch for column 'city'. Expected string but got int."
        );
    }

    #[test]
    fn test_columns_of_other_table_not_visible() {
        let err = error("SELECT status FROM users;");
        assert!(matches!(
            err,
            TranspileError::Semantic(SemanticError::ColumnNotFound { .. })
        ));
    }
}

// =============================================================================
// Section 4: Schema files
// =============================================================================

mod schema_files {
    use super::*;

    #[test]
    fn test_schema_file_drives_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "products": {{ "sku": "string", "price": "int" }} }}"#
        )
        .unwrap();

        let compiler = Transpiler::from_schema_file(file.path()).unwrap();
        assert_eq!(
            compiler
                .transpile("SELECT sku FROM products WHERE price < 100;")
                .unwrap(),
            "db.products.find({ price: { $lt: 100 } }, { sku: 1 })"
        );
        assert!(compiler.transpile("SELECT * FROM users;").is_err());
    }

    #[test]
    fn test_bad_schema_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "products": {{ "price": "float" }} }}"#).unwrap();

        let err = Transpiler::from_schema_file(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid column type 'float' for column 'price' in table 'products'. Supported types: 'int', 'string'."
        );
    }

    #[test]
    fn test_missing_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Transpiler::from_schema_file(dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.to_string(), "File not found.");
    }
}
