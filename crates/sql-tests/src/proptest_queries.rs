//! Property-based tests for the SELECT pipeline using proptest
//!
//! These tests generate random but well-formed queries and verify the
//! invariants of each stage: lexing, precedence, validation and generation.

use proptest::prelude::*;
use sql_lexer::{Keyword, Token};
use sql_parser::{Condition, LogicalOp};
use sql_semantic::{DataType, Schema, SemanticError};
use transpiler::{TranspileError, Transpiler};

/// Words the lexer turns into keywords
const SQL_RESERVED_WORDS: &[&str] = &["SELECT", "FROM", "WHERE", "AND", "OR"];

const USER_COLUMNS: &[(&str, DataType)] = &[
    ("id", DataType::Int),
    ("name", DataType::String),
    ("age", DataType::Int),
    ("city", DataType::String),
];

fn users_schema() -> Schema {
    Schema::new().with_table("users", USER_COLUMNS.iter().copied())
}

fn is_reserved(s: &str) -> bool {
    SQL_RESERVED_WORDS.contains(&s.to_uppercase().as_str())
}

/// Generate a valid identifier (table or column name)
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}")
        .unwrap()
        .prop_filter("must not be reserved word", |s| !is_reserved(s))
}

/// Identifier with arbitrary letter case
fn mixed_case_identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,7}")
        .unwrap()
        .prop_filter("must not be reserved word", |s| !is_reserved(s))
}

/// Spell `word` with random letter case
fn random_case(word: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, up)| {
                if up {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect::<String>()
    })
}

fn compare_op_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["=", "!=", ">", "<", ">=", "<="])
}

/// SQL literal text matching `ty`
fn literal_strategy(ty: DataType) -> BoxedStrategy<String> {
    match ty {
        DataType::Int => (0i64..10000).prop_map(|n| n.to_string()).boxed(),
        DataType::String => "[a-zA-Z0-9 ]{1,10}"
            .prop_map(|s| format!("'{}'", s))
            .boxed(),
    }
}

/// A well-typed comparison against the users table, as SQL text
fn comparison_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(USER_COLUMNS.to_vec()).prop_flat_map(|(column, ty)| {
        (compare_op_strategy(), literal_strategy(ty))
            .prop_map(move |(op, value)| format!("{} {} {}", column, op, value))
    })
}

/// Comparisons joined by a random sequence of AND / OR
fn condition_chain_strategy() -> impl Strategy<Value = (Vec<String>, Vec<LogicalOp>)> {
    prop::collection::vec(comparison_strategy(), 1..8).prop_flat_map(|comparisons| {
        let joins = prop::collection::vec(
            prop::sample::select(vec![LogicalOp::And, LogicalOp::Or]),
            comparisons.len() - 1,
        );
        (Just(comparisons), joins)
    })
}

fn chain_sql(comparisons: &[String], joins: &[LogicalOp]) -> String {
    let mut sql = format!("SELECT * FROM users WHERE {}", comparisons[0]);
    for (join, comparison) in joins.iter().zip(&comparisons[1..]) {
        sql.push_str(&format!(" {} {}", join, comparison));
    }
    sql.push(';');
    sql
}

/// Sizes of the AND groups between OR operators
fn expected_groups(joins: &[LogicalOp]) -> Vec<usize> {
    let mut groups = vec![1];
    for join in joins {
        match join {
            LogicalOp::And => *groups.last_mut().unwrap() += 1,
            LogicalOp::Or => groups.push(1),
        }
    }
    groups
}

/// Number of comparisons under an OR-free subtree, None if it holds an OR
fn and_group_size(condition: &Condition) -> Option<usize> {
    match condition {
        Condition::Comparison(_) => Some(1),
        Condition::Logical(l) if l.op == LogicalOp::And => {
            Some(and_group_size(&l.left)? + and_group_size(&l.right)?)
        }
        Condition::Logical(_) => None,
    }
}

fn or_groups(condition: &Condition, groups: &mut Vec<Option<usize>>) {
    match condition {
        Condition::Logical(l) if l.op == LogicalOp::Or => {
            or_groups(&l.left, groups);
            or_groups(&l.right, groups);
        }
        other => groups.push(and_group_size(other)),
    }
}

fn is_left_deep(condition: &Condition) -> bool {
    match condition {
        Condition::Comparison(_) => true,
        Condition::Logical(l) => {
            matches!(*l.right, Condition::Comparison(_)) && is_left_deep(&l.left)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn test_transpile_is_deterministic(
        (comparisons, joins) in condition_chain_strategy()
    ) {
        let sql = chain_sql(&comparisons, &joins);
        let compiler = Transpiler::new(users_schema());

        let first = compiler.transpile(&sql);
        let second = compiler.transpile(&sql);
        prop_assert!(first.is_ok(), "well-typed query should compile: {:?}", first);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, transpiler::transpile(&sql, &users_schema()));
    }

    #[test]
    fn test_and_binds_tighter_than_or(
        (comparisons, joins) in condition_chain_strategy()
    ) {
        let sql = chain_sql(&comparisons, &joins);
        let query = transpiler::parse(&sql).unwrap();
        let condition = query.where_clause.unwrap();

        let mut groups = Vec::new();
        or_groups(&condition, &mut groups);

        let expected: Vec<Option<usize>> =
            expected_groups(&joins).into_iter().map(Some).collect();
        prop_assert_eq!(groups, expected);
    }

    #[test]
    fn test_and_chain_is_left_associative(
        comparisons in prop::collection::vec(comparison_strategy(), 2..6)
    ) {
        let joins = vec![LogicalOp::And; comparisons.len() - 1];
        let query = transpiler::parse(&chain_sql(&comparisons, &joins)).unwrap();
        prop_assert!(is_left_deep(&query.where_clause.unwrap()));
    }

    #[test]
    fn test_keywords_case_insensitive_identifiers_preserved(
        select in random_case("select"),
        from in random_case("from"),
        column in mixed_case_identifier_strategy(),
        table in mixed_case_identifier_strategy(),
    ) {
        let sql = format!("{} {} {} {};", select, column, from, table);
        let tokens: Vec<Token> = transpiler::tokenize(&sql)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect();

        prop_assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Select),
                Token::Identifier(column),
                Token::Keyword(Keyword::From),
                Token::Identifier(table),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_projection_lists_columns_in_order(
        columns in prop::sample::subsequence(vec!["id", "name", "age", "city"], 1..=4)
    ) {
        let sql = format!("SELECT {} FROM users;", columns.join(", "));
        let output = Transpiler::new(users_schema()).transpile(&sql).unwrap();

        let fields: Vec<String> = columns.iter().map(|c| format!("{}: 1", c)).collect();
        prop_assert_eq!(
            output,
            format!("db.users.find({{  }}, {{ {} }})", fields.join(", "))
        );
    }

    #[test]
    fn test_int_comparison_renders_operator(
        op in compare_op_strategy(),
        value in 0i64..10000,
    ) {
        let sql = format!("SELECT * FROM users WHERE age {} {};", op, value);
        let output = Transpiler::new(users_schema()).transpile(&sql).unwrap();

        let expected = match op {
            "=" => format!("db.users.find({{ age: {} }})", value),
            _ => {
                let mongo_op = match op {
                    "!=" => "$ne",
                    ">" => "$gt",
                    "<" => "$lt",
                    ">=" => "$gte",
                    _ => "$lte",
                };
                format!("db.users.find({{ age: {{ {}: {} }} }})", mongo_op, value)
            }
        };
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn test_unknown_table_rejected(table in identifier_strategy()) {
        prop_assume!(table != "users");
        let err = Transpiler::new(users_schema())
            .transpile(&format!("SELECT * FROM {};", table))
            .unwrap_err();

        let quoted = format!("'{}'", table);
        prop_assert!(err.to_string().contains(&quoted));
        prop_assert_eq!(
            err,
            TranspileError::Semantic(SemanticError::TableNotFound { table })
        );
    }

    #[test]
    fn test_unknown_column_rejected(column in identifier_strategy()) {
        prop_assume!(!USER_COLUMNS.iter().any(|(name, _)| *name == column));
        let err = Transpiler::new(users_schema())
            .transpile(&format!("SELECT id, {} FROM users;", column))
            .unwrap_err();

        let quoted = format!("'{}'", column);
        prop_assert!(err.to_string().contains(&quoted));
        prop_assert_eq!(
            err,
            TranspileError::Semantic(SemanticError::ColumnNotFound {
                column,
                table: "users".to_string(),
            })
        );
    }

    #[test]
    fn test_type_mismatch_rejected(
        (column, declared) in prop::sample::select(USER_COLUMNS.to_vec()),
        int_value in 0i64..10000,
        str_value in "[a-z]{1,8}",
    ) {
        let (literal, actual) = match declared {
            DataType::Int => (format!("'{}'", str_value), DataType::String),
            DataType::String => (int_value.to_string(), DataType::Int),
        };
        let sql = format!("SELECT * FROM users WHERE {} = {};", column, literal);
        let err = Transpiler::new(users_schema()).transpile(&sql).unwrap_err();

        prop_assert_eq!(
            err,
            TranspileError::Semantic(SemanticError::TypeMismatch {
                column: column.to_string(),
                expected: declared,
                actual,
            })
        );
    }

    #[test]
    fn test_illegal_character_position(
        lines in 0usize..4,
        indent in 0usize..10,
        c in prop::sample::select(vec!['$', '#', '@', '%', '?', '(', '.']),
    ) {
        let sql = format!("{}{}{} FROM users;", "\n".repeat(lines), " ".repeat(indent), c);
        match transpiler::tokenize(&sql) {
            Err(TranspileError::Lexical(e)) => {
                prop_assert_eq!(e.message, format!("Illegal character '{}'", c));
                prop_assert_eq!(e.span.line, lines + 1);
                prop_assert_eq!(e.span.column, indent + 1);
            }
            other => prop_assert!(false, "expected a lexical error, got {:?}", other),
        }
    }
}
