//! Pipeline compliance and property-based tests
//!
//! Exercises the lexer, parser, analyzer and generator together through the
//! `transpiler` facade, and checks the grammar's invariants with proptest.

#[cfg(test)]
mod proptest_queries;

#[cfg(test)]
mod sql_compliance;
