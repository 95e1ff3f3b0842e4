//! Tokenizer and parser for calculator expressions.
//!
//! The entry points are [`parser::parse`], which parses a single expression, and
//! [`parser::parse_equation`], which additionally accepts an equation of the form `lhs = rhs`.

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, parse_equation};
