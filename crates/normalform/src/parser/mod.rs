//! Formula tree, tokenizer and parser

pub mod formula;
pub mod grammar;
pub mod lexer;

// Re-export main parsing functions and types
pub use formula::{Formula, FormulaKind, Quantifier};
pub use grammar::{parse, parse_clause, parse_formula, parse_horn, ParsedFormula};
pub use lexer::{tokenize, Spanned, Token};
