//! normalform: normal forms for first-order and propositional formulas
//!
//! This library parses formulas written in LaTeX-style notation and takes
//! them through negation normal form, prenex form, PCNF/PDNF, Skolemized
//! clausal form and a Horn clause classification.

pub mod config;
pub mod error;
pub mod fol;
pub mod horn;
pub mod json;
pub mod normal;
pub mod parser;
pub mod pipeline;
pub mod time_compat;

pub use config::{Budget, ConversionConfig};
pub use error::{ConversionError, ErrorKind, Result};

// Re-export commonly used types from fol
pub use fol::{Atom, Clause, ClauseSet, FunctionSymbol, Literal, PredicateSymbol, Term, Variable};

pub use horn::{classify, format_horn, HornClause, HornKind, HornPartition};
pub use json::{ConversionJson, ErrorJson, OutcomeJson};
pub use normal::{clausify, eliminate, rename, to_cnf, to_dnf, to_nnf, to_prenex, Prenex};
pub use parser::{
    parse, parse_clause, parse_formula, parse_horn, Formula, FormulaKind, ParsedFormula, Quantifier,
};
pub use pipeline::{convert, ConversionResult, Converter, Step, StepTrace, EXAMPLES};
