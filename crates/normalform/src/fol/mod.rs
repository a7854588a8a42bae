//! First-order logic data structures
//!
//! This module provides the clause-level types produced by clausification:
//! terms, atoms, literals, clauses and clause sets.

pub mod clause;
pub mod literal;
pub mod term;

// Re-export commonly used types
pub use clause::{Clause, ClauseSet};
pub use literal::{Atom, Literal, PredicateSymbol};
pub use term::{FunctionSymbol, Term, Variable};
