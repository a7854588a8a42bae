//! Normal form transformations
//!
//! Each stage takes the previous stage's tree and builds a new one:
//! connective elimination, negation normal form, bound variable renaming,
//! prenex form, CNF/DNF of the matrix, then clausification.

pub mod clausify;
pub mod eliminate;
pub mod matrix;
pub mod nnf;
pub mod prenex;
pub mod rename;

#[cfg(test)]
mod proptest_tests;

pub use clausify::{clause_from_disjunction, clausify, Clausifier};
pub use eliminate::eliminate;
pub use matrix::{is_cnf, is_dnf, to_cnf, to_dnf};
pub use nnf::to_nnf;
pub use prenex::{to_prenex, Prenex};
pub use rename::{bound_names_unique, rename, AlphaRenamer};
