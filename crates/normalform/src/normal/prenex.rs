//! Prenex form: every quantifier moved into one leading prefix
//!
//! Input is expected to be in negation normal form with bound variables
//! renamed apart. Quantifiers are then pulled out of `∧`/`∨` unchanged, in
//! the order a left-to-right, outside-in walk meets them. Anything the walk
//! cannot see through (a negated quantifier, a leftover conditional) is kept
//! as is, and clausification later reports the quantifier it still holds.

use crate::fol::Variable;
use crate::parser::{Formula, Quantifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantifier prefix and the matrix it scopes over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prenex {
    /// Outermost quantifier first
    pub prefix: Vec<(Quantifier, Variable)>,
    pub matrix: Formula,
}

impl Prenex {
    /// The same prefix over a different matrix
    pub fn with_matrix(&self, matrix: Formula) -> Prenex {
        Prenex {
            prefix: self.prefix.clone(),
            matrix,
        }
    }

    /// Prefix and matrix put back together as one formula
    pub fn to_formula(&self) -> Formula {
        self.matrix.clone().quantify(&self.prefix)
    }
}

impl fmt::Display for Prenex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formula())
    }
}

/// Split a formula into quantifier prefix and matrix
pub fn to_prenex(formula: &Formula) -> Prenex {
    let mut prefix = Vec::new();
    let matrix = extract(formula, &mut prefix);
    Prenex { prefix, matrix }
}

fn extract(formula: &Formula, prefix: &mut Vec<(Quantifier, Variable)>) -> Formula {
    match formula {
        Formula::Quantified(q, var, body) => {
            prefix.push((*q, var.clone()));
            extract(body, prefix)
        }
        Formula::And(a, b) => {
            let a = extract(a, prefix);
            Formula::and(a, extract(b, prefix))
        }
        Formula::Or(a, b) => {
            let a = extract(a, prefix);
            Formula::or(a, extract(b, prefix))
        }
        _ => formula.clone(),
    }
}
