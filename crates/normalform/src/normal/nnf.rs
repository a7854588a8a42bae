//! Negation normal form
//!
//! Negation is pushed to the atoms with De Morgan and quantifier duality,
//! and double negations cancel. A pending negation is carried down the tree
//! as a flag, so `¬¬¬A` needs no repeated passes to reach `¬A`.

use crate::parser::Formula;

/// Convert to negation normal form
///
/// Conditionals left in the input are expanded the same way
/// [`eliminate`](super::eliminate) would expand them.
pub fn to_nnf(formula: &Formula) -> Formula {
    nnf(formula, false)
}

fn nnf(formula: &Formula, negate: bool) -> Formula {
    match (formula, negate) {
        (Formula::Atom(_), false) => formula.clone(),
        (Formula::Atom(_), true) => Formula::not(formula.clone()),

        (Formula::Not(f), neg) => nnf(f, !neg),

        (Formula::And(a, b), false) => Formula::and(nnf(a, false), nnf(b, false)),
        // ¬(A ∧ B) = ¬A ∨ ¬B
        (Formula::And(a, b), true) => Formula::or(nnf(a, true), nnf(b, true)),

        (Formula::Or(a, b), false) => Formula::or(nnf(a, false), nnf(b, false)),
        // ¬(A ∨ B) = ¬A ∧ ¬B
        (Formula::Or(a, b), true) => Formula::and(nnf(a, true), nnf(b, true)),

        // A → B = ¬A ∨ B
        (Formula::Implies(a, b), false) => Formula::or(nnf(a, true), nnf(b, false)),
        // ¬(A → B) = A ∧ ¬B
        (Formula::Implies(a, b), true) => Formula::and(nnf(a, false), nnf(b, true)),

        // A ↔ B = (¬A ∨ B) ∧ (¬B ∨ A)
        (Formula::Iff(a, b), false) => Formula::and(
            Formula::or(nnf(a, true), nnf(b, false)),
            Formula::or(nnf(b, true), nnf(a, false)),
        ),
        // ¬(A ↔ B) = (A ∧ ¬B) ∨ (B ∧ ¬A)
        (Formula::Iff(a, b), true) => Formula::or(
            Formula::and(nnf(a, false), nnf(b, true)),
            Formula::and(nnf(b, false), nnf(a, true)),
        ),

        (Formula::Quantified(q, var, body), false) => {
            Formula::Quantified(*q, var.clone(), Box::new(nnf(body, false)))
        }
        // ¬∀x A = ∃x ¬A, ¬∃x A = ∀x ¬A
        (Formula::Quantified(q, var, body), true) => {
            Formula::Quantified(q.dual(), var.clone(), Box::new(nnf(body, true)))
        }
    }
}
