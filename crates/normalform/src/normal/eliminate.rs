//! Connective elimination: `→` and `↔` rewritten into `∧`, `∨`, `¬`

use crate::parser::Formula;

/// Rewrite every `→` and `↔` node, children first
///
/// - `A ↔ B` becomes `(A → B) ∧ (B → A)`, then each implication is rewritten
/// - `A → B` becomes `¬A ∨ B`
pub fn eliminate(formula: &Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula.clone(),
        Formula::Not(f) => Formula::not(eliminate(f)),
        Formula::And(a, b) => Formula::and(eliminate(a), eliminate(b)),
        Formula::Or(a, b) => Formula::or(eliminate(a), eliminate(b)),
        Formula::Implies(a, b) => Formula::or(Formula::not(eliminate(a)), eliminate(b)),
        Formula::Iff(a, b) => {
            let a = eliminate(a);
            let b = eliminate(b);
            Formula::and(
                Formula::or(Formula::not(a.clone()), b.clone()),
                Formula::or(Formula::not(b), a),
            )
        }
        Formula::Quantified(q, var, body) => {
            Formula::Quantified(*q, var.clone(), Box::new(eliminate(body)))
        }
    }
}
