//! Conjunctive and disjunctive normal form of a quantifier-free matrix
//!
//! Distribution runs as repeated bottom-up passes. Each pass applies the
//! distribution rule at most once per node; passes repeat until the tree is
//! structurally unchanged. The result can be exponentially larger than the
//! input, so every rebuilt node is checked against the request budget before
//! its operands are copied.

use crate::config::Budget;
use crate::error::Result;
use crate::parser::Formula;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Cnf,
    Dnf,
}

/// Conjunction of disjunctions of literals
///
/// - `A ∨ (B ∧ C)` becomes `(A ∨ B) ∧ (A ∨ C)`
/// - `(B ∧ C) ∨ A` becomes `(B ∨ A) ∧ (C ∨ A)`
pub fn to_cnf(matrix: &Formula, budget: &Budget) -> Result<Formula> {
    normalize(matrix, Target::Cnf, budget)
}

/// Disjunction of conjunctions of literals, the dual of [`to_cnf`]
pub fn to_dnf(matrix: &Formula, budget: &Budget) -> Result<Formula> {
    normalize(matrix, Target::Dnf, budget)
}

fn normalize(matrix: &Formula, target: Target, budget: &Budget) -> Result<Formula> {
    let mut current = matrix.clone();
    let mut pass = 0;
    loop {
        pass += 1;
        let (next, nodes) = distribute_pass(&current, target, budget)?;
        log::trace!("{:?} pass {}: {} nodes", target, pass, nodes);

        if next == current {
            return Ok(next);
        }
        current = next;
    }
}

/// One bottom-up pass, returning the rebuilt tree and its node count
fn distribute_pass(
    formula: &Formula,
    target: Target,
    budget: &Budget,
) -> Result<(Formula, usize)> {
    budget.check_timeout()?;
    let rebuilt = match formula {
        Formula::Atom(_) | Formula::Not(_) => (formula.clone(), formula.node_count()),
        Formula::And(a, b) => {
            let a = distribute_pass(a, target, budget)?;
            let b = distribute_pass(b, target, budget)?;
            match target {
                Target::Dnf => distribute(a, b, Formula::and, as_or, Formula::or, budget)?,
                Target::Cnf => (Formula::and(a.0, b.0), 1 + a.1 + b.1),
            }
        }
        Formula::Or(a, b) => {
            let a = distribute_pass(a, target, budget)?;
            let b = distribute_pass(b, target, budget)?;
            match target {
                Target::Cnf => distribute(a, b, Formula::or, as_and, Formula::and, budget)?,
                Target::Dnf => (Formula::or(a.0, b.0), 1 + a.1 + b.1),
            }
        }
        Formula::Implies(a, b) => {
            let (a, na) = distribute_pass(a, target, budget)?;
            let (b, nb) = distribute_pass(b, target, budget)?;
            (Formula::implies(a, b), 1 + na + nb)
        }
        Formula::Iff(a, b) => {
            let (a, na) = distribute_pass(a, target, budget)?;
            let (b, nb) = distribute_pass(b, target, budget)?;
            (Formula::iff(a, b), 1 + na + nb)
        }
        Formula::Quantified(q, var, body) => {
            let (body, nodes) = distribute_pass(body, target, budget)?;
            (Formula::Quantified(*q, var.clone(), Box::new(body)), 1 + nodes)
        }
    };
    budget.check_nodes(rebuilt.1)?;
    Ok(rebuilt)
}

/// Push `outer` below `inner` once, trying the right operand first
///
/// Operands come with their node counts. Splitting copies the other
/// operand, so the size of the result is known before any cloning.
fn distribute(
    (a, na): (Formula, usize),
    (b, nb): (Formula, usize),
    outer: fn(Formula, Formula) -> Formula,
    split_inner: fn(&Formula) -> Option<(&Formula, &Formula)>,
    inner: fn(Formula, Formula) -> Formula,
    budget: &Budget,
) -> Result<(Formula, usize)> {
    if let Some((b1, b2)) = split_inner(&b) {
        let nodes = 2 * na + nb + 2;
        budget.check_nodes(nodes)?;
        let formula = inner(outer(a.clone(), b1.clone()), outer(a, b2.clone()));
        return Ok((formula, nodes));
    }
    if let Some((a1, a2)) = split_inner(&a) {
        let nodes = na + 2 * nb + 2;
        budget.check_nodes(nodes)?;
        let formula = inner(outer(a1.clone(), b.clone()), outer(a2.clone(), b));
        return Ok((formula, nodes));
    }
    Ok((outer(a, b), 1 + na + nb))
}

fn as_and(formula: &Formula) -> Option<(&Formula, &Formula)> {
    match formula {
        Formula::And(a, b) => Some((a.as_ref(), b.as_ref())),
        _ => None,
    }
}

fn as_or(formula: &Formula) -> Option<(&Formula, &Formula)> {
    match formula {
        Formula::Or(a, b) => Some((a.as_ref(), b.as_ref())),
        _ => None,
    }
}

/// True for a conjunction of disjunctions of literals
pub fn is_cnf(formula: &Formula) -> bool {
    match formula {
        Formula::And(a, b) => is_cnf(a) && is_cnf(b),
        other => is_flat(other, as_or),
    }
}

/// True for a disjunction of conjunctions of literals
pub fn is_dnf(formula: &Formula) -> bool {
    match formula {
        Formula::Or(a, b) => is_dnf(a) && is_dnf(b),
        other => is_flat(other, as_and),
    }
}

fn is_flat(formula: &Formula, split: fn(&Formula) -> Option<(&Formula, &Formula)>) -> bool {
    match split(formula) {
        Some((a, b)) => is_flat(a, split) && is_flat(b, split),
        None => formula.is_literal(),
    }
}
