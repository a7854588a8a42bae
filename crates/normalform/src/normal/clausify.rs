//! Skolemization and clause extraction
//!
//! Existential variables of the prefix become Skolem terms over the
//! universal variables that precede them; universal quantifiers are then
//! dropped and the CNF matrix is split into clauses.

use crate::error::{ConversionError, Result};
use crate::fol::{Clause, ClauseSet, Literal, Term, Variable};
use crate::parser::{Formula, Quantifier};
use std::collections::HashSet;

const SKOLEM_PREFIX: &str = "sk";

/// `sk` followed by digits: the names Skolem constants and functions get
///
/// The parser reads a bare identifier of this shape as a constant, so a
/// rendered clause parses back to the same terms.
pub fn is_skolem_name(name: &str) -> bool {
    name.strip_prefix(SKOLEM_PREFIX)
        .map_or(false, |digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Skolemize and split a CNF matrix under `prefix` into clauses
pub fn clausify(prefix: &[(Quantifier, Variable)], matrix: &Formula) -> Result<ClauseSet> {
    Clausifier::new(prefix, matrix).clausify(prefix, matrix)
}

/// Request-scoped Skolem symbol supply
pub struct Clausifier {
    skolem_counter: usize,
    /// Names a Skolem symbol must not collide with
    reserved: HashSet<String>,
}

impl Clausifier {
    pub fn new(prefix: &[(Quantifier, Variable)], matrix: &Formula) -> Self {
        let mut reserved = matrix.names();
        reserved.extend(prefix.iter().map(|(_, v)| v.name.clone()));
        Clausifier {
            skolem_counter: 0,
            reserved,
        }
    }

    pub fn clausify(
        &mut self,
        prefix: &[(Quantifier, Variable)],
        matrix: &Formula,
    ) -> Result<ClauseSet> {
        let matrix = self.skolemize(prefix, matrix);
        if matrix.contains_quantifier() {
            return Err(ConversionError::Clausification(format!(
                "quantifier left in matrix after prefix extraction: {}",
                matrix
            )));
        }

        let mut conjuncts = Vec::new();
        collect_conjuncts(&matrix, &mut conjuncts);
        let clauses = conjuncts
            .into_iter()
            .map(clause_from_disjunction)
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "clausified into {} clauses with {} Skolem symbols",
            clauses.len(),
            self.skolem_counter
        );
        Ok(ClauseSet::new(clauses))
    }

    /// Replace each existential variable with a Skolem term
    pub fn skolemize(&mut self, prefix: &[(Quantifier, Variable)], matrix: &Formula) -> Formula {
        let mut universal_vars: Vec<Variable> = Vec::new();
        let mut result = matrix.clone();

        for (quantifier, var) in prefix {
            match quantifier {
                Quantifier::Forall => universal_vars.push(var.clone()),
                Quantifier::Exists => {
                    let name = self.fresh_skolem_name();
                    let args = universal_vars.iter().cloned().map(Term::Variable).collect();
                    let skolem = Term::function(name, args);
                    log::trace!("skolemizing {} as {}", var, skolem);
                    result = result.substitute(var, &skolem);
                }
            }
        }

        result
    }

    fn fresh_skolem_name(&mut self) -> String {
        loop {
            self.skolem_counter += 1;
            let name = format!("{}{}", SKOLEM_PREFIX, self.skolem_counter);
            if self.reserved.insert(name.clone()) {
                return name;
            }
        }
    }
}

fn collect_conjuncts<'a>(formula: &'a Formula, out: &mut Vec<&'a Formula>) {
    match formula {
        Formula::And(a, b) => {
            collect_conjuncts(a, out);
            collect_conjuncts(b, out);
        }
        other => out.push(other),
    }
}

/// Build a clause from a disjunction of literals
///
/// Duplicate literals collapse; literal order follows first occurrence.
pub fn clause_from_disjunction(formula: &Formula) -> Result<Clause> {
    let mut clause = Clause::default();
    collect_literals(formula, &mut clause)?;
    Ok(clause)
}

fn collect_literals(formula: &Formula, clause: &mut Clause) -> Result<()> {
    match formula {
        Formula::Or(a, b) => {
            collect_literals(a, clause)?;
            collect_literals(b, clause)
        }
        Formula::Atom(atom) => {
            clause.insert(Literal::positive(atom.clone()));
            Ok(())
        }
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Atom(atom) => {
                clause.insert(Literal::negative(atom.clone()));
                Ok(())
            }
            _ => Err(not_a_literal(formula)),
        },
        _ => Err(not_a_literal(formula)),
    }
}

fn not_a_literal(formula: &Formula) -> ConversionError {
    ConversionError::Clausification(format!("expected a disjunction of literals, found {}", formula))
}
