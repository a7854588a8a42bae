//! Bound variable renaming
//!
//! After renaming every quantifier binds a distinct name, and no bound name
//! equals a free variable. Only occurrences inside the renamed quantifier's
//! own body are rewritten; a same-named variable in another scope keeps
//! whatever name its own binder (or lack of one) gives it.

use super::clausify::is_skolem_name;
use crate::fol::Variable;
use crate::parser::Formula;
use std::collections::{HashMap, HashSet};

/// Rename bound variables apart
pub fn rename(formula: &Formula) -> Formula {
    AlphaRenamer::new(formula).rename(formula)
}

/// True when no two quantifiers bind the same name and no bound name is free
pub fn bound_names_unique(formula: &Formula) -> bool {
    let free: HashSet<String> = formula.free_variables().into_iter().map(|v| v.name).collect();
    let mut seen = HashSet::new();
    formula
        .bound_variables()
        .into_iter()
        .all(|v| !free.contains(&v.name) && seen.insert(v.name))
}

/// Request-scoped renaming state
pub struct AlphaRenamer {
    /// Every name that must not be produced as a fresh name
    used: HashSet<String>,
    free: HashSet<String>,
    /// Names already claimed by a quantifier
    claimed: HashSet<String>,
    counter: usize,
}

impl AlphaRenamer {
    pub fn new(formula: &Formula) -> Self {
        AlphaRenamer {
            used: formula.names(),
            free: formula.free_variables().into_iter().map(|v| v.name).collect(),
            claimed: HashSet::new(),
            counter: 0,
        }
    }

    pub fn rename(&mut self, formula: &Formula) -> Formula {
        let mut env = HashMap::new();
        self.walk(formula, &mut env)
    }

    /// `env` maps each in-scope surface name to the name its binder now has
    fn walk(&mut self, formula: &Formula, env: &mut HashMap<String, String>) -> Formula {
        match formula {
            Formula::Atom(atom) => {
                let mut atom = atom.clone();
                atom.args = atom.args.iter().map(|t| t.rename(env)).collect();
                Formula::Atom(atom)
            }
            Formula::Not(f) => Formula::not(self.walk(f, env)),
            Formula::And(a, b) => {
                let a = self.walk(a, env);
                Formula::and(a, self.walk(b, env))
            }
            Formula::Or(a, b) => {
                let a = self.walk(a, env);
                Formula::or(a, self.walk(b, env))
            }
            Formula::Implies(a, b) => {
                let a = self.walk(a, env);
                Formula::implies(a, self.walk(b, env))
            }
            Formula::Iff(a, b) => {
                let a = self.walk(a, env);
                Formula::iff(a, self.walk(b, env))
            }
            Formula::Quantified(q, var, body) => {
                let target = if self.free.contains(&var.name) || self.claimed.contains(&var.name) {
                    self.fresh(&var.name)
                } else {
                    var.name.clone()
                };
                self.claimed.insert(target.clone());

                let shadowed = env.insert(var.name.clone(), target.clone());
                let body = self.walk(body, env);
                match shadowed {
                    Some(outer) => env.insert(var.name.clone(), outer),
                    None => env.remove(&var.name),
                };

                Formula::Quantified(*q, Variable::new(target), Box::new(body))
            }
        }
    }

    /// `base` followed by the next counter value not already in use
    ///
    /// A base of `sk` gets an underscore so the result never reads back as a
    /// Skolem constant.
    fn fresh(&mut self, base: &str) -> String {
        let base = if is_skolem_name(&format!("{}1", base)) {
            format!("{}_", base)
        } else {
            base.to_string()
        };
        loop {
            self.counter += 1;
            let candidate = format!("{}{}", base, self.counter);
            if self.used.insert(candidate.clone()) {
                log::trace!("renaming bound {} to {}", base, candidate);
                return candidate;
            }
        }
    }
}
