//! Atoms and literals in first-order logic

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
    pub arity: usize,
}

impl PredicateSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        PredicateSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// An atomic formula (predicate applied to terms)
///
/// Propositional atoms have an empty argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
}

impl Atom {
    /// Build an atom, deriving the predicate arity from `args`
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: PredicateSymbol::new(name, args.len()),
            args,
        }
    }

    /// A propositional atom
    pub fn prop(name: impl Into<String>) -> Self {
        Atom::new(name, vec![])
    }

    pub fn is_propositional(&self) -> bool {
        self.args.is_empty()
    }

    /// Replace every occurrence of `var` in the arguments
    pub fn substitute(&self, var: &Variable, replacement: &Term) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self
                .args
                .iter()
                .map(|t| t.substitute(var, replacement))
                .collect(),
        }
    }

    /// Number of symbols in this atom
    pub fn size(&self) -> usize {
        1 + self.args.iter().map(Term::size).sum::<usize>()
    }
}

/// A literal (positive or negative atom)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Atom,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    pub fn from_atom(atom: Atom, polarity: bool) -> Self {
        Literal { atom, polarity }
    }

    /// Collect all variables in this literal
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for term in &self.atom.args {
            term.collect_variables(vars);
        }
    }
}

impl fmt::Display for PredicateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.atom)
    }
}
