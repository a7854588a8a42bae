//! Clauses and clause sets

use super::literal::Literal;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A clause (disjunction of literals)
///
/// Literals have set semantics: duplicates collapse and equality ignores
/// order, while iteration keeps first-insertion order for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Clause {
    pub literals: IndexSet<Literal>,
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    /// Add a literal; returns false if it was already present
    pub fn insert(&mut self, literal: Literal) -> bool {
        self.literals.insert(literal)
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn positive_literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| l.polarity)
    }

    pub fn negative_literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| !l.polarity)
    }

    /// Number of positive literals; a clause is Horn iff this is at most one
    pub fn positive_count(&self) -> usize {
        self.positive_literals().count()
    }

    pub fn is_horn(&self) -> bool {
        self.positive_count() <= 1
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}

/// A clause set (conjunction of clauses), in matrix order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClauseSet {
    pub clauses: Vec<Clause>,
}

impl ClauseSet {
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseSet { clauses }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Total number of literal occurrences across all clauses
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

/// Renders as `{ c1, c2 }`
impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", clause)?;
        }
        write!(f, " }}")
    }
}
