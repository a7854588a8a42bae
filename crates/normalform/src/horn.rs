//! Horn clause classification
//!
//! A clause is Horn iff it has at most one positive literal. Horn clauses
//! are rendered in logic-programming notation:
//!
//! - fact: one positive literal, no negative ones, `A.`
//! - rule: one positive literal and some negative ones, `A :- B, C.`
//! - goal: no positive literal, `:- A, B.` (the empty clause is `:- .`)

use crate::error::{ConversionError, Result};
use crate::fol::{Atom, Clause, ClauseSet, Literal};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HornKind {
    Fact,
    Rule,
    Goal,
}

impl fmt::Display for HornKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HornKind::Fact => write!(f, "fact"),
            HornKind::Rule => write!(f, "rule"),
            HornKind::Goal => write!(f, "goal"),
        }
    }
}

/// A Horn clause as head and body atoms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HornClause {
    /// The positive literal, absent for goals
    pub head: Option<Atom>,
    /// Atoms of the negative literals, in clause order
    pub body: Vec<Atom>,
}

impl HornClause {
    pub fn kind(&self) -> HornKind {
        match (&self.head, self.body.is_empty()) {
            (None, _) => HornKind::Goal,
            (Some(_), true) => HornKind::Fact,
            (Some(_), false) => HornKind::Rule,
        }
    }

    /// The clause this Horn clause stands for
    pub fn to_clause(&self) -> Clause {
        let negatives = self.body.iter().cloned().map(Literal::negative);
        match &self.head {
            Some(head) => std::iter::once(Literal::positive(head.clone()))
                .chain(negatives)
                .collect(),
            None => negatives.collect(),
        }
    }
}

fn write_atoms(f: &mut fmt::Formatter<'_>, atoms: &[Atom]) -> fmt::Result {
    for (i, atom) in atoms.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", atom)?;
    }
    Ok(())
}

impl fmt::Display for HornClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.head {
            Some(head) if self.body.is_empty() => write!(f, "{}.", head),
            Some(head) => {
                write!(f, "{} :- ", head)?;
                write_atoms(f, &self.body)?;
                write!(f, ".")
            }
            None => {
                write!(f, ":- ")?;
                write_atoms(f, &self.body)?;
                write!(f, ".")
            }
        }
    }
}

/// Clauses split into Horn and non-Horn, each in clause-set order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HornPartition {
    pub horn: Vec<HornClause>,
    pub non_horn: Vec<Clause>,
}

impl HornPartition {
    pub fn is_empty(&self) -> bool {
        self.horn.is_empty() && self.non_horn.is_empty()
    }

    /// True when every clause of the set is Horn
    pub fn all_horn(&self) -> bool {
        self.non_horn.is_empty()
    }
}

/// Text report: a Horn block, then a non-Horn block, each only if non-empty
impl fmt::Display for HornPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No clauses found.");
        }
        if !self.horn.is_empty() {
            write!(f, "Horn clauses:")?;
            for clause in &self.horn {
                write!(f, "\n{}", clause)?;
            }
        }
        if !self.non_horn.is_empty() {
            if !self.horn.is_empty() {
                write!(f, "\n\n")?;
            }
            write!(f, "Non-Horn clauses:\n{}", ClauseSet::new(self.non_horn.clone()))?;
        }
        Ok(())
    }
}

/// Format a clause with at most one positive literal as a fact, rule or goal
pub fn format_horn(clause: &Clause) -> Result<HornClause> {
    let positive = clause.positive_count();
    if positive > 1 {
        return Err(ConversionError::InvalidHornClause {
            clause: clause.to_string(),
            positive,
        });
    }

    Ok(HornClause {
        head: clause.positive_literals().next().map(|l| l.atom.clone()),
        body: clause.negative_literals().map(|l| l.atom.clone()).collect(),
    })
}

/// Partition a clause set into Horn and non-Horn clauses
pub fn classify(clauses: &ClauseSet) -> Result<HornPartition> {
    let mut partition = HornPartition::default();
    for clause in clauses {
        if clause.is_horn() {
            partition.horn.push(format_horn(clause)?);
        } else {
            partition.non_horn.push(clause.clone());
        }
    }
    log::debug!(
        "classified {} clauses: {} Horn, {} non-Horn",
        clauses.len(),
        partition.horn.len(),
        partition.non_horn.len()
    );
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fol::Term;

    fn pos(name: &str) -> Literal {
        Literal::positive(Atom::prop(name))
    }

    fn neg(name: &str) -> Literal {
        Literal::negative(Atom::prop(name))
    }

    #[test]
    fn test_rule() {
        let horn = format_horn(&Clause::new(vec![neg("P"), pos("Q")])).unwrap();
        assert_eq!(horn.kind(), HornKind::Rule);
        assert_eq!(horn.to_string(), "Q :- P.");
    }

    #[test]
    fn test_fact_with_arguments() {
        let atom = Atom::new("P", vec![Term::function("sk1", vec![])]);
        let horn = format_horn(&Clause::new(vec![Literal::positive(atom)])).unwrap();
        assert_eq!(horn.kind(), HornKind::Fact);
        assert_eq!(horn.to_string(), "P(sk1).");
    }

    #[test]
    fn test_goal() {
        let horn = format_horn(&Clause::new(vec![neg("P"), neg("Q")])).unwrap();
        assert_eq!(horn.kind(), HornKind::Goal);
        assert_eq!(horn.to_string(), ":- P, Q.");
    }

    #[test]
    fn test_empty_clause_is_empty_goal() {
        let horn = format_horn(&Clause::default()).unwrap();
        assert_eq!(horn.kind(), HornKind::Goal);
        assert_eq!(horn.to_string(), ":- .");
    }

    #[test]
    fn test_two_positive_literals_rejected() {
        let err = format_horn(&Clause::new(vec![pos("P"), pos("Q")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHornClause);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_to_clause_recovers_literals() {
        let clause = Clause::new(vec![neg("A"), pos("B"), neg("C")]);
        let horn = format_horn(&clause).unwrap();
        assert_eq!(horn.to_clause(), clause);
    }

    #[test]
    fn test_classify_partitions_in_order() {
        let set = ClauseSet::new(vec![
            Clause::new(vec![pos("P"), pos("Q")]),
            Clause::new(vec![neg("P"), neg("Q")]),
            Clause::new(vec![pos("R")]),
        ]);
        let partition = classify(&set).unwrap();
        assert_eq!(partition.horn.len(), 2);
        assert_eq!(partition.non_horn.len(), 1);
        assert_eq!(partition.horn[0].to_string(), ":- P, Q.");
        assert_eq!(partition.horn[1].to_string(), "R.");
        assert_eq!(
            partition.to_string(),
            "Horn clauses:\n:- P, Q.\nR.\n\nNon-Horn clauses:\n{ P ∨ Q }"
        );
    }

    #[test]
    fn test_empty_report() {
        let partition = classify(&ClauseSet::default()).unwrap();
        assert_eq!(partition.to_string(), "No clauses found.");
    }
}
