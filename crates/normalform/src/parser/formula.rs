//! First-order formula representation
//!
//! This module provides the tree every pipeline stage consumes and rebuilds.
//! Formulas are immutable values; each rewrite returns a new tree.

use crate::fol::{Atom, Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Forall,
    Exists,
}

impl Quantifier {
    /// The quantifier a negation turns this one into
    pub fn dual(self) -> Quantifier {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::Forall => "∀",
            Quantifier::Exists => "∃",
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional
    Iff(Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(Quantifier, Variable, Box<Formula>),
}

/// Whether a formula needs first-order machinery at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaKind {
    Propositional,
    FirstOrder,
}

impl fmt::Display for FormulaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaKind::Propositional => write!(f, "propositional"),
            FormulaKind::FirstOrder => write!(f, "first-order"),
        }
    }
}

impl Formula {
    pub fn atom(atom: Atom) -> Formula {
        Formula::Atom(atom)
    }

    /// A propositional atom
    pub fn prop(name: &str) -> Formula {
        Formula::Atom(Atom::prop(name))
    }

    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn and(a: Formula, b: Formula) -> Formula {
        Formula::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: Formula, b: Formula) -> Formula {
        Formula::Or(Box::new(a), Box::new(b))
    }

    pub fn implies(a: Formula, b: Formula) -> Formula {
        Formula::Implies(Box::new(a), Box::new(b))
    }

    pub fn iff(a: Formula, b: Formula) -> Formula {
        Formula::Iff(Box::new(a), Box::new(b))
    }

    pub fn forall(var: &str, body: Formula) -> Formula {
        Formula::Quantified(Quantifier::Forall, Variable::new(var), Box::new(body))
    }

    pub fn exists(var: &str, body: Formula) -> Formula {
        Formula::Quantified(Quantifier::Exists, Variable::new(var), Box::new(body))
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            Formula::Atom(atom) => atom.args.iter().flat_map(|t| t.variables()).collect(),
            Formula::Not(f) => f.free_variables(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Bound variables in pre-order, one entry per quantifier
    pub fn bound_variables(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        self.collect_bound(&mut out);
        out
    }

    fn collect_bound(&self, out: &mut Vec<Variable>) {
        match self {
            Formula::Atom(_) => {}
            Formula::Not(f) => f.collect_bound(out),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => {
                f1.collect_bound(out);
                f2.collect_bound(out);
            }
            Formula::Quantified(_, var, f) => {
                out.push(var.clone());
                f.collect_bound(out);
            }
        }
    }

    /// Every identifier in the formula: predicates, functions, variables
    pub fn names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut HashSet<String>) {
        match self {
            Formula::Atom(atom) => {
                names.insert(atom.predicate.name.clone());
                for arg in &atom.args {
                    arg.collect_names(names);
                }
            }
            Formula::Not(f) => f.collect_names(names),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => {
                f1.collect_names(names);
                f2.collect_names(names);
            }
            Formula::Quantified(_, var, f) => {
                names.insert(var.name.clone());
                f.collect_names(names);
            }
        }
    }

    /// Check if a formula contains any quantifiers
    pub fn contains_quantifier(&self) -> bool {
        match self {
            Formula::Atom(_) => false,
            Formula::Not(f) => f.contains_quantifier(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => f1.contains_quantifier() || f2.contains_quantifier(),
            Formula::Quantified(_, _, _) => true,
        }
    }

    /// Check for `→` or `↔` anywhere in the tree
    pub fn contains_conditional(&self) -> bool {
        match self {
            Formula::Atom(_) => false,
            Formula::Not(f) | Formula::Quantified(_, _, f) => f.contains_conditional(),
            Formula::And(f1, f2) | Formula::Or(f1, f2) => {
                f1.contains_conditional() || f2.contains_conditional()
            }
            Formula::Implies(_, _) | Formula::Iff(_, _) => true,
        }
    }

    /// Negation normal form check: no conditionals, negation only on atoms
    pub fn is_nnf(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => matches!(**f, Formula::Atom(_)),
            Formula::And(f1, f2) | Formula::Or(f1, f2) => f1.is_nnf() && f2.is_nnf(),
            Formula::Quantified(_, _, f) => f.is_nnf(),
            Formula::Implies(_, _) | Formula::Iff(_, _) => false,
        }
    }

    /// Literal check: an atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => matches!(**f, Formula::Atom(_)),
            _ => false,
        }
    }

    /// Number of nodes in the tree, counting term symbols
    pub fn node_count(&self) -> usize {
        match self {
            Formula::Atom(atom) => atom.size(),
            Formula::Not(f) => 1 + f.node_count(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => 1 + f1.node_count() + f2.node_count(),
            Formula::Quantified(_, _, f) => 1 + f.node_count(),
        }
    }

    pub fn kind(&self) -> FormulaKind {
        if self.contains_quantifier() || self.has_predicate_arguments() {
            FormulaKind::FirstOrder
        } else {
            FormulaKind::Propositional
        }
    }

    fn has_predicate_arguments(&self) -> bool {
        match self {
            Formula::Atom(atom) => !atom.is_propositional(),
            Formula::Not(f) | Formula::Quantified(_, _, f) => f.has_predicate_arguments(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => f1.has_predicate_arguments() || f2.has_predicate_arguments(),
        }
    }

    /// Replace free occurrences of `var` with `term`
    ///
    /// Stops at a quantifier that rebinds `var`.
    pub fn substitute(&self, var: &Variable, term: &Term) -> Formula {
        match self {
            Formula::Atom(atom) => Formula::Atom(atom.substitute(var, term)),
            Formula::Not(f) => Formula::not(f.substitute(var, term)),
            Formula::And(f1, f2) => Formula::and(f1.substitute(var, term), f2.substitute(var, term)),
            Formula::Or(f1, f2) => Formula::or(f1.substitute(var, term), f2.substitute(var, term)),
            Formula::Implies(f1, f2) => {
                Formula::implies(f1.substitute(var, term), f2.substitute(var, term))
            }
            Formula::Iff(f1, f2) => Formula::iff(f1.substitute(var, term), f2.substitute(var, term)),
            Formula::Quantified(_, v, _) if v == var => self.clone(),
            Formula::Quantified(q, v, f) => {
                Formula::Quantified(*q, v.clone(), Box::new(f.substitute(var, term)))
            }
        }
    }

    /// Wrap `self` in the given quantifier prefix, outermost first
    pub fn quantify(self, prefix: &[(Quantifier, Variable)]) -> Formula {
        prefix.iter().rev().fold(self, |body, (q, v)| {
            Formula::Quantified(*q, v.clone(), Box::new(body))
        })
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Formula::And(_, _) => Some(BinaryOp::And),
            Formula::Or(_, _) => Some(BinaryOp::Or),
            Formula::Implies(_, _) => Some(BinaryOp::Implies),
            Formula::Iff(_, _) => Some(BinaryOp::Iff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    And,
    Or,
    Implies,
    Iff,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "∧",
            BinaryOp::Or => "∨",
            BinaryOp::Implies => "→",
            BinaryOp::Iff => "↔",
        }
    }

    fn left_associative(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

/// Write an operand of `op`, parenthesised unless the parser would
/// rebuild the same tree without parentheses
fn fmt_operand(
    f: &mut fmt::Formatter<'_>,
    operand: &Formula,
    op: BinaryOp,
    is_left: bool,
) -> fmt::Result {
    let parens = match (operand, operand.binary_op()) {
        (Formula::Quantified(_, _, _), _) => true,
        (_, Some(inner)) if inner != op => true,
        (_, Some(_)) => op.left_associative() != is_left,
        (_, None) => false,
    };
    if parens {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(atom) => write!(f, "{}", atom),
            Formula::Not(inner) => {
                if inner.binary_op().is_some() {
                    write!(f, "¬({})", inner)
                } else {
                    write!(f, "¬{}", inner)
                }
            }
            Formula::Quantified(q, var, body) => {
                if body.binary_op().is_some() {
                    write!(f, "{}{} ({})", q, var, body)
                } else {
                    write!(f, "{}{} {}", q, var, body)
                }
            }
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) | Formula::Iff(a, b) => {
                let op = match self {
                    Formula::And(_, _) => BinaryOp::And,
                    Formula::Or(_, _) => BinaryOp::Or,
                    Formula::Implies(_, _) => BinaryOp::Implies,
                    _ => BinaryOp::Iff,
                };
                fmt_operand(f, a, op, true)?;
                write!(f, " {} ", op.symbol())?;
                fmt_operand(f, b, op, false)
            }
        }
    }
}
