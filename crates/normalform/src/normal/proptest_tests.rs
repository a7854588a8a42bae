//! Property-based tests for the normal form stages using proptest.
//!
//! Formulas are built from a small vocabulary so they can be evaluated
//! exhaustively over a two-element domain: three propositions, two unary
//! predicates, one binary predicate and two variable names.

use super::{
    bound_names_unique, clausify, eliminate, is_cnf, is_dnf, rename, to_cnf, to_dnf, to_nnf,
    to_prenex,
};
use crate::config::Budget;
use crate::fol::{Atom, Clause, ClauseSet, Literal, Term};
use crate::horn::classify;
use crate::parser::{parse_clause, parse_formula, parse_horn, Formula, Quantifier};
use proptest::prelude::*;
use std::collections::HashMap;

/// Formula description (before building)
#[derive(Debug, Clone)]
enum FormulaDesc {
    Prop(u8),         // P0-P2
    Unary(u8, u8),    // Q0-Q1 applied to x0-x1
    Binary(u8, u8),   // R applied to two of x0-x1
    Not(Box<FormulaDesc>),
    And(Box<FormulaDesc>, Box<FormulaDesc>),
    Or(Box<FormulaDesc>, Box<FormulaDesc>),
    Implies(Box<FormulaDesc>, Box<FormulaDesc>),
    Iff(Box<FormulaDesc>, Box<FormulaDesc>),
    Forall(u8, Box<FormulaDesc>),
    Exists(u8, Box<FormulaDesc>),
}

fn arb_formula_desc(max_depth: u32) -> BoxedStrategy<FormulaDesc> {
    let leaf = prop_oneof![
        (0..3u8).prop_map(FormulaDesc::Prop),
        (0..2u8, 0..2u8).prop_map(|(p, v)| FormulaDesc::Unary(p, v)),
        (0..2u8, 0..2u8).prop_map(|(a, b)| FormulaDesc::Binary(a, b)),
    ];
    if max_depth == 0 {
        return leaf.boxed();
    }
    let sub = || arb_formula_desc(max_depth - 1);
    prop_oneof![
        3 => leaf,
        2 => sub().prop_map(|f| FormulaDesc::Not(Box::new(f))),
        2 => (sub(), sub()).prop_map(|(a, b)| FormulaDesc::And(Box::new(a), Box::new(b))),
        2 => (sub(), sub()).prop_map(|(a, b)| FormulaDesc::Or(Box::new(a), Box::new(b))),
        1 => (sub(), sub()).prop_map(|(a, b)| FormulaDesc::Implies(Box::new(a), Box::new(b))),
        1 => (sub(), sub()).prop_map(|(a, b)| FormulaDesc::Iff(Box::new(a), Box::new(b))),
        2 => (0..2u8, sub()).prop_map(|(v, f)| FormulaDesc::Forall(v, Box::new(f))),
        2 => (0..2u8, sub()).prop_map(|(v, f)| FormulaDesc::Exists(v, Box::new(f))),
    ]
    .boxed()
}

fn var_name(i: u8) -> String {
    format!("x{}", i)
}

fn build(desc: &FormulaDesc) -> Formula {
    match desc {
        FormulaDesc::Prop(i) => Formula::prop(&format!("P{}", i)),
        FormulaDesc::Unary(p, v) => {
            Formula::atom(Atom::new(format!("Q{}", p), vec![Term::var(var_name(*v))]))
        }
        FormulaDesc::Binary(a, b) => Formula::atom(Atom::new(
            "R",
            vec![Term::var(var_name(*a)), Term::var(var_name(*b))],
        )),
        FormulaDesc::Not(f) => Formula::not(build(f)),
        FormulaDesc::And(a, b) => Formula::and(build(a), build(b)),
        FormulaDesc::Or(a, b) => Formula::or(build(a), build(b)),
        FormulaDesc::Implies(a, b) => Formula::implies(build(a), build(b)),
        FormulaDesc::Iff(a, b) => Formula::iff(build(a), build(b)),
        FormulaDesc::Forall(v, f) => Formula::forall(&var_name(*v), build(f)),
        FormulaDesc::Exists(v, f) => Formula::exists(&var_name(*v), build(f)),
    }
}

fn arb_formula(max_depth: u32) -> impl Strategy<Value = Formula> {
    arb_formula_desc(max_depth).prop_map(|desc| build(&desc))
}

/// Interpretation over the domain {0, 1}, packed into bits:
/// P0-P2 in bits 0-2, Q0 in bits 3-4, Q1 in bits 5-6, R in bits 7-10
#[derive(Debug, Clone, Copy)]
struct Interpretation(u16);

impl Interpretation {
    fn bit(&self, i: usize) -> bool {
        self.0 & (1 << i) != 0
    }

    fn atom(&self, atom: &Atom, env: &HashMap<String, usize>) -> bool {
        // free variables denote element 0
        let value = |t: &Term| match t {
            Term::Variable(v) => env.get(&v.name).copied().unwrap_or(0),
            Term::Function(_, _) => 0,
        };
        let name = atom.predicate.name.as_str();
        match (name, atom.args.as_slice()) {
            ("R", [a, b]) => self.bit(7 + 2 * value(a) + value(b)),
            (_, [a]) => {
                let base = if name == "Q0" { 3 } else { 5 };
                self.bit(base + value(a))
            }
            _ => self.bit(name[1..].parse::<usize>().unwrap_or(0)),
        }
    }
}

fn eval(formula: &Formula, interp: Interpretation, env: &mut HashMap<String, usize>) -> bool {
    match formula {
        Formula::Atom(atom) => interp.atom(atom, env),
        Formula::Not(f) => !eval(f, interp, env),
        Formula::And(a, b) => eval(a, interp, env) && eval(b, interp, env),
        Formula::Or(a, b) => eval(a, interp, env) || eval(b, interp, env),
        Formula::Implies(a, b) => !eval(a, interp, env) || eval(b, interp, env),
        Formula::Iff(a, b) => eval(a, interp, env) == eval(b, interp, env),
        Formula::Quantified(q, var, body) => {
            let saved = env.get(&var.name).copied();
            let mut results = [false; 2];
            for (d, result) in results.iter_mut().enumerate() {
                env.insert(var.name.clone(), d);
                *result = eval(body, interp, env);
            }
            match saved {
                Some(d) => env.insert(var.name.clone(), d),
                None => env.remove(&var.name),
            };
            match q {
                Quantifier::Forall => results.iter().all(|r| *r),
                Quantifier::Exists => results.iter().any(|r| *r),
            }
        }
    }
}

/// Same truth value under every interpretation
fn equivalent(f: &Formula, g: &Formula) -> bool {
    (0..(1u16 << 11)).all(|bits| {
        let interp = Interpretation(bits);
        eval(f, interp, &mut HashMap::new()) == eval(g, interp, &mut HashMap::new())
    })
}

/// Variables, Skolem constants and function terms, as clausification leaves them
fn arb_term() -> impl Strategy<Value = Term> {
    prop_oneof![
        Just(Term::var("x")),
        Just(Term::function("sk1", vec![])),
        Just(Term::function("sk2", vec![Term::var("x")])),
        Just(Term::function("f", vec![Term::var("y"), Term::function("sk1", vec![])])),
    ]
}

fn arb_literal() -> impl Strategy<Value = Literal> {
    (0..4u8, proptest::collection::vec(arb_term(), 0..3), any::<bool>()).prop_map(
        |(p, args, polarity)| Literal::from_atom(Atom::new(format!("L{}", p), args), polarity),
    )
}

fn arb_clause_set() -> impl Strategy<Value = ClauseSet> {
    proptest::collection::vec(proptest::collection::vec(arb_literal(), 0..4), 0..6).prop_map(
        |clauses| ClauseSet::new(clauses.into_iter().map(Clause::new).collect()),
    )
}

// =========================================================================
// NNF and renaming properties
// =========================================================================

proptest! {
    #[test]
    fn nnf_is_idempotent(f in arb_formula(4)) {
        let once = to_nnf(&f);
        prop_assert_eq!(to_nnf(&once), once);
    }

    #[test]
    fn nnf_has_no_conditionals_and_leaf_negation(f in arb_formula(4)) {
        let nnf = to_nnf(&eliminate(&f));
        prop_assert!(!nnf.contains_conditional());
        prop_assert!(nnf.is_nnf(), "not in NNF: {}", nnf);
    }

    #[test]
    fn nnf_preserves_meaning(f in arb_formula(3)) {
        let nnf = to_nnf(&eliminate(&f));
        prop_assert!(equivalent(&f, &nnf), "{} vs {}", f, nnf);
    }

    #[test]
    fn renaming_makes_bound_names_unique(f in arb_formula(4)) {
        let renamed = rename(&to_nnf(&eliminate(&f)));
        prop_assert!(bound_names_unique(&renamed), "duplicate bound names in {}", renamed);
        prop_assert_eq!(renamed.free_variables(), f.free_variables());
    }

    #[test]
    fn renaming_preserves_meaning(f in arb_formula(3)) {
        prop_assert!(equivalent(&f, &rename(&f)));
    }

    #[test]
    fn rendering_reparses_to_same_tree(f in arb_formula(4)) {
        let text = f.to_string();
        let reparsed = parse_formula(&text);
        prop_assert!(reparsed.is_ok(), "failed to reparse {}", text);
        prop_assert_eq!(reparsed.unwrap(), f);
    }
}

// =========================================================================
// Prenex and matrix properties
// =========================================================================

proptest! {
    #[test]
    fn prenex_matrix_is_quantifier_free_and_equivalent(f in arb_formula(3)) {
        let nnf = rename(&to_nnf(&eliminate(&f)));
        let prenex = to_prenex(&nnf);
        prop_assert!(!prenex.matrix.contains_quantifier());

        let reparsed = parse_formula(&prenex.to_string()).unwrap();
        prop_assert!(equivalent(&reparsed, &nnf), "{} vs {}", prenex, nnf);
    }

    #[test]
    fn cnf_and_dnf_shape_and_meaning(f in arb_formula(3)) {
        let prenex = to_prenex(&rename(&to_nnf(&eliminate(&f))));
        let budget = Budget::unbounded();

        let cnf = to_cnf(&prenex.matrix, &budget).unwrap();
        prop_assert!(is_cnf(&cnf), "not CNF: {}", cnf);
        prop_assert!(equivalent(&cnf, &prenex.matrix));

        let dnf = to_dnf(&prenex.matrix, &budget).unwrap();
        prop_assert!(is_dnf(&dnf), "not DNF: {}", dnf);
        prop_assert!(equivalent(&dnf, &prenex.matrix));
    }

    #[test]
    fn clauses_have_no_existentials_left(f in arb_formula(3)) {
        let prenex = to_prenex(&rename(&to_nnf(&eliminate(&f))));
        let cnf = to_cnf(&prenex.matrix, &Budget::unbounded()).unwrap();
        let clauses = clausify(&prenex.prefix, &cnf).unwrap();

        let existential: Vec<String> = prenex
            .prefix
            .iter()
            .filter(|(q, _)| *q == Quantifier::Exists)
            .map(|(_, v)| v.name.clone())
            .collect();
        for clause in &clauses {
            for literal in clause.literals.iter() {
                let mut vars = std::collections::HashSet::new();
                literal.collect_variables(&mut vars);
                prop_assert!(vars.iter().all(|v| !existential.contains(&v.name)));
            }
        }
    }
}

// =========================================================================
// Horn classification and clause rendering
// =========================================================================

proptest! {
    #[test]
    fn horn_partition_is_complete(set in arb_clause_set()) {
        let partition = classify(&set).unwrap();
        prop_assert_eq!(partition.horn.len() + partition.non_horn.len(), set.len());
        for horn in &partition.horn {
            prop_assert!(horn.to_clause().positive_count() <= 1);
        }
        for clause in &partition.non_horn {
            prop_assert!(clause.positive_count() > 1);
        }
    }

    #[test]
    fn rendered_clauses_and_horn_clauses_reparse(set in arb_clause_set()) {
        for clause in &set {
            let text = clause.to_string();
            prop_assert_eq!(parse_clause(&text).unwrap(), clause.clone());
        }
        for horn in classify(&set).unwrap().horn {
            let text = horn.to_string();
            prop_assert_eq!(parse_horn(&text).unwrap(), horn);
        }
    }

    #[test]
    fn pipeline_clauses_reparse_to_same_literals(f in arb_formula(3)) {
        let prenex = to_prenex(&rename(&to_nnf(&eliminate(&f))));
        let cnf = to_cnf(&prenex.matrix, &Budget::unbounded()).unwrap();
        for clause in &clausify(&prenex.prefix, &cnf).unwrap() {
            prop_assert_eq!(parse_clause(&clause.to_string()).unwrap(), clause.clone());
        }
    }
}
