//! Integration tests for the conversion pipeline

use normalform::pipeline::{STEP_ELIMINATION, STEP_NNF, STEP_PRENEX, STEP_RENAMING};
use normalform::{
    convert, parse_clause, parse_horn, Atom, Clause, ConversionConfig, Converter, ErrorKind,
    HornKind, Literal, Quantifier, Term, Variable, EXAMPLES,
};
use std::time::{Duration, Instant};

fn has_complementary_pair(clause: &Clause) -> bool {
    clause
        .positive_literals()
        .any(|p| clause.negative_literals().any(|n| n.atom == p.atom))
}

fn wide_disjunction(n: usize) -> String {
    let disjuncts: Vec<String> = (0..n).map(|i| format!(r"(A{i} \land B{i})")).collect();
    disjuncts.join(r" \lor ")
}

#[test]
fn test_implication_becomes_rule() {
    let result = convert(r"P \rightarrow Q").unwrap();
    assert_eq!(result.steps.get(STEP_ELIMINATION), Some("¬P ∨ Q"));
    assert_eq!(result.steps.get(STEP_NNF), Some("¬P ∨ Q"));
    assert_eq!(result.clausal_form(), "{ ¬P ∨ Q }");
    assert_eq!(result.horn.horn.len(), 1);
    assert_eq!(result.horn.horn[0].kind(), HornKind::Rule);
    assert_eq!(result.horn.horn[0].to_string(), "Q :- P.");
}

#[test]
fn test_universal_implication() {
    let result = convert(r"\forall x (P(x) \rightarrow Q(x))").unwrap();
    assert_eq!(result.steps.get(STEP_ELIMINATION), Some("∀x (¬P(x) ∨ Q(x))"));
    assert_eq!(result.prenex.prefix, vec![(Quantifier::Forall, Variable::new("x"))]);
    assert_eq!(result.prenex.matrix.to_string(), "¬P(x) ∨ Q(x)");
    assert_eq!(result.clausal_form(), "{ ¬P(x) ∨ Q(x) }");
    assert_eq!(result.horn_report(), "Horn clauses:\nQ(x) :- P(x).");
}

#[test]
fn test_existential_becomes_skolem_constant() {
    let result = convert(r"\exists x P(x)").unwrap();
    assert_eq!(result.clausal_form(), "{ P(sk1) }");
    assert_eq!(result.horn.horn[0].kind(), HornKind::Fact);
    assert_eq!(result.horn.horn[0].to_string(), "P(sk1).");
}

#[test]
fn test_negated_conjunction_is_goal() {
    let result = convert(r"\neg (P \land Q)").unwrap();
    assert_eq!(result.steps.get(STEP_NNF), Some("¬P ∨ ¬Q"));
    assert_eq!(result.clausal_form(), "{ ¬P ∨ ¬Q }");
    assert!(result.horn.non_horn.is_empty());
    assert_eq!(result.horn.horn[0].kind(), HornKind::Goal);
    assert_eq!(result.horn.horn[0].to_string(), ":- P, Q.");
}

#[test]
fn test_empty_input_is_syntax_error() {
    let err = convert("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.is_recoverable());
}

#[test]
fn test_unbalanced_parenthesis_position() {
    let input = r"(P \land Q";
    let err = convert(input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.position(), Some(input.chars().count()));
}

#[test]
fn test_quantifiers_hoisted_in_order() {
    let result = convert(r"\exists x (P(x) \land Q(x)) \rightarrow \forall y R(y)").unwrap();
    assert_eq!(result.steps.get(STEP_PRENEX), Some("∀x ∀y (¬P(x) ∨ ¬Q(x) ∨ R(y))"));
    assert_eq!(result.horn_report(), "Horn clauses:\nR(y) :- P(x), Q(x).");
}

#[test]
fn test_shared_names_renamed_apart() {
    let result = convert(r"\forall x P(x) \lor \exists x Q(x)").unwrap();
    assert_eq!(result.steps.get(STEP_RENAMING), Some("(∀x P(x)) ∨ (∃x1 Q(x1))"));
    assert_eq!(result.steps.get(STEP_PRENEX), Some("∀x ∃x1 (P(x) ∨ Q(x1))"));
    assert_eq!(result.clausal_form(), "{ P(x) ∨ Q(sk1(x)) }");
    assert_eq!(result.horn_report(), "Non-Horn clauses:\n{ P(x) ∨ Q(sk1(x)) }");
}

#[test]
fn test_biconditional_tautology() {
    let result = convert(EXAMPLES[4]).unwrap();
    assert_eq!(result.clauses.len(), 4);
    assert!(result.clauses.iter().all(has_complementary_pair));
    assert!(result.horn.all_horn());
}

#[test]
fn test_outputs_reparse() {
    for example in EXAMPLES {
        let result = convert(example).unwrap();
        for clause in &result.clauses {
            assert_eq!(&parse_clause(&clause.to_string()).unwrap(), clause);
        }
        for horn in &result.horn.horn {
            assert_eq!(&parse_horn(&horn.to_string()).unwrap(), horn);
        }
    }
}

#[test]
fn test_skolem_constant_reparses_as_constant() {
    let result = convert(r"\exists x P(x)").unwrap();
    let expected = Literal::positive(Atom::new("P", vec![Term::function("sk1", vec![])]));
    assert_eq!(result.clauses.iter().next(), Some(&Clause::new(vec![expected])));
    assert_eq!(&parse_clause("P(sk1)").unwrap(), result.clauses.iter().next().unwrap());

    let result = convert(r"\forall x P(x) \lor \exists x Q(x)").unwrap();
    for clause in &result.clauses {
        assert_eq!(&parse_clause(&clause.to_string()).unwrap(), clause);
    }
}

#[test]
fn test_requests_do_not_share_counters() {
    let converter = Converter::default();
    let first = converter.convert(r"\exists y P(y)").unwrap();
    let second = converter.convert(r"\exists y P(y)").unwrap();
    assert_eq!(first.clausal_form(), "{ P(sk1) }");
    assert_eq!(first, second);
}

#[test]
fn test_budget_configuration() {
    let blowup = r"(A \land B) \lor (C \land D) \lor (E \land F) \lor (G \land H)";
    let tight = Converter::new(ConversionConfig::default().with_max_nodes(40));
    assert_eq!(tight.convert(blowup).unwrap_err().kind(), ErrorKind::ResourceExceeded);

    let unbounded = Converter::new(ConversionConfig::unbounded());
    assert_eq!(unbounded.convert(blowup).unwrap().clauses.len(), 16);

    let expired = Converter::new(ConversionConfig::unbounded().with_timeout(Duration::ZERO));
    assert_eq!(expired.convert(blowup).unwrap_err().kind(), ErrorKind::ResourceExceeded);
}

#[test]
fn test_default_budget_stops_distribution_blowup() {
    let converter = Converter::new(ConversionConfig::default().with_timeout(Duration::from_secs(5)));
    for n in [24, 30] {
        let started = Instant::now();
        let err = converter.convert(&wide_disjunction(n)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceExceeded);
        assert!(started.elapsed() < Duration::from_secs(5), "{} disjuncts took {:?}", n, started.elapsed());
    }
}

#[test]
fn test_deep_nesting_is_an_error() {
    let parens = format!("{}P{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(convert(&parens).unwrap_err().kind(), ErrorKind::ResourceExceeded);

    let negations = format!("{}P", r"\neg ".repeat(200_000));
    assert_eq!(convert(&negations).unwrap_err().kind(), ErrorKind::ResourceExceeded);

    let chain = vec!["P"; 5000].join(r" \land ");
    let err = convert(&chain).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceExceeded);
    assert!(err.is_recoverable());
}

#[test]
fn test_moderate_nesting_converts() {
    let input = format!("{}P{}", r"\neg (".repeat(40), ")".repeat(40));
    let result = convert(&input).unwrap();
    assert_eq!(result.clausal_form(), "{ P }");
}
