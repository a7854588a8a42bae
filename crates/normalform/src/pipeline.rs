//! Conversion pipeline
//!
//! [`Converter::convert`] runs every stage in order on one input string:
//!
//! ```text
//! parse → eliminate → NNF → rename → prenex → PCNF / PDNF → clauses → Horn
//! ```
//!
//! Any failure aborts the request; no partial trace is returned. All
//! counters (fresh variable names, Skolem symbols) live inside the request.

use crate::config::ConversionConfig;
use crate::error::Result;
use crate::fol::{ClauseSet, PredicateSymbol};
use crate::horn::{classify, HornPartition};
use crate::normal::{clausify, eliminate, rename, to_cnf, to_dnf, to_nnf, to_prenex, Prenex};
use crate::parser::{parse, FormulaKind};
use serde::{Deserialize, Serialize};

/// Example inputs covering the supported notation
pub const EXAMPLES: [&str; 5] = [
    r"\forall x (P(x) \rightarrow Q(x))",
    r"\exists x (P(x) \land Q(x)) \rightarrow \forall y R(y)",
    r"\forall x \exists y (P(x) \rightarrow (Q(x,y) \land R(y)))",
    r"(A \land B) \rightarrow (C \lor D)",
    r"\neg (P \land Q) \leftrightarrow (\neg P \lor \neg Q)",
];

pub const STEP_ELIMINATION: &str = "Elimination of Implications/Biconditionals";
pub const STEP_NNF: &str = "Negation Normal Form";
pub const STEP_RENAMING: &str = "Bound Variable Renaming";
pub const STEP_PRENEX: &str = "Prenex Form";

/// One labelled intermediate formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub formula: String,
}

/// Ordered record of intermediate formulas
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepTrace {
    steps: Vec<Step>,
}

impl StepTrace {
    pub fn new() -> Self {
        StepTrace::default()
    }

    pub fn push(&mut self, label: impl Into<String>, formula: impl ToString) {
        let step = Step {
            label: label.into(),
            formula: formula.to_string(),
        };
        log::debug!("{}: {}", step.label, step.formula);
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// The rendering recorded under `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.steps
            .iter()
            .find(|step| step.label == label)
            .map(|step| step.formula.as_str())
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Everything one conversion request produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub input: String,
    pub kind: FormulaKind,
    /// Predicates seen by the parser, in order of first occurrence
    pub predicates: Vec<PredicateSymbol>,
    pub steps: StepTrace,
    pub prenex: Prenex,
    pub pcnf: Prenex,
    pub pdnf: Prenex,
    pub clauses: ClauseSet,
    pub horn: HornPartition,
}

impl ConversionResult {
    /// Clause set rendered as `{ c1, c2 }`
    pub fn clausal_form(&self) -> String {
        self.clauses.to_string()
    }

    /// The Horn / non-Horn text report
    pub fn horn_report(&self) -> String {
        self.horn.to_string()
    }
}

/// Entry point for conversion requests
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        Converter { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run the whole pipeline on `text`
    pub fn convert(&self, text: &str) -> Result<ConversionResult> {
        let budget = self.config.budget();
        let parsed = parse(text)?;
        let formula = parsed.formula;
        log::debug!("parsed {} ({} nodes)", formula, formula.node_count());
        budget.check(formula.node_count())?;

        let mut steps = StepTrace::new();

        let eliminated = eliminate(&formula);
        steps.push(STEP_ELIMINATION, &eliminated);

        let nnf = to_nnf(&eliminated);
        steps.push(STEP_NNF, &nnf);

        let renamed = rename(&nnf);
        steps.push(STEP_RENAMING, &renamed);

        let prenex = to_prenex(&renamed);
        steps.push(STEP_PRENEX, &prenex);
        budget.check(prenex.matrix.node_count())?;

        let pcnf = prenex.with_matrix(to_cnf(&prenex.matrix, &budget)?);
        log::debug!("PCNF: {}", pcnf);
        let pdnf = prenex.with_matrix(to_dnf(&prenex.matrix, &budget)?);
        log::debug!("PDNF: {}", pdnf);

        let clauses = clausify(&pcnf.prefix, &pcnf.matrix)?;
        budget.check(clauses.literal_count())?;
        let horn = classify(&clauses)?;

        Ok(ConversionResult {
            input: text.to_string(),
            kind: formula.kind(),
            predicates: parsed.predicates,
            steps,
            prenex,
            pcnf,
            pdnf,
            clauses,
            horn,
        })
    }
}

/// Convert with the default configuration
pub fn convert(text: &str) -> Result<ConversionResult> {
    Converter::default().convert(text)
}
