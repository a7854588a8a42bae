//! Recursive-descent parser for formulas
//!
//! Precedence, loosest first:
//!
//! ```text
//! Iff        := Implies ('↔' Iff)?             right-associative
//! Implies    := Or ('→' Implies)?              right-associative
//! Or         := And ('∨' And)*                 left-associative
//! And        := Unary ('∧' Unary)*             left-associative
//! Unary      := '¬' Unary | Quantified | Atom | '(' Iff ')'
//! Quantified := ('∀' | '∃') Identifier '.'? Unary
//! Atom       := Identifier ('(' Term (',' Term)* ')')?
//! Term       := Identifier ('(' Term (',' Term)* ')')?
//! ```
//!
//! A quantifier scopes over the unary formula right after it; wider scopes
//! need parentheses.
//!
//! Every later stage walks the tree recursively, so both the parser's own
//! recursion and the depth of the tree it builds are capped at
//! [`MAX_DEPTH`]. Deeper input is rejected with a `ResourceExceeded` error.

use super::formula::{Formula, Quantifier};
use super::lexer::{tokenize, Spanned, Token};
use crate::error::{ConversionError, Result};
use crate::fol::{Atom, Clause, PredicateSymbol, Term, Variable};
use crate::horn::HornClause;
use crate::normal::clausify::{clause_from_disjunction, is_skolem_name};
use indexmap::IndexSet;

/// Deepest formula or term nesting the parser accepts
pub const MAX_DEPTH: usize = 256;

/// A parsed formula and the `(predicate, arity)` pairs it mentions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    pub formula: Formula,
    /// Distinct predicate symbols, in order of first occurrence
    pub predicates: Vec<PredicateSymbol>,
}

/// Parse a formula
pub fn parse(input: &str) -> Result<ParsedFormula> {
    let mut parser = Parser::new(input)?;
    if parser.tokens.is_empty() {
        return Err(ConversionError::syntax(
            parser.end,
            "a formula",
            "end of input",
        ));
    }
    let (formula, _) = parser.parse_iff()?;
    parser.expect_end("a connective or end of input")?;

    Ok(ParsedFormula {
        formula,
        predicates: parser.predicates.into_iter().collect(),
    })
}

/// Parse a formula, dropping the predicate side output
pub fn parse_formula(input: &str) -> Result<Formula> {
    parse(input).map(|parsed| parsed.formula)
}

/// Parse a rendered clause such as `¬P(x) ∨ Q(x)`, or `⊥` for the empty clause
pub fn parse_clause(input: &str) -> Result<Clause> {
    if input.trim() == "⊥" {
        return Ok(Clause::default());
    }
    clause_from_disjunction(&parse_formula(input)?)
}

/// Parse a rendered Horn clause: `A.`, `A :- B, C.`, `:- A, B.` or `:- .`
pub fn parse_horn(input: &str) -> Result<HornClause> {
    let mut parser = Parser::new(input)?;

    let head = if parser.eat(&Token::Turnstile) {
        None
    } else {
        let (head, _) = parser.parse_atom()?;
        if parser.eat(&Token::Dot) {
            parser.expect_end("end of input")?;
            return Ok(HornClause {
                head: Some(head),
                body: vec![],
            });
        }
        parser.expect(&Token::Turnstile, "':-' or '.'")?;
        Some(head)
    };

    let mut body = Vec::new();
    if !parser.check(&Token::Dot) {
        body.push(parser.parse_atom()?.0);
        while parser.eat(&Token::Comma) {
            body.push(parser.parse_atom()?.0);
        }
    }
    parser.expect(&Token::Dot, "',' or '.'")?;
    parser.expect_end("end of input")?;

    if head.is_some() && body.is_empty() {
        return Err(ConversionError::syntax(
            parser.end,
            "a body atom after ':-'",
            "'.'",
        ));
    }
    Ok(HornClause { head, body })
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Character length of the input, reported for end-of-input errors
    end: usize,
    /// Current recursion depth
    nesting: usize,
    predicates: IndexSet<PredicateSymbol>,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        Ok(Parser {
            tokens: tokenize(input)?,
            pos: 0,
            end: input.chars().count(),
            nesting: 0,
            predicates: IndexSet::new(),
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|s| s.position)
            .unwrap_or(self.end)
    }

    fn error(&self, expected: &str) -> ConversionError {
        let found = match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        ConversionError::syntax(self.position(), expected, found)
    }

    fn expect(&mut self, token: &Token, expected: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_end(&self, expected: &str) -> Result<()> {
        if self.pos < self.tokens.len() {
            Err(self.error(expected))
        } else {
            Ok(())
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error(expected)),
        }
    }

    fn too_deep(&self) -> ConversionError {
        log::warn!("input nesting exceeds {} levels at position {}", MAX_DEPTH, self.position());
        ConversionError::ResourceExceeded {
            resource: "nesting depth".to_string(),
            limit: MAX_DEPTH.to_string(),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    /// Depth of a node whose deepest child has depth `child`
    fn node_depth(&self, child: usize) -> Result<usize> {
        let depth = child + 1;
        if depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(depth)
    }

    fn parse_iff(&mut self) -> Result<(Formula, usize)> {
        let (left, dl) = self.parse_implies()?;
        if self.eat(&Token::Iff) {
            self.enter()?;
            let (right, dr) = self.parse_iff()?;
            self.leave();
            return Ok((Formula::iff(left, right), self.node_depth(dl.max(dr))?));
        }
        Ok((left, dl))
    }

    fn parse_implies(&mut self) -> Result<(Formula, usize)> {
        let (left, dl) = self.parse_or()?;
        if self.eat(&Token::Implies) {
            self.enter()?;
            let (right, dr) = self.parse_implies()?;
            self.leave();
            return Ok((Formula::implies(left, right), self.node_depth(dl.max(dr))?));
        }
        Ok((left, dl))
    }

    fn parse_or(&mut self) -> Result<(Formula, usize)> {
        let (mut left, mut depth) = self.parse_and()?;
        while self.eat(&Token::Or) {
            let (right, dr) = self.parse_and()?;
            depth = self.node_depth(depth.max(dr))?;
            left = Formula::or(left, right);
        }
        Ok((left, depth))
    }

    fn parse_and(&mut self) -> Result<(Formula, usize)> {
        let (mut left, mut depth) = self.parse_unary()?;
        while self.eat(&Token::And) {
            let (right, dr) = self.parse_unary()?;
            depth = self.node_depth(depth.max(dr))?;
            left = Formula::and(left, right);
        }
        Ok((left, depth))
    }

    fn parse_unary(&mut self) -> Result<(Formula, usize)> {
        let quantifier = match self.peek() {
            Some(Token::Not) => {
                self.pos += 1;
                self.enter()?;
                let (inner, depth) = self.parse_unary()?;
                self.leave();
                return Ok((Formula::not(inner), self.node_depth(depth)?));
            }
            Some(Token::LParen) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_iff()?;
                self.leave();
                self.expect(&Token::RParen, "')'")?;
                return Ok(inner);
            }
            Some(Token::Ident(_)) => {
                let (atom, depth) = self.parse_atom()?;
                return Ok((Formula::Atom(atom), depth));
            }
            Some(Token::Forall) => Quantifier::Forall,
            Some(Token::Exists) => Quantifier::Exists,
            _ => return Err(self.error("a formula")),
        };
        self.pos += 1;
        self.enter()?;
        let quantified = self.parse_quantified(quantifier)?;
        self.leave();
        Ok(quantified)
    }

    fn parse_quantified(&mut self, quantifier: Quantifier) -> Result<(Formula, usize)> {
        let position = self.position();
        let var = self.expect_ident("a variable after the quantifier")?;
        if is_skolem_name(&var) {
            return Err(ConversionError::syntax(
                position,
                "a variable (sk1, sk2, ... name Skolem constants)",
                var,
            ));
        }
        self.eat(&Token::Dot);
        let (body, depth) = self.parse_unary()?;
        let formula = Formula::Quantified(quantifier, Variable::new(var), Box::new(body));
        Ok((formula, self.node_depth(depth)?))
    }

    fn parse_atom(&mut self) -> Result<(Atom, usize)> {
        let name = self.expect_ident("a predicate")?;
        let (args, depth) = self.parse_arguments()?;
        let atom = Atom::new(name, args);
        self.predicates.insert(atom.predicate.clone());
        Ok((atom, depth))
    }

    /// A bare identifier is a variable, except for Skolem constant names
    fn parse_term(&mut self) -> Result<(Term, usize)> {
        let name = self.expect_ident("a term")?;
        let (args, depth) = self.parse_arguments()?;
        if args.is_empty() && !is_skolem_name(&name) {
            Ok((Term::var(name), depth))
        } else {
            Ok((Term::function(name, args), depth))
        }
    }

    /// Optional parenthesised, comma-separated, non-empty term list, with
    /// the depth of the node that owns it
    fn parse_arguments(&mut self) -> Result<(Vec<Term>, usize)> {
        if !self.eat(&Token::LParen) {
            return Ok((vec![], 1));
        }
        self.enter()?;
        let (first, mut deepest) = self.parse_term()?;
        let mut args = vec![first];
        while self.eat(&Token::Comma) {
            let (arg, depth) = self.parse_term()?;
            deepest = deepest.max(depth);
            args.push(arg);
        }
        self.leave();
        self.expect(&Token::RParen, "',' or ')'")?;
        Ok((args, self.node_depth(deepest)?))
    }
}
