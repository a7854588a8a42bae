//! Tokenizer for LaTeX-style logic notation
//!
//! LaTeX commands (`\forall`, `\land`, ...), their Unicode symbols and a few
//! ASCII spellings all lex to the same tokens. A command is read as a whole
//! word after the backslash, so already-symbolic text is never rewritten.

use crate::error::{ConversionError, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, char, multispace0, satisfy},
    combinator::{map, map_opt, recognize, value},
    sequence::{pair, preceded},
    IResult,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Not,
    And,
    Or,
    Implies,
    Iff,
    Forall,
    Exists,
    LParen,
    RParen,
    Comma,
    Dot,
    /// `:-`, only meaningful in rendered Horn clauses
    Turnstile,
}

/// A token and the character offset where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Not => write!(f, "'¬'"),
            Token::And => write!(f, "'∧'"),
            Token::Or => write!(f, "'∨'"),
            Token::Implies => write!(f, "'→'"),
            Token::Iff => write!(f, "'↔'"),
            Token::Forall => write!(f, "'∀'"),
            Token::Exists => write!(f, "'∃'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::Turnstile => write!(f, "':-'"),
        }
    }
}

/// Split `input` into tokens, failing on the first unknown symbol
pub fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    let mut position = 0;

    loop {
        let (after_space, space) = skip_whitespace(rest);
        position += space.chars().count();
        rest = after_space;
        if rest.is_empty() {
            break;
        }

        match lex_token(rest) {
            Ok((remaining, token)) => {
                let lexeme = &rest[..rest.len() - remaining.len()];
                tokens.push(Spanned { token, position });
                position += lexeme.chars().count();
                rest = remaining;
            }
            Err(_) => {
                return Err(ConversionError::syntax(
                    position,
                    "a connective, quantifier, identifier or parenthesis",
                    format!("unknown symbol '{}'", offending_lexeme(rest)),
                ));
            }
        }
    }

    Ok(tokens)
}

fn skip_whitespace(input: &str) -> (&str, &str) {
    match multispace0::<_, nom::error::Error<&str>>(input) {
        Ok((rest, space)) => (rest, space),
        Err(_) => (input, ""),
    }
}

/// The text to quote when `input` does not start with a valid token
fn offending_lexeme(input: &str) -> &str {
    if let Some(command) = input.strip_prefix('\\') {
        let word_len = command
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(command.len());
        return &input[..1 + word_len];
    }
    let end = input.chars().next().map(char::len_utf8).unwrap_or(0);
    &input[..end]
}

fn lex_token(input: &str) -> IResult<&str, Token> {
    alt((
        latex_command,
        symbol,
        ascii_operator,
        punctuation,
        map(identifier, |name: &str| Token::Ident(name.to_string())),
    ))(input)
}

/// `\forall`, `\land`, ... (the whole alphabetic word after the backslash)
fn latex_command(input: &str) -> IResult<&str, Token> {
    map_opt(preceded(char('\\'), alpha1), latex_token)(input)
}

fn latex_token(name: &str) -> Option<Token> {
    let token = match name {
        "forall" => Token::Forall,
        "exists" => Token::Exists,
        "rightarrow" | "Rightarrow" | "to" | "implies" => Token::Implies,
        "leftrightarrow" | "Leftrightarrow" | "iff" => Token::Iff,
        "land" | "wedge" => Token::And,
        "lor" | "vee" => Token::Or,
        "neg" | "lnot" => Token::Not,
        _ => return None,
    };
    Some(token)
}

fn symbol(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Forall, char('∀')),
        value(Token::Exists, char('∃')),
        value(Token::Not, char('¬')),
        value(Token::And, char('∧')),
        value(Token::Or, char('∨')),
        value(Token::Implies, char('→')),
        value(Token::Iff, char('↔')),
    ))(input)
}

fn ascii_operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Iff, tag("<->")),
        value(Token::Iff, tag("<=>")),
        value(Token::Implies, tag("->")),
        value(Token::Implies, tag("=>")),
        value(Token::Turnstile, tag(":-")),
        value(Token::Not, char('~')),
        value(Token::And, char('&')),
        value(Token::Or, char('|')),
    ))(input)
}

fn punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Comma, char(',')),
        value(Token::Dot, char('.')),
    ))(input)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}
