//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A variable in first-order logic
///
/// Unbound variables are read as constants; there is no separate constant
/// symbol in the input language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A function symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Shorthand for a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Shorthand for a function application; the arity is taken from `args`
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function(FunctionSymbol::new(name, args.len()), args)
    }

    /// Get all variables in this term
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Term::Variable(v) => vec![v.clone()],
            Term::Function(_, args) => args.iter().flat_map(|arg| arg.variables()).collect(),
        }
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Collect every symbol name (variables and function symbols) in this term
    pub fn collect_names(&self, names: &mut HashSet<String>) {
        match self {
            Term::Variable(v) => {
                names.insert(v.name.clone());
            }
            Term::Function(f, args) => {
                names.insert(f.name.clone());
                for arg in args {
                    arg.collect_names(names);
                }
            }
        }
    }

    /// Replace every occurrence of `var` with `replacement`
    pub fn substitute(&self, var: &Variable, replacement: &Term) -> Term {
        match self {
            Term::Variable(v) if v == var => replacement.clone(),
            Term::Variable(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter()
                    .map(|arg| arg.substitute(var, replacement))
                    .collect(),
            ),
        }
    }

    /// Rename variables through `env`, leaving unmapped ones alone
    pub fn rename(&self, env: &HashMap<String, String>) -> Term {
        match self {
            Term::Variable(v) => match env.get(&v.name) {
                Some(fresh) => Term::Variable(Variable::new(fresh.clone())),
                None => self.clone(),
            },
            Term::Function(f, args) => {
                Term::Function(f.clone(), args.iter().map(|arg| arg.rename(env)).collect())
            }
        }
    }

    /// Number of symbols in this term
    pub fn size(&self) -> usize {
        match self {
            Term::Variable(_) => 1,
            Term::Function(_, args) => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            // Skolem constants have no argument list
            Term::Function(func, args) if args.is_empty() => write!(f, "{}", func.name),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
