//! Error types for the conversion pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Any failure of a conversion request
///
/// A single failure aborts the whole request; no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Malformed input. `position` is a character offset into the raw input.
    #[error("Syntax error at position {position}: expected {expected}, found {found}")]
    Syntax {
        position: usize,
        expected: String,
        found: String,
    },

    /// The matrix handed to the clausifier was not a quantifier-free CNF.
    #[error("Clausification error: {0}")]
    Clausification(String),

    /// A clause with more than one positive literal was formatted as Horn.
    #[error("Invalid Horn clause {clause}: {positive} positive literals")]
    InvalidHornClause { clause: String, positive: usize },

    /// The node or time budget of the request was exhausted.
    #[error("Resource budget exceeded: {resource} limit of {limit}")]
    ResourceExceeded { resource: String, limit: String },
}

/// Tag identifying the kind of a [`ConversionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Syntax,
    Clausification,
    InvalidHornClause,
    ResourceExceeded,
}

impl ConversionError {
    pub fn syntax(position: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ConversionError::Syntax {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::Syntax { .. } => ErrorKind::Syntax,
            ConversionError::Clausification(_) => ErrorKind::Clausification,
            ConversionError::InvalidHornClause { .. } => ErrorKind::InvalidHornClause,
            ConversionError::ResourceExceeded { .. } => ErrorKind::ResourceExceeded,
        }
    }

    /// Source position, for syntax errors
    pub fn position(&self) -> Option<usize> {
        match self {
            ConversionError::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether the caller can fix the request and retry.
    /// Internal-consistency faults are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConversionError::Syntax { .. } | ConversionError::ResourceExceeded { .. }
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Clausification => "ClausificationError",
            ErrorKind::InvalidHornClause => "InvalidHornClauseError",
            ErrorKind::ResourceExceeded => "ResourceExceededError",
        };
        write!(f, "{}", name)
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
