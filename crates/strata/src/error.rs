//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`] and the
//! [`GraphError`] raised while assembling a topology or laying it out.

use std::{io, ops::Range};

use thiserror::Error;

/// Failures detected while declaring a topology or building its layout graph.
///
/// A constructed [`Graph`](crate::Graph) is guaranteed to be acyclic and to
/// carry a rank for every node; anything that would break that is reported
/// here instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),

    #[error("layer `{0}` is declared more than once")]
    DuplicateLayer(String),

    #[error("merge layer `{layer}` needs at least two producers, got {count}")]
    MergeArity { layer: String, count: usize },

    #[error("layer `{layer}` declares both a chain and a merge predecessor")]
    ConflictingPredecessors { layer: String },

    #[error("no input layers declared")]
    NoInputs,

    #[error("no output layers declared")]
    NoOutputs,

    #[error("input layer `{layer}` must not have predecessors")]
    InputHasPredecessors { layer: String },

    #[error("input layer `{layer}` is not reachable from any output")]
    UnreachableInput { layer: String },

    #[error("predecessor cycle through layer `{layer}`")]
    Cycle { layer: String },

    #[error("layer `{layer}` received no rank; is it fed by a declared input?")]
    Unranked { layer: String },
}

/// The main error type for Strata operations.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Model declaration error: {message}")]
    Declaration {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl StrataError {
    /// Wraps a TOML error raised while reading the declaration `src`.
    pub fn new_declaration_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Declaration {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }
}

impl From<crate::export::Error> for StrataError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
