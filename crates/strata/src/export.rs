//! Serialization of a laid-out [`Graph`] for renderers and debugging.

pub mod dot;
pub mod json;
pub mod text;

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::graph::Graph;

/// Turns a laid-out graph into a textual artifact.
pub trait Exporter {
    fn export(&self, graph: &Graph) -> Result<String, Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting failed: {0}")]
    Format(#[from] fmt::Error),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table grouped by rank.
    #[default]
    Text,
    /// Layout dump for renderers.
    Json,
    /// Graphviz DOT with rank and position attributes.
    Dot,
}

impl OutputFormat {
    /// Exporter producing this format.
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Text => Box::new(text::TextExporter),
            Self::Json => Box::new(json::JsonExporter::default()),
            Self::Dot => Box::new(dot::DotExporter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "dot" => Ok(Self::Dot),
            other => Err(format!("unknown output format `{other}`")),
        }
    }
}
