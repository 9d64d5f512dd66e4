//! Error adapter for converting StrataError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Declaration errors
//! carry the model source and the offending span, so they render with a
//! labelled snippet; every other variant renders as a plain coded error.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use strata::{GraphError, StrataError};

/// Adapter rendering a [`StrataError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a StrataError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StrataError::Io(_) => "strata::io",
            StrataError::Declaration { .. } => "strata::declaration",
            StrataError::Graph(_) => "strata::graph",
            StrataError::Export(_) => "strata::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StrataError::Graph(GraphError::Cycle { .. }) => {
                "a layer cannot consume its own output; check `from` and `merge`"
            }
            StrataError::Graph(GraphError::Unranked { .. }) => {
                "list every source layer under `inputs`"
            }
            StrataError::Graph(GraphError::UnreachableInput { .. }) => {
                "every input must feed at least one declared output"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            StrataError::Declaration { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let StrataError::Declaration {
            message,
            span: Some(span),
            ..
        } = &self.0
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(message.clone()),
            span,
        ))))
    }
}
