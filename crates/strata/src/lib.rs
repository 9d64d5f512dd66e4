//! Strata - rank-based 3D layout for neural network architecture diagrams.
//!
//! A model is a DAG of layers. Strata assigns every layer a rank along the
//! main axis, packs the layers sharing a rank side by side around the axis,
//! and scales each layer's raw depth into a rendered thickness. When a layer
//! is expanded or collapsed at runtime only its rank is re-packed, and the
//! moved layers are handed to an [`Animator`](animation::Animator) as
//! generation-tagged transitions.

pub mod animation;
pub mod config;
pub mod declaration;
pub mod export;
pub mod footprint;
pub mod graph;
pub mod layout;
pub mod model;

mod error;

pub use strata_core::{geometry, identifier};

pub use error::{GraphError, StrataError};
pub use graph::Graph;

use log::{debug, info, trace};

use config::AppConfig;
use declaration::ModelDeclaration;
use export::OutputFormat;
use model::Model;

/// Builder for parsing, laying out and exporting Strata models.
///
/// # Examples
///
/// ```rust
/// use strata::{DiagramBuilder, export::OutputFormat};
///
/// let source = r#"
///     inputs = ["image"]
///     outputs = ["logits"]
///
///     [[layer]]
///     name = "image"
///
///     [[layer]]
///     name = "logits"
///     from = "image"
/// "#;
///
/// let builder = DiagramBuilder::default();
/// let model = builder.parse(source).expect("Failed to parse");
/// let graph = builder.layout(&model).expect("Failed to lay out");
/// let table = builder
///     .render(&graph, OutputFormat::Text)
///     .expect("Failed to render");
///
/// assert!(table.starts_with("rank 0"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Configuration the builder lays models out with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML model declaration into an assembled [`Model`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Declaration`] for malformed TOML and
    /// [`StrataError::Graph`] for names that do not resolve.
    pub fn parse(&self, source: &str) -> Result<Model, StrataError> {
        info!("Parsing model declaration");

        let declaration: ModelDeclaration =
            toml::from_str(source).map_err(|err| StrataError::new_declaration_error(err, source))?;
        let model = declaration.assemble(self.config.layout())?;

        debug!(layers = model.topology().len(); "Model parsed successfully");
        trace!(model:?; "Parsed model");

        Ok(model)
    }

    /// Lay out a model with its current footprints.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Graph`] if the model cannot be ranked.
    pub fn layout(&self, model: &Model) -> Result<Graph, StrataError> {
        let graph = Graph::build(
            model.topology(),
            model.inputs(),
            model.outputs(),
            model.footprints(),
            self.config.layout(),
        )?;
        Ok(graph)
    }

    /// Export a laid-out graph in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Export`] if serialization fails.
    pub fn render(&self, graph: &Graph, format: OutputFormat) -> Result<String, StrataError> {
        info!(format:?; "Exporting layout");
        let rendered = format.exporter().export(graph)?;
        debug!(bytes = rendered.len(); "Layout exported");
        Ok(rendered)
    }
}
