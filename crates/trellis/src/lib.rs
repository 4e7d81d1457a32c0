//! Trellis - a compiler from an entity-relationship DSL to PlantUML render tokens.
//!
//! The pipeline is a pure left-to-right transform: DSL text is parsed into a
//! semantic diagram model, rendered into PlantUML entity-diagram markup,
//! compressed and re-encoded into a URL-safe token, and finally combined
//! with a configured base path into a fetchable URL. No component holds
//! state across invocations and no network I/O is performed here.

pub mod config;

mod encode;
mod error;
mod render;
mod request;

pub use trellis_core::{identifier, model};

pub use encode::{CompressionError, EncodingError, decode_token, encode_token};
pub use error::TrellisError;
pub use request::DEFAULT_BASE_URL;

use log::{debug, info, trace};

use config::AppConfig;
use model::Diagram;

/// The result of compiling DSL source through the full pipeline.
#[derive(Debug, Clone)]
pub struct CompiledDiagram {
    markup: String,
    token: String,
    url: String,
}

impl CompiledDiagram {
    /// The rendered PlantUML markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The URL-safe encoded token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The assembled request URL for the remote rendering service.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Builder for compiling Trellis diagrams.
///
/// This provides an API for processing DSL source through the parsing,
/// rendering, and encoding stages.
///
/// # Examples
///
/// ```
/// use trellis::{DiagramBuilder, config::AppConfig};
///
/// let source = "User: {\n  id: int {constraint: primary_key}\n}";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let compiled = builder.compile(source).expect("Failed to compile");
///
/// assert!(compiled.markup().starts_with("@startuml"));
/// assert!(compiled.url().ends_with(compiled.token()));
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

    /// Parse DSL source into a semantic diagram model.
    ///
    /// Parsing is best-effort and infallible: fragments that do not match
    /// the expected shapes are skipped, never raised.
    pub fn parse(&self, source: &str) -> Diagram {
        info!("Parsing diagram source");
        let diagram = trellis_parser::parse(source);
        debug!(
            entities = diagram.entities().len(),
            relations = diagram.relations().len();
            "Diagram parsed"
        );
        trace!(diagram:?; "Parsed diagram");
        diagram
    }

    /// Render a diagram model into PlantUML markup.
    pub fn render_markup(&self, diagram: &Diagram) -> String {
        render::render_markup(diagram)
    }

    /// Compress markup and encode it into a URL-safe token.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Compression`] if the compressor faults.
    /// Either a full token is produced or nothing is.
    pub fn encode(&self, markup: &str) -> Result<String, TrellisError> {
        encode::encode(markup)
    }

    /// Assemble the request URL for an encoded token using the configured
    /// service base path.
    pub fn render_url(&self, token: &str) -> String {
        request::assemble_url(self.config.server().base_url(), token)
    }

    /// Compile DSL source through the whole pipeline.
    ///
    /// Runs parse, render, encode, and URL assembly in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError`] if the compression stage fails; every other
    /// stage is total.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis::{DiagramBuilder, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default());
    /// let compiled = builder.compile("User.id -> Order.user_id")
    ///     .expect("Failed to compile");
    /// assert!(compiled.markup().contains("User::id --> Order::user_id"));
    /// ```
    pub fn compile(&self, source: &str) -> Result<CompiledDiagram, TrellisError> {
        let diagram = self.parse(source);
        let markup = self.render_markup(&diagram);
        let token = self.encode(&markup)?;
        let url = self.render_url(&token);

        info!(token_len = token.len(); "Diagram compiled");

        Ok(CompiledDiagram { markup, token, url })
    }
}
