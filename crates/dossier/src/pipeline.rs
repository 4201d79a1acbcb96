//! Due-diligence pipeline: extract, analyze, render.
//!
//! Only extraction is implemented in this crate. Analysis and report rendering
//! are seams: callers plug in a [`DocumentAnalyzer`] and a [`ReportRenderer`] and
//! the pipeline threads the text and findings between them.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use dossier::pipeline::{
//!     DocumentAnalyzer, DueDiligencePipeline, Findings, PipelineStage, ReportOptions, ReportRenderer,
//! };
//! use dossier::storage::InMemoryObjectStore;
//! use dossier::{DocumentProcessor, DocumentReference, Result};
//! use std::sync::Arc;
//!
//! struct WordCount;
//!
//! #[async_trait]
//! impl DocumentAnalyzer for WordCount {
//!     fn name(&self) -> &str { "word-count" }
//!     async fn analyze(&self, text: &str) -> Result<Findings> {
//!         Ok(Findings::new(serde_json::json!({ "words": text.split_whitespace().count() })))
//!     }
//! }
//!
//! struct Plain;
//!
//! #[async_trait]
//! impl ReportRenderer for Plain {
//!     fn name(&self) -> &str { "plain" }
//!     async fn render(&self, findings: &Findings, _options: &ReportOptions) -> Result<String> {
//!         Ok(format!("words: {}", findings.as_value()["words"]))
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let processor = DocumentProcessor::new(Arc::new(InMemoryObjectStore::new()));
//! let pipeline = DueDiligencePipeline::new(processor, Arc::new(WordCount), Arc::new(Plain));
//!
//! let mut stages = Vec::new();
//! let report = pipeline
//!     .run(
//!         DocumentReference::in_memory(b"one two three".to_vec(), "text/plain"),
//!         &ReportOptions::default(),
//!         |stage| stages.push(stage),
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(report.report, "words: 3");
//! assert_eq!(stages.last(), Some(&PipelineStage::Complete));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

use crate::core::extractor::DocumentProcessor;
use crate::core::format::FormatTag;
use crate::core::reference::DocumentReference;
use crate::text::{NormalizationConfig, normalize};
use crate::{DossierError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Opaque structured output of an analyzer.
///
/// The pipeline never looks inside; it only hands the value to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Findings(serde_json::Value);

impl Findings {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// How deep the report should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    Basic,
    #[default]
    Comprehensive,
}

/// Named options passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    #[serde(default)]
    pub analysis_depth: AnalysisDepth,

    #[serde(default = "default_true")]
    pub include_risk_analysis: bool,

    #[serde(default = "default_true")]
    pub advanced_nlp: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            analysis_depth: AnalysisDepth::Comprehensive,
            include_risk_analysis: true,
            advanced_nlp: true,
        }
    }
}

/// Turns extracted text into findings.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self, text: &str) -> Result<Findings>;
}

/// Turns findings into a rendered report.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    fn name(&self) -> &str;

    async fn render(&self, findings: &Findings, options: &ReportOptions) -> Result<String>;
}

/// A completed pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    Extracting,
    Analyzing,
    Rendering,
    Complete,
}

impl PipelineStage {
    /// Overall progress once this stage has finished, in percent.
    pub fn progress(self) -> u8 {
        match self {
            PipelineStage::Extracting => 30,
            PipelineStage::Analyzing => 60,
            PipelineStage::Rendering => 90,
            PipelineStage::Complete => 100,
        }
    }
}

/// Output of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDiligenceReport {
    pub format: FormatTag,
    /// Character count of the (possibly normalized) text given to the analyzer
    pub text_chars: usize,
    pub report: String,
}

/// Extract, analyze, render.
#[derive(Clone)]
pub struct DueDiligencePipeline {
    processor: DocumentProcessor,
    analyzer: Arc<dyn DocumentAnalyzer>,
    renderer: Arc<dyn ReportRenderer>,
    normalization: Option<NormalizationConfig>,
}

impl DueDiligencePipeline {
    pub fn new(
        processor: DocumentProcessor,
        analyzer: Arc<dyn DocumentAnalyzer>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            processor,
            analyzer,
            renderer,
            normalization: None,
        }
    }

    /// Normalize extracted text before it reaches the analyzer.
    pub fn with_normalization(mut self, normalization: Option<NormalizationConfig>) -> Self {
        self.normalization = normalization;
        self
    }

    /// Run all stages for `reference`, calling `on_stage` as each one completes.
    ///
    /// # Errors
    ///
    /// Extraction errors are returned unchanged. Analyzer failures become
    /// `DossierError::Analysis` and renderer failures `DossierError::Report`, with
    /// the original error as source. No stage runs after a failed one.
    pub async fn run<F>(
        &self,
        reference: DocumentReference,
        options: &ReportOptions,
        mut on_stage: F,
    ) -> Result<DueDiligenceReport>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let resolved = self.processor.locator().resolve(reference).await?;
        let format = resolved.format;
        let raw = self.processor.extract(resolved).await?;

        let text = match &self.normalization {
            Some(config) => normalize(&raw, config),
            None => raw,
        };
        let text_chars = text.chars().count();
        on_stage(PipelineStage::Extracting);

        tracing::debug!(analyzer = self.analyzer.name(), chars = text_chars, "analyzing document");
        let findings = self
            .analyzer
            .analyze(&text)
            .await
            .map_err(|e| DossierError::analysis_with_source(format!("{} failed", self.analyzer.name()), e))?;
        on_stage(PipelineStage::Analyzing);

        let report = self
            .renderer
            .render(&findings, options)
            .await
            .map_err(|e| DossierError::report_with_source(format!("{} failed", self.renderer.name()), e))?;
        on_stage(PipelineStage::Rendering);

        on_stage(PipelineStage::Complete);

        Ok(DueDiligenceReport {
            format,
            text_chars,
            report,
        })
    }
}

impl std::fmt::Debug for DueDiligencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DueDiligencePipeline")
            .field("processor", &self.processor)
            .field("analyzer", &self.analyzer.name())
            .field("renderer", &self.renderer.name())
            .field("normalization", &self.normalization)
            .finish()
    }
}
