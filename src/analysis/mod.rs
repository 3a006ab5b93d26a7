//! Requirements analysis.
//!
//! Turns a free-text deployment request into structured infrastructure
//! recommendations. The built-in strategy is a deterministic keyword
//! classifier; other strategies plug in behind the [`Analyzer`] trait.
//!
//! ## Features
//!
//! - Keyword classification into six requirement categories
//! - Heuristic resource estimation for the detected service
//! - Resource specification compatibility checks

mod keyword;
mod resources;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use keyword::{analyze, KeywordAnalyzer, BASE_CONFIDENCE, CONFIDENCE_CAP, CONFIDENCE_STEP};
pub use resources::{estimate_resources, validate_resources, CompatibilityReport, ResourceSpec};

use crate::core::{AnalyzerConfig, Error, Result};

/// Names accepted by `analyzer.strategy`.
pub const STRATEGIES: &[&str] = &["keyword"];

/// Trait for requirements analysis strategies.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze a free-text requirement.
    ///
    /// Empty or whitespace-only text is a validation error.
    async fn analyze(&self, text: &str) -> Result<RequirementAnalysisResult>;

    /// Get the strategy name.
    fn name(&self) -> &str;
}

/// Build the analyzer selected in configuration.
pub fn build_analyzer(config: &AnalyzerConfig) -> Result<Arc<dyn Analyzer>> {
    match config.strategy.as_str() {
        "keyword" => Ok(Arc::new(KeywordAnalyzer::new())),
        other => Err(Error::validation(
            "analyzer.strategy",
            format!("unknown strategy '{other}' (expected one of: {})", STRATEGIES.join(", ")),
        )),
    }
}

/// A recommended component with its specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component type (e.g. "chat-service", "database", "dependency")
    #[serde(rename = "type")]
    pub kind: String,

    /// Component name (e.g. "librechat", "postgresql")
    pub name: String,

    /// Key-ordered specification map
    #[serde(default)]
    pub specification: BTreeMap<String, Value>,
}

impl Component {
    /// Create a component with an empty specification.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self { kind: kind.into(), name: name.into(), specification: BTreeMap::new() }
    }

    /// Add a specification entry.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.specification.insert(key.to_string(), value.into());
        self
    }
}

/// Structured output of a requirements analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementAnalysisResult {
    pub infrastructure_components: Vec<Component>,
    pub compute_requirements: Vec<Component>,
    pub storage_requirements: Vec<Component>,
    pub networking_requirements: Vec<Component>,
    pub security_requirements: Vec<Component>,
    pub monitoring_requirements: Vec<Component>,

    /// Confidence in [0, 1]
    pub confidence_score: f64,

    pub suggestions: Vec<String>,
}

impl RequirementAnalysisResult {
    /// Number of categories with at least one recommendation.
    pub fn matched_categories(&self) -> usize {
        [
            &self.infrastructure_components,
            &self.compute_requirements,
            &self.storage_requirements,
            &self.networking_requirements,
            &self.security_requirements,
            &self.monitoring_requirements,
        ]
        .iter()
        .filter(|components| !components.is_empty())
        .count()
    }

    /// Render a short human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let sections = [
            ("Infrastructure", &self.infrastructure_components),
            ("Compute", &self.compute_requirements),
            ("Storage", &self.storage_requirements),
            ("Networking", &self.networking_requirements),
            ("Security", &self.security_requirements),
            ("Monitoring", &self.monitoring_requirements),
        ];

        for (title, components) in sections {
            if components.is_empty() {
                continue;
            }
            out.push_str(&format!("{title}:\n"));
            for component in components {
                out.push_str(&format!("  - {} ({})\n", component.name, component.kind));
            }
        }

        out.push_str(&format!("Confidence: {:.2}\n", self.confidence_score));

        if !self.suggestions.is_empty() {
            out.push_str("Suggestions:\n");
            for suggestion in &self.suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        out
    }
}
