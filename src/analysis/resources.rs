//! Resource estimation and compatibility checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest CPU request a typical node can satisfy.
pub const MAX_NODE_CPU_CORES: f64 = 32.0;

/// Largest memory request (GB) a typical node can satisfy.
pub const MAX_NODE_MEMORY_GB: f64 = 256.0;

/// Resource requirements of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub cpu_cores: f64,
    pub memory_gb: f64,
    pub storage_gb: f64,
    #[serde(default)]
    pub gpu_required: bool,
    /// Target platform, if known ("basic", "proxmox", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ResourceSpec {
    /// JSON form used inside component specifications.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for ResourceSpec {
    fn default() -> Self {
        Self { cpu_cores: 1.0, memory_gb: 2.0, storage_gb: 20.0, gpu_required: false, platform: None }
    }
}

/// Outcome of [`validate_resources`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub compatible: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

const AI_WORDS: &[&str] = &["llm", "model", "ai", "ml", "inference", "gpu"];
const DATABASE_WORDS: &[&str] = &["database", "db", "postgres", "postgresql", "mysql", "mongodb"];
const SCALE_WORDS: &[&str] = &["high", "production", "scale", "scalable"];

/// Estimate resources from a requirement description.
///
/// Starts from a small baseline and raises it for AI and database
/// workloads; production-scale wording multiplies the result. Matching is
/// on whole words so "email" does not count as "ai".
pub fn estimate_resources(text: &str) -> ResourceSpec {
    let lowered = text.to_lowercase();
    let words: Vec<&str> =
        lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();

    let mut spec = ResourceSpec::default();

    if contains_any(&words, AI_WORDS) {
        spec.cpu_cores = spec.cpu_cores.max(4.0);
        spec.memory_gb = spec.memory_gb.max(8.0);
        spec.storage_gb = spec.storage_gb.max(100.0);
        spec.gpu_required = true;
    }

    if contains_any(&words, DATABASE_WORDS) {
        spec.cpu_cores = spec.cpu_cores.max(2.0);
        spec.memory_gb = spec.memory_gb.max(4.0);
        spec.storage_gb = spec.storage_gb.max(50.0);
    }

    if contains_any(&words, SCALE_WORDS) {
        spec.cpu_cores *= 2.0;
        spec.memory_gb *= 2.0;
        spec.storage_gb *= 1.5;
    }

    spec
}

fn contains_any(words: &[&str], candidates: &[&str]) -> bool {
    words.iter().any(|word| candidates.iter().any(|candidate| candidate == word))
}

/// Check a resource specification against typical node limits.
pub fn validate_resources(spec: &ResourceSpec) -> CompatibilityReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for (field, value) in
        [("cpu_cores", spec.cpu_cores), ("memory_gb", spec.memory_gb), ("storage_gb", spec.storage_gb)]
    {
        if value <= 0.0 || !value.is_finite() {
            issues.push(format!("{field} must be a positive number"));
        }
    }

    if spec.cpu_cores > MAX_NODE_CPU_CORES {
        issues.push("CPU requirement exceeds typical node capacity".to_string());
    }

    if spec.memory_gb > MAX_NODE_MEMORY_GB {
        issues.push("Memory requirement exceeds typical node capacity".to_string());
    }

    if spec.gpu_required && spec.platform.as_deref() == Some("basic") {
        warnings.push("GPU required but basic platform selected".to_string());
    }

    CompatibilityReport { compatible: issues.is_empty(), issues, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_estimate() {
        let spec = estimate_resources("a small internal tool");
        assert_eq!(spec, ResourceSpec::default());
    }

    #[test]
    fn test_database_estimate() {
        let spec = estimate_resources("LibreChat with PostgreSQL database");
        assert!((spec.cpu_cores - 2.0).abs() < f64::EPSILON);
        assert!((spec.storage_gb - 50.0).abs() < f64::EPSILON);
        assert!(!spec.gpu_required);
    }

    #[test]
    fn test_ai_production_estimate() {
        let spec = estimate_resources("production LLM serving");
        assert!(spec.gpu_required);
        assert!((spec.cpu_cores - 8.0).abs() < f64::EPSILON);
        assert!((spec.memory_gb - 16.0).abs() < f64::EPSILON);
        assert!((spec.storage_gb - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_whole_word_matching() {
        let spec = estimate_resources("send an email digest");
        assert!(!spec.gpu_required);
    }

    #[test]
    fn test_validate_within_limits() {
        let report = validate_resources(&ResourceSpec::default());
        assert!(report.compatible);
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_validate_over_capacity() {
        let spec = ResourceSpec { cpu_cores: 64.0, memory_gb: 512.0, ..ResourceSpec::default() };
        let report = validate_resources(&spec);
        assert!(!report.compatible);
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn test_validate_non_positive() {
        let spec = ResourceSpec { storage_gb: 0.0, ..ResourceSpec::default() };
        let report = validate_resources(&spec);
        assert!(!report.compatible);
        assert!(report.issues[0].contains("storage_gb"));
    }

    #[test]
    fn test_gpu_on_basic_platform_warns() {
        let spec = ResourceSpec {
            gpu_required: true,
            platform: Some("basic".to_string()),
            ..ResourceSpec::default()
        };
        let report = validate_resources(&spec);
        assert!(report.compatible);
        assert_eq!(report.warnings, vec!["GPU required but basic platform selected"]);
    }
}
