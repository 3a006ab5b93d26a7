//! Keyword-based requirements analyzer.
//!
//! Each requirement category owns an ordered list of rules. The text is
//! lower-cased once; within a category the first rule with a trigger found
//! in the text wins, and categories match independently of each other.
//!
//! Triggers match as substrings, except the short ones in [`WHOLE_WORD`],
//! which must appear as a separate word ("rapid" is not "api").

use async_trait::async_trait;
use once_cell::sync::Lazy;

use super::resources::estimate_resources;
use super::{Analyzer, Component, RequirementAnalysisResult};
use crate::core::{Error, Result};

/// Confidence with no matched category.
pub const BASE_CONFIDENCE: f64 = 0.7;

/// Confidence added per matched category.
pub const CONFIDENCE_STEP: f64 = 0.05;

/// Upper bound on the confidence score.
pub const CONFIDENCE_CAP: f64 = 0.99;

/// Triggers that only match whole words.
pub const WHOLE_WORD: &[&str] = &["api", "auth", "sso", "s3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Infrastructure,
    Compute,
    Storage,
    Networking,
    Security,
    Monitoring,
}

struct Rule {
    triggers: &'static [&'static str],
    components: Vec<Component>,
    suggestion: Option<&'static str>,
}

struct CategoryRules {
    category: Category,
    rules: Vec<Rule>,
    // Suggested when nothing in the category matched.
    missing: &'static str,
}

fn rule(triggers: &'static [&'static str], components: Vec<Component>) -> Rule {
    Rule { triggers, components, suggestion: None }
}

fn dependency(name: &str, role: &str, required: bool) -> Component {
    Component::new("dependency", name).with("role", role).with("required", required)
}

static RULES: Lazy<Vec<CategoryRules>> = Lazy::new(|| {
    vec![
        CategoryRules {
            category: Category::Infrastructure,
            rules: vec![
                Rule {
                    triggers: &["chat"],
                    components: vec![
                        Component::new("chat-service", "librechat")
                            .with("template", "librechat")
                            .with("port", 3080),
                        dependency("postgresql", "database", true),
                        dependency("redis", "cache", false),
                        dependency("vector-db", "embeddings", false),
                    ],
                    suggestion: Some(
                        "Pair the chat service with a vector database for retrieval-augmented answers",
                    ),
                },
                Rule {
                    triggers: &["mcp"],
                    components: vec![
                        Component::new("mcp-server", "mcp-server")
                            .with("template", "mcp-filesystem")
                            .with("transport", "stdio"),
                        dependency("storage", "storage", false),
                    ],
                    suggestion: Some("Restrict the MCP server's tool permissions to what the agents need"),
                },
                Rule {
                    triggers: &["llm", "inference", "model serving"],
                    components: vec![
                        Component::new("model-serving", "ollama")
                            .with("template", "ollama")
                            .with("port", 11434),
                        dependency("gpu-node", "compute", true),
                        dependency("model-storage", "storage", true),
                    ],
                    suggestion: Some("Pin model versions so deployments are reproducible"),
                },
                Rule {
                    triggers: &["website", "web app", "web application"],
                    components: vec![
                        Component::new("web-application", "web-application")
                            .with("template", "nginx-web")
                            .with("port", 80),
                        dependency("postgresql", "database", true),
                        dependency("load-balancer", "networking", false),
                    ],
                    suggestion: Some("Serve static assets through a CDN or cache layer"),
                },
                Rule {
                    triggers: &["api"],
                    components: vec![Component::new("api-service", "api-service")
                        .with("template", "basic")
                        .with("port", 8080)],
                    suggestion: Some("Publish an OpenAPI document for the service"),
                },
            ],
            missing: "Describe the service to deploy (chat, MCP server, model serving, web application or API)",
        },
        CategoryRules {
            category: Category::Compute,
            rules: vec![
                rule(
                    &["gpu"],
                    vec![Component::new("gpu-node", "gpu-node")
                        .with("gpu_required", true)
                        .with("cpu_cores", 4.0)
                        .with("memory_gb", 16.0)],
                ),
                rule(
                    &["kubernetes", "k8s"],
                    vec![Component::new("kubernetes-cluster", "kubernetes")
                        .with("nodes", 3)
                        .with("cpu_cores", 2.0)
                        .with("memory_gb", 4.0)],
                ),
                rule(
                    &["high availability", "production"],
                    vec![Component::new("ha-compute", "replicated-nodes")
                        .with("min_instances", 2)
                        .with("max_instances", 4)
                        .with("auto_scaling", true)],
                ),
                rule(
                    &["virtual machine"],
                    vec![Component::new("vm", "virtual-machine")
                        .with("cpu_cores", 2.0)
                        .with("memory_gb", 4.0)],
                ),
            ],
            missing: "Specify compute needs (GPU, Kubernetes, high availability) to size the nodes",
        },
        CategoryRules {
            category: Category::Storage,
            rules: vec![
                rule(
                    &["postgres"],
                    vec![Component::new("database", "postgresql")
                        .with("engine", "postgresql")
                        .with("storage_gb", 50.0)],
                ),
                rule(
                    &["mysql"],
                    vec![Component::new("database", "mysql")
                        .with("engine", "mysql")
                        .with("storage_gb", 50.0)],
                ),
                rule(
                    &["mongo"],
                    vec![Component::new("database", "mongodb")
                        .with("engine", "mongodb")
                        .with("storage_gb", 50.0)],
                ),
                rule(
                    &["redis"],
                    vec![Component::new("cache", "redis")
                        .with("engine", "redis")
                        .with("memory_gb", 2.0)],
                ),
                rule(
                    &["minio", "object storage", "s3"],
                    vec![Component::new("object-storage", "minio")
                        .with("engine", "minio")
                        .with("storage_gb", 100.0)],
                ),
                rule(
                    &["database"],
                    vec![Component::new("database", "postgresql")
                        .with("engine", "postgresql")
                        .with("storage_gb", 50.0)],
                ),
                rule(
                    &["backup"],
                    vec![Component::new("backup", "scheduled-backup")
                        .with("schedule", "daily")
                        .with("retention_days", 7)],
                ),
            ],
            missing: "State data storage needs (database engine, object storage, backups)",
        },
        CategoryRules {
            category: Category::Networking,
            rules: vec![
                rule(&["load balancer"], vec![Component::new("load-balancer", "load-balancer").with("algorithm", "round-robin")]),
                rule(&["ingress"], vec![Component::new("ingress", "reverse-proxy").with("port", 443)]),
                rule(&["domain"], vec![Component::new("dns", "dns-record").with("record_type", "A")]),
                rule(&["vpn"], vec![Component::new("vpn", "wireguard").with("port", 51820)]),
            ],
            missing: "Mention how the service is reached (domain, ingress, load balancer, VPN)",
        },
        CategoryRules {
            category: Category::Security,
            rules: vec![
                rule(
                    &["ssl", "tls", "https"],
                    vec![Component::new("tls-certificate", "tls").with("issuer", "letsencrypt")],
                ),
                rule(&["sso", "auth", "authentication", "oauth"], vec![Component::new("authentication", "oidc").with("protocol", "oidc")]),
                rule(&["firewall"], vec![Component::new("firewall", "firewall").with("default_policy", "deny")]),
                rule(&["secret"], vec![Component::new("secret-store", "vault").with("engine", "kv")]),
            ],
            missing: "Add security requirements such as TLS, authentication or firewall rules",
        },
        CategoryRules {
            category: Category::Monitoring,
            rules: vec![
                rule(&["prometheus"], vec![Component::new("prometheus", "prometheus").with("scrape_interval", "15s")]),
                rule(&["grafana"], vec![Component::new("grafana", "grafana").with("port", 3000)]),
                rule(&["monitor"], vec![Component::new("prometheus", "prometheus").with("scrape_interval", "15s")]),
                rule(&["alert"], vec![Component::new("alertmanager", "alertmanager").with("port", 9093)]),
                rule(&["logging"], vec![Component::new("log-aggregation", "loki").with("retention_days", 14)]),
            ],
            missing: "Consider monitoring and alerting (Prometheus, Grafana) for the deployment",
        },
    ]
});

/// Analyze a requirement with the built-in keyword table.
///
/// Pure: the result depends only on `text`.
pub fn analyze(text: &str) -> Result<RequirementAnalysisResult> {
    if text.trim().is_empty() {
        return Err(Error::validation("text", "requirements text required"));
    }

    let lowered = text.to_lowercase();
    let words: Vec<&str> =
        lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
    let mut result = RequirementAnalysisResult {
        infrastructure_components: Vec::new(),
        compute_requirements: Vec::new(),
        storage_requirements: Vec::new(),
        networking_requirements: Vec::new(),
        security_requirements: Vec::new(),
        monitoring_requirements: Vec::new(),
        confidence_score: 0.0,
        suggestions: Vec::new(),
    };

    let mut matched = 0usize;
    for category in RULES.iter() {
        let hit = category
            .rules
            .iter()
            .find(|candidate| candidate.triggers.iter().any(|trigger| occurs(&lowered, &words, trigger)));

        let Some(hit) = hit else {
            result.suggestions.push(category.missing.to_string());
            continue;
        };

        matched += 1;
        let mut components = hit.components.clone();
        if category.category == Category::Infrastructure {
            let estimate = estimate_resources(&lowered);
            if let Some(service) = components.first_mut() {
                service.specification.insert("resource_requirements".to_string(), estimate.to_value());
            }
        }
        if let Some(suggestion) = hit.suggestion {
            result.suggestions.push(suggestion.to_string());
        }

        let slot = match category.category {
            Category::Infrastructure => &mut result.infrastructure_components,
            Category::Compute => &mut result.compute_requirements,
            Category::Storage => &mut result.storage_requirements,
            Category::Networking => &mut result.networking_requirements,
            Category::Security => &mut result.security_requirements,
            Category::Monitoring => &mut result.monitoring_requirements,
        };
        *slot = components;
    }

    result.confidence_score = confidence(matched);
    tracing::debug!(matched, confidence = result.confidence_score, "Analyzed requirements");
    Ok(result)
}

fn occurs(lowered: &str, words: &[&str], trigger: &str) -> bool {
    if WHOLE_WORD.contains(&trigger) {
        words.contains(&trigger)
    } else {
        lowered.contains(trigger)
    }
}

/// Confidence for `matched` categories, rounded to two decimals.
fn confidence(matched: usize) -> f64 {
    let raw = (matched as f64).mul_add(CONFIDENCE_STEP, BASE_CONFIDENCE).min(CONFIDENCE_CAP);
    (raw * 100.0).round() / 100.0
}

/// The keyword table as an [`Analyzer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Analyzer for KeywordAnalyzer {
    async fn analyze(&self, text: &str) -> Result<RequirementAnalysisResult> {
        analyze(text)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
