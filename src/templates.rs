//! Catalog of deployable service templates.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Template category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    ChatServices,
    McpServers,
    Databases,
    ModelServing,
    WebApplications,
    Monitoring,
    Networking,
    Storage,
    Base,
}

impl TemplateCategory {
    pub const ALL: [Self; 9] = [
        Self::ChatServices,
        Self::McpServers,
        Self::Databases,
        Self::ModelServing,
        Self::WebApplications,
        Self::Monitoring,
        Self::Networking,
        Self::Storage,
        Self::Base,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChatServices => "chat-services",
            Self::McpServers => "mcp-servers",
            Self::Databases => "databases",
            Self::ModelServing => "model-serving",
            Self::WebApplications => "web-applications",
            Self::Monitoring => "monitoring",
            Self::Networking => "networking",
            Self::Storage => "storage",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == wanted).ok_or_else(|| {
            Error::validation("category", format!("unknown template category '{s}'"))
        })
    }
}

/// Template lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    Active,
    Beta,
    Deprecated,
    Archived,
}

/// A deployable template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub status: TemplateStatus,
}

impl Template {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        category: TemplateCategory,
        status: TemplateStatus,
    ) -> Self {
        Self {
            template_id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            status,
        }
    }
}

static CATALOG: Lazy<Vec<Template>> = Lazy::new(|| {
    use TemplateCategory as C;
    use TemplateStatus as S;

    vec![
        Template::new("librechat", "LibreChat", "Chat interface with LLM support", C::ChatServices, S::Active),
        Template::new("postgresql", "PostgreSQL Database", "PostgreSQL database server", C::Databases, S::Active),
        Template::new(
            "mcp-filesystem",
            "MCP Filesystem Server",
            "Model Context Protocol server exposing a sandboxed filesystem",
            C::McpServers,
            S::Beta,
        ),
        Template::new("ollama", "Ollama", "Local LLM model serving with GPU support", C::ModelServing, S::Active),
        Template::new("nginx-web", "Nginx Web Application", "Static site or reverse-proxied web app", C::WebApplications, S::Active),
        Template::new(
            "prometheus-grafana",
            "Prometheus + Grafana",
            "Metrics collection with dashboards and alerting",
            C::Monitoring,
            S::Active,
        ),
        Template::new("basic", "Basic Service", "Single container service with a health check", C::Base, S::Active),
    ]
});

/// List templates, optionally restricted to one category.
pub fn list_templates(category: Option<TemplateCategory>) -> Vec<Template> {
    CATALOG.iter().filter(|t| category.map_or(true, |c| t.category == c)).cloned().collect()
}

/// Look up a template by id.
pub fn get_template(id: &str) -> Result<Template> {
    CATALOG
        .iter()
        .find(|t| t.template_id == id)
        .cloned()
        .ok_or_else(|| Error::template_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_all() {
        let templates = list_templates(None);
        assert_eq!(templates.len(), 7);
        assert_eq!(templates[0].template_id, "librechat");
    }

    #[test]
    fn test_filter_by_category() {
        let dbs = list_templates(Some(TemplateCategory::Databases));
        assert_eq!(dbs.len(), 1);
        assert_eq!(dbs[0].template_id, "postgresql");
        assert!(list_templates(Some(TemplateCategory::Networking)).is_empty());
    }

    #[test]
    fn test_get_template() {
        assert_eq!(get_template("ollama").unwrap().category, TemplateCategory::ModelServing);
        assert!(get_template("wordpress").unwrap_err().is_not_found());
    }

    #[test]
    fn test_category_parse_and_wire_format() {
        assert_eq!("chat-services".parse::<TemplateCategory>().unwrap(), TemplateCategory::ChatServices);
        assert_eq!("bogus".parse::<TemplateCategory>().unwrap_err().field(), Some("category"));
        let json = serde_json::to_string(&TemplateCategory::McpServers).unwrap();
        assert_eq!(json, "\"mcp-servers\"");
    }

    #[test]
    fn test_analyzer_templates_exist() {
        for id in ["librechat", "mcp-filesystem", "ollama", "nginx-web", "basic"] {
            assert!(get_template(id).is_ok(), "missing template {id}");
        }
    }
}
