//! Workflow item types.
//!
//! Status, priority and size are closed sets. Raw strings coming from the
//! wire are parsed into them at the boundary so the store only ever sees
//! valid values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Board column / lifecycle stage of an item.
///
/// The declaration order is the fixed column order of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Review,
    Ready,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl Status {
    /// All statuses in column order.
    pub const ALL: [Self; 4] = [Self::Review, Self::Ready, Self::InProgress, Self::Done];

    /// Display label, identical to the wire spelling.
    pub fn label(self) -> &'static str {
        match self {
            Self::Review => "Review",
            Self::Ready => "Ready",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

/// Item priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// T-shirt size of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

// Lenient parsing: case, '-' and '_' are ignored so "in_progress" and
// "IN-PROGRESS" both map to InProgress.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', '_'], " ")
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "review" => Ok(Self::Review),
            "ready" => Ok(Self::Ready),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(Error::validation(
                "status",
                format!("'{s}' is not one of Review, Ready, In Progress, Done"),
            )),
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(Error::validation("priority", format!("'{s}' is not one of High, Medium, Low"))),
        }
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(Error::validation("size", format!("'{s}' is not one of Small, Medium, Large"))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task card tracked on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowItem {
    /// Opaque unique identifier
    pub id: String,

    /// Short title
    pub title: String,

    /// Current column
    pub status: Status,

    pub priority: Priority,

    pub size: Size,

    /// Estimate in days
    pub estimate: u32,

    #[serde(default)]
    pub description: String,

    /// Display-only assignee identifiers
    #[serde(default)]
    pub assignees: Vec<String>,
}

impl WorkflowItem {
    /// Create an item with the required fields; the rest start empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: Status,
        priority: Priority,
        size: Size,
        estimate: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
            priority,
            size,
            estimate,
            description: String::new(),
            assignees: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the assignees.
    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = assignees.into_iter().map(Into::into).collect();
        self
    }
}

/// A partial update of a workflow item.
///
/// `estimate` is signed so a negative value can reach validation and be
/// rejected with a field-level error instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub size: Option<Size>,
    pub estimate: Option<i64>,
    pub description: Option<String>,
    pub assignees: Option<Vec<String>>,
}

impl ItemPatch {
    /// A patch that only changes the status.
    pub fn status(status: Status) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    /// A patch that only changes the estimate.
    pub fn estimate(estimate: i64) -> Self {
        Self { estimate: Some(estimate), ..Self::default() }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check field values without touching any item.
    pub fn validate(&self) -> Result<()> {
        if let Some(estimate) = self.estimate {
            if estimate < 0 {
                return Err(Error::validation(
                    "estimate",
                    format!("must be a non-negative number of days, got {estimate}"),
                ));
            }
            if u32::try_from(estimate).is_err() {
                return Err(Error::validation("estimate", format!("{estimate} days is out of range")));
            }
        }
        Ok(())
    }

    /// Merge the patch over `item`. Call `validate` first.
    pub(crate) fn apply_to(&self, item: &mut WorkflowItem) {
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(size) = self.size {
            item.size = size;
        }
        if let Some(estimate) = self.estimate.and_then(|e| u32::try_from(e).ok()) {
            item.estimate = estimate;
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(assignees) = &self.assignees {
            item.assignees.clone_from(assignees);
        }
    }
}

/// Wire form of [`ItemPatch`], with enum fields still as raw strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemPatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl TryFrom<ItemPatchRequest> for ItemPatch {
    type Error = Error;

    fn try_from(req: ItemPatchRequest) -> Result<Self> {
        Ok(Self {
            title: req.title,
            status: req.status.as_deref().map(str::parse::<Status>).transpose()?,
            priority: req.priority.as_deref().map(str::parse::<Priority>).transpose()?,
            size: req.size.as_deref().map(str::parse::<Size>).transpose()?,
            estimate: req.estimate,
            description: req.description,
            assignees: req.assignees,
        })
    }
}
