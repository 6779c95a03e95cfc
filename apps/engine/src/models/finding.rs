use serde::{Deserialize, Serialize};

/// Severity of a finding. Variant order is the presentation order: sorting
/// findings by severity puts critical issues first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
    Info,
}

/// Reference back to the originating document location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub section: Option<String>,
    pub entry_index: Option<usize>,
}

impl Location {
    pub fn entry(index: usize) -> Self {
        Self {
            section: None,
            entry_index: Some(index),
        }
    }

    pub fn section(name: &str) -> Self {
        Self {
            section: Some(name.to_string()),
            entry_index: None,
        }
    }
}

/// One emitted issue or strength. Produced once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Finding {
    pub fn new(severity: Severity, category: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}
