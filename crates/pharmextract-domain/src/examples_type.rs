//! Examples type - the document domain that selects prompt and few-shot data

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain of the submitted document
///
/// Each domain maps to its own task description and few-shot examples.
/// `Medical` is the default when a request names no domain or an unknown one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamplesType {
    /// Clinical and medical reports
    #[default]
    Medical,

    /// Financial news and filings
    Financial,

    /// Contracts and legal documents
    Legal,

    /// Pharmaceutical study and regulatory reports
    Pharmaceutical,
}

impl ExamplesType {
    /// All known domains
    pub const ALL: [ExamplesType; 4] = [
        ExamplesType::Medical,
        ExamplesType::Financial,
        ExamplesType::Legal,
        ExamplesType::Pharmaceutical,
    ];

    /// Get the domain key as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamplesType::Medical => "medical",
            ExamplesType::Financial => "financial",
            ExamplesType::Legal => "legal",
            ExamplesType::Pharmaceutical => "pharmaceutical",
        }
    }

    /// Parse a domain key, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "medical" => Some(ExamplesType::Medical),
            "financial" => Some(ExamplesType::Financial),
            "legal" => Some(ExamplesType::Legal),
            "pharmaceutical" => Some(ExamplesType::Pharmaceutical),
            _ => None,
        }
    }
}

impl fmt::Display for ExamplesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExamplesType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid examples type: {}", s))
    }
}
