//! Lecture data types
//!
//! Plain value records produced by the scrapers, the fixed set of lecture
//! categories, and the validation step applied to detail-aggregation input.

use crate::LookupError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One lecture as listed on the syllabus page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LectureNameUrl {
    /// Display text of the lecture link
    pub name: String,

    /// Absolute URL of the lecture's detail page
    pub url: String,
}

impl LectureNameUrl {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One class meeting from a lecture's detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureDetail {
    /// 1-based position of the session within the lecture
    pub number: u32,

    /// Date label as printed on the page, e.g. "4/22 [2]"
    pub date: String,

    /// Session heading
    pub theme: String,

    /// Free-text description; may be empty
    pub content: String,
}

/// Session records keyed by lecture name
pub type LectureDetails = HashMap<String, Vec<LectureDetail>>;

/// Lecture groupings used by the syllabus listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LectureCategory {
    General,
    Introduction,
    Basic,
    Specialized,
}

impl LectureCategory {
    /// Every category, in listing-page order
    pub const ALL: [LectureCategory; 4] = [
        Self::General,
        Self::Introduction,
        Self::Basic,
        Self::Specialized,
    ];

    /// Identifier used in configuration, on the command line and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Introduction => "introduction",
            Self::Basic => "basic",
            Self::Specialized => "specialized",
        }
    }

    /// CSS selector of the listing-page table holding this category's lectures
    pub fn section_selector(&self) -> &'static str {
        match self {
            Self::General => "div#tab-general table",
            Self::Introduction => "div#tab-introduction table",
            Self::Basic => "div#tab-basic table",
            Self::Specialized => "div#tab-specialized table",
        }
    }

    /// Heading used in generated summaries
    pub fn title(&self) -> &'static str {
        match self {
            Self::General => "General Education",
            Self::Introduction => "Introductory Courses",
            Self::Basic => "Basic Courses",
            Self::Specialized => "Specialized Courses",
        }
    }
}

impl fmt::Display for LectureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LectureCategory {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| LookupError::UnknownCategory(s.to_string()))
    }
}

/// An element of a detail-aggregation batch after validation
///
/// Batches can come from untrusted sources such as a JSON file, so each
/// element is classified before any fetch happens. Invalid elements are
/// skipped by the pipeline without failing the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LectureInput {
    Valid(LectureNameUrl),
    Invalid { reason: String },
}

impl LectureInput {
    /// Classifies a single JSON value as a lecture entry
    ///
    /// Only objects carrying string `name` and `url` fields are valid.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Invalid {
                reason: format!("expected an object, got {}", json_kind(value)),
            };
        };

        let name = object.get("name").and_then(Value::as_str);
        let url = object.get("url").and_then(Value::as_str);

        match (name, url) {
            (Some(name), Some(url)) => Self::Valid(LectureNameUrl::new(name, url)),
            (None, _) => Self::Invalid {
                reason: "missing string field 'name'".to_string(),
            },
            (_, None) => Self::Invalid {
                reason: "missing string field 'url'".to_string(),
            },
        }
    }

    /// Classifies a whole JSON batch
    ///
    /// Anything other than an array holds no lecture entries at all, so it
    /// yields an empty batch rather than an error.
    pub fn classify_batch(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().map(Self::from_json).collect(),
            other => {
                tracing::debug!("Lecture batch is {}, not an array", json_kind(other));
                Vec::new()
            }
        }
    }
}

impl From<LectureNameUrl> for LectureInput {
    fn from(lecture: LectureNameUrl) -> Self {
        Self::Valid(lecture)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
