//! Review context report types
//!
//! The report is the machine-readable contract with the calling workflow:
//! either the review context is fully resolved, or the report carries the
//! structured questions a human must answer before the review can start.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of review context resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Review type and targets were determined unambiguously
    Resolved,
    /// One or more questions must be answered first
    NeedsInput,
    /// The structure document could not be loaded
    Error,
}

/// The supported review types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    Requirement,
    Design,
    Plan,
    Code,
    Generic,
}

impl ReviewType {
    /// All five review types, in presentation order
    pub const ALL: [ReviewType; 5] = [
        ReviewType::Requirement,
        ReviewType::Design,
        ReviewType::Plan,
        ReviewType::Code,
        ReviewType::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewType::Requirement => "requirement",
            ReviewType::Design => "design",
            ReviewType::Plan => "plan",
            ReviewType::Code => "code",
            ReviewType::Generic => "generic",
        }
    }

    /// Option strings for a `type` question
    pub fn all_names() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requirement" => Ok(ReviewType::Requirement),
            "design" => Ok(ReviewType::Design),
            "plan" => Ok(ReviewType::Plan),
            "code" => Ok(ReviewType::Code),
            "generic" => Ok(ReviewType::Generic),
            other => Err(format!(
                "unknown review type '{}' (valid: {})",
                other,
                ReviewType::all_names().join(", ")
            )),
        }
    }
}

/// Which piece of input a question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKey {
    Type,
    Feature,
    Target,
}

/// One structured question for the caller to present to a human
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The missing input this question asks for
    pub key: QuestionKey,
    /// Human-readable prompt
    pub message: String,
    /// Enumerated valid answers, empty when free-form
    pub options: Vec<String>,
}

impl Question {
    pub fn new(key: QuestionKey, message: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            key,
            message: message.into(),
            options,
        }
    }
}

/// The full review context report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub status: ReviewStatus,
    pub has_doc_structure: bool,
    #[serde(rename = "type")]
    pub review_type: Option<ReviewType>,
    pub target_files: Vec<String>,
    pub features: Vec<String>,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewReport {
    /// An error report for a missing or unreadable structure document
    pub fn structure_error(message: impl Into<String>) -> Self {
        Self {
            status: ReviewStatus::Error,
            has_doc_structure: false,
            review_type: None,
            target_files: Vec::new(),
            features: Vec::new(),
            questions: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_type_round_trip() {
        for t in ReviewType::ALL {
            assert_eq!(t.as_str().parse::<ReviewType>().unwrap(), t);
        }
        assert!("bogus".parse::<ReviewType>().is_err());
    }

    #[test]
    fn test_report_serializes_with_renamed_type_field() {
        let report = ReviewReport {
            status: ReviewStatus::NeedsInput,
            has_doc_structure: true,
            review_type: Some(ReviewType::Code),
            target_files: vec!["src/main.rs".to_string()],
            features: Vec::new(),
            questions: vec![Question::new(QuestionKey::Type, "pick one", ReviewType::all_names())],
            error: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "needs_input");
        assert_eq!(json["type"], "code");
        assert_eq!(json["questions"][0]["key"], "type");
        assert!(json.get("error").is_none());
    }
}
