//! Report structures produced by an analysis run

use crate::input::text_extractor::UNSUPPORTED_FORMAT_MESSAGE;
use crate::llm::{AnalysisResult, KeywordList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shown in front of model call failures.
pub const API_ERROR_PREFIX: &str = "API Error: ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub keywords: KeywordOutcome,

    /// One entry per resume, in input order
    pub resumes: Vec<ResumeReport>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub job_description_chars: usize,
    pub processing_time_ms: u64,
    pub matcher_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum KeywordOutcome {
    Extracted(KeywordList),
    Failed(String),
}

impl KeywordOutcome {
    pub fn keywords(&self) -> Option<&KeywordList> {
        match self {
            KeywordOutcome::Extracted(keywords) => Some(keywords),
            KeywordOutcome::Failed(_) => None,
        }
    }

    /// Lines to show under the keywords heading. A failure is a single line.
    pub fn display_entries(&self) -> Vec<String> {
        match self {
            KeywordOutcome::Extracted(keywords) => keywords.as_slice().to_vec(),
            KeywordOutcome::Failed(error) => vec![format!("{}{}", API_ERROR_PREFIX, error)],
        }
    }
}

impl fmt::Display for KeywordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_entries().join(", "))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeReport {
    pub name: String,
    pub outcome: ResumeOutcome,

    /// Character count of the extracted text, when extraction succeeded
    pub text_chars: Option<usize>,
    pub preview: Option<String>,
}

impl ResumeReport {
    pub fn new(name: impl Into<String>, outcome: ResumeOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
            text_chars: None,
            preview: None,
        }
    }

    pub fn with_text(mut self, text: &str, preview_chars: usize) -> Self {
        self.text_chars = Some(text.chars().count());
        self.preview = Some(truncate_text(text, preview_chars));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ResumeOutcome {
    Analyzed(AnalysisResult),
    Unsupported,
    ExtractionFailed(String),
    ApiFailed(String),
    /// Not attempted because keyword extraction failed
    Skipped,
}

impl ResumeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResumeOutcome::Analyzed(_))
    }
}

impl fmt::Display for ResumeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeOutcome::Analyzed(result) => write!(f, "{}", result),
            ResumeOutcome::Unsupported => f.write_str(UNSUPPORTED_FORMAT_MESSAGE),
            ResumeOutcome::ExtractionFailed(error) => write!(f, "Could not read resume: {}", error),
            ResumeOutcome::ApiFailed(error) => write!(f, "{}{}", API_ERROR_PREFIX, error),
            ResumeOutcome::Skipped => f.write_str("Not analyzed: keyword extraction failed."),
        }
    }
}

impl AnalysisReport {
    pub fn analyzed_count(&self) -> usize {
        self.resumes.iter().filter(|r| r.outcome.is_success()).count()
    }
}

/// Truncate text to at most `max_chars` characters on a word boundary, with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let truncated = &text[..cut];
            let end = truncated.rfind(char::is_whitespace).unwrap_or(cut);
            format!("{}...", truncated[..end].trim_end())
        }
    }
}
