//! Resume scoring against extracted job keywords

use crate::llm::client::{GenerativeModel, LlmError};
use crate::llm::keywords::KeywordList;
use crate::llm::prompts::PromptTemplates;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The model's reply, kept verbatim apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(String);

impl AnalysisResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct ResumeScorer<'a, M> {
    model: &'a M,
    templates: &'a PromptTemplates,
}

impl<'a, M: GenerativeModel> ResumeScorer<'a, M> {
    pub fn new(model: &'a M, templates: &'a PromptTemplates) -> Self {
        Self { model, templates }
    }

    pub async fn score(&self, keywords: &KeywordList, resume_text: &str) -> Result<AnalysisResult, LlmError> {
        let prompt = self
            .templates
            .render_resume_analysis(keywords.as_slice(), resume_text);
        debug!("Scoring prompt length: {}", prompt.len());

        let reply = self.model.generate(&prompt).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        info!("Received {} character analysis", reply.len());
        Ok(AnalysisResult::new(reply))
    }
}
