//! Keyword extraction from a job description

use crate::llm::client::{GenerativeModel, LlmError};
use crate::llm::prompts::PromptTemplates;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords in reply order. Duplicates and empty tokens are kept as returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    /// Splits a comma-separated reply, trimming each token.
    pub fn from_reply(reply: &str) -> Self {
        Self(reply.trim().split(',').map(|kw| kw.trim().to_string()).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for KeywordList {
    fn from(keywords: Vec<String>) -> Self {
        Self(keywords)
    }
}

impl fmt::Display for KeywordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

pub struct KeywordExtractor<'a, M> {
    model: &'a M,
    templates: &'a PromptTemplates,
}

impl<'a, M: GenerativeModel> KeywordExtractor<'a, M> {
    pub fn new(model: &'a M, templates: &'a PromptTemplates) -> Self {
        Self { model, templates }
    }

    pub async fn extract(&self, job_description: &str) -> Result<KeywordList, LlmError> {
        let prompt = self.templates.render_keyword_extraction(job_description);
        debug!("Keyword prompt length: {}", prompt.len());

        let reply = self.model.generate(&prompt).await?;
        let keywords = KeywordList::from_reply(&reply);

        info!("Extracted {} keywords with {}", keywords.len(), self.model.model_name());
        Ok(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedModel;

    #[test]
    fn test_split_and_trim() {
        let keywords = KeywordList::from_reply("  Rust,  Tokio ,gRPC , PostgreSQL\n");
        assert_eq!(keywords.as_slice(), &["Rust", "Tokio", "gRPC", "PostgreSQL"]);
    }

    #[test]
    fn test_split_matches_plain_comma_split() {
        let reply = "Python, , SQL,SQL ,  Data Modeling";
        let expected: Vec<String> = reply.split(',').map(|s| s.trim().to_string()).collect();
        assert_eq!(KeywordList::from_reply(reply).as_slice(), expected.as_slice());
    }

    #[test]
    fn test_no_dedup_or_case_folding() {
        let keywords = KeywordList::from_reply("AWS, aws, AWS");
        assert_eq!(keywords.as_slice(), &["AWS", "aws", "AWS"]);
    }

    #[test]
    fn test_non_comma_reply_is_single_keyword() {
        let keywords = KeywordList::from_reply("- Rust\n- Go");
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords.as_slice()[0], "- Rust\n- Go");
    }

    #[test]
    fn test_display_joins_with_comma_space() {
        let keywords = KeywordList::from(vec!["Rust".to_string(), "Kafka".to_string()]);
        assert_eq!(keywords.to_string(), "Rust, Kafka");
    }

    #[tokio::test]
    async fn test_extract_sends_job_description() {
        let model = ScriptedModel::new(vec![Ok("Rust, Kubernetes".to_string())]);
        let templates = PromptTemplates::default();

        let keywords = KeywordExtractor::new(&model, &templates)
            .extract("Platform engineer with Rust")
            .await
            .unwrap();

        assert_eq!(keywords.as_slice(), &["Rust", "Kubernetes"]);
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Platform engineer with Rust"));
    }

    #[tokio::test]
    async fn test_extract_propagates_model_error() {
        let model = ScriptedModel::new(vec![Err(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        })]);
        let templates = PromptTemplates::default();

        let err = KeywordExtractor::new(&model, &templates)
            .extract("anything")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Resource has been exhausted"));
    }
}
