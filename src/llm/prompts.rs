//! Prompt templates for keyword extraction and resume scoring

/// Prompt templates with `{placeholder}` substitution
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub keyword_extraction: String,
    pub resume_analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            keyword_extraction: KEYWORD_EXTRACTION_TEMPLATE.to_string(),
            resume_analysis: RESUME_ANALYSIS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_keyword_extraction(&self, job_description: &str) -> String {
        fill_placeholders(&self.keyword_extraction, &[("{job_description}", job_description)])
    }

    /// Keywords are listed joined by `", "`.
    pub fn render_resume_analysis(&self, keywords: &[String], resume_text: &str) -> String {
        let keywords = keywords.join(", ");
        fill_placeholders(
            &self.resume_analysis,
            &[("{keywords}", keywords.as_str()), ("{resume}", resume_text)],
        )
    }
}

/// Substitutes every placeholder in a single left-to-right pass; inserted values are never rescanned.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(key).map(|at| (at, key.len(), *value)))
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, key_len, value)) => {
                output.push_str(&rest[..at]);
                output.push_str(value);
                rest = &rest[at + key_len..];
            }
            None => {
                output.push_str(rest);
                return output;
            }
        }
    }
}

const KEYWORD_EXTRACTION_TEMPLATE: &str = "Extract the most important skills, tools, and technologies \
from the following job description:\n\n{job_description}\n\n\
Return only the keywords as a comma-separated list.";

const RESUME_ANALYSIS_TEMPLATE: &str = "The following are job-relevant keywords extracted from a job description:\n\n\
{keywords}\n\n\
Analyze the following resume text and determine how well it matches these keywords:\n\n\
{resume}\n\n\
Provide:\n\
1. A similarity percentage (0-100%) based on how well the resume matches.\n\
2. A short feedback summary on what improvements can be made to better match the job description.\n\
3. Give a final numerical score out of 10 (considering the job match, relevance, and clarity of the resume).";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_prompt_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_keyword_extraction("Senior Rust engineer, Kubernetes a plus.");

        assert_eq!(
            prompt,
            "Extract the most important skills, tools, and technologies from the following job description:\n\n\
             Senior Rust engineer, Kubernetes a plus.\n\n\
             Return only the keywords as a comma-separated list."
        );
    }

    #[test]
    fn test_analysis_prompt_rendering() {
        let templates = PromptTemplates::default();
        let keywords = vec!["Rust".to_string(), "Tokio".to_string(), "gRPC".to_string()];
        let prompt = templates.render_resume_analysis(&keywords, "Built services in Rust at Acme.");

        assert!(prompt.starts_with("The following are job-relevant keywords"));
        assert!(prompt.contains("\n\nRust, Tokio, gRPC\n\n"));
        assert!(prompt.contains("\n\nBuilt services in Rust at Acme.\n\nProvide:\n"));
        assert!(prompt.contains("1. A similarity percentage (0-100%)"));
        assert!(prompt.contains("2. A short feedback summary"));
        assert!(prompt.ends_with("clarity of the resume)."));
    }

    #[test]
    fn test_resume_text_with_placeholders_left_alone() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_resume_analysis(&["Go".to_string()], "Uses {keywords} literally");
        assert!(prompt.contains("Uses {keywords} literally"));
    }

    #[test]
    fn test_keyword_with_placeholder_does_not_pull_in_resume() {
        let templates = PromptTemplates::default();
        let keywords = vec!["Rust".to_string(), "{resume}".to_string()];
        let prompt = templates.render_resume_analysis(&keywords, "Jane Doe, Rust at Acme");

        assert!(prompt.contains("\n\nRust, {resume}\n\n"));
        assert_eq!(prompt.matches("Jane Doe, Rust at Acme").count(), 1);
    }

    #[test]
    fn test_description_with_placeholder_left_alone() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_keyword_extraction("Template work: {job_description}");
        assert!(prompt.contains("\n\nTemplate work: {job_description}\n\n"));
    }
}
