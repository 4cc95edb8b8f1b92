//! Generative model integration: the API client, prompts, and the two model-backed steps

pub mod client;
pub mod prompts;
pub mod keywords;
pub mod scorer;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GeminiClient, GenerativeModel, LlmError};
pub use keywords::{KeywordExtractor, KeywordList};
pub use scorer::{AnalysisResult, ResumeScorer};
