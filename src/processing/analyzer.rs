//! Analysis engine: keyword extraction once, then text extraction and scoring per resume

use crate::config::Config;
use crate::error::{Result, ResumeMatcherError};
use crate::input::{Extraction, InputManager, ResumeFile};
use crate::llm::{GenerativeModel, KeywordExtractor, KeywordList, ResumeScorer};
use crate::llm::prompts::PromptTemplates;
use crate::output::report::{AnalysisReport, KeywordOutcome, ReportMetadata, ResumeOutcome, ResumeReport};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Shown when the description is blank or no resume was given.
pub const MISSING_INPUT_MESSAGE: &str = "Please enter a job description and upload at least one resume.";

const PREVIEW_CHARS: usize = 300;

/// A resume to analyze, either on disk or already in memory.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    Path(PathBuf),
    File(ResumeFile),
}

impl ResumeSource {
    pub fn display_name(&self) -> String {
        match self {
            ResumeSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            ResumeSource::File(file) => file.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resumes: Vec<ResumeSource>,
}

impl AnalysisRequest {
    pub fn new(job_description: impl Into<String>, resumes: Vec<ResumeSource>) -> Self {
        Self {
            job_description: job_description.into(),
            resumes,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.job_description.trim().is_empty() || self.resumes.is_empty() {
            return Err(ResumeMatcherError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Runs an analysis against a model borrowed for the engine's lifetime.
pub struct AnalysisEngine<'a, M> {
    model: &'a M,
    templates: PromptTemplates,
    input_manager: InputManager,
    concurrency: usize,
    progress: Option<ProgressBar>,
}

impl<'a, M: GenerativeModel> AnalysisEngine<'a, M> {
    pub fn new(model: &'a M, config: &Config) -> Self {
        Self {
            model,
            templates: PromptTemplates::default(),
            input_manager: InputManager::new(),
            concurrency: config.analysis.concurrency.max(1),
            progress: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Progress bar ticked once per finished resume.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport> {
        request.validate()?;
        let start_time = Instant::now();

        info!("Extracting job keywords");
        let keyword_outcome = match KeywordExtractor::new(self.model, &self.templates)
            .extract(&request.job_description)
            .await
        {
            Ok(keywords) => KeywordOutcome::Extracted(keywords),
            Err(e) => {
                warn!("Keyword extraction failed: {}", e);
                KeywordOutcome::Failed(e.to_string())
            }
        };

        let resumes = match keyword_outcome.keywords() {
            Some(keywords) => {
                info!(
                    "Analyzing {} resume(s), up to {} at a time",
                    request.resumes.len(),
                    self.concurrency
                );
                stream::iter(request.resumes)
                    .map(|source| self.process_resume(keywords, source))
                    .buffered(self.concurrency)
                    .collect::<Vec<_>>()
                    .await
            }
            None => request
                .resumes
                .iter()
                .map(|source| ResumeReport::new(source.display_name(), ResumeOutcome::Skipped))
                .collect(),
        };

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        Ok(AnalysisReport {
            keywords: keyword_outcome,
            resumes,
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                model: self.model.model_name().to_string(),
                job_description_chars: request.job_description.chars().count(),
                processing_time_ms: start_time.elapsed().as_millis() as u64,
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    async fn process_resume(&self, keywords: &KeywordList, source: ResumeSource) -> ResumeReport {
        let name = source.display_name();
        let report = self.analyze_one(keywords, source, &name).await;

        if let Some(progress) = &self.progress {
            progress.set_message(name);
            progress.inc(1);
        }
        report
    }

    async fn analyze_one(&self, keywords: &KeywordList, source: ResumeSource, name: &str) -> ResumeReport {
        let file = match source {
            ResumeSource::File(file) => file,
            ResumeSource::Path(path) => match self.input_manager.load_resume(&path).await {
                Ok(file) => file,
                Err(e) => {
                    warn!("Could not load {}: {}", name, e);
                    return ResumeReport::new(name, ResumeOutcome::ExtractionFailed(e.to_string()));
                }
            },
        };

        let text = match self.input_manager.extract_resume(&file) {
            Ok(Extraction::Text(text)) => text,
            Ok(Extraction::Unsupported) => {
                return ResumeReport::new(name, ResumeOutcome::Unsupported);
            }
            Err(e) => {
                warn!("Could not extract text from {}: {}", name, e);
                return ResumeReport::new(name, ResumeOutcome::ExtractionFailed(e.to_string()));
            }
        };

        info!("Scoring {} ({} characters)", name, text.chars().count());
        let outcome = match ResumeScorer::new(self.model, &self.templates)
            .score(keywords, &text)
            .await
        {
            Ok(result) => ResumeOutcome::Analyzed(result),
            Err(e) => {
                warn!("Scoring {} failed: {}", name, e);
                ResumeOutcome::ApiFailed(e.to_string())
            }
        };

        ResumeReport::new(name, outcome).with_text(&text, PREVIEW_CHARS)
    }
}
