//! Input manager for handling different file types

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, Extraction, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::path::Path;
use tokio::fs;

/// A resume as uploaded: its file name and raw bytes.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_name(&self.name)
    }
}

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Reads a resume from disk. The file name keeps only the final path component.
    pub async fn load_resume(&self, path: &Path) -> Result<ResumeFile> {
        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Loaded {} ({} bytes)", name, bytes.len());
        Ok(ResumeFile::new(name, bytes))
    }

    /// Extracts resume text. Formats other than PDF and DOCX yield `Extraction::Unsupported`.
    pub fn extract_resume(&self, file: &ResumeFile) -> Result<Extraction> {
        let text = match file.file_type() {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", file.name);
                PdfExtractor.extract(&file.bytes)?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", file.name);
                DocxExtractor.extract(&file.bytes)?
            }
            FileType::Text | FileType::Markdown | FileType::Unknown => {
                info!("Unsupported resume format: {}", file.name);
                return Ok(Extraction::Unsupported);
            }
        };

        Ok(Extraction::Text(text))
    }

    /// Reads a job description from a plain text or markdown file.
    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Text);

        let bytes = fs::read(path).await?;
        let text = match file_type {
            FileType::Markdown => {
                info!("Processing markdown job description: {}", path.display());
                MarkdownExtractor.extract(&bytes)?
            }
            FileType::Text => {
                info!("Reading plain text job description: {}", path.display());
                PlainTextExtractor.extract(&bytes)?
            }
            FileType::Pdf | FileType::Docx | FileType::Unknown => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Job description must be a .txt or .md file: {}",
                    path.display()
                )));
            }
        };

        Ok(text)
    }
}
