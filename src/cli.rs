//! CLI interface for the resume matcher

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Match resumes against a job description with Gemini")]
#[command(long_about = "Extract the key skills from a job description with a generative model, then score each PDF or DOCX resume against them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze resumes against a job description
    #[command(group(ArgGroup::new("job_input").args(["job", "job_text"])))]
    Analyze {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text
        #[arg(long)]
        job_text: Option<String>,

        /// Resume file (PDF, DOCX); repeat for several resumes
        #[arg(short, long = "resume")]
        resumes: Vec<PathBuf>,

        /// Model name, e.g. gemini-2.0-flash
        #[arg(short, long)]
        model: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Number of resumes analyzed at the same time
        #[arg(long)]
        concurrency: Option<usize>,

        /// Show a preview of each resume's extracted text
        #[arg(long)]
        preview: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_analyze_accepts_repeated_resumes() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--job-text",
            "Rust engineer",
            "-r",
            "a.pdf",
            "--resume",
            "b.docx",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { job_text, resumes, .. } => {
                assert_eq!(job_text.as_deref(), Some("Rust engineer"));
                assert_eq!(resumes, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_file_and_text_conflict() {
        let result = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--job",
            "job.txt",
            "--job-text",
            "Rust engineer",
        ]);
        assert!(result.is_err());
    }
}
