//! Output formatters for console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisReport, KeywordOutcome, ResumeOutcome, ResumeReport};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    show_preview: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .keywords { color: #495057; }
        .keywords-failed { color: #dc3545; }
        .resume {
            margin: 20px 0;
            padding: 15px;
            border-radius: 6px;
            background: #f8f9fa;
            border-left: 4px solid #17a2b8;
        }
        .resume.failed { border-left-color: #dc3545; }
        .resume.analyzed { border-left-color: #28a745; }
        .analysis { white-space: pre-wrap; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Match Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <h2>Extracted Job Keywords</h2>
        <p class="{{ keywords_class }}">{{ keywords }}</p>

        {% for resume in resumes %}
        <div class="resume {{ resume.status_class }}">
            <h3>{{ resume.name }}</h3>
            <div class="analysis">{{ resume.body }}</div>
        </div>
        {% endfor %}

        <div class="metadata">
            <p><strong>Generated by Resume Matcher v{{ version }}</strong></p>
            <p><strong>Model:</strong> {{ model }} | <strong>Analyzed:</strong> {{ analyzed }} of {{ total }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    keywords: String,
    keywords_class: String,
    resumes: Vec<HtmlResume>,
    version: String,
    model: String,
    analyzed: usize,
    total: usize,
}

struct HtmlResume {
    name: String,
    status_class: &'static str,
    body: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_preview: bool) -> Self {
        Self { use_colors, show_preview }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_resume(&self, resume: &ResumeReport) -> String {
        let mut output = self.format_header(&format!("📊 Analysis for {}", resume.name), 2);

        if self.show_preview {
            if let (Some(chars), Some(preview)) = (resume.text_chars, &resume.preview) {
                output.push_str(&self.colorize(&format!("Extracted {} characters: {}\n\n", chars, preview), Color::BrightBlack));
            }
        }

        let body = resume.outcome.to_string();
        let body = match resume.outcome {
            ResumeOutcome::Analyzed(_) => body,
            ResumeOutcome::Skipped => self.colorize(&body, Color::Yellow),
            _ => self.colorize(&body, Color::Red),
        };
        output.push_str(&body);
        output.push('\n');
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Model: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.model,
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("📌 Extracted Job Keywords", 2));
        let keywords = report.keywords.to_string();
        match report.keywords {
            KeywordOutcome::Extracted(_) => output.push_str(&self.colorize(&keywords, Color::Cyan)),
            KeywordOutcome::Failed(_) => output.push_str(&self.colorize(&keywords, Color::Red)),
        }
        output.push('\n');

        for resume in &report.resumes {
            output.push_str(&self.format_resume(resume));
        }

        output.push_str(&format!(
            "\n✅ Analyzed {} of {} resume(s)\n",
            report.analyzed_count(),
            report.resumes.len()
        ));
        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📄 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Model:** `{}` | **Processing Time:** {}ms\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.model,
                report.metadata.processing_time_ms
            ));
        }

        output.push_str("## 📌 Extracted Job Keywords\n\n");
        output.push_str(&format!("{}\n\n", report.keywords));

        for resume in &report.resumes {
            output.push_str(&format!("## 📊 Analysis for `{}`\n\n", resume.name));
            match &resume.outcome {
                ResumeOutcome::Analyzed(result) => output.push_str(&format!("{}\n\n", result)),
                other => output.push_str(&format!("> {}\n\n", other)),
            }
        }

        output.push_str("---\n");
        output.push_str(&format!(
            "Generated by Resume Matcher v{} | Analyzed {} of {} resume(s)\n",
            report.metadata.matcher_version,
            report.analyzed_count(),
            report.resumes.len()
        ));
        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let resumes = report
            .resumes
            .iter()
            .map(|resume| HtmlResume {
                name: resume.name.clone(),
                status_class: match resume.outcome {
                    ResumeOutcome::Analyzed(_) => "analyzed",
                    ResumeOutcome::Skipped => "skipped",
                    _ => "failed",
                },
                body: resume.outcome.to_string(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            keywords: report.keywords.to_string(),
            keywords_class: match report.keywords {
                KeywordOutcome::Extracted(_) => "keywords".to_string(),
                KeywordOutcome::Failed(_) => "keywords-failed".to_string(),
            },
            resumes,
            version: report.metadata.matcher_version.clone(),
            model: report.metadata.model.clone(),
            analyzed: report.analyzed_count(),
            total: report.resumes.len(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, show_preview: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_preview),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AnalysisResult, KeywordList};
    use crate::output::report::ReportMetadata;

    fn sample_report() -> AnalysisReport {
        let analyzed = ResumeOutcome::Analyzed(AnalysisResult::new("1. 85%\n2. <b>Great</b>\n3. 9/10"));
        AnalysisReport {
            keywords: KeywordOutcome::Extracted(KeywordList::from_reply("Rust, Tokio")),
            resumes: vec![
                ResumeReport::new("alice.pdf", analyzed).with_text("Alice, Rust engineer", 300),
                ResumeReport::new("bob.txt", ResumeOutcome::Unsupported),
            ],
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                model: "gemini-2.0-flash".to_string(),
                job_description_chars: 42,
                processing_time_ms: 1234,
                matcher_version: "0.1.0".to_string(),
            },
        }
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(output.contains("📌 Extracted Job Keywords"));
        assert!(output.contains("Rust, Tokio"));
        assert!(output.contains("📊 Analysis for alice.pdf"));
        assert!(output.contains("Extracted 20 characters: Alice, Rust engineer"));
        assert!(output.contains("9/10"));
        assert!(output.contains("Unsupported file format. Please upload a PDF or DOCX file."));
        assert!(output.contains("Analyzed 1 of 2 resume(s)"));
    }

    #[test]
    fn test_console_hides_preview_by_default() {
        let output = ConsoleFormatter::new(false, false).format_report(&sample_report()).unwrap();
        assert!(!output.contains("Extracted 20 characters"));
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# 📄 Resume Match Report\n\n## 📌 Extracted Job Keywords"));
        assert!(output.contains("## 📊 Analysis for `alice.pdf`\n\n1. 85%"));
        assert!(output.contains("> Unsupported file format."));
    }

    #[test]
    fn test_json_output_round_trips() {
        let output = JsonFormatter::new(true).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["keywords"]["status"], "extracted");
        assert_eq!(value["keywords"]["value"][1], "Tokio");
        assert_eq!(value["resumes"][1]["outcome"]["status"], "unsupported");
    }

    #[test]
    fn test_html_output_escapes_model_text() {
        let output = HtmlFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("<h3>alice.pdf</h3>"));
        assert!(output.contains("&lt;b&gt;Great&lt;"));
        assert!(!output.contains("<b>Great"));
        assert!(!output.contains("<style>"));
        assert!(output.contains("Analyzed:</strong> 1 of 2"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("out.md");

        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }
}
