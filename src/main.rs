//! Resume matcher: score resumes against a job description with a generative model

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::input::InputManager;
use resume_matcher::llm::GeminiClient;
use resume_matcher::output::{save_report_to_file, ReportGenerator};
use resume_matcher::processing::{AnalysisEngine, AnalysisRequest, ResumeSource};
use resume_matcher::{Result, ResumeMatcherError};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // A missing .env is fine; the key may already be in the environment
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            job_text,
            resumes,
            model,
            output,
            save,
            concurrency,
            preview,
            no_color,
        } => {
            if let Some(model) = model {
                config.model.name = model;
            }
            if let Some(concurrency) = concurrency {
                config.analysis.concurrency = concurrency.max(1);
            }
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?,
                None => config.output.format,
            };
            let use_colors = config.output.color_output && !no_color;
            let show_preview = config.output.show_resume_preview || preview;

            let job_description = match (job, job_text) {
                (Some(path), _) => InputManager::new().read_job_description(&path).await?,
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };

            let request = AnalysisRequest::new(
                job_description,
                resumes.into_iter().map(ResumeSource::Path).collect(),
            );
            request.validate()?;

            let client = GeminiClient::new(Config::api_key()?, &config.model)?;
            info!("Using model {}", config.model.name);

            let mut engine = AnalysisEngine::new(&client, &config);
            if output_format == OutputFormat::Console {
                engine = engine.with_progress(progress_bar(request.resumes.len()));
            }

            let report = engine.analyze(request).await?;

            let generator = ReportGenerator::with_options(use_colors, show_preview);
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                // Saved files never carry terminal color codes
                let plain = ReportGenerator::with_options(false, show_preview)
                    .generate_report(&report, &output_format)?;
                save_report_to_file(&plain, &path)?;
                println!("💾 Report saved to {}", path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config File: {}", config_path.display());
                println!("Model: {}", config.model.name);
                println!("API Base: {}", config.model.api_base);
                println!("Request Timeout: {}s", config.model.timeout_secs);
                println!("Concurrency: {}", config.analysis.concurrency);
                println!("Output Format: {:?}", config.output.format);
                println!("Colors: {}", config.output.color_output);
                println!(
                    "API Key: {}",
                    if Config::api_key().is_ok() { "set" } else { "missing" }
                );
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn progress_bar(len: usize) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
        progress.set_style(style);
    }
    progress
}
