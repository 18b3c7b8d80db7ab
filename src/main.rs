use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidquiz::config::Config;
use vidquiz::quiz::{Difficulty, QuizGenerator};
use vidquiz::server;
use vidquiz::transcript::extract_video_id;

#[derive(Parser)]
#[command(name = "vidquiz")]
#[command(version, about = "Multiple-choice quizzes from YouTube videos")]
#[command(long_about = "Generate quizzes from YouTube transcripts (or video metadata) using any OpenAI-compatible LLM API.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service exposing POST /generate-quiz
    Serve {
        /// Address to bind (overrides VIDQUIZ_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides VIDQUIZ_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a quiz for one video and print it as JSON
    Generate {
        /// Video ID or YouTube URL
        video: String,

        /// Number of questions
        #[arg(short, long, default_value = "10")]
        num_questions: usize,

        /// Difficulty: easy, medium, hard
        #[arg(short, long, default_value = "medium")]
        difficulty: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            config.validate().context("Configuration validation failed")?;

            info!("Models:   {}", config.models.join(", "));
            info!("LLM API:  {}", config.llm_base_url);
            info!("Translate: {}", if config.translate { config.translate_url.as_str() } else { "disabled" });

            let generator = QuizGenerator::from_config(&config);
            server::serve(&config.bind_address(), generator)
                .await
                .context("Server failed")?;
        }
        Command::Generate {
            video,
            num_questions,
            difficulty,
        } => {
            config.validate().context("Configuration validation failed")?;

            let video_id = extract_video_id(&video)
                .with_context(|| format!("Not a YouTube video ID or URL: {}", video))?;
            let difficulty: Difficulty = difficulty.parse().map_err(|e: String| anyhow::anyhow!(e))?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Generating {} questions for {}...", num_questions, video_id));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let generator = QuizGenerator::from_config(&config);
            let outcome = generator.generate(&video_id, num_questions, difficulty).await?;

            match &outcome.error {
                Some(error) => spinner.finish_with_message(format!("✗ {}", error)),
                None => spinner.finish_with_message(format!(
                    "✓ {} questions from {}",
                    outcome.quizzes.len(),
                    outcome.transcript_source.as_deref().unwrap_or("unknown source")
                )),
            }

            let output = serde_json::json!({
                "quizzes": outcome.quizzes,
                "error": outcome.error,
                "transcript_source": outcome.transcript_source,
                "model": outcome.model,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);

            if outcome.error.is_some() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
