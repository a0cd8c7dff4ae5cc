// src/main.rs
// Moodscope - mood quadrant classification and wellness analysis

use anyhow::Result;
use clap::{Parser, Subcommand};
use moodscope::analyzer::{Analysis, AnalysisBody, AnalysisRequest, Analyzer};
use moodscope::config::EnvConfig;
use moodscope::llm::{GeminiClient, OutputFormat};
use moodscope::mood::{MoodCoordinate, SCALE_MIDPOINT};
use moodscope::session::SessionState;
use moodscope::web;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "moodscope")]
#[command(about = "Mood quadrant classification and wellness analysis")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Port to listen on (overrides MOODSCOPE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one analysis from the command line
    Analyze {
        /// Free-form description of your current state
        #[arg(short, long)]
        description: String,

        /// Arousal level on the 1-5 scale (3 is neutral)
        #[arg(short, long, default_value_t = SCALE_MIDPOINT)]
        arousal: i8,

        /// Valence level on the 1-5 scale (3 is neutral)
        #[arg(short, long, default_value_t = SCALE_MIDPOINT)]
        valence: i8,

        /// Optional extra context (sleep, caffeine, workload...)
        #[arg(short, long)]
        note: Option<String>,

        /// Request the structured report instead of the prose debrief
        #[arg(short, long)]
        structured: bool,
    },

    /// Validate the environment configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so the subscriber and config both see it
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = EnvConfig::load();

    match cli.command {
        Some(Commands::Analyze {
            description,
            arousal,
            valence,
            note,
            structured,
        }) => run_analyze(config, description, arousal, valence, note, structured).await,
        Some(Commands::Serve { port }) => run_serve(config, port).await,
        Some(Commands::Check) => run_check(config),
        None => run_serve(config, None).await,
    }
}

async fn run_analyze(
    config: EnvConfig,
    description: String,
    arousal: i8,
    valence: i8,
    note: Option<String>,
    structured: bool,
) -> Result<()> {
    // Missing credential is fatal before any interaction
    let api_key = config.api_keys.require_gemini()?;
    let client = GeminiClient::with_model(api_key.to_string(), config.model.clone());
    let analyzer = Analyzer::new(Arc::new(client));

    // Drive the wizard explicitly: describe, tune, review
    let mut session = SessionState::new();
    session.record_description(description);
    session.advance()?;

    session.record_coordinate(MoodCoordinate::new(arousal, valence));
    if let Some(note) = note {
        session.record_context_note(note);
    }
    session.advance()?;

    let request = AnalysisRequest {
        description: session.description.clone(),
        coordinate: session
            .coordinate
            .unwrap_or_else(|| MoodCoordinate::new(SCALE_MIDPOINT, SCALE_MIDPOINT)),
        context_note: session.context_note.clone(),
        format: if structured {
            OutputFormat::Json
        } else {
            OutputFormat::Prose
        },
    };

    match analyzer.analyze(&request).await {
        Ok(analysis) => {
            print_analysis(&analysis);
            session.record_analysis(analysis);
            Ok(())
        }
        Err(err) => {
            // Recovered locally: show the message, let the user resubmit
            eprintln!("{}", err.to_user_string());
            std::process::exit(1);
        }
    }
}

async fn run_serve(config: EnvConfig, port: Option<u16>) -> Result<()> {
    let api_key = config.api_keys.require_gemini()?;
    let client = GeminiClient::with_model(api_key.to_string(), config.model.clone());
    let analyzer = Arc::new(Analyzer::new(Arc::new(client)));

    let state = web::state::AppState::new(analyzer);
    let app = web::create_router(state);

    let bind_address = match port {
        Some(port) => format!("{}:{}", config.host, port),
        None => config.bind_address(),
    };
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Moodscope API listening on http://{}", bind_address);
    info!("Model: {}", config.model);

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_check(config: EnvConfig) -> Result<()> {
    let validation = config.validate();
    println!("{}", validation.report());
    if !validation.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    println!(
        "Quadrant: {} ({})",
        analysis.quadrant,
        analysis.quadrant.axis_summary()
    );

    match &analysis.body {
        AnalysisBody::Report(report) => {
            println!("Mood: {}", report.mood);
            if !report.tags.is_empty() {
                println!("Tags: {}", report.tags.join(", "));
            }
            println!();
            println!("{}", report.summary);
            if !report.levels.is_empty() {
                println!();
                for level in &report.levels {
                    println!(
                        "  {}: {}% now, {}% target",
                        level.name, level.current, level.target
                    );
                }
            }
            if !report.guidance.is_empty() {
                println!();
                println!("{}", report.guidance);
            }
        }
        AnalysisBody::Prose(digest) => {
            if digest.readings.is_empty() {
                // Nothing matched the level pattern: show the reply verbatim
                println!("{}", digest.raw);
            } else {
                println!();
                println!("{}", digest.summary);
                println!();
                for reading in &digest.readings {
                    println!(
                        "  {}: {}% now, {}% target",
                        reading.name, reading.current, reading.target
                    );
                }
                if !digest.detail.is_empty() {
                    println!();
                    println!("{}", digest.detail);
                }
            }
        }
    }
}
