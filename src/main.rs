use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use timeline_analytics::{ReportGenerator, SessionAggregator};
use timeline_core::TimelineConfig;
use timeline_render::render_artifacts;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agent-timeline",
    about = "Render an activity timeline from Claude Code and Codex transcripts",
    version,
    author
)]
struct Cli {
    /// Path to a JSON or TOML config file (default: built-in session table)
    config: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Override the chart title
    #[arg(short, long)]
    title: Option<String>,

    /// Print a per-session summary
    #[arg(short, long)]
    summary: bool,

    /// Print the per-session summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "agent_timeline=info,timeline_core=info,timeline_analytics=info,timeline_render=info,warn"
                .into()
        }))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config.
    let mut config = TimelineConfig::resolve(cli.config.as_deref())?;

    // Apply CLI overrides.
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(title) = cli.title {
        config.title = title;
    }

    tracing::info!(
        "Extracting timestamps from {} transcripts...",
        config.sessions.len()
    );
    let timelines = SessionAggregator::new().aggregate(&config.sessions);

    if cli.json {
        println!("{}", ReportGenerator::json_summary(&timelines)?);
    } else if cli.summary {
        print!("{}", ReportGenerator::text_summary(&timelines));
    }

    if !timelines.has_data() {
        tracing::warn!("No timestamps found! Skipping chart rendering.");
        return Ok(());
    }

    tracing::info!(
        "Creating visualization in {}...",
        config.output_dir.display()
    );
    render_artifacts(&timelines, &config.title, &config.output_dir)?;

    tracing::info!("Done!");
    Ok(())
}
