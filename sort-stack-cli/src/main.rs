//! Command-line host for the sorted stack card
//!
//! Loads a stack configuration and a state snapshot from JSON files, runs one
//! render pass and prints the resulting card order.

mod text_card;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};
use sort_stack_core::{PassOutcome, ReadyHelpers, SortStackService, StackConfig, StateSnapshot};
use text_card::TextCardFactory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sort-stack", about = "Render a sorted card stack against entity states")]
struct Cli {
    /// Stack configuration (JSON)
    #[arg(long, short, required_unless_present = "stub")]
    config: Option<PathBuf>,

    /// Entity states (JSON map keyed by entity id, or a list of state records)
    #[arg(long, short)]
    states: Option<PathBuf>,

    /// Print the render order as JSON
    #[arg(long)]
    json: bool,

    /// Print a starter configuration and exit
    #[arg(long)]
    stub: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the render order
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if cli.stub {
        println!("{}", serde_json::to_string_pretty(&StackConfig::stub())?);
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = cli.config.as_deref().context("--config is required")?;
    let config = StackConfig::from_value(read_json(config_path)?)
        .with_context(|| format!("invalid stack configuration in {}", config_path.display()))?;
    let states: StateSnapshot = match cli.states.as_deref() {
        Some(path) => serde_json::from_value(read_json(path)?)
            .with_context(|| format!("invalid states in {}", path.display()))?,
        None => StateSnapshot::new(),
    };
    tracing::info!("Loaded {} entity states", states.len());

    let service = SortStackService::new(Arc::new(ReadyHelpers::new(Arc::new(TextCardFactory))));
    service.set_config(config).await?;
    let outcome = service.set_state(states).await;

    let displayed = service.displayed().await;
    if cli.json {
        let cards: Vec<Value> = displayed
            .iter()
            .map(|card| json!({"label": card.label(), "size": card.card_size()}))
            .collect();
        let report = json!({"cards": cards, "card_size": service.card_size().await});
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for card in &displayed {
            println!("{}", card.label());
        }
    }

    Ok(match outcome {
        PassOutcome::Committed { .. } => ExitCode::SUCCESS,
        PassOutcome::Recovered { .. } | PassOutcome::Superseded => ExitCode::FAILURE,
    })
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
