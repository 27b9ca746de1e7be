//! Scorepoint CLI
//!
//! Command-line interface for serving, one-shot scoring, and registry
//! management.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::model::ModelArtifact;
use crate::registry::ModelRegistry;
use crate::scoring::Scorer;
use crate::server::{run_server, ServerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "scorepoint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Model scoring service: load a registered model, score JSON batches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a model from the registry and serve the scoring API
    Serve {
        /// Host address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Model registry directory
        #[arg(short, long, default_value = "./models")]
        registry: PathBuf,

        /// Registered model name to load
        #[arg(short, long, default_value = "default")]
        model: String,
    },

    /// Score a JSON payload file against a registered model
    Score {
        /// Model registry directory
        #[arg(short, long, default_value = "./models")]
        registry: PathBuf,

        /// Registered model name
        #[arg(short, long)]
        model: String,

        /// Input file containing `{"data": [[..], ..]}`
        #[arg(short, long)]
        input: PathBuf,

        /// Optional output file for predictions (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Register a model artifact under a name
    Register {
        /// Model registry directory
        #[arg(short, long, default_value = "./models")]
        registry: PathBuf,

        /// Name to register the model under
        #[arg(short, long)]
        name: String,

        /// Artifact file (JSON)
        #[arg(short, long)]
        artifact: PathBuf,
    },

    /// List registered models
    Models {
        /// Model registry directory
        #[arg(short, long, default_value = "./models")]
        registry: PathBuf,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub async fn cmd_serve(host: &str, port: u16, registry: &Path, model: &str) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: host.to_string(),
        port,
        registry_dir: registry.display().to_string(),
        model_name: model.to_string(),
    };
    run_server(config).await
}

pub fn cmd_score(
    registry: &Path,
    model: &str,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    section("Score");

    let registry = ModelRegistry::open(registry)?;
    let scorer = Scorer::from_registry(&registry, model)?;
    step_ok(&format!(
        "loaded {} ({} features -> {} outputs)",
        model.white(),
        scorer.predictor().n_features(),
        scorer.predictor().n_outputs()
    ));

    let raw = std::fs::read_to_string(input)?;
    let start = Instant::now();
    let predictions = scorer.score_raw(&raw)?;
    let elapsed = start.elapsed();

    step_ok(&format!(
        "scored {} rows in {:.2}ms",
        predictions.nrows(),
        elapsed.as_secs_f64() * 1000.0
    ));

    let rows: Vec<Vec<f64>> = predictions.rows().into_iter().map(|r| r.to_vec()).collect();

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&serde_json::json!({ "predictions": rows }))?;
        std::fs::write(path, json)?;
        step_ok(&format!("wrote {}", path.display()));
    } else {
        println!();
        for (i, row) in rows.iter().enumerate() {
            let values: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
            println!("  {} {}", accent(&format!("{:>4}", i)), values.join("  "));
        }
    }

    Ok(())
}

pub fn cmd_register(registry: &Path, name: &str, artifact_path: &Path) -> anyhow::Result<()> {
    section("Register");

    let artifact = ModelArtifact::from_path(artifact_path)?;
    let mut registry = ModelRegistry::open(registry)?;
    let stored = registry.register(name, &artifact)?;

    step_ok(&format!(
        "registered {} ({} features -> {} outputs)",
        name.white(),
        artifact.n_inputs(),
        artifact.n_outputs()
    ));
    println!("  {} {}", dim("artifact"), stored.display());

    Ok(())
}

pub fn cmd_models(registry: &Path) -> anyhow::Result<()> {
    let registry = ModelRegistry::open(registry)?;
    let entries = registry.list();

    section(&format!("Models ({})", entries.len()));

    if entries.is_empty() {
        println!("  {}", dim("no models registered"));
        return Ok(());
    }

    for entry in entries {
        println!(
            "  {}  {}  {}",
            entry.name.white().bold(),
            dim(&format!("{} -> {}", entry.n_inputs, entry.n_outputs)),
            dim(&entry.registered_at),
        );
    }

    Ok(())
}
