use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use engine::config::EngineConfig;
use engine::matching::oracle::HttpSimilarityOracle;
use engine::models::DocumentFacts;
use engine::reference::ReferenceData;
use engine::scoring::CriterionId;
use engine::Engine;

/// Scores a parsed résumé (document-facts JSON) against a role and level.
#[derive(Parser)]
#[command(name = "engine", version)]
struct Cli {
    /// Path to the document-facts JSON produced by the parser
    facts: PathBuf,

    /// Role profile id, e.g. "backend-engineer"
    #[arg(long)]
    role: String,

    /// Level band id, e.g. "mid"
    #[arg(long)]
    level: String,

    /// Directory with reference-table overrides (roles.json, levels.json,
    /// synonyms.json, verb_tiers.json); built-in tables otherwise
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Re-score only this criterion instead of the whole document
    #[arg(long)]
    criterion: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let config = EngineConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let reference = match &cli.reference {
        Some(dir) => ReferenceData::from_dir(dir)
            .with_context(|| format!("Failed to load reference tables from {}", dir.display()))?,
        None => ReferenceData::builtin(),
    };
    tracing::debug!(
        "Reference data loaded: roles {:?}, levels {:?}",
        reference.role_ids(),
        reference.level_ids()
    );

    let mut scoring_engine = Engine::new(Arc::new(reference), config.clone());
    if let Some(url) = &config.oracle_url {
        let oracle = HttpSimilarityOracle::new(
            url.clone(),
            config.oracle_timeout_ms,
            config.breaker_threshold,
        )?;
        scoring_engine = scoring_engine.with_oracle(Arc::new(oracle));
        info!("Similarity oracle enabled at {url}");
    }

    let raw = std::fs::read_to_string(&cli.facts)
        .with_context(|| format!("Failed to read {}", cli.facts.display()))?;
    let facts: DocumentFacts = serde_json::from_str(&raw).context("Invalid document-facts JSON")?;

    match &cli.criterion {
        Some(criterion) => {
            let id: CriterionId = criterion.parse()?;
            let score = scoring_engine.evaluate_criterion(&facts, &cli.role, &cli.level, id)?;
            let output = if cli.pretty {
                serde_json::to_string_pretty(&score)?
            } else {
                serde_json::to_string(&score)?
            };
            println!("{output}");
        }
        None => {
            let report = scoring_engine.evaluate(&facts, &cli.role, &cli.level)?;
            let output = if cli.pretty {
                report.to_json_pretty()?
            } else {
                report.to_json()?
            };
            println!("{output}");
        }
    }

    Ok(())
}
