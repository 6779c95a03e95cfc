use anyhow::{Context, Result};

/// Engine configuration. Every knob has a default so the engine runs with no
/// environment at all; `from_env` only overrides what is set.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum oracle similarity for a keyword to count as matched.
    pub similarity_threshold: f64,
    /// Endpoint of the optional similarity oracle. None disables the
    /// embedding step entirely.
    pub oracle_url: Option<String>,
    /// Per-request timeout for oracle calls, in milliseconds.
    pub oracle_timeout_ms: u64,
    /// Consecutive oracle failures before the circuit breaker opens for the
    /// remainder of the process.
    pub breaker_threshold: u32,
    /// Margin of error used when only a single score measurement exists.
    pub default_margin: f64,
    /// Synonym-expanded matching (step 2 of the matcher).
    pub synonyms_enabled: bool,
    pub rust_log: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            oracle_url: None,
            oracle_timeout_ms: 2000,
            breaker_threshold: 3,
            default_margin: 5.0,
            synonyms_enabled: true,
            rust_log: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();
        Ok(Self {
            similarity_threshold: parse_env("SIMILARITY_THRESHOLD", defaults.similarity_threshold)?,
            oracle_url: std::env::var("ORACLE_URL").ok().filter(|v| !v.is_empty()),
            oracle_timeout_ms: parse_env("ORACLE_TIMEOUT_MS", defaults.oracle_timeout_ms)?,
            breaker_threshold: parse_env("ORACLE_BREAKER_THRESHOLD", defaults.breaker_threshold)?,
            default_margin: parse_env("CONFIDENCE_DEFAULT_MARGIN", defaults.default_margin)?,
            synonyms_enabled: parse_env("SYNONYMS_ENABLED", defaults.synonyms_enabled)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
