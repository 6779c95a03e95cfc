//! Similarity oracle — the one optional external dependency of the engine.
//!
//! Modeled as a capability: the engine holds `Option<Arc<dyn SimilarityOracle>>`
//! and every call site branches on availability. The HTTP implementation
//! carries a circuit breaker: a few consecutive failures disable it for the
//! remainder of the process instead of retrying per request.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Circuit breaker open after {failures} consecutive failures")]
    CircuitOpen { failures: u32 },
}

/// Plug-in similarity scorer. Implementations must be safe for concurrent
/// read access; the engine never serializes calls.
pub trait SimilarityOracle: Send + Sync {
    /// True while the oracle is willing to take calls. Callers must branch on
    /// this rather than assuming presence.
    fn available(&self) -> bool;

    /// Similarity of two texts in [0.0, 1.0].
    fn similarity(&self, a: &str, b: &str) -> Result<f64, OracleError>;
}

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    text_a: &'a str,
    text_b: &'a str,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    similarity: f64,
}

/// HTTP-backed oracle with a short per-request timeout and a consecutive-
/// failure circuit breaker. All state after construction is the atomic
/// failure counter, so a single instance serves concurrent scoring runs.
pub struct HttpSimilarityOracle {
    client: reqwest::blocking::Client,
    endpoint: String,
    failures: AtomicU32,
    breaker_threshold: u32,
}

impl HttpSimilarityOracle {
    pub fn new(endpoint: String, timeout_ms: u64, breaker_threshold: u32) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            failures: AtomicU32::new(0),
            breaker_threshold,
        })
    }

    fn record_failure(&self) {
        let failures = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures == self.breaker_threshold {
            warn!(
                "Similarity oracle disabled after {failures} consecutive failures; \
                 falling back to exact/synonym matching for the rest of this process"
            );
        }
    }

    fn record_success(&self) {
        self.failures.store(0, Ordering::Relaxed);
    }
}

impl SimilarityOracle for HttpSimilarityOracle {
    fn available(&self) -> bool {
        self.failures.load(Ordering::Relaxed) < self.breaker_threshold
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f64, OracleError> {
        let failures = self.failures.load(Ordering::Relaxed);
        if failures >= self.breaker_threshold {
            return Err(OracleError::CircuitOpen { failures });
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SimilarityRequest { text_a: a, text_b: b })
            .send();

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                self.record_failure();
                return Err(OracleError::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            self.record_failure();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match response.json::<SimilarityResponse>() {
            Ok(body) => {
                self.record_success();
                debug!("Oracle similarity: {:.3}", body.similarity);
                Ok(body.similarity.clamp(0.0, 1.0))
            }
            Err(e) => {
                self.record_failure();
                Err(OracleError::Http(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fixed-answer oracle for tests. Scores 1.0 for pairs in its table and
    /// 0.0 otherwise; can be told to fail every call.
    pub struct StaticOracle {
        pub pairs: Vec<(String, String)>,
        pub failing: bool,
    }

    impl StaticOracle {
        pub fn matching(pairs: &[(&str, &str)]) -> Self {
            Self {
                pairs: pairs
                    .iter()
                    .map(|(a, b)| (a.to_string(), b.to_string()))
                    .collect(),
                failing: false,
            }
        }
    }

    impl SimilarityOracle for StaticOracle {
        fn available(&self) -> bool {
            !self.failing
        }

        fn similarity(&self, a: &str, b: &str) -> Result<f64, OracleError> {
            if self.failing {
                return Err(OracleError::CircuitOpen { failures: 1 });
            }
            let hit = self
                .pairs
                .iter()
                .any(|(pa, pb)| (pa == a && b.contains(pb.as_str())) || (pa == b && a.contains(pb.as_str())));
            Ok(if hit { 1.0 } else { 0.0 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaker_opens_after_threshold() {
        // An endpoint nothing listens on: every call is a connect failure.
        let oracle =
            HttpSimilarityOracle::new("http://127.0.0.1:9/similarity".to_string(), 50, 2).unwrap();
        assert!(oracle.available());
        let _ = oracle.similarity("a", "b");
        let _ = oracle.similarity("a", "b");
        assert!(!oracle.available());
        assert!(matches!(
            oracle.similarity("a", "b"),
            Err(OracleError::CircuitOpen { .. })
        ));
    }
}
