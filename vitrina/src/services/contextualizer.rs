use std::time::Duration;

use crate::config::Config;
use crate::llm::{prompts, LlmProvider};
use crate::services::ContextCache;

/// Folds the prior user turns and the newest one into a single
/// self-contained search query.
///
/// Every failure mode — unavailable LLM, call error, timeout, empty reply —
/// degrades to the raw current query so the pipeline never aborts here.
#[derive(Clone)]
pub struct QueryContextualizer {
    llm: LlmProvider,
    cache: Option<ContextCache>,
    timeout: Duration,
}

impl QueryContextualizer {
    pub fn new(llm: LlmProvider, config: &Config) -> Self {
        let (cache, timeout) = match &config.llm {
            Some(llm_config) => (
                (llm_config.context_cache_size > 0)
                    .then(|| ContextCache::new(llm_config.context_cache_size)),
                Duration::from_secs(llm_config.contextualize_timeout_secs),
            ),
            None => (None, Duration::from_secs(5)),
        };

        Self {
            llm,
            cache,
            timeout,
        }
    }

    /// Resolve `current_query` against `history` (prior user turns, oldest
    /// first). Returns a self-contained query string.
    pub async fn contextualize(&self, history: &[String], current_query: &str) -> String {
        let current = current_query.trim();

        // First turn: nothing to resolve against, skip the round trip.
        if history.is_empty() {
            return current.to_string();
        }

        if !self.llm.is_available() {
            tracing::debug!("Contextualization requested but LLM not available, using raw query");
            return current.to_string();
        }

        if let Some(ref cache) = self.cache {
            let cache_key = cache.generate_key(history, current);
            if let Some(cached) = cache.get(&cache_key) {
                return cached;
            }
        }

        let prompt = prompts::contextualize_prompt(history, current);
        let llm_call = self.llm.complete(&prompt, None);

        match tokio::time::timeout(self.timeout, llm_call).await {
            Ok(Ok(raw)) => {
                let folded = raw.trim().trim_matches('"').trim().to_string();

                if folded.is_empty() {
                    tracing::warn!("Contextualization returned empty output, using raw query");
                    return current.to_string();
                }

                if folded != current {
                    let truncated_orig = &current[..current.len().min(20)];
                    let truncated_fold = &folded[..folded.len().min(20)];
                    tracing::info!(
                        "Query contextualized: '{}...' -> '{}...'",
                        truncated_orig,
                        truncated_fold
                    );
                }

                if let Some(ref cache) = self.cache {
                    let cache_key = cache.generate_key(history, current);
                    cache.put(cache_key, folded.clone());
                }

                folded
            }
            Ok(Err(e)) => {
                tracing::warn!("Contextualization failed: {}, using raw query", e);
                current.to_string()
            }
            Err(_) => {
                tracing::warn!("Contextualization timeout, using raw query");
                current.to_string()
            }
        }
    }
}
