use std::collections::HashMap;

use serde::Deserialize;

use crate::config::AssistantConfig;
use crate::llm::{prompts, LlmProvider};
use crate::models::{Candidate, ConversationLog, ConversationTurn, MatchResult, SearchOutcome};

/// Filler words that never count as mandatory query descriptors.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "want", "need", "show", "give", "get", "find", "some", "any",
    "color", "colour", "please", "looking", "buy", "like", "have",
];

/// Raw suggestions payload as the reasoning service emits it. This is the
/// single decoding path for the structured reply; anything that does not
/// deserialize into this shape is rejected and mapped to a fallback.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MatchPayload {
    #[serde(default)]
    #[allow(dead_code)]
    pub query: Option<String>,
    #[serde(default)]
    pub results: Vec<RawMatch>,
    #[serde(default)]
    pub fallback_response: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawMatch {
    #[serde(rename = "match")]
    pub match_label: String,
    pub match_percentage: f64,
    pub product_url: String,
    pub product_description: String,
}

/// Scores candidates against the query via the reasoning service, then
/// enforces the output contract in code: candidate membership, threshold,
/// keyword completeness, bound, ordering, and fallback exclusivity.
#[derive(Clone)]
pub struct MatchRanker {
    llm: LlmProvider,
    max_results: usize,
    match_threshold: f64,
    fallback_message: String,
}

impl MatchRanker {
    pub fn new(llm: LlmProvider, config: &AssistantConfig) -> Self {
        Self {
            llm,
            max_results: config.max_results,
            match_threshold: config.match_threshold,
            fallback_message: config.fallback_message.clone(),
        }
    }

    /// Produce the outcome for one turn and append it to the conversation
    /// log as the assistant entry.
    pub async fn rank(
        &self,
        query: &str,
        candidates: &[Candidate],
        log: &mut ConversationLog,
    ) -> SearchOutcome {
        let outcome = self.rank_inner(query, candidates).await;
        log.append(ConversationTurn::assistant(outcome.as_assistant_text()));
        outcome
    }

    async fn rank_inner(&self, query: &str, candidates: &[Candidate]) -> SearchOutcome {
        if candidates.is_empty() {
            return SearchOutcome::fallback(query, self.fallback_message.clone());
        }

        if !self.llm.is_available() {
            tracing::warn!("Ranking requested but LLM not available, returning fallback");
            return SearchOutcome::fallback(query, self.fallback_message.clone());
        }

        let prompt =
            prompts::product_match_prompt(query, candidates, self.max_results, self.match_threshold);

        match self.llm.complete_structured::<MatchPayload>(&prompt).await {
            Ok(payload) => enforce_contract(
                query,
                candidates,
                payload,
                self.max_results,
                self.match_threshold,
                &self.fallback_message,
            ),
            Err(e) => {
                tracing::warn!("Ranking failed: {}, returning fallback", e);
                SearchOutcome::fallback(query, self.fallback_message.clone())
            }
        }
    }
}

/// Validate the reasoning payload against the retrieval set and the output
/// contract. This is where the pipeline's invariants are guaranteed, no
/// matter how the model behaved.
fn enforce_contract(
    query: &str,
    candidates: &[Candidate],
    payload: MatchPayload,
    max_results: usize,
    match_threshold: f64,
    fallback_message: &str,
) -> SearchOutcome {
    let rank_by_url: HashMap<&str, usize> = candidates
        .iter()
        .map(|c| (c.product.uri.as_str(), c.rank))
        .collect();

    let keywords = significant_keywords(query);

    let mut seen_urls = std::collections::HashSet::new();
    let mut kept: Vec<(usize, MatchResult)> = Vec::new();
    for raw in payload.results {
        let Some(&rank) = rank_by_url.get(raw.product_url.as_str()) else {
            tracing::debug!(url = %raw.product_url, "Dropping result with unknown product url");
            continue;
        };

        if !seen_urls.insert(raw.product_url.clone()) {
            continue;
        }

        if !raw.match_percentage.is_finite()
            || raw.match_percentage < match_threshold
            || raw.match_percentage > 100.0
        {
            continue;
        }

        if !contains_all_keywords(&raw.product_description, &keywords) {
            tracing::debug!(
                url = %raw.product_url,
                "Dropping result missing a mandatory query keyword"
            );
            continue;
        }

        kept.push((
            rank,
            MatchResult {
                match_label: raw.match_label,
                match_percentage: raw.match_percentage,
                product_url: raw.product_url,
                product_description: raw.product_description,
            },
        ));
    }

    // Descending percentage; ties go to the earlier retrieval rank.
    kept.sort_by(|a, b| {
        b.1.match_percentage
            .partial_cmp(&a.1.match_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    kept.truncate(max_results);

    if kept.is_empty() {
        let message = payload
            .fallback_response
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback_message.to_string());
        SearchOutcome::fallback(query, message)
    } else {
        SearchOutcome::with_results(query, kept.into_iter().map(|(_, result)| result).collect())
    }
}

/// Mandatory descriptors of a query: lowercase alphanumeric tokens of three
/// or more characters, stopwords removed, trailing plural `s` stripped.
fn significant_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 3 && !STOPWORDS.contains(token))
        .map(|token| token.strip_suffix('s').unwrap_or(token).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Keyword completeness backstop. The description is squashed to a single
/// lowercase alphanumeric string so hyphenation and spacing differences
/// ("t-shirt" vs "tshirts") do not defeat the check.
fn contains_all_keywords(description: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }

    let squashed: String = description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    keywords.iter().all(|keyword| squashed.contains(keyword))
}
