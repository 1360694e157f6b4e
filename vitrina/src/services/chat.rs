use std::sync::Arc;

use crate::config::Config;
use crate::db::StorageBackend;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, VitrinaError};
use crate::llm::LlmProvider;
use crate::models::{ConversationLog, ConversationTurn, SearchOutcome};
use crate::services::{CandidateRetriever, MatchRanker, QueryContextualizer};

/// One synchronous pipeline run per user turn:
/// contextualize, retrieve, rank.
///
/// Pipeline-internal failures (contextualization, retrieval, ranking) are
/// recovered locally into a valid fallback outcome; nothing here is fatal
/// to the session.
#[derive(Clone)]
pub struct ChatService {
    contextualizer: QueryContextualizer,
    retriever: CandidateRetriever,
    ranker: MatchRanker,
    fallback_message: String,
}

impl ChatService {
    pub fn new(
        db: Arc<dyn StorageBackend>,
        embeddings: EmbeddingProvider,
        llm: LlmProvider,
        config: &Config,
    ) -> Self {
        Self {
            contextualizer: QueryContextualizer::new(llm.clone(), config),
            retriever: CandidateRetriever::new(db, embeddings, config.assistant.top_k),
            ranker: MatchRanker::new(llm, &config.assistant),
            fallback_message: config.assistant.fallback_message.clone(),
        }
    }

    /// Handle one user message against the given session log.
    ///
    /// Appends exactly two turns on success: the user message and the
    /// assistant outcome, so N completed turns leave 2N log entries.
    pub async fn handle_turn(
        &self,
        log: &mut ConversationLog,
        message: &str,
    ) -> Result<SearchOutcome> {
        let message = message.trim();
        if message.is_empty() {
            return Err(VitrinaError::Validation(
                "Message cannot be empty".to_string(),
            ));
        }

        // Contextualize against the *prior* user turns, then record the
        // new message.
        let history = log.user_turns();
        let query = self.contextualizer.contextualize(&history, message).await;
        log.append(ConversationTurn::user(message));

        let outcome = match self.retriever.retrieve(&query).await {
            Ok(candidates) => self.ranker.rank(&query, &candidates, log).await,
            Err(e) => {
                tracing::warn!("Candidate retrieval failed: {}, returning fallback", e);
                let outcome = SearchOutcome::fallback(&query, self.fallback_message.clone());
                log.append(ConversationTurn::assistant(outcome.as_assistant_text()));
                outcome
            }
        };

        Ok(outcome)
    }
}
