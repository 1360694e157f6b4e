mod catalog;
mod chat;
mod context_cache;
mod contextualizer;
mod ranker;
mod retriever;

pub use catalog::CatalogService;
pub use chat::ChatService;
pub use context_cache::ContextCache;
pub use contextualizer::QueryContextualizer;
pub use ranker::MatchRanker;
pub use retriever::CandidateRetriever;
