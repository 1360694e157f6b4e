use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub embeddings: EmbeddingsConfig,
    pub assistant: AssistantConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

/// LLM configuration for chat/completion models
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    // Cache size for contextualized query results
    pub context_cache_size: usize,
    // Timeout for query contextualization in seconds
    pub contextualize_timeout_secs: u64,
}

/// Tuning knobs for the recommendation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Nearest-neighbor candidates fetched per search.
    pub top_k: u32,
    /// Upper bound on returned matches.
    pub max_results: usize,
    /// Minimum match percentage a result must carry to survive ranking.
    pub match_threshold: f64,
    /// Reply used when the pipeline cannot produce any qualifying match.
    pub fallback_message: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("VITRINA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("VITRINA_PORT", 3000),
                api_keys: env::var("VITRINA_API_KEYS")
                    .map(|keys| keys.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:vitrina.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "local/BAAI/bge-small-en-v1.5".to_string()),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", 384),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", 32),
                api_key: env::var("EMBEDDING_API_KEY").ok(),
                base_url: env::var("EMBEDDING_BASE_URL").ok(),
                timeout_secs: parse_env_or("EMBEDDING_TIMEOUT_SECS", 30),
                max_retries: parse_env_or("EMBEDDING_MAX_RETRIES", 3),
            },
            assistant: AssistantConfig {
                top_k: parse_env_or("ASSISTANT_TOP_K", 10),
                max_results: parse_env_or("ASSISTANT_MAX_RESULTS", 4),
                match_threshold: parse_env_or("ASSISTANT_MATCH_THRESHOLD", 85.0),
                fallback_message: env::var("ASSISTANT_FALLBACK_MESSAGE").unwrap_or_else(|_| {
                    "Sorry, I couldn't find anything matching that. Could you try describing the product differently?".to_string()
                }),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT_SECS", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 2),
                context_cache_size: parse_env_or("CONTEXT_CACHE_SIZE", 100),
                contextualize_timeout_secs: parse_env_or("CONTEXTUALIZE_TIMEOUT_SECS", 5),
            }),
        }
    }
}

/// Parse a `provider/model` string into its parts.
/// `"local/BAAI/bge-small-en-v1.5"` → `("local", "BAAI/bge-small-en-v1.5")`.
/// A bare model name defaults to the `local` provider.
pub fn parse_provider_model(model: &str) -> (&str, &str) {
    match model.split_once('/') {
        Some((provider, rest))
            if matches!(
                provider.to_lowercase().as_str(),
                "local" | "openai" | "openrouter" | "ollama" | "lmstudio"
            ) =>
        {
            (provider, rest)
        }
        _ => ("local", model),
    }
}

/// Parse an LLM `provider/model` string. Unlike embeddings there is no
/// local default; an unprefixed model is treated as OpenAI-hosted.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    match model.split_once('/') {
        Some((provider, rest)) => (provider, rest),
        None => ("openai", model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_model_local_prefix() {
        let (provider, model) = parse_provider_model("local/BAAI/bge-small-en-v1.5");
        assert_eq!(provider, "local");
        assert_eq!(model, "BAAI/bge-small-en-v1.5");
    }

    #[test]
    fn test_parse_provider_model_openai_prefix() {
        let (provider, model) = parse_provider_model("openai/text-embedding-3-small");
        assert_eq!(provider, "openai");
        assert_eq!(model, "text-embedding-3-small");
    }

    #[test]
    fn test_parse_provider_model_bare_name_is_local() {
        let (provider, model) = parse_provider_model("all-MiniLM-L6-v2");
        assert_eq!(provider, "local");
        assert_eq!(model, "all-MiniLM-L6-v2");
    }

    #[test]
    fn test_parse_provider_model_unknown_prefix_is_model_path() {
        // Model names can themselves contain slashes (HF org/model).
        let (provider, model) = parse_provider_model("BAAI/bge-small-en-v1.5");
        assert_eq!(provider, "local");
        assert_eq!(model, "BAAI/bge-small-en-v1.5");
    }

    #[test]
    fn test_parse_llm_provider_model() {
        assert_eq!(
            parse_llm_provider_model("openai/gpt-4o-mini"),
            ("openai", "gpt-4o-mini")
        );
        assert_eq!(
            parse_llm_provider_model("ollama/llama3"),
            ("ollama", "llama3")
        );
        assert_eq!(
            parse_llm_provider_model("gpt-4o-mini"),
            ("openai", "gpt-4o-mini")
        );
    }
}
