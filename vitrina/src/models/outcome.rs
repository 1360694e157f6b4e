use serde::{Deserialize, Serialize};

/// One validated product recommendation.
///
/// `match_label` serializes as `match` on the wire, keeping the JSON shape
/// the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub match_label: String,
    pub match_percentage: f64,
    pub product_url: String,
    pub product_description: String,
}

/// The pipeline's terminal value for one chat turn.
///
/// Invariant: exactly one of `results` (non-empty) or `fallback_response`
/// (non-empty) is populated — never both, never neither. Construct through
/// [`SearchOutcome::with_results`] / [`SearchOutcome::fallback`] to keep it
/// that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_response: Option<String>,
}

impl SearchOutcome {
    pub fn with_results(query: impl Into<String>, results: Vec<MatchResult>) -> Self {
        debug_assert!(!results.is_empty(), "use SearchOutcome::fallback instead");
        Self {
            query: query.into(),
            results,
            fallback_response: None,
        }
    }

    pub fn fallback(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            fallback_response: Some(message.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.results.is_empty()
    }

    /// Serialized form appended to the conversation log as the assistant turn.
    pub fn as_assistant_text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.query.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_wire_field_is_match() {
        let result = MatchResult {
            match_label: "Blue running shoes".to_string(),
            match_percentage: 92.0,
            product_url: "https://img.example/shoe.jpg".to_string(),
            product_description: "Blue running shoes for men".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["match"], "Blue running shoes");
        assert!(json.get("match_label").is_none());
    }

    #[test]
    fn test_fallback_outcome_exclusivity() {
        let outcome = SearchOutcome::fallback("blue shoes", "Sorry, nothing matched.");
        assert!(outcome.is_fallback());
        assert!(outcome.results.is_empty());
        assert_eq!(
            outcome.fallback_response.as_deref(),
            Some("Sorry, nothing matched.")
        );
    }

    #[test]
    fn test_results_outcome_has_no_fallback() {
        let outcome = SearchOutcome::with_results(
            "blue shoes",
            vec![MatchResult {
                match_label: "m".to_string(),
                match_percentage: 90.0,
                product_url: "u".to_string(),
                product_description: "blue shoes".to_string(),
            }],
        );
        assert!(!outcome.is_fallback());
        assert!(outcome.fallback_response.is_none());
    }

    #[test]
    fn test_fallback_response_omitted_when_absent() {
        let outcome = SearchOutcome::with_results(
            "q",
            vec![MatchResult {
                match_label: "m".to_string(),
                match_percentage: 90.0,
                product_url: "u".to_string(),
                product_description: "d".to_string(),
            }],
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("fallback_response").is_none());
    }
}
