//! Prompt templates for the two LLM-backed pipeline stages.
//!
//! Templates use plain `format!()` interpolation so a missing variable is a
//! compile-time error, not a runtime surprise.

use crate::models::Candidate;

/// Build the query-contextualization prompt.
///
/// Folds the user's previous queries and the current one into a single
/// self-contained search query. The anchoring rule is spelled out in the
/// prompt: only the most recently mentioned product/category resolves a
/// dangling attribute, and non-shopping utterances pass through unchanged.
///
/// # Example
/// ```
/// use vitrina::llm::prompts::contextualize_prompt;
///
/// let history = vec!["shoes".to_string(), "black color".to_string()];
/// let prompt = contextualize_prompt(&history, "blue color");
/// assert!(prompt.contains("blue color"));
/// assert!(prompt.contains("Previous queries"));
/// ```
pub fn contextualize_prompt(history: &[String], current_query: &str) -> String {
    format!(
        r#"Given the previous list of user queries and the current query, combine them to generate the exact query the user is making.
The previous queries provide context to the current query. Ensure the generated query logically integrates the context and reflects the user's intent as accurately as possible.
Always refer to the latest product or category the user queried, and without context do not invent attributes for the current product.
If the current query is a greeting, small talk, or otherwise unrelated to any product search, return the current query unchanged.
Previous queries: {history:?}
Current query: '{current_query}'

Example:
Previous queries: ["I want tshirts", "for boys", "white color", "shoes", "black color"]
Current query: 'blue color'
Generated exact query: "shoes with blue color"

ONLY return the exact query, no additional text or explanation."#
    )
}

/// Build the product-matching prompt.
///
/// Asks the model to score the retrieved candidates against the query under
/// the strict matching rules (exact category, mandatory keywords, threshold,
/// bounded result count) and to answer with the suggestions JSON payload.
pub fn product_match_prompt(
    query: &str,
    candidates: &[Candidate],
    max_results: usize,
    match_threshold: f64,
) -> String {
    let records: Vec<_> = candidates.iter().map(|c| &c.product).collect();
    let product_list =
        serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are an assistant that matches user queries with product records.

Read this current user search query: '{query}'
Compare it against the following product records:
{product_list}

### Instructions ###
1. Match each product record to the user query based on the following rules:
- **Exact Category Match**: Only include products explicitly matching the user query's category (e.g., "caps"). Products in unrelated or adjacent categories (e.g., "t-shirts", or "sandals" for a "shoes" query) must be excluded, even if they contain semantically related keywords.
- **Mandatory Keyword Matching**: Ensure the product description contains all key terms directly relevant to the query. If the query specifies "red caps", products must explicitly mention both "red" and "caps". Omit products that are missing any keyword or that conflict with the query's details.
- **Exclude Unrelated Products**: Products that do not align with the user's intent, wrong subcategory, or wrong gender must not be included.

2. **Sorting and Filtering**:
- Strictly include only the max {max_results} products with the highest match percentage, sorted in descending order of relevance.
- Exclude all products with a match percentage lower than {match_threshold}%.

3. **Output**: respond with valid JSON only, in this shape:
{{
  "query": "{query}",
  "results": [
    {{"match": "<short match summary>", "match_percentage": <number 0-100>, "product_url": "<the record's uri, copied verbatim>", "product_description": "<the record's description>"}}
  ],
  "fallback_response": "<only when results is empty>"
}}

- If no products meet the criteria, "results" must be an empty array and "fallback_response" must carry a short, friendly reply: answer greetings conversationally, and for an unmatched product query apologize and suggest rephrasing.
- Never populate both a non-empty "results" array and "fallback_response"."#
    )
}
