//! src/search/client.rs
//! ============================================================================
//! # `SearchClient`: typed access to the search endpoint
//!
//! Thin wrapper around a shared `reqwest::Client` configured once from
//! `SearchConfig`. One method, one contract: GET the endpoint with the
//! query as the `q` parameter and strictly decode the JSON result array.
//! A payload that is not the expected array fails closed as
//! `AppError::MalformedResponse`; it is never evaluated or partially
//! applied.

use crate::{config::SearchConfig, error::AppError, model::search_state::SearchResult};

pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    /// Build the client with the configured per-request timeout.
    pub fn new(config: &SearchConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::http(&config.endpoint, e))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the ranked results for `query`.
    ///
    /// The query text is form-encoded by reqwest; callers pass it raw.
    pub async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, AppError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| AppError::http(&self.endpoint, e))?
            .error_for_status()
            .map_err(|e| AppError::http(&self.endpoint, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::http(&self.endpoint, e))?;

        parse_results(&self.endpoint, &body)
    }
}

/// Decode a response body as the result array. Strict: anything else is a
/// malformed-response error.
pub fn parse_results(url: &str, body: &str) -> Result<Vec<SearchResult>, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::malformed_response(url, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:8000/search/json";

    #[test]
    fn test_parse_well_formed_array() {
        let body = r#"[{"link":"/content/42","thumb":"/static/t42.png",
                        "type":"community","title":"Gardening",
                        "description":"green thumbs"}]"#;

        let results = parse_results(URL, body).expect("array should decode");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "/content/42");
        assert_eq!(results[0].kind, "community");
    }

    #[test]
    fn test_parse_empty_array() {
        let results = parse_results(URL, "[]").expect("empty array is valid");
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_preserves_wire_order() {
        let body = r#"[{"link":"/first"},{"link":"/second"},{"link":"/third"}]"#;
        let results = parse_results(URL, body).expect("array should decode");
        let links: Vec<&str> = results.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, ["/first", "/second", "/third"]);
    }

    #[test]
    fn test_parse_rejects_non_array_payload() {
        assert!(parse_results(URL, r#"{"error":"boom"}"#).is_err());
        assert!(parse_results(URL, "alert('x')").is_err());
        assert!(parse_results(URL, "").is_err());
    }
}
