use marque_catalog::{CandidateRecord, VehicleRecord};
use marque_import::{ProviderError, SuggestScope, SuggestionProvider};

use crate::credentials::ProviderConfig;
use crate::prompt::{initialize_prompt, suggest_prompt};
use crate::types::{ErrorResponse, GenerateRequest, GenerateResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for a `generateContent`-style model endpoint.
pub struct GenerativeClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl GenerativeClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    /// Send one prompt and decode the reply as a list of records.
    async fn generate(&self, prompt: String) -> Result<Vec<VehicleRecord>, ProviderError> {
        log::debug!("POST {} ({} prompt bytes)", self.url(), prompt.len());

        let resp = self
            .http
            .post(self.url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&GenerateRequest::json_prompt(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::request(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::request(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let response: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::parse(format!("{e}. Response: {}", truncate(&text, 200)))
        })?;
        let records = parse_records(&response)?;
        log::debug!("Provider returned {} records", records.len());
        Ok(records)
    }
}

impl SuggestionProvider for GenerativeClient {
    async fn initialize(&self) -> Result<Vec<VehicleRecord>, ProviderError> {
        self.generate(initialize_prompt()).await
    }

    async fn suggest(
        &self,
        scope: &SuggestScope,
        current: &[VehicleRecord],
    ) -> Result<Vec<CandidateRecord>, ProviderError> {
        self.generate(suggest_prompt(scope, current)).await
    }
}

/// Extract the record array from the first candidate's text.
pub fn parse_records(response: &GenerateResponse) -> Result<Vec<VehicleRecord>, ProviderError> {
    let Some(text) = response.first_text() else {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
            })
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ProviderError::parse(format!("Empty response ({reason})")));
    };

    let body = strip_code_fence(text);
    serde_json::from_str(body).map_err(|e| {
        ProviderError::parse(format!("{e}. Response: {}", truncate(body, 200)))
    })
}

/// Models sometimes wrap JSON in a Markdown fence despite the MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) if !err.error.message.is_empty() => err.error.message,
        _ => truncate(body, 200).to_string(),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(text: &str) -> GenerateResponse {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        });
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn parses_record_array() {
        let resp = response_with(
            r#"[{"Manufacturer":"Mazda","Model":"MX-5","Generation":"4","Model_Code":"ND","Start_Year":2015,"End_Year":"Present"}]"#,
        );
        let records = parse_records(&resp).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model_code, "ND");
        assert_eq!(records[0].start_year, 2015);
    }

    #[test]
    fn strips_markdown_fence() {
        let resp = response_with("```json\n[]\n```");
        assert!(parse_records(&resp).unwrap().is_empty());
    }

    #[test]
    fn non_array_is_parse_error() {
        let resp = response_with("Sorry, I can't help with that.");
        assert!(matches!(parse_records(&resp), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn string_start_year_is_parse_error() {
        let resp = response_with(
            r#"[{"Manufacturer":"Mazda","Model":"MX-5","Generation":"4","Model_Code":"ND","Start_Year":"2015","End_Year":"Present"}]"#,
        );
        assert!(parse_records(&resp).is_err());
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = parse_records(&resp).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn error_body_message_is_extracted() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid");
        assert_eq!(error_message("<html>bad gateway</html>"), "<html>bad gateway</html>");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééé", 2), "éé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
