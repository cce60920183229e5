//! LibreTranslate-style text translation.
//!
//! `POST <url>` with `{"q", "source", "target", "format": "text"}` answering
//! `{"translatedText": "..."}`. Errors come back as `{"error": "..."}`.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::domain::Language;
use crate::error::GatewayError;

use super::Translator;

pub struct LibreTranslateClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(client: Client, url: String, api_key: Option<String>) -> Self {
        Self { client, url, api_key }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

impl Translator for LibreTranslateClient {
    fn translate(&self, text: &str, source: Language, target: Language) -> Result<String, GatewayError> {
        let request = TranslateRequest {
            q: text,
            source: source.code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let resp = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .map_err(GatewayError::Transport)?;

        let status = resp.status();
        let body = resp.text().map_err(GatewayError::Transport)?;

        if !status.is_success() {
            // Prefer the service's own message when it sent one.
            return Err(match serde_json::from_str::<TranslateResponse>(&body) {
                Ok(TranslateResponse { error: Some(msg), .. }) => GatewayError::Service(msg),
                _ => GatewayError::Status(status.as_u16()),
            });
        }

        parse_translate_response(&body)
    }
}

/// Extract the translated text from a response body.
pub fn parse_translate_response(body: &str) -> Result<String, GatewayError> {
    let parsed: TranslateResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    if let Some(msg) = parsed.error {
        return Err(GatewayError::Service(msg));
    }

    match parsed.translated_text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(GatewayError::EmptyTranslation),
        None => Err(GatewayError::Decode("missing field `translatedText`".to_string())),
    }
}
