//! exchangerate.host-style rate lookup.
//!
//! `GET <url>?base=USD&symbols=<CODE>` answering `{"rates": {"<CODE>": 150.2}}`.
//! A body with `"success": false` is treated as a failure even on HTTP 200.

use std::collections::HashMap;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{CurrencyCode, ExchangeRate};
use crate::error::GatewayError;

use super::RateSource;

pub struct ExchangeRateClient {
    client: Client,
    url: String,
    access_key: Option<String>,
}

impl ExchangeRateClient {
    pub fn new(client: Client, url: String, access_key: Option<String>) -> Self {
        Self {
            client,
            url,
            access_key,
        }
    }
}

impl RateSource for ExchangeRateClient {
    fn fetch_rate(&self, target: CurrencyCode) -> Result<ExchangeRate, GatewayError> {
        let mut req = self
            .client
            .get(&self.url)
            .query(&[("base", CurrencyCode::BASE.code()), ("symbols", target.code())]);

        if let Some(key) = &self.access_key {
            req = req.query(&[("access_key", key.as_str())]);
        }

        let resp = req.send().map_err(GatewayError::Transport)?;
        if !resp.status().is_success() {
            return Err(GatewayError::Status(resp.status().as_u16()));
        }

        let body = resp.text().map_err(GatewayError::Transport)?;
        parse_rates_response(&body, target)
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Extract the rate for `target` from a response body.
pub fn parse_rates_response(body: &str, target: CurrencyCode) -> Result<ExchangeRate, GatewayError> {
    let parsed: RatesResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    if parsed.success == Some(false) {
        let detail = parsed
            .error
            .as_ref()
            .map(describe_error)
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(GatewayError::Service(detail));
    }

    let value = *parsed
        .rates
        .get(target.code())
        .ok_or_else(|| GatewayError::MissingRate(target.code().to_string()))?;

    ExchangeRate::new(value).ok_or_else(|| GatewayError::InvalidRate {
        code: target.code().to_string(),
        value,
    })
}

// The service reports errors either as a string or as {code, type, info}.
fn describe_error(err: &serde_json::Value) -> String {
    match err {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map
            .get("info")
            .or_else(|| map.get("type"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
        other => other.to_string(),
    }
}
