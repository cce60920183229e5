//! Remote lookups: exchange rates and label translation.
//!
//! Both lookups are best effort. A failure never reaches the caller as an
//! error; instead the gateway returns a safe default (identity rate, English
//! text) together with a [`Fallback`] record naming what degraded and why.
//!
//! The HTTP clients live in `rates` and `translate`; the [`Gateway`] itself
//! only sees the [`RateSource`] and [`Translator`] traits.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::domain::{CurrencyCode, ExchangeRate, LabelKey, LabelSet, Language};
use crate::error::{AppError, GatewayError};

pub mod rates;
pub mod translate;

pub use rates::ExchangeRateClient;
pub use translate::LibreTranslateClient;

/// Source of USD → currency multipliers.
pub trait RateSource {
    fn fetch_rate(&self, target: CurrencyCode) -> Result<ExchangeRate, GatewayError>;
}

/// Translates a single text from one language to another.
pub trait Translator {
    fn translate(&self, text: &str, source: Language, target: Language) -> Result<String, GatewayError>;
}

/// One degraded lookup.
#[derive(Debug)]
pub struct Fallback {
    /// What fell back, e.g. `rate:JPY` or `label:de:hours`.
    pub subject: String,
    pub cause: GatewayError,
}

/// A lookup value plus the fallbacks taken while producing it.
#[derive(Debug)]
pub struct Resolved<T> {
    pub value: T,
    pub fallbacks: Vec<Fallback>,
}

impl<T> Resolved<T> {
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            fallbacks: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.fallbacks.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Rate and label resolution with fallback, plus the per-language label memo.
pub struct Gateway<R, T> {
    rates: R,
    translator: T,
    label_cache: HashMap<Language, LabelSet>,
}

/// Gateway backed by the real HTTP services.
pub type HttpGateway = Gateway<ExchangeRateClient, LibreTranslateClient>;

impl HttpGateway {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = http_client(config.timeout)?;
        Ok(Gateway::new(
            ExchangeRateClient::new(client.clone(), config.rate_url.clone(), config.rate_access_key.clone()),
            LibreTranslateClient::new(client, config.translate_url.clone(), config.translate_api_key.clone()),
        ))
    }
}

impl<R: RateSource, T: Translator> Gateway<R, T> {
    pub fn new(rates: R, translator: T) -> Self {
        Self {
            rates,
            translator,
            label_cache: HashMap::new(),
        }
    }

    /// USD → `currency` multiplier for one calculation. Never cached.
    ///
    /// USD short-circuits to 1.0 without touching the network; any lookup
    /// failure also yields 1.0.
    pub fn resolve_rate(&self, currency: CurrencyCode) -> Resolved<ExchangeRate> {
        if currency == CurrencyCode::BASE {
            return Resolved::fresh(ExchangeRate::IDENTITY);
        }

        match self.rates.fetch_rate(currency) {
            Ok(rate) => {
                debug!(currency = currency.code(), rate = rate.value(), "resolved exchange rate");
                Resolved::fresh(rate)
            }
            Err(cause) => {
                warn!(currency = currency.code(), error = %cause, "exchange rate lookup failed; using 1.0");
                Resolved {
                    value: ExchangeRate::IDENTITY,
                    fallbacks: vec![Fallback {
                        subject: format!("rate:{}", currency.code()),
                        cause,
                    }],
                }
            }
        }
    }

    /// Labels for `keys` in `language`.
    ///
    /// The returned set always holds exactly the requested keys. Keys whose
    /// translation fails carry the English text. Every entry produced for a
    /// language, translated or not, is memoized and reused for the rest of
    /// the gateway's lifetime.
    pub fn resolve_labels(&mut self, keys: &[LabelKey], language: Language) -> Resolved<LabelSet> {
        if language == Language::BASE {
            return Resolved::fresh(LabelSet::english(keys));
        }

        let cached = self
            .label_cache
            .entry(language)
            .or_insert_with(|| LabelSet::new(language));

        let mut out = LabelSet::new(language);
        let mut fallbacks = Vec::new();
        for &key in keys {
            if !cached.contains(key) {
                let text = match self.translator.translate(key.english(), Language::BASE, language) {
                    Ok(text) => text,
                    Err(cause) => {
                        warn!(
                            language = language.code(),
                            key = key.name(),
                            error = %cause,
                            "translation failed; keeping English text"
                        );
                        fallbacks.push(Fallback {
                            subject: format!("label:{}:{}", language.code(), key.name()),
                            cause,
                        });
                        key.english().to_string()
                    }
                };
                cached.insert(key, text);
            }
            out.insert(key, cached.get(key));
        }

        debug!(
            language = language.code(),
            keys = keys.len(),
            fallbacks = fallbacks.len(),
            "resolved labels"
        );
        Resolved { value: out, fallbacks }
    }

    pub fn rate_source(&self) -> &R {
        &self.rates
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Languages with memoized labels.
    pub fn cached_languages(&self) -> Vec<Language> {
        let mut langs: Vec<_> = self.label_cache.keys().copied().collect();
        langs.sort();
        langs
    }
}

/// Blocking HTTP client shared by both services.
pub fn http_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP server for exercising the real clients.

    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    pub struct OneShot {
        pub base_url: String,
        handle: JoinHandle<String>,
    }

    impl OneShot {
        /// Raw request (head and body) received by the server.
        pub fn request(self) -> String {
            self.handle.join().unwrap()
        }
    }

    /// Serve exactly one request with the given status line and JSON body.
    pub fn serve_once(status: &'static str, body: &'static str) -> OneShot {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        OneShot {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// An address nothing is listening on.
    pub fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn read_request(stream: &mut impl Read) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_string();
                let body_len = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
