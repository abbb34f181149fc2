use super::normalizer::NormalizedCity;
use crate::config::{ApiKey, Config};
use crate::{Result, ToolError};
use reqwest::Client;
use tracing::{debug, warn};

/// Everything the weather endpoint can hand back, as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// 2xx response
    Success { status: u16, body: String },
    /// Any non-2xx response
    ClientError { status: u16, body: String },
    /// The request never produced a response (DNS, connect, timeout, read)
    TransportError(String),
}

/// Performs one current-weather request per call
#[derive(Debug, Clone)]
pub struct WeatherQueryExecutor {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl WeatherQueryExecutor {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ToolError::Http(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub(crate) fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Issue the lookup. No retries; the first failure is the answer.
    pub async fn execute(&self, city: &NormalizedCity) -> QueryOutcome {
        debug!(target: "weather", city = %city, "Fetching current weather");

        let url = build_query_url(&self.base_url, city.as_str(), self.api_key.expose());

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => return transport_failure(err),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return transport_failure(err),
        };

        debug!(target: "weather", city = %city, status = status.as_u16(), "Weather API responded");

        if status.is_success() {
            QueryOutcome::Success {
                status: status.as_u16(),
                body,
            }
        } else {
            QueryOutcome::ClientError {
                status: status.as_u16(),
                body,
            }
        }
    }
}

fn transport_failure(err: reqwest::Error) -> QueryOutcome {
    let summary = if err.is_timeout() {
        "the weather service did not respond in time"
    } else if err.is_connect() {
        "could not connect to the weather service"
    } else if err.is_body() || err.is_decode() {
        "the weather service response could not be read"
    } else {
        "the request to the weather service failed"
    };

    // The URL carries the key; drop it before the error is formatted anywhere.
    let err = err.without_url();
    warn!(target: "weather", error = %err, "Weather API request failed");

    QueryOutcome::TransportError(summary.to_string())
}

/// `base_url?q=<city>&appid=<key>&units=metric`
pub(crate) fn build_query_url(base_url: &str, city: &str, api_key: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}q={}&appid={}&units=metric",
        base_url,
        separator,
        encode_query_value(city),
        encode_query_value(api_key)
    )
}

/// Percent-encode a query value, leaving commas literal so a `City,CC`
/// query reaches the API unchanged.
pub(crate) fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
