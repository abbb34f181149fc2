//! City weather lookup backed by the OpenWeatherMap current-weather API.
//!
//! A lookup runs in three steps: [`normalizer::normalize`] cleans the city
//! name, [`WeatherQueryExecutor`] makes a single HTTP call and reports what
//! happened as a [`QueryOutcome`], and [`interpreter::interpret`] turns that
//! outcome into the one sentence the caller gets back. Failures never leave
//! this module as errors.

pub mod error;
pub mod executor;
pub mod interpreter;
pub mod normalizer;

pub use error::WeatherError;
pub use executor::{QueryOutcome, WeatherQueryExecutor};
pub use interpreter::{interpret, WeatherObservation};
pub use normalizer::{normalize, NormalizedCity};

use super::tool::{Tool, ToolFuture, ToolProvider};
use crate::config::Config;
use crate::schemas::{decode_arguments, parameters_schema};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const GET_WEATHER_TOOL: &str = "getWeather";

/// Parameters for weather queries
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WeatherParams {
    /// City name, optionally with a country code, e.g. "Mysuru" or "London,GB"
    #[serde(default)]
    pub city: Option<String>,
}

/// Stateless weather lookup; cheap to clone and safe to share across tasks
#[derive(Debug, Clone)]
pub struct WeatherService {
    executor: WeatherQueryExecutor,
}

impl WeatherService {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            executor: WeatherQueryExecutor::new(config)?,
        })
    }

    /// Look up the current weather for `city`, always answering with a
    /// sentence.
    pub async fn get_weather(&self, city: &str) -> String {
        let result = match normalize(city) {
            Ok(normalized) => {
                let outcome = self.executor.execute(&normalized).await;
                match interpreter::classify(outcome, &normalized) {
                    Ok(observation) => {
                        info!(target: "weather", city = %normalized, "Weather lookup succeeded");
                        observation.to_string()
                    }
                    Err(err) => {
                        warn!(target: "weather", city = %normalized, kind = err.kind(), "Weather lookup failed");
                        err.to_string()
                    }
                }
            }
            Err(err) => err.to_string(),
        };

        self.executor.api_key().redact(&result)
    }
}

impl ToolProvider for WeatherService {
    fn describe(&self) -> Vec<Arc<dyn Tool>> {
        vec![Arc::new(GetWeatherTool::new(self.clone()))]
    }
}

/// The `getWeather` tool callback
#[derive(Debug, Clone)]
pub struct GetWeatherTool {
    service: WeatherService,
}

impl GetWeatherTool {
    pub fn new(service: WeatherService) -> Self {
        Self { service }
    }
}

impl Tool for GetWeatherTool {
    fn name(&self) -> &'static str {
        GET_WEATHER_TOOL
    }

    fn description(&self) -> &'static str {
        "Get the current weather for a given city. Example: getWeather('Mysuru') or getWeather('London,UK')."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<WeatherParams>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: WeatherParams = decode_arguments(GET_WEATHER_TOOL, parameters)?;
            Ok(self
                .service
                .get_weather(params.city.as_deref().unwrap_or_default())
                .await)
        })
    }
}
