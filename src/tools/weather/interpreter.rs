use super::error::WeatherError;
use super::executor::QueryOutcome;
use super::normalizer::NormalizedCity;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

const DEFAULT_NOT_FOUND_MESSAGE: &str = "city not found";
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub condition: String,
    pub city: String,
    pub country: Option<String>,
}

impl fmt::Display for WeatherObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The current weather in {}", self.city)?;
        if let Some(country) = &self.country {
            write!(f, ",{}", country)?;
        }
        write!(
            f,
            " is {} with a temperature of {:.1}°C.",
            self.condition, self.temperature_c
        )
    }
}

/// Turn any executor outcome into the caller-facing sentence
pub fn interpret(outcome: QueryOutcome, city: &NormalizedCity) -> String {
    match classify(outcome, city) {
        Ok(observation) => observation.to_string(),
        Err(err) => err.to_string(),
    }
}

/// Decide whether an outcome is a usable observation, and if not, why.
pub fn classify(
    outcome: QueryOutcome,
    city: &NormalizedCity,
) -> Result<WeatherObservation, WeatherError> {
    let city_text = city.as_str().to_string();

    let body = match outcome {
        QueryOutcome::TransportError(detail) => {
            return Err(WeatherError::NotFound {
                city: city_text,
                detail,
            })
        }
        QueryOutcome::ClientError { status: 404, body } => {
            return Err(WeatherError::NotFound {
                city: city_text,
                detail: api_message(&body),
            })
        }
        QueryOutcome::ClientError { status: 401, .. } => return Err(WeatherError::Unauthorized),
        QueryOutcome::ClientError { status, body } => {
            return Err(WeatherError::UpstreamError {
                status,
                body: summarize_body(&body),
            })
        }
        QueryOutcome::Success { body, .. } => body,
    };

    if body.trim().is_empty() {
        return Err(WeatherError::NoData { city: city_text });
    }

    let value: Value = serde_json::from_str(&body).map_err(|err| {
        WeatherError::UnexpectedFailure {
            city: city_text.clone(),
            detail: decode_diagnostic(&err),
        }
    })?;

    if is_empty_document(&value) {
        return Err(WeatherError::NoData { city: city_text });
    }

    // serde would happily read a struct out of an array; only objects count.
    if !value.is_object() {
        return Err(WeatherError::UnexpectedFailure {
            city: city_text,
            detail: "the response was not a JSON object".to_string(),
        });
    }

    let response = CurrentWeatherResponse::deserialize(value).map_err(|err| {
        WeatherError::UnexpectedFailure {
            city: city_text.clone(),
            detail: decode_diagnostic(&err),
        }
    })?;

    if let Some(code) = response.cod.as_ref().and_then(ApiStatus::code) {
        if code != 200 {
            return Err(WeatherError::NotFound {
                city: city_text,
                detail: response
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_NOT_FOUND_MESSAGE.to_string()),
            });
        }
    }

    let temperature_c = response.main.and_then(|main| main.temp);
    // Only the first condition matters; later entries may be anything.
    let condition = response
        .weather
        .and_then(|conditions| conditions.into_iter().next())
        .and_then(|first| serde_json::from_value::<ConditionBlock>(first).ok())
        .and_then(|first| first.description)
        .filter(|description| !description.trim().is_empty());

    let (Some(temperature_c), Some(condition)) = (temperature_c, condition) else {
        return Err(WeatherError::IncompleteData { city: city_text });
    };

    let resolved_city = response
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(city_text);
    let country = response
        .sys
        .and_then(|sys| sys.country)
        .filter(|country| !country.trim().is_empty());

    Ok(WeatherObservation {
        temperature_c,
        condition,
        city: resolved_city,
        country,
    })
}

/// Subset of the OpenWeatherMap current-weather document.
///
/// Every field is optional and decoded on its own; a field of the wrong
/// type reads as absent instead of failing the whole document.
#[derive(Debug, Default, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default, deserialize_with = "lenient")]
    cod: Option<ApiStatus>,
    #[serde(default, deserialize_with = "lenient")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    main: Option<MainBlock>,
    #[serde(default, deserialize_with = "lenient")]
    weather: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sys: Option<SysBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    #[serde(default, deserialize_with = "lenient")]
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    #[serde(default, deserialize_with = "lenient")]
    country: Option<String>,
}

/// The API sends `cod` as a number on success and as a string on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiStatus {
    Number(serde_json::Number),
    Text(String),
}

impl ApiStatus {
    fn code(&self) -> Option<i64> {
        match self {
            ApiStatus::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|code| code.fract() == 0.0)
                    .map(|code| code as i64)
            }),
            ApiStatus::Text(text) => text.trim().parse().ok(),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// `message` from an error body, if the body is the usual JSON envelope
fn api_message(body: &str) -> String {
    serde_json::from_str::<CurrentWeatherResponse>(body)
        .ok()
        .and_then(|response| response.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NOT_FOUND_MESSAGE.to_string())
}

fn summarize_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut summary: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    summary.push_str("...");
    summary
}

fn decode_diagnostic(err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match err.classify() {
        Category::Syntax | Category::Eof => "the response was not valid JSON".to_string(),
        Category::Data => "the response was not a JSON object".to_string(),
        Category::Io => "the response could not be read".to_string(),
    }
}
