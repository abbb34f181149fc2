use thiserror::Error;

/// Every way a weather lookup can end other than a full observation.
///
/// The `Display` text is the sentence handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Please specify a valid city name.")]
    InvalidInput,

    #[error("City not found: {city} ({detail}).")]
    NotFound { city: String, detail: String },

    #[error("Invalid API key. Please check your OpenWeatherMap key.")]
    Unauthorized,

    #[error("Weather API error ({status}): {body}")]
    UpstreamError { status: u16, body: String },

    #[error("No weather data found for {city}.")]
    NoData { city: String },

    #[error("Weather information not available for {city}.")]
    IncompleteData { city: String },

    #[error("Error retrieving weather for {city}: {detail}")]
    UnexpectedFailure { city: String, detail: String },
}

impl WeatherError {
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::InvalidInput => "invalid_input",
            WeatherError::NotFound { .. } => "not_found",
            WeatherError::Unauthorized => "unauthorized",
            WeatherError::UpstreamError { .. } => "upstream_error",
            WeatherError::NoData { .. } => "no_data",
            WeatherError::IncompleteData { .. } => "incomplete_data",
            WeatherError::UnexpectedFailure { .. } => "unexpected_failure",
        }
    }
}
