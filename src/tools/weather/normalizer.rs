use super::error::WeatherError;
use std::fmt;

/// Local and historical city names mapped to the name the weather API knows.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("bangalore", "Bengaluru"),
    ("mysuru", "Mysore"),
    ("bombay", "Mumbai"),
    ("madras", "Chennai"),
];

/// A trimmed, alias-resolved city query, optionally carrying a caller
/// supplied `,CC` country suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCity(String);

impl NormalizedCity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedCity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clean up a raw city string before it is sent upstream.
///
/// Never appends a country code. A suffix the caller wrote (`"Bombay,IN"`)
/// is kept byte for byte; only the name before the first comma is aliased.
pub fn normalize(raw: &str) -> Result<NormalizedCity, WeatherError> {
    let city = raw.trim();
    if city.is_empty() {
        return Err(WeatherError::InvalidInput);
    }

    let (name, suffix) = match city.find(',') {
        Some(idx) => city.split_at(idx),
        None => (city, ""),
    };

    let normalized = match resolve_alias(name.trim()) {
        Some(canonical) => format!("{canonical}{suffix}"),
        None => city.to_string(),
    };

    Ok(NormalizedCity(normalized))
}

fn resolve_alias(name: &str) -> Option<&'static str> {
    CITY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, canonical)| *canonical)
}
