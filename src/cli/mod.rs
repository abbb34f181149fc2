use crate::{
    config::{Config, API_KEY_VAR, BASE_URL_VAR, TIMEOUT_VAR},
    tools::{default_registry, weather::GET_WEATHER_TOOL},
    FunctionFactory,
};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use serde_json::{json, Value};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Stands in for the API key when the command never reaches the weather service
const UNUSED_API_KEY: &str = "unused";

fn command() -> Command {
    Command::new("mcp-shopping-list")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shopping-list and city-weather tools for LLM agents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help(format!("OpenWeatherMap API key (or set {API_KEY_VAR})")),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help(format!("Weather endpoint override (or set {BASE_URL_VAR})")),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help(format!("Weather request timeout in seconds (or set {TIMEOUT_VAR})")),
        )
        .subcommand(Command::new("tools").about("Print the tool definitions exposed to the host"))
        .subcommand(
            Command::new("call")
                .about("Invoke a tool by name and print its answer")
                .arg(
                    Arg::new("tool")
                        .help("Tool name, e.g. getWeather or addItem")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("arguments")
                        .help("Tool arguments as a JSON object")
                        .default_value("{}")
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("weather")
                .about("Shortcut for `call getWeather`")
                .arg(
                    Arg::new("city")
                        .help("City name, optionally with a country code (London,GB)")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                ),
        )
}

/// CLI entry point
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let config = resolve_config(&matches, |name| env::var(name).ok())?;
    let factory = FunctionFactory::from_registry(
        default_registry(&config).context("Failed to register tools")?,
    );
    info!(tools = ?factory.registry().names(), "Tools registered");

    match matches.subcommand() {
        Some(("tools", _)) => {
            let tools = Value::Array(factory.get_openai_tools());
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        Some(("call", sub)) => {
            let tool = sub
                .get_one::<String>("tool")
                .context("missing tool name")?;
            let raw = sub
                .get_one::<String>("arguments")
                .map(String::as_str)
                .unwrap_or("{}");
            let arguments: Value = serde_json::from_str(raw)
                .with_context(|| format!("Tool arguments are not valid JSON: {raw}"))?;
            println!("{}", factory.invoke(tool, arguments).await);
        }
        Some(("weather", sub)) => {
            let city = sub
                .get_many::<String>("city")
                .map(|parts| parts.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            println!(
                "{}",
                factory.invoke(GET_WEATHER_TOOL, json!({ "city": city })).await
            );
        }
        _ => unreachable!("clap enforces a subcommand"),
    }

    Ok(())
}

/// Command-line flags win over the environment. Only `tools` may run
/// without an API key.
fn resolve_config<E>(matches: &ArgMatches, env: E) -> anyhow::Result<Config>
where
    E: Fn(&str) -> Option<String>,
{
    let flag = |id: &str| matches.get_one::<String>(id).cloned();
    let key_optional = matches.subcommand_name() == Some("tools");

    Config::from_lookup(|name| match name {
        API_KEY_VAR => flag("api-key")
            .or_else(|| env(name))
            .filter(|key| !key.trim().is_empty())
            .or_else(|| key_optional.then(|| UNUSED_API_KEY.to_string())),
        BASE_URL_VAR => flag("base-url").or_else(|| env(name)),
        TIMEOUT_VAR => flag("timeout").or_else(|| env(name)),
        _ => env(name),
    })
    .with_context(|| format!("Use --api-key or set {API_KEY_VAR} (a .env file works too)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_flags_override_environment() {
        let matches = command().get_matches_from([
            "mcp-shopping-list",
            "--api-key",
            "from-flag",
            "--base-url",
            "http://localhost:1234/weather",
            "--timeout",
            "3",
            "tools",
        ]);
        let config = resolve_config(&matches, |name| match name {
            API_KEY_VAR => Some("from-env".to_string()),
            TIMEOUT_VAR => Some("30".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:1234/weather");
        assert_eq!(config.timeout, Some(std::time::Duration::from_secs(3)));
        assert_eq!(config.api_key, crate::ApiKey::new("from-flag"));
    }

    #[test]
    fn test_tools_listing_needs_no_api_key() {
        let matches = command().get_matches_from(["mcp-shopping-list", "tools"]);
        let config = resolve_config(&matches, |_| None).unwrap();
        assert_eq!(config.api_key, crate::ApiKey::new(UNUSED_API_KEY));

        let registry = default_registry(&config).unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_weather_lookups_still_need_an_api_key() {
        for args in [
            vec!["mcp-shopping-list", "weather", "Paris"],
            vec!["mcp-shopping-list", "call", "getItems"],
        ] {
            let matches = command().get_matches_from(args);
            let err = resolve_config(&matches, |_| None).unwrap_err();
            assert!(format!("{err:#}").contains(API_KEY_VAR), "{err:#}");
        }

        let matches = command().get_matches_from(["mcp-shopping-list", "weather", "Paris"]);
        let config = resolve_config(&matches, |name| {
            (name == API_KEY_VAR).then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(config.api_key, crate::ApiKey::new("from-env"));
    }

    #[test]
    fn test_weather_joins_city_words() {
        let matches =
            command().get_matches_from(["mcp-shopping-list", "-k", "x", "weather", "New", "York"]);
        let (_, sub) = matches.subcommand().unwrap();
        let city: Vec<_> = sub.get_many::<String>("city").unwrap().cloned().collect();
        assert_eq!(city, vec!["New", "York"]);
    }
}
