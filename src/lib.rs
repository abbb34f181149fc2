//! mcp-shopping-list: shopping-list and city-weather tools for LLM agents
//!
//! Every tool is a named callback that takes JSON arguments and answers with
//! a plain sentence. Failures (unknown city, bad API key, malformed
//! arguments) are reported through that same sentence, because the hosting
//! protocol only passes strings back to the model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcp_shopping_list::{tools::default_registry, Config, FunctionFactory};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let factory = FunctionFactory::from_registry(default_registry(&config)?);
//!
//!     let answer = factory.invoke("getWeather", json!({"city": "Mysuru"})).await;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod schemas;
pub mod tools;

pub use config::{ApiKey, Config};
pub use error::{Result, ToolError};
pub use tools::weather::{WeatherError, WeatherObservation, WeatherService};
pub use tools::{FunctionFactory, ShoppingCart, Tool, ToolProvider, ToolRegistry};

#[cfg(feature = "cli")]
pub mod cli;
