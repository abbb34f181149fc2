//! Tools module containing tool abstractions and the built-in providers

pub mod function_factory;
pub mod shopping_list;
pub mod tool;
pub mod weather;

pub use function_factory::FunctionFactory;
pub use shopping_list::{ShoppingCart, ShoppingItem};
pub use tool::{Tool, ToolFuture, ToolProvider, ToolRegistry};
pub use weather::{GetWeatherTool, WeatherService};

use crate::{config::Config, Result};

/// Aggregate every built-in provider: shopping list first, then weather.
pub fn default_registry(config: &Config) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register_provider(&ShoppingCart::new())?;
    registry.register_provider(&WeatherService::new(config)?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = default_registry(&Config::new("key")).unwrap();
        assert_eq!(
            registry.names(),
            vec!["addItem", "removeItem", "getItems", "getWeather"]
        );
    }
}
