use super::{
    tool::{ToolProvider, ToolRegistry},
    Tool,
};
use crate::schemas::validate_arguments;
use crate::{Result, ToolError};
use serde_json::Value;
use tracing::{info, warn};

/// Dispatches tool calls by name over a [`ToolRegistry`]
#[derive(Debug, Clone, Default)]
pub struct FunctionFactory {
    registry: ToolRegistry,
}

impl FunctionFactory {
    /// Create a new function factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already populated registry
    pub fn from_registry(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Register a single tool with the factory
    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.registry.register(tool)
    }

    /// Register every tool a provider describes
    pub fn register_provider<P: ToolProvider + ?Sized>(&mut self, provider: &P) -> Result<()> {
        self.registry.register_provider(provider)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Validate the arguments against the tool's schema, then run it
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<String> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| ToolError::ToolNotFound(function_name.to_string()))?;

        let parameters = if parameters.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            parameters
        };
        validate_arguments(function_name, &tool.parameters_schema(), &parameters)?;

        info!(tool = function_name, "Executing tool");
        tool.execute(parameters).await
    }

    /// Run a tool call and always answer with a string.
    ///
    /// This is the boundary handed to the hosting protocol layer: unknown
    /// tools and malformed arguments come back as sentences, not errors.
    pub async fn invoke(&self, function_name: &str, parameters: Value) -> String {
        match self.execute_function(function_name, parameters).await {
            Ok(output) => output,
            Err(err) => {
                warn!(tool = function_name, code = err.error_code(), error = %err, "Tool call rejected");
                err.to_tool_result()
            }
        }
    }

    /// Get all available tools for OpenAI-style function calling
    pub fn get_openai_tools(&self) -> Vec<Value> {
        self.registry.to_openai_tools()
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }
}
