use crate::{Result, ToolError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Tool::execute`]
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// A callable exposed to the agent host
///
/// Tools always answer with a plain string. An `Err` is reserved for calls
/// that never reached the tool's own logic (malformed arguments); the
/// [`FunctionFactory`](super::FunctionFactory) renders those as strings too.
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// The name of the tool (used in function calls)
    fn name(&self) -> &'static str;

    /// A description of what the tool does
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's parameters
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with given parameters
    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_>;
}

/// A source of tools, registered explicitly with a [`ToolRegistry`]
pub trait ToolProvider {
    /// The provider's tools, in the order they should be exposed
    fn describe(&self) -> Vec<Arc<dyn Tool>>;
}

/// Ordered registry of tools aggregated from every provider
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.register_all(vec![Arc::new(tool) as Arc<dyn Tool>])
    }

    /// Append every tool a provider describes.
    ///
    /// Registration is all-or-nothing: if any name collides with an existing
    /// tool (or with another tool from the same provider) nothing is added.
    pub fn register_provider<P: ToolProvider + ?Sized>(&mut self, provider: &P) -> Result<()> {
        self.register_all(provider.describe())
    }

    fn register_all(&mut self, tools: Vec<Arc<dyn Tool>>) -> Result<()> {
        for (idx, tool) in tools.iter().enumerate() {
            let name = tool.name();
            let seen_before = tools[..idx].iter().any(|other| other.name() == name);
            if seen_before || self.get(name).is_some() {
                return Err(ToolError::DuplicateTool(name.to_string()));
            }
        }
        self.tools.extend(tools);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// All registered tools, in registration order
    pub fn list(&self) -> Vec<&dyn Tool> {
        self.tools.iter().map(|tool| tool.as_ref()).collect()
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate tool schemas for OpenAI-style function calling
    pub fn to_openai_tools(&self) -> Vec<serde_json::Value> {
        self.tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema()
                    }
                })
            })
            .collect()
    }
}
