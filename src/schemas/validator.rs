use crate::{Result, ToolError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize tool arguments into their parameter struct.
///
/// Failures carry the JSON path of the offending field.
pub fn decode_arguments<T: DeserializeOwned>(tool_name: &str, arguments: Value) -> Result<T> {
    // Hosts sometimes send `null` for tools that take no arguments.
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };

    serde_path_to_error::deserialize(arguments).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ToolError::InvalidArguments {
            tool: tool_name.to_string(),
            reason: format!("at {}: {}", location, err.inner()),
        }
    })
}
