use crate::error::ToolError;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Check tool arguments against the tool's parameter schema
pub fn validate_arguments(
    tool_name: &str,
    schema: &Value,
    arguments: &Value,
) -> std::result::Result<(), ToolError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|err| {
            ToolError::Validation(format!(
                "Failed to prepare `{}` parameter schema for validation: {}",
                tool_name, err
            ))
        })?;

    if let Err(errors) = validator.validate(arguments) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "arguments failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(ToolError::InvalidArguments {
            tool: tool_name.to_string(),
            reason: detail_str,
        });
    }

    Ok(())
}
