use schemars::JsonSchema;
use serde_json::Value;

/// JSON Schema (draft 7) describing a tool's parameter struct.
///
/// The `$schema` and `title` keys are dropped so the value can be handed to
/// a host as a function's `parameters` object as-is.
pub fn parameters_schema<T: JsonSchema>() -> Value {
    let root = schemars::schema_for!(T);
    let mut schema = serde_json::to_value(&root).unwrap_or_else(|_| empty_object_schema());

    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        obj.entry("properties")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }

    schema
}

fn empty_object_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}
