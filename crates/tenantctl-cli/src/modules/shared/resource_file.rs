use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Reads a YAML or JSON resource document.
///
/// A document shaped `{apiVersion, kind, data}` is unwrapped to its `data`.
pub(crate) fn read_resource_file(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_resource_document(&text).with_context(|| format!("invalid resource file {}", path.display()))
}

pub(crate) fn parse_resource_document(text: &str) -> anyhow::Result<Value> {
    // YAML is a superset of JSON, one parser covers both.
    let value: Value = serde_yaml::from_str(text)?;
    let Value::Object(mut map) = value else {
        anyhow::bail!("expected a mapping at the top level");
    };
    if map.contains_key("apiVersion") && map.contains_key("kind") {
        if let Some(data) = map.remove("data") {
            return Ok(data);
        }
    }
    Ok(Value::Object(map))
}
