//! Structured `package.json` dialect.
//!
//! Only the `dependencies` and `devDependencies` groups are read. Both are
//! merged into one flat map with development entries applied last, so a
//! name declared in both groups takes its development version.

use crate::errors::{DepGateError, Result};
use crate::manifest::decode_utf8;
use crate::model::{DependencyMap, Dialect};
use serde_json::{Map, Value};

/// Primary dependency group
pub const PRIMARY_GROUP: &str = "dependencies";

/// Development dependency group, merged after the primary group
pub const DEVELOPMENT_GROUP: &str = "devDependencies";

/// Parse `package.json` bytes into a canonical map.
///
/// # Errors
///
/// - `InvalidEncoding`: bytes are not valid UTF-8
/// - `MalformedManifest`: not valid JSON, or the root is not an object
/// - `InvalidDependencyGroup`: a group is present but is not an object
pub fn parse_package_json(bytes: &[u8]) -> Result<DependencyMap> {
    let text = decode_utf8(Dialect::PackageJson, bytes)?;

    let raw: Value = serde_json::from_str(text).map_err(|e| DepGateError::MalformedManifest {
        dialect: Dialect::PackageJson.as_str().to_string(),
        reason: format!("not valid JSON: {}", e),
    })?;

    let root = raw.as_object().ok_or_else(|| DepGateError::MalformedManifest {
        dialect: Dialect::PackageJson.as_str().to_string(),
        reason: "JSON root must be an object".to_string(),
    })?;

    let mut deps = DependencyMap::new();
    for group in [PRIMARY_GROUP, DEVELOPMENT_GROUP] {
        if let Some(entries) = dependency_group(root, group)? {
            for (name, version) in entries {
                deps.insert(name.as_str(), render_version(version));
            }
        }
    }

    Ok(deps)
}

/// Fetch a dependency group; absent or `null` means empty.
fn dependency_group<'a>(
    root: &'a Map<String, Value>,
    group: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match root.get(group) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(entries)) => Ok(Some(entries)),
        Some(other) => Err(DepGateError::InvalidDependencyGroup {
            group: group.to_string(),
            reason: format!("expected an object, got {}", json_type_name(other)),
        }),
    }
}

/// Version strings are taken verbatim; anything else as compact JSON.
fn render_version(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
