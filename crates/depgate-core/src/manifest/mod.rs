//! Manifest parsing.
//!
//! Converts raw manifest bytes of a declared [`Dialect`] into a canonical
//! [`DependencyMap`]. Parsing fails only when the bytes cannot be decoded
//! in the dialect's base format; everything past that is best-effort
//! extraction of name/version pairs.
//!
//! ## Entry point
//!
//! ```
//! use depgate_core::manifest::parse_manifest;
//! use depgate_core::model::Dialect;
//!
//! let deps = parse_manifest(Dialect::Requirements, b"flask==1.2\nrequests\n").unwrap();
//! assert_eq!(deps.get("flask"), Some("1.2"));
//! assert_eq!(deps.get("requests"), Some("0.0"));
//! ```

pub mod package_json;
pub mod requirements;

use crate::errors::{DepGateError, Result};
use crate::model::{DependencyMap, Dialect};

/// Parse manifest bytes of the given dialect into a canonical map.
///
/// # Errors
///
/// - `InvalidEncoding`: bytes are not valid UTF-8
/// - `MalformedManifest`: structured payload is not a JSON object
/// - `InvalidDependencyGroup`: a structured dependency group is not an object
pub fn parse_manifest(dialect: Dialect, bytes: &[u8]) -> Result<DependencyMap> {
    let deps = match dialect {
        Dialect::Requirements => requirements::parse_requirements(bytes)?,
        Dialect::PackageJson => package_json::parse_package_json(bytes)?,
    };

    tracing::debug!(
        dialect = dialect.as_str(),
        dep_count = deps.len(),
        "manifest canonicalized"
    );

    Ok(deps)
}

/// Decode manifest bytes as UTF-8, dropping a leading byte-order mark.
pub(crate) fn decode_utf8(dialect: Dialect, bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes).map_err(|e| DepGateError::InvalidEncoding {
        dialect: dialect.as_str().to_string(),
        reason: e.to_string(),
    })?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
