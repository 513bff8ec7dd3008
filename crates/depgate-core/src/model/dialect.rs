use serde::{Deserialize, Serialize};
use std::fmt;

/// Manifest dialect accepted by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// Line-oriented `requirements.txt`
    #[serde(rename = "pip")]
    Requirements,
    /// Structured `package.json`
    #[serde(rename = "npm")]
    PackageJson,
}

impl Dialect {
    /// Stable short label, matching the CLI flag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Requirements => "pip",
            Dialect::PackageJson => "npm",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
