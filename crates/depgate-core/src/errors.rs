use thiserror::Error;

/// Result type alias using DepGateError
pub type Result<T> = std::result::Result<T, DepGateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in depgate. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// Manifest bytes cannot be decoded in the declared dialect
    MalformedInput,

    // History store
    /// History file exists but its envelope or digest is not intact
    CorruptHistory,
    /// History file was written by an incompatible schema version
    UnsupportedSchema,

    // Invocation
    /// No dialect supplied, or a manifest path unusable as an identity
    Configuration,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedInput => "ERR_MALFORMED_INPUT",
            ExErrorKind::CorruptHistory => "ERR_CORRUPT_HISTORY",
            ExErrorKind::UnsupportedSchema => "ERR_UNSUPPORTED_SCHEMA",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable classification plus optional context for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    manifest_path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            manifest_path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add manifest path context
    pub fn with_manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the manifest path context, if any
    pub fn manifest_path(&self) -> Option<&str> {
        self.manifest_path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.manifest_path {
            write!(f, " (manifest: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for manifest parsing and canonicalization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DepGateError {
    /// Manifest bytes are not valid UTF-8
    #[error("{dialect} manifest is not valid UTF-8: {reason}")]
    InvalidEncoding { dialect: String, reason: String },

    /// Manifest text cannot be decoded in its dialect's base format
    #[error("{dialect} manifest is malformed: {reason}")]
    MalformedManifest { dialect: String, reason: String },

    /// A dependency group is present but has the wrong shape
    #[error("dependency group `{group}` is invalid: {reason}")]
    InvalidDependencyGroup { group: String, reason: String },
}

/// Conversion from DepGateError to ExError
impl From<DepGateError> for ExError {
    fn from(err: DepGateError) -> Self {
        let message = err.to_string();
        match err {
            DepGateError::InvalidEncoding { .. }
            | DepGateError::MalformedManifest { .. }
            | DepGateError::InvalidDependencyGroup { .. } => {
                ExError::new(ExErrorKind::MalformedInput).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::MalformedInput, "ERR_MALFORMED_INPUT"),
            (ExErrorKind::CorruptHistory, "ERR_CORRUPT_HISTORY"),
            (ExErrorKind::UnsupportedSchema, "ERR_UNSUPPORTED_SCHEMA"),
            (ExErrorKind::Configuration, "ERR_CONFIGURATION"),
            (ExErrorKind::Io, "ERR_IO"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::MalformedInput)
            .with_op("parse_manifest")
            .with_manifest_path("/srv/app/package.json")
            .with_message("not JSON");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_MALFORMED_INPUT]"));
        assert!(rendered.contains("parse_manifest"));
        assert!(rendered.contains("/srv/app/package.json"));
        assert!(rendered.contains("not JSON"));
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk full");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);

        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
