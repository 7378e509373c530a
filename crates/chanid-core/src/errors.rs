use chanid_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using AclError
pub type Result<T> = std::result::Result<T, AclError>;

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the resolution store. Each kind maps to a stable error code that can
/// be used for programmatic error handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclErrorKind {
    /// A row with the same (platform, digest) already exists; an identity
    /// may be associated with at most one canonical ID, ever
    UniquenessViolation,
    /// A platform tag outside the known closed variant set was encountered
    /// during classification or reconstruction (schema/code version
    /// mismatch; a programming/deployment error, not a runtime input error)
    UnsupportedVariant,
    /// A lookup that is structurally guaranteed to return at most one row
    /// returned more than one; the unique index was violated out of band
    InvariantViolation,

    // Integration/IO
    InvalidInput,
    Serialization,
    Persistence,
    Io,

    // Internal
    Internal,
}

impl AclErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            AclErrorKind::UniquenessViolation => "ERR_UNIQUENESS_VIOLATION",
            AclErrorKind::UnsupportedVariant => "ERR_UNSUPPORTED_VARIANT",
            AclErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            AclErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            AclErrorKind::Serialization => "ERR_SERIALIZATION",
            AclErrorKind::Persistence => "ERR_PERSISTENCE",
            AclErrorKind::Io => "ERR_IO",
            AclErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind indicates a broken deployment or corrupted store
    /// rather than a recoverable request-level failure
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AclErrorKind::UnsupportedVariant
                | AclErrorKind::InvariantViolation
                | AclErrorKind::Internal
        )
    }
}

impl std::fmt::Display for AclErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Canonical structured error type
///
/// Provides a structured representation of errors with classification
/// fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone, Error)]
#[error("[{kind}] {message}")]
pub struct AclError {
    kind: AclErrorKind,
    op: Option<String>,
    platform: Option<String>,
    mapped_id: Option<i64>,
    digest: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<AclError>>,
}

impl AclError {
    /// Create a new error with the specified kind
    pub fn new(kind: AclErrorKind) -> Self {
        Self {
            kind,
            op: None,
            platform: None,
            mapped_id: None,
            digest: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add platform tag context
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Add canonical ID context
    pub fn with_mapped_id(mut self, mapped_id: i64) -> Self {
        self.mapped_id = Some(mapped_id);
        self
    }

    /// Add digest context (hex encoded)
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: AclError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> AclErrorKind {
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

    /// Get the platform tag context, if any
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Get the canonical ID context, if any
    pub fn mapped_id(&self) -> Option<i64> {
        self.mapped_id
    }

    /// Get the digest context, if any
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&AclError> {
        self.source.as_deref()
    }
}
