use reportseal_core_types::RequestId;
use thiserror::Error;

/// Result type alias using SealError
pub type Result<T> = std::result::Result<T, SealError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by the CLI, by tests and by
/// anything consuming the structured logs. The ledger kinds mirror the
/// ledger's guard clauses one to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// Missing or unreadable report, malformed structured content, bad digest text
    InvalidInput,

    // Fetch
    /// A dataset reference could not be retrieved
    Fetch,
    /// A network or database operation exceeded its deadline
    Timeout,

    // Integrity
    /// Internal invariant violated (e.g. digest of the wrong length)
    Integrity,

    // Ledger guards
    Unauthorised,
    EmptyJobId,
    EmptyHash,
    AlreadyExists,
    NotFound,
    /// Ledger storage is missing or was never initialised with an owner
    LedgerUnavailable,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Fetch => "ERR_FETCH",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Integrity => "ERR_INTEGRITY",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::EmptyJobId => "ERR_EMPTY_JOB_ID",
            ExErrorKind::EmptyHash => "ERR_EMPTY_HASH",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::LedgerUnavailable => "ERR_LEDGER_UNAVAILABLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used for programmatic handling plus enough
/// context (job id, dataset reference) for a caller to act on the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    job_id: Option<String>,
    reference: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            job_id: None,
            reference: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the job id the failure concerns
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Set the dataset reference the failure concerns
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the request ID for correlation
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Set the error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(job_id) = &self.job_id {
            write!(f, " (job_id: {})", job_id)?;
        }
        if let Some(reference) = &self.reference {
            write!(f, " (reference: {})", reference)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for hashing and ledger operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SealError {
    // ===== Input Errors =====
    /// Report file does not exist
    #[error("Report file not found: {path}")]
    ReportNotFound { path: String },

    /// Report file exists but could not be read as UTF-8 text
    #[error("Report file unreadable: {path}: {reason}")]
    ReportUnreadable { path: String, reason: String },

    /// Report text is not valid structured content
    #[error("Invalid report JSON: {reason}")]
    MalformedReport { reason: String },

    /// A dataset location holds something other than a string
    #[error("Dataset reference at results.{field} is not a string")]
    InvalidDatasetReference { field: String },

    /// Report has no usable jobId field
    #[error("Report has no string jobId field")]
    MissingJobId,

    /// Digest text has the right length but is not hex with a 0x prefix
    #[error("Malformed digest {value}: {reason}")]
    MalformedDigest { value: String, reason: String },

    // ===== Fetch Errors =====
    /// Dataset fetch returned a non-success outcome
    #[error("Failed to fetch {reference}: {reason}")]
    FetchFailed { reference: String, reason: String },

    /// Dataset fetch exceeded its deadline
    #[error("Timed out fetching {reference}")]
    FetchTimedOut { reference: String },

    // ===== Integrity Errors =====
    /// A digest did not have exactly 66 characters
    #[error("Invalid hash length ({length})")]
    InvalidDigestLength { length: usize },

    // ===== Ledger Errors =====
    /// Write attempted by an identity other than the ledger owner
    #[error("Caller {caller} is not the ledger owner")]
    NotOwner { caller: String },

    #[error("jobId must not be empty")]
    EmptyJobId,

    #[error("Report hash must not be empty")]
    EmptyHash,

    /// An entry for this job already exists
    #[error("Job already exists: {job_id}")]
    JobAlreadyExists { job_id: String },

    /// No entry for this job exists
    #[error("Report not found: {job_id}")]
    JobNotFound { job_id: String },

    /// Ledger was already initialised for a different owner
    #[error("Ledger already initialised with owner {owner}")]
    LedgerAlreadyOwned { owner: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SealError {
    /// Kind this error maps to in the canonical facility
    pub fn kind(&self) -> ExErrorKind {
        match self {
            SealError::ReportNotFound { .. }
            | SealError::ReportUnreadable { .. }
            | SealError::MalformedReport { .. }
            | SealError::InvalidDatasetReference { .. }
            | SealError::MissingJobId
            | SealError::MalformedDigest { .. } => ExErrorKind::InvalidInput,
            SealError::FetchFailed { .. } => ExErrorKind::Fetch,
            SealError::FetchTimedOut { .. } => ExErrorKind::Timeout,
            SealError::InvalidDigestLength { .. } => ExErrorKind::Integrity,
            SealError::NotOwner { .. } => ExErrorKind::Unauthorised,
            SealError::EmptyJobId => ExErrorKind::EmptyJobId,
            SealError::EmptyHash => ExErrorKind::EmptyHash,
            SealError::JobAlreadyExists { .. } | SealError::LedgerAlreadyOwned { .. } => {
                ExErrorKind::AlreadyExists
            }
            SealError::JobNotFound { .. } => ExErrorKind::NotFound,
            SealError::Serialization { .. } => ExErrorKind::Serialization,
            SealError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from SealError to ExError
///
/// Carries the job id or dataset reference over into the structured
/// fields so callers can match on them without parsing messages.
impl From<SealError> for ExError {
    fn from(err: SealError) -> Self {
        let ex = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            SealError::FetchFailed { reference, .. } | SealError::FetchTimedOut { reference } => {
                ex.with_op("fetch_dataset").with_reference(reference)
            }
            SealError::InvalidDigestLength { .. } | SealError::MalformedDigest { .. } => {
                ex.with_op("parse_digest")
            }
            SealError::ReportNotFound { .. }
            | SealError::ReportUnreadable { .. }
            | SealError::MalformedReport { .. }
            | SealError::InvalidDatasetReference { .. }
            | SealError::MissingJobId => ex.with_op("read_report"),
            SealError::NotOwner { .. } | SealError::EmptyJobId | SealError::EmptyHash => {
                ex.with_op("store_report")
            }
            SealError::JobAlreadyExists { job_id } => {
                ex.with_op("store_report").with_job_id(job_id)
            }
            SealError::JobNotFound { job_id } => ex.with_job_id(job_id),
            SealError::LedgerAlreadyOwned { .. } => ex.with_op("initialize_ledger"),
            SealError::Serialization { .. } | SealError::Internal { .. } => ex,
        }
    }
}
