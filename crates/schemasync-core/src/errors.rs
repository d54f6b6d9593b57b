use crate::diff::model::SchemaDifference;
use crate::model::ObjectKind;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure that crosses a crate boundary is expressed as an [`ExError`]
/// carrying one of these kinds. The kind is what the diagnostic rules match
/// on, and its code is stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Model/Validation
    InvalidInput,
    /// A definition was rejected by the target store (e.g. empty function body)
    InvalidDefinition,
    /// A snapshot document is malformed or has an unsupported schema version
    InvalidSnapshot,
    /// Two objects of the same kind share a name inside one snapshot
    DuplicateObject,
    /// Text named an object kind outside {table, function}
    UnknownObjectKind,

    // Lookup
    NotFound,
    DatabaseNotFound,

    // Reconciliation
    LoadFailed,
    SyncFailed,
    Cancelled,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,
    Timeout,

    // Auth
    Unauthorised,
    Forbidden,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDefinition => "ERR_INVALID_DEFINITION",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::DuplicateObject => "ERR_DUPLICATE_OBJECT",
            ExErrorKind::UnknownObjectKind => "ERR_UNKNOWN_OBJECT_KIND",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DatabaseNotFound => "ERR_DATABASE_NOT_FOUND",
            ExErrorKind::LoadFailed => "ERR_LOAD_FAILED",
            ExErrorKind::SyncFailed => "ERR_SYNC_FAILED",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Look a kind up by its stable code (used by data-defined diagnostic rules)
    pub fn from_code(code: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|k| k.code() == code)
    }
}

const ALL_KINDS: &[ExErrorKind] = &[
    ExErrorKind::InvalidInput,
    ExErrorKind::InvalidDefinition,
    ExErrorKind::InvalidSnapshot,
    ExErrorKind::DuplicateObject,
    ExErrorKind::UnknownObjectKind,
    ExErrorKind::NotFound,
    ExErrorKind::DatabaseNotFound,
    ExErrorKind::LoadFailed,
    ExErrorKind::SyncFailed,
    ExErrorKind::Cancelled,
    ExErrorKind::Io,
    ExErrorKind::Serialization,
    ExErrorKind::Persistence,
    ExErrorKind::ExternalService,
    ExErrorKind::Timeout,
    ExErrorKind::Unauthorised,
    ExErrorKind::Forbidden,
    ExErrorKind::Internal,
];

/// Items applied out of the total when a sequence stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub applied: usize,
    pub total: usize,
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context about the object and
/// operation involved. A batch error keeps its members in `related`; a
/// wrapping error keeps its cause in `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    object_kind: Option<ObjectKind>,
    object_name: Option<String>,
    index: Option<usize>,
    progress: Option<Progress>,
    message: String,
    source: Option<Box<ExError>>,
    related: Vec<ExError>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            object_kind: None,
            object_name: None,
            index: None,
            progress: None,
            message: String::new(),
            source: None,
            related: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the kind of the schema object involved
    pub fn with_object_kind(mut self, kind: ObjectKind) -> Self {
        self.object_kind = Some(kind);
        self
    }

    /// Add the name of the schema object involved
    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    /// Add the zero-based position of the failing item in a sequence
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add how far a sequence got before this error stopped it
    pub fn with_progress(mut self, applied: usize, total: usize) -> Self {
        self.progress = Some(Progress { applied, total });
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

    /// Add the member errors of a batch failure
    pub fn with_related(mut self, related: Vec<ExError>) -> Self {
        self.related = related;
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

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn object_kind(&self) -> Option<ObjectKind> {
        self.object_kind
    }

    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Get the member errors of a batch failure (empty for ordinary errors)
    pub fn related(&self) -> &[ExError] {
        &self.related
    }

    /// True when this error aggregates other errors
    pub fn is_batch(&self) -> bool {
        !self.related.is_empty()
    }

    /// Message text joined with the messages of the cause chain
    ///
    /// Falls back to the code when an error in the chain has no message.
    pub fn full_message(&self) -> String {
        let mut parts = Vec::new();
        let mut current = Some(self);
        while let Some(err) = current {
            if err.message.is_empty() {
                parts.push(err.code().to_string());
            } else {
                parts.push(err.message.clone());
            }
            current = err.source_error();
        }
        parts.join(": ")
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
        match (&self.object_kind, &self.object_name) {
            (Some(kind), Some(name)) => write!(f, " ({} '{}')", kind, name)?,
            (None, Some(name)) => write!(f, " ('{}')", name)?,
            _ => {}
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
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

/// Which side of a comparison a snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
    Source,
    Target,
}

impl std::fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotSide::Source => write!(f, "source"),
            SnapshotSide::Target => write!(f, "target"),
        }
    }
}

/// One failed item collected in continue-on-error mode
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyFailure {
    /// Zero-based position of the difference in the applied sequence
    pub index: usize,
    pub difference: SchemaDifference,
    pub error: ExError,
}

/// Outcome taxonomy for compare and sync runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// A snapshot could not be obtained from its provider
    #[error("Failed to load {side} schema: {source}")]
    Load {
        side: SnapshotSide,
        source: ExError,
    },

    /// Fail-fast abort: the difference at `index` failed and nothing after it was attempted
    #[error(
        "Sync stopped at difference {} of {total} ({difference}) after {applied} applied: {source}",
        .index + 1
    )]
    Apply {
        index: usize,
        total: usize,
        applied: usize,
        difference: Box<SchemaDifference>,
        /// Differences after the failing one, never attempted
        remaining: Vec<SchemaDifference>,
        source: ExError,
    },

    /// A writer reported a failure that is already a sync failure; passed through unchanged
    #[error("{0}")]
    Sync(ExError),

    /// Continue-on-error run finished with at least one failure
    #[error("{} of {total} differences failed ({applied} applied)", .failures.len())]
    Batch {
        applied: usize,
        total: usize,
        failures: Vec<ApplyFailure>,
    },

    /// The caller requested early termination
    #[error("Sync cancelled after {applied} of {total} differences")]
    Cancelled { applied: usize, total: usize },
}

impl SyncError {
    /// True for the cancellation outcome
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SyncError::Cancelled { .. })
    }
}

impl From<SyncError> for ExError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Load { side, source } => ExError::new(ExErrorKind::LoadFailed)
                .with_op("load_snapshot")
                .with_message(format!("Failed to load {} schema", side))
                .with_source(source),

            SyncError::Apply {
                index,
                total,
                applied,
                difference,
                remaining: _,
                source,
            } => ExError::new(ExErrorKind::SyncFailed)
                .with_op("apply_differences")
                .with_object_kind(difference.object_kind())
                .with_object_name(difference.name())
                .with_index(index)
                .with_progress(applied, total)
                .with_message(format!(
                    "Stopped at difference {} of {} after {} applied",
                    index + 1,
                    total,
                    applied
                ))
                .with_source(source),

            SyncError::Sync(inner) => inner,

            SyncError::Batch {
                applied,
                total,
                failures,
            } => {
                let count = failures.len();
                let related = failures
                    .into_iter()
                    .map(|f| {
                        let ApplyFailure {
                            index,
                            difference,
                            error,
                        } = f;
                        let mut error = error.with_index(index);
                        if error.object_name().is_none() {
                            error = error
                                .with_object_kind(difference.object_kind())
                                .with_object_name(difference.name());
                        }
                        error
                    })
                    .collect();
                ExError::new(ExErrorKind::SyncFailed)
                    .with_op("apply_differences")
                    .with_message(format!(
                        "{} of {} differences failed ({} applied)",
                        count, total, applied
                    ))
                    .with_related(related)
            }

            SyncError::Cancelled { applied, total } => ExError::new(ExErrorKind::Cancelled)
                .with_op("apply_differences")
                .with_message(format!(
                    "Sync cancelled after {} of {} differences",
                    applied, total
                )),
        }
    }
}

/// Conversion from serde_json::Error to ExError
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
