//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across every crate that logs
//! compare and sync operations. `tracing` macros take field names as tokens,
//! so emitters spell them out; readers such as the test capture layer look
//! fields up through these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Schema object identifiers
pub const FIELD_OBJECT_NAME: &str = "object_name";
pub const FIELD_DIFF_KIND: &str = "diff_kind";

// Progress counters
pub const FIELD_INDEX: &str = "index";
pub const FIELD_APPLIED: &str = "applied";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CANCELLED: &str = "cancelled";
pub const EVENT_SKIPPED: &str = "skipped";
