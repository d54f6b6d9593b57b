//! Operation boundary macros
//!
//! Every operation logs one start event and exactly one terminal event
//! (`end`, `end_error` or `cancelled`), all tagged with `component` and `op`.

/// Log the start of an operation
///
/// ```
/// # use schemasync_core::log_op_start;
/// log_op_start!("compare");
/// log_op_start!("apply_difference", object_name = "Events", index = 0);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use schemasync_core::log_op_end;
/// log_op_end!("compare", duration_ms = 42);
/// log_op_end!("apply_differences", duration_ms = 42, applied = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation failure
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are emitted as `err.kind` and `err.code`.
///
/// ```
/// # use schemasync_core::log_op_error;
/// # use schemasync_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Timeout);
/// log_op_error!("load_snapshot", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = %ex_err.full_message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = %ex_err.full_message(),
            $($field)*
        );
    }};
}

/// Log that an operation stopped because cancellation was requested
///
/// ```
/// # use schemasync_core::log_op_cancelled;
/// log_op_cancelled!("apply_differences", duration_ms = 7, applied = 1);
/// ```
#[macro_export]
macro_rules! log_op_cancelled {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_CANCELLED,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_CANCELLED,
            duration_ms = $duration,
            $($field)*
        );
    };
}
