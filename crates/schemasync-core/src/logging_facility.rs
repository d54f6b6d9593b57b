//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`,
//!   `log_op_error!`, `log_op_cancelled!`)
//! - Run correlation through a span carrying `run_id` and `trace_id`
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use schemasync_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, run_span, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
