//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use chanid_core::log_op_start;
/// log_op_start!("acl_add");
/// log_op_start!("acl_add", mapped_id = 100);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chanid_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chanid_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use chanid_core::log_op_end;
/// log_op_end!("acl_add", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chanid_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chanid_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use chanid_core::log_op_error;
/// # use chanid_core::errors::{AclError, AclErrorKind};
/// let err = AclError::new(AclErrorKind::UniquenessViolation);
/// log_op_error!("acl_add", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let acl_err: &$crate::errors::AclError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = chanid_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?acl_err.kind(),
            err_code = acl_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let acl_err: &$crate::errors::AclError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = chanid_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?acl_err.kind(),
            err_code = acl_err.code(),
            $($field)*
        );
    }};
}
