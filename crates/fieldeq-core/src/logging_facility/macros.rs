//! Operation logging macros
//!
//! Each macro stamps `component`, `op` and `event` from the canonical schema
//! in `fieldeq-core-types`, so callers must depend on that crate as well as
//! `tracing`. Extra `key = value` fields follow the usual `tracing` syntax.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = fieldeq_core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use fieldeq_core::log_op_start;
/// log_op_start!("run_cases");
/// log_op_start!("run_cases", case_count = 4);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation; `duration_ms` is required
///
/// ```
/// # use fieldeq_core::log_op_end;
/// log_op_end!("run_cases", duration_ms = 3);
/// log_op_end!("run_cases", duration_ms = 3, passed = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info, $op, EVENT_END, duration_ms = $duration $(, $($field)*)?
        )
    };
}

/// Log a failed operation with the stable code of its error
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use fieldeq_core::{log_op_error, errors::FieldEqError};
/// let err = FieldEqError::DuplicateCaseName { name: "quantity".to_string() };
/// log_op_error!("parse_cases", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
