//! Run a callable, log whatever goes wrong, and carry on.

use crate::timing::label_of;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

/// Run `f` and swallow any failure.
///
/// An `Err` return or a panic is logged at error level under `label`.
/// The caller sees neither the failure nor the success value.
pub fn log_errors<R, E, F>(label: &str, f: F)
where
    E: Display,
    F: FnOnce() -> Result<R, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::error!(label, error = %e, "call failed"),
        Err(payload) => {
            tracing::error!(label, panic = %panic_message(payload.as_ref()), "call panicked")
        }
    }
}

/// [`log_errors`] for callables that can only fail by panicking.
pub fn log_panics<F: FnOnce()>(label: &str, f: F) {
    log_errors(label, || Ok::<(), std::convert::Infallible>(f()))
}

/// [`log_errors`] with the label taken from `f`'s type name.
pub fn guarded<R, E, F>(f: F)
where
    E: Display,
    F: FnOnce() -> Result<R, E>,
{
    log_errors(&label_of::<F>(), f)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
