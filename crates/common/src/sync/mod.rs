//! Blocking bridge over single-shot completion callbacks
//!
//! Callback-style APIs hand their result to a completion handler at some
//! later point, possibly on another thread. The functions here turn such an
//! API into a blocking call: the caller passes a closure that starts the
//! operation with a completion handle, then blocks until the handle fires.
//!
//! - **[`returning_wait`]**: the handle delivers an optional value and an
//!   optional error
//! - **[`throwing_wait`]**: the handle delivers only an optional error
//! - **[`wait`]**: the handle is a plain signal
//!
//! Each handle is consumed when fired, so it fires at most once. Dropping a
//! handle without firing it releases the waiter with the generic
//! "No result found in block." error. There is no timeout and no
//! cancellation.
//!
//! These functions block the current thread and must not be called from
//! inside an async runtime.
//!
//! ## Usage
//!
//! ```rust
//! use std::thread;
//!
//! use foundationkit_common::sync::returning_wait;
//!
//! let answer = returning_wait(|completion| {
//!     thread::spawn(move || completion.succeed(42));
//! })
//! .unwrap();
//!
//! assert_eq!(answer, 42);
//! ```

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{GenericError, KitResult};

/// Description of the error returned when no result is delivered
pub const NO_RESULT_DESCRIPTION: &str = "No result found in block.";

struct Outcome<T> {
    value: Option<T>,
    error: Option<GenericError>,
}

/// Single-use completion handle delivering a value and/or an error
#[must_use = "dropping a completion without firing it releases the waiter with an error"]
#[derive(Debug)]
pub struct Completion<T> {
    sender: oneshot::Sender<Outcome<T>>,
}

impl<T> std::fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outcome")
            .field("has_value", &self.value.is_some())
            .field("error", &self.error)
            .finish()
    }
}

impl<T> Completion<T> {
    /// Deliver the raw callback arguments
    ///
    /// An error takes precedence over a value. Delivering neither releases
    /// the waiter with the "No result found in block." error.
    pub fn complete(self, value: Option<T>, error: Option<GenericError>) {
        // The waiter only disappears if it panicked; nothing is left to notify.
        let _ = self.sender.send(Outcome { value, error });
    }

    /// Deliver a value
    pub fn succeed(self, value: T) {
        self.complete(Some(value), None);
    }

    /// Deliver an error
    pub fn fail(self, error: GenericError) {
        self.complete(None, Some(error));
    }

    /// Deliver a `Result`
    pub fn finish(self, result: KitResult<T>) {
        match result {
            Ok(value) => self.succeed(value),
            Err(error) => self.fail(error),
        }
    }
}

/// Single-use completion handle delivering only an optional error
#[must_use = "dropping a completion without firing it releases the waiter with an error"]
#[derive(Debug)]
pub struct ErrorCompletion {
    inner: Completion<()>,
}

impl ErrorCompletion {
    /// Fire with an optional error; `None` means success
    pub fn complete(self, error: Option<GenericError>) {
        self.inner.complete(Some(()), error);
    }

    /// Fire successfully
    pub fn succeed(self) {
        self.complete(None);
    }

    /// Fire with an error
    pub fn fail(self, error: GenericError) {
        self.complete(Some(error));
    }
}

/// Single-use completion handle carrying no data
#[must_use = "dropping a signal without firing it releases the waiter with an error"]
#[derive(Debug)]
pub struct Signal {
    inner: Completion<()>,
}

impl Signal {
    /// Fire the signal
    pub fn signal(self) {
        self.inner.succeed(());
    }
}

/// Run `block` with a completion handle and wait for it to fire
///
/// # Errors
/// Returns the delivered error, or the "No result found in block." error
/// when the handle delivers neither a value nor an error, or is dropped
/// without firing.
pub fn returning_wait<T, F>(block: F) -> KitResult<T>
where
    F: FnOnce(Completion<T>),
{
    let (sender, receiver) = oneshot::channel();
    block(Completion { sender });

    debug!("Waiting for completion handler");
    let outcome = receiver.blocking_recv().map_err(|_| {
        debug!("Completion handler dropped without firing");
        GenericError::sync(NO_RESULT_DESCRIPTION)
    })?;

    match outcome {
        Outcome { error: Some(error), .. } => {
            debug!(error = %error, "Completion handler delivered an error");
            Err(error)
        }
        Outcome { value: Some(value), .. } => Ok(value),
        Outcome { value: None, error: None } => Err(GenericError::sync(NO_RESULT_DESCRIPTION)),
    }
}

/// Run `block` with an error-only completion handle and wait for it to fire
///
/// # Errors
/// Returns the delivered error, or the "No result found in block." error
/// when the handle is dropped without firing.
pub fn throwing_wait<F>(block: F) -> KitResult<()>
where
    F: FnOnce(ErrorCompletion),
{
    returning_wait(|inner| block(ErrorCompletion { inner }))
}

/// Run `block` with a signal and wait for it to fire
///
/// # Errors
/// Returns the "No result found in block." error when the signal is dropped
/// without firing.
pub fn wait<F>(block: F) -> KitResult<()>
where
    F: FnOnce(Signal),
{
    returning_wait(|inner| block(Signal { inner }))
}

#[cfg(test)]
mod tests {
    //! Unit tests for the blocking completion bridge
    //!
    //! Handles are fired both inline and from spawned threads to cover the
    //! cases where the result is ready before and after the wait begins.

    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::error::ErrorDomain;

    #[test]
    fn test_value_from_other_thread() {
        let value = returning_wait(|completion| {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                completion.succeed("done".to_string());
            });
        })
        .unwrap();
        assert_eq!(value, "done");
    }

    #[test]
    fn test_value_fired_inline() {
        assert_eq!(returning_wait(|completion| completion.succeed(7)).unwrap(), 7);
    }

    /// Validates an error wins over a value delivered alongside it.
    #[test]
    fn test_error_takes_precedence() {
        let err = returning_wait(|completion: Completion<i32>| {
            completion.complete(Some(1), Some(GenericError::url("boom")));
        })
        .unwrap_err();
        assert_eq!(err.description(), "boom");
        assert_eq!(err.domain(), ErrorDomain::Url);
    }

    #[test]
    fn test_neither_value_nor_error() {
        let err = returning_wait(|completion: Completion<i32>| completion.complete(None, None))
            .unwrap_err();
        assert_eq!(err.to_string(), NO_RESULT_DESCRIPTION);
        assert_eq!(err.domain(), ErrorDomain::Sync);
    }

    /// Validates a handle dropped on another thread releases the waiter.
    #[test]
    fn test_dropped_handle_releases_waiter() {
        let err = returning_wait(|completion: Completion<i32>| {
            thread::spawn(move || drop(completion));
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "No result found in block.");
    }

    #[test]
    fn test_finish_with_result() {
        assert_eq!(returning_wait(|c| c.finish(Ok(3))).unwrap(), 3);
        let err = returning_wait(|c: Completion<u8>| c.finish(Err(GenericError::new("x"))))
            .unwrap_err();
        assert_eq!(err.description(), "x");
    }

    #[test]
    fn test_throwing_wait() {
        assert!(throwing_wait(|completion| completion.succeed()).is_ok());

        let err = throwing_wait(|completion| {
            thread::spawn(move || completion.fail(GenericError::process("failed")));
        })
        .unwrap_err();
        assert_eq!(err.description(), "failed");

        assert!(throwing_wait(|completion| drop(completion)).is_err());
    }

    #[test]
    fn test_wait_signal() {
        assert!(wait(|signal| {
            thread::spawn(move || signal.signal());
        })
        .is_ok());
        assert!(wait(drop).is_err());
    }
}
