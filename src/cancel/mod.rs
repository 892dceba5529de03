//! Cooperative cancellation for copy operations.
//!
//! - [`CancelToken`] - A cloneable flag observed by the copier at checkpoints
//!
//! The token is owned and triggered by the caller; the copier only reads it.
//! Cancellation is cooperative, not preemptive: a read or write already in
//! flight completes before the next checkpoint notices the request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cooperative cancellation signal shared between a caller and copy calls.
///
/// Cloning the token produces another handle to the same underlying flag, so
/// one token can be handed to a copy call while the caller keeps a clone to
/// trigger it from another thread or task.
///
/// # Example
///
/// ```
/// use copyrs::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
///
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new token in the non-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    ///
    /// All clones of this token observe the request. There is no way to
    /// un-cancel a token; create a new one for the next operation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` if cancellation has been requested on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
