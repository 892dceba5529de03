//! copyrs
//!
//! Bounded streaming byte copy for Rust.
//!
//! `copyrs` relays a run of bytes from a readable source to a writable sink,
//! optionally stopping after a caller-specified byte count, using a fixed-size
//! pooled buffer and checking a cooperative cancellation token before each
//! blocking I/O step. It is designed as a small, composable primitive for:
//!
//! - relaying a portion of a request or file body to a network destination
//! - serving byte ranges out of larger streams
//! - draining bounded prefixes of untrusted input
//!
//! The crate intentionally:
//! - does NOT construct, close, or flush streams
//! - does NOT implement transports (sockets, files)
//! - does NOT retry or suppress I/O failures
//! - does NOT grow memory with the size of the transfer
//!
//! It only does one thing: **Read bytes → write bytes, up to a limit**
//!
//! # Sync
//!
//! ```
//! use copyrs::{Copier, CancelToken, CopyError};
//!
//! fn main() -> Result<(), CopyError> {
//!     let source = vec![7u8; 10_000];
//!     let mut dest = Vec::new();
//!
//!     let copier = Copier::default();
//!     let copied = copier.copy(
//!         &mut source.as_slice(),
//!         &mut dest,
//!         Some(4096),
//!         &CancelToken::new(),
//!     )?;
//!
//!     assert_eq!(copied, 4096);
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use copyrs::{copy_async, CancelToken};
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn relay<R, W>(reader: R, writer: W) -> Result<u64, copyrs::CopyError>
//! where
//!     R: AsyncRead + Unpin,
//!     W: AsyncWrite + Unpin,
//! {
//!     copy_async(reader, writer, None, CancelToken::new()).await
//! }
//! ```
//!
//! # Cancellation
//!
//! A [`CancelToken`] is a cloneable flag owned by the caller. The copier
//! observes it at two checkpoints per loop iteration (before the read and
//! before the write) and surfaces [`CopyError::Cancelled`] when it fires.
//! Cancellation is cooperative: an in-flight read or write completes before
//! the next checkpoint is reached.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cancel;
mod config;
mod copier;
mod error;
mod signout;

mod buffer; // shared pool, injectable for tests

#[cfg(feature = "async-io")]
mod async_copy;

//
// Public surface (intentionally tiny)
//

pub use buffer::{BufferPool, PooledBuf};
pub use cancel::CancelToken;
pub use config::CopyConfig;
pub use copier::Copier;
pub use error::CopyError;
pub use signout::SignOutContext;

#[cfg(feature = "async-io")]
pub use async_copy::{CopyFuture, copy_async};
