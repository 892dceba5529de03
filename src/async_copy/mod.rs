//! Async copy support.
//!
//! This module provides the asynchronous copy primitive using the
//! `futures-io` traits, making it runtime-agnostic and compatible with
//! tokio, async-std, smol, and other async runtimes.
//!
//! - [`copy_async`] - Creates a copy future from an async reader and writer
//!
//! This module requires the `async-io` feature to be enabled.

mod future;

pub use future::{CopyFuture, copy_async};
