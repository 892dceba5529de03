//! Shared buffer pool for transfer buffers.
//!
//! This module provides a concurrency-safe pool of reusable fixed-size
//! buffers. The pool is an explicit, injectable dependency of [`Copier`]
//! rather than a hidden global, so tests can substitute a deterministic
//! instance and observe rentals.
//!
//! [`Copier`]: crate::Copier

mod pool;

pub use pool::{BufferPool, PooledBuf};
