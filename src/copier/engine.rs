//! Core copy engine - Copier with the bounded copy loop.
//!
//! This module implements the synchronous copy primitive:
//!
//! - [`Copier`] - Holds the configuration and the shared buffer pool
//! - `copy()` - Relay up to `limit` bytes from a reader to a writer
//! - `copy_bytes()` - Convenience for in-memory sources
//!
//! # Example
//!
//! ```
//! use copyrs::{Copier, CancelToken};
//!
//! let copier = Copier::default();
//! let source = b"some request body".to_vec();
//! let mut dest = Vec::new();
//!
//! let copied = copier.copy(
//!     &mut source.as_slice(),
//!     &mut dest,
//!     Some(4),
//!     &CancelToken::new(),
//! )?;
//!
//! assert_eq!(copied, 4);
//! assert_eq!(&dest, b"some");
//! # Ok::<(), copyrs::CopyError>(())
//! ```

use std::io::{Read, Write};

use bytes::Bytes;

use crate::buffer::BufferPool;
use crate::cancel::CancelToken;
use crate::config::CopyConfig;
use crate::error::CopyError;

/// A copier that relays bytes from a source to a destination.
///
/// `Copier` holds a [`CopyConfig`] and a shared [`BufferPool`]. Each call to
/// [`Copier::copy`] rents one fixed-size buffer from the pool for the
/// duration of the call; the buffer goes back to the pool on every exit path.
///
/// # Ownership
///
/// The copier never creates, closes, or flushes the source or destination.
/// Both are borrowed for the duration of one call and handed back untouched
/// apart from the bytes read and written.
///
/// # Concurrency
///
/// A `Copier` is cheap to clone and safe to share: independent calls on
/// separate threads share nothing but the pool, and ordering is only
/// guaranteed within a single call's byte stream.
///
/// # Example
///
/// ```
/// use copyrs::{Copier, CopyConfig, CancelToken};
///
/// let copier = Copier::new(CopyConfig::default());
/// let mut dest = Vec::new();
///
/// copier.copy(&mut &b"hello"[..], &mut dest, None, &CancelToken::new())?;
/// assert_eq!(&dest, b"hello");
/// # Ok::<(), copyrs::CopyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Copier {
    config: CopyConfig,
    pool: BufferPool,
}

impl Copier {
    /// Creates a new copier with the given configuration and a fresh pool.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::{Copier, CopyConfig};
    ///
    /// let copier = Copier::new(CopyConfig::default());
    /// ```
    pub fn new(config: CopyConfig) -> Self {
        Self {
            pool: BufferPool::new(config.buffer_size()),
            config,
        }
    }

    /// Creates a copier that rents from an existing shared pool.
    ///
    /// The pool's buffer size takes precedence over `config.buffer_size()`
    /// for the transfer buffer, since the pool owns the allocations. Inject
    /// a pool to share allocations across copiers or to observe rentals in
    /// tests.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::{Copier, CopyConfig, BufferPool};
    ///
    /// let pool = BufferPool::new(8192);
    /// let copier = Copier::with_pool(CopyConfig::default(), pool.clone());
    /// assert_eq!(pool.outstanding(), 0);
    /// ```
    pub fn with_pool(config: CopyConfig, pool: BufferPool) -> Self {
        Self { config, pool }
    }

    /// Returns the configuration used by this copier.
    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// Returns a handle to the buffer pool this copier rents from.
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Copies up to `limit` bytes from `reader` to `writer`.
    ///
    /// Relays bytes in buffer-sized steps until the limit is reached or the
    /// reader reports end of source (a zero-byte read). With `limit` of
    /// `None` the copy runs until end of source. Returns the total number of
    /// bytes written.
    ///
    /// # Cancellation
    ///
    /// `cancel` is checked immediately before each read and again between a
    /// completed read and its write. When it fires, the call returns
    /// [`CopyError::Cancelled`] and the bytes from an unwritten read are
    /// discarded. A `limit` of `Some(0)` returns before the first checkpoint,
    /// with zero reads and zero writes.
    ///
    /// # Errors
    ///
    /// Any error from the reader or writer is propagated unchanged as
    /// [`CopyError::Io`], with no retry. The transfer buffer returns to the
    /// pool regardless of the outcome.
    ///
    /// # Short reads
    ///
    /// A read returning fewer bytes than requested is normal and only the
    /// bytes actually read are written; only a count of exactly zero ends
    /// the copy.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::{Copier, CancelToken};
    ///
    /// let source = vec![0xABu8; 10_000];
    /// let mut dest = Vec::new();
    ///
    /// let copier = Copier::default();
    /// let copied = copier.copy(&mut source.as_slice(), &mut dest, Some(4096), &CancelToken::new())?;
    ///
    /// assert_eq!(copied, 4096);
    /// assert_eq!(dest.len(), 4096);
    /// # Ok::<(), copyrs::CopyError>(())
    /// ```
    pub fn copy<R: Read + ?Sized, W: Write + ?Sized>(
        &self,
        reader: &mut R,
        writer: &mut W,
        limit: Option<u64>,
        cancel: &CancelToken,
    ) -> Result<u64, CopyError> {
        // Dropped on every exit path below, returning the buffer to the pool.
        let mut buf = self.pool.rent();

        let mut remaining = limit;
        let mut copied = 0u64;

        loop {
            // The natural end of the range.
            if remaining == Some(0) {
                return Ok(copied);
            }

            if cancel.is_cancelled() {
                return Err(CopyError::Cancelled {
                    bytes_copied: copied,
                });
            }

            // Clamp the read size to the remaining count before reading, so
            // the reader can never hand back bytes past the limit.
            let read_len = match remaining {
                Some(rem) => rem.min(buf.len() as u64) as usize,
                None => buf.len(),
            };

            let n = reader.read(&mut buf[..read_len])?;

            if let Some(rem) = remaining.as_mut() {
                *rem -= n as u64;
            }

            // End of the source stream.
            if n == 0 {
                return Ok(copied);
            }

            // A cancellation request between a read and its write must not
            // be dropped: the bytes just read are never written.
            if cancel.is_cancelled() {
                return Err(CopyError::Cancelled {
                    bytes_copied: copied,
                });
            }

            writer.write_all(&buf[..n])?;
            copied += n as u64;
        }
    }

    /// Copies up to `limit` bytes of an in-memory source to `writer`.
    ///
    /// Convenience for data already held in memory; equivalent to calling
    /// [`Copier::copy`] with the slice as the reader.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::{Copier, CancelToken};
    ///
    /// let copier = Copier::default();
    /// let mut dest = Vec::new();
    ///
    /// let copied = copier.copy_bytes(&b"hello world"[..], &mut dest, Some(5), &CancelToken::new())?;
    ///
    /// assert_eq!(copied, 5);
    /// assert_eq!(&dest, b"hello");
    /// # Ok::<(), copyrs::CopyError>(())
    /// ```
    pub fn copy_bytes<W: Write + ?Sized>(
        &self,
        data: impl Into<Bytes>,
        writer: &mut W,
        limit: Option<u64>,
        cancel: &CancelToken,
    ) -> Result<u64, CopyError> {
        let data = data.into();
        self.copy(&mut data.as_ref(), writer, limit, cancel)
    }
}

impl Default for Copier {
    fn default() -> Self {
        Self::new(CopyConfig::default())
    }
}
