//! Async copy future with cooperative cancellation.
//!
//! This module implements the copy loop over the `futures-io` traits, which
//! are runtime-agnostic and compatible with tokio, async-std, smol, and
//! other futures-compatible runtimes.
//!
//! # Example
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
//!     copy_async(reader, writer, Some(4096), CancelToken::new()).await
//! }
//! ```

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_io::{AsyncRead, AsyncWrite};
use pin_project_lite::pin_project;

use crate::buffer::PooledBuf;
use crate::cancel::CancelToken;
use crate::copier::Copier;
use crate::error::CopyError;

pin_project! {
    /// A future that copies up to a limit of bytes from a reader to a writer.
    ///
    /// Created by [`copy_async`] or [`Copier::copy_async`]. Resolves to the
    /// total number of bytes written, or to [`CopyError::Cancelled`] when the
    /// token fires at a checkpoint, or to [`CopyError::Io`] when the reader
    /// or writer fails.
    ///
    /// The transfer buffer is rented from the pool when the future is
    /// created and returns to the pool when the future is dropped, whether
    /// it ran to completion or not.
    pub struct CopyFuture<R, W> {
        #[pin]
        reader: R,
        #[pin]
        writer: W,
        buf: PooledBuf,
        // Write cursor into buf; pos < filled means a read is waiting to
        // be written out.
        pos: usize,
        filled: usize,
        remaining: Option<u64>,
        copied: u64,
        cancel: CancelToken,
    }
}

impl<R: AsyncRead, W: AsyncWrite> Future for CopyFuture<R, W> {
    type Output = Result<u64, CopyError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            // Finish writing out the current read first. A partial write
            // continues the same logical write step, so no checkpoint here.
            if *this.pos < *this.filled {
                let n = ready!(
                    this.writer
                        .as_mut()
                        .poll_write(cx, &this.buf[*this.pos..*this.filled])
                )?;
                if n == 0 {
                    return Poll::Ready(Err(CopyError::Io(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "destination accepted zero bytes",
                    ))));
                }
                *this.pos += n;
                *this.copied += n as u64;
                continue;
            }

            // The natural end of the range.
            if *this.remaining == Some(0) {
                return Poll::Ready(Ok(*this.copied));
            }

            if this.cancel.is_cancelled() {
                return Poll::Ready(Err(CopyError::Cancelled {
                    bytes_copied: *this.copied,
                }));
            }

            // Clamp before reading so the reader can never hand back bytes
            // past the limit.
            let read_len = match *this.remaining {
                Some(rem) => rem.min(this.buf.len() as u64) as usize,
                None => this.buf.len(),
            };

            let n = ready!(this.reader.as_mut().poll_read(cx, &mut this.buf[..read_len]))?;

            if let Some(rem) = this.remaining.as_mut() {
                *rem -= n as u64;
            }

            // End of the source stream.
            if n == 0 {
                return Poll::Ready(Ok(*this.copied));
            }

            // A cancellation request between a read and its write must not
            // be dropped: the bytes just read are never written.
            if this.cancel.is_cancelled() {
                return Poll::Ready(Err(CopyError::Cancelled {
                    bytes_copied: *this.copied,
                }));
            }

            *this.pos = 0;
            *this.filled = n;
        }
    }
}

impl Copier {
    /// Copies up to `limit` bytes from an async reader to an async writer.
    ///
    /// The async counterpart of [`Copier::copy`], with identical semantics:
    /// the cancellation token is checked immediately before each read and
    /// again between a completed read and its write, a zero-byte read ends
    /// an unbounded copy, and the transfer buffer (rented from this
    /// copier's pool) returns to the pool however the future ends.
    ///
    /// `poll_read` and `poll_write` are the only suspension points; an
    /// in-flight read or write completes before the next checkpoint.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::{Copier, CancelToken};
    ///
    /// # tokio_test::block_on(async {
    /// let copier = Copier::default();
    /// let source: &[u8] = b"request body";
    /// let mut dest = Vec::new();
    ///
    /// let copied = copier
    ///     .copy_async(source, &mut dest, Some(7), CancelToken::new())
    ///     .await?;
    ///
    /// assert_eq!(copied, 7);
    /// assert_eq!(&dest, b"request");
    /// # Ok::<(), copyrs::CopyError>(())
    /// # }).unwrap();
    /// ```
    pub fn copy_async<R: AsyncRead, W: AsyncWrite>(
        &self,
        reader: R,
        writer: W,
        limit: Option<u64>,
        cancel: CancelToken,
    ) -> CopyFuture<R, W> {
        CopyFuture {
            reader,
            writer,
            buf: self.pool().rent(),
            pos: 0,
            filled: 0,
            remaining: limit,
            copied: 0,
            cancel,
        }
    }
}

/// Copies up to `limit` bytes from an async reader to an async writer.
///
/// Uses `futures_io::AsyncRead` and `futures_io::AsyncWrite` for
/// runtime-agnostic async I/O. This works with any async runtime (tokio,
/// async-std, smol, etc.). Uses a default 4 KiB buffer; to share a buffer
/// pool across calls, use [`Copier::copy_async`] instead.
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert tokio's I/O
/// traits to the futures-io ones:
///
/// ```ignore
/// use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};
/// use copyrs::{copy_async, CancelToken};
///
/// let reader = tokio::fs::File::open("body.bin").await?.compat();
/// let copied = copy_async(reader, writer.compat_write(), Some(4096), CancelToken::new()).await?;
/// ```
///
/// # Example
///
/// ```
/// use copyrs::{copy_async, CancelToken};
///
/// # tokio_test::block_on(async {
/// let source: &[u8] = b"hello world";
/// let mut dest = Vec::new();
///
/// let copied = copy_async(source, &mut dest, None, CancelToken::new()).await?;
///
/// assert_eq!(copied, 11);
/// assert_eq!(&dest, b"hello world");
/// # Ok::<(), copyrs::CopyError>(())
/// # }).unwrap();
/// ```
pub fn copy_async<R: AsyncRead, W: AsyncWrite>(
    reader: R,
    writer: W,
    limit: Option<u64>,
    cancel: CancelToken,
) -> CopyFuture<R, W> {
    Copier::default().copy_async(reader, writer, limit, cancel)
}
