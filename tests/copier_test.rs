// Integration tests for the synchronous copy primitive
// Tests cover: bounded/unbounded transfer, cancellation checkpoints,
// buffer pool accounting, error propagation, edge cases

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use copyrs::{BufferPool, CancelToken, Copier, CopyConfig, CopyError};

// ============================================================================
// Test doubles
// ============================================================================

/// Wraps a reader and counts how many read calls were made.
struct CountingReader<R> {
    inner: R,
    reads: AtomicUsize,
}

impl<R> CountingReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.inner.read(buf)
    }
}

/// Collects written bytes and counts write calls.
#[derive(Default)]
struct CountingWriter {
    data: Vec<u8>,
    writes: usize,
}

impl Write for CountingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serves at most one byte per read call.
struct OneByteReader<'a> {
    data: &'a [u8],
}

impl Read for OneByteReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.len().min(buf.len()).min(1);
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Serves `good` bytes, then fails with the given error kind.
struct FailingReader {
    good: Vec<u8>,
    kind: io::ErrorKind,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.good.is_empty() {
            return Err(io::Error::new(self.kind, "reader failed"));
        }
        let n = self.good.len().min(buf.len());
        buf[..n].copy_from_slice(&self.good[..n]);
        self.good.drain(..n);
        Ok(n)
    }
}

/// Fails every write.
struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "writer failed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Cancels the token from inside the Nth read call, after serving data.
///
/// Models a cancellation request landing between a completed read and its
/// write: the copier must notice it at the pre-write checkpoint.
struct CancelDuringRead<'a> {
    data: &'a [u8],
    token: CancelToken,
    /// 1-based index of the read call that fires the token.
    cancel_on_read: usize,
}

impl Read for CancelDuringRead<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.cancel_on_read -= 1;
        if self.cancel_on_read == 0 {
            self.token.cancel();
        }
        Ok(n)
    }
}

// ============================================================================
// Transfer semantics
// ============================================================================

#[test]
fn test_unbounded_copy_transfers_everything_in_order() {
    let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    let mut dest = Vec::new();

    let copied = Copier::default()
        .copy(&mut data.as_slice(), &mut dest, None, &CancelToken::new())
        .expect("unbounded copy should succeed");

    assert_eq!(copied, data.len() as u64, "all source bytes transferred");
    assert_eq!(dest, data, "destination is byte-for-byte identical");
}

#[test]
fn test_bounded_copy_transfers_exactly_the_first_l_bytes() {
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 199) as u8).collect();
    let mut dest = Vec::new();

    let copied = Copier::default()
        .copy(
            &mut data.as_slice(),
            &mut dest,
            Some(12_345),
            &CancelToken::new(),
        )
        .expect("bounded copy should succeed");

    assert_eq!(copied, 12_345);
    assert_eq!(dest, &data[..12_345], "exactly the first L bytes, in order");
}

#[test]
fn test_limit_larger_than_source_copies_the_whole_source() {
    let mut dest = Vec::new();

    let copied = Copier::default()
        .copy(
            &mut &b"small"[..],
            &mut dest,
            Some(u64::MAX),
            &CancelToken::new(),
        )
        .expect("copy should succeed");

    assert_eq!(copied, 5);
    assert_eq!(&dest, b"small");
}

#[test]
fn test_limit_zero_performs_no_io() {
    let mut reader = CountingReader::new(&b"data"[..]);
    let mut writer = CountingWriter::default();

    let copied = Copier::default()
        .copy(&mut reader, &mut writer, Some(0), &CancelToken::new())
        .expect("zero-limit copy should succeed immediately");

    assert_eq!(copied, 0);
    assert_eq!(reader.reads(), 0, "limit 0 must perform zero reads");
    assert_eq!(writer.writes, 0, "limit 0 must perform zero writes");
}

#[test]
fn test_empty_source_completes_with_zero_bytes() {
    let mut dest = Vec::new();

    let copied = Copier::default()
        .copy(&mut &b""[..], &mut dest, None, &CancelToken::new())
        .expect("empty source should complete successfully");

    assert_eq!(copied, 0);
    assert!(dest.is_empty());
}

#[test]
fn test_10000_byte_source_with_limit_4096_uses_one_read_write_pair() {
    let data = vec![0x5Au8; 10_000];
    let mut reader = CountingReader::new(data.as_slice());
    let mut writer = CountingWriter::default();

    let copied = Copier::default()
        .copy(&mut reader, &mut writer, Some(4096), &CancelToken::new())
        .expect("copy should succeed");

    assert_eq!(copied, 4096);
    assert_eq!(
        reader.reads(),
        1,
        "one full-buffer read satisfies the limit exactly"
    );
    assert_eq!(writer.writes, 1, "one write before the remaining count ends the loop");
    assert_eq!(writer.data, &data[..4096]);
}

#[test]
fn test_short_reads_are_not_end_of_source() {
    let data = b"one byte at a time".to_vec();
    let mut reader = OneByteReader { data: &data };
    let mut dest = Vec::new();

    let copied = Copier::default()
        .copy(&mut reader, &mut dest, None, &CancelToken::new())
        .expect("short reads should not end the copy");

    assert_eq!(copied, data.len() as u64);
    assert_eq!(dest, data, "every 1-byte read is written, in order");
}

#[test]
fn test_short_reads_with_limit() {
    let data = b"abcdefghij".to_vec();
    let mut reader = OneByteReader { data: &data };
    let mut dest = Vec::new();

    let copied = Copier::default()
        .copy(&mut reader, &mut dest, Some(4), &CancelToken::new())
        .expect("copy should succeed");

    assert_eq!(copied, 4);
    assert_eq!(&dest, b"abcd");
}

#[test]
fn test_small_buffer_preserves_order_across_iterations() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
    let mut dest = Vec::new();

    let copier = Copier::new(CopyConfig::new(7).expect("valid config"));
    let copied = copier
        .copy(&mut data.as_slice(), &mut dest, None, &CancelToken::new())
        .expect("copy should succeed");

    assert_eq!(copied, data.len() as u64);
    assert_eq!(dest, data, "odd buffer size still yields an exact copy");
}

// ============================================================================
// Cancellation checkpoints
// ============================================================================

#[test]
fn test_cancel_before_first_read_writes_nothing() {
    let mut reader = CountingReader::new(&b"data"[..]);
    let mut writer = CountingWriter::default();

    let token = CancelToken::new();
    token.cancel();

    let err = Copier::default()
        .copy(&mut reader, &mut writer, None, &token)
        .expect_err("pre-cancelled token must surface cancellation");

    assert!(matches!(err, CopyError::Cancelled { bytes_copied: 0 }));
    assert_eq!(reader.reads(), 0, "no read after cancellation");
    assert_eq!(writer.writes, 0, "no write after cancellation");
}

#[test]
fn test_cancel_between_read_and_write_discards_the_read_bytes() {
    let token = CancelToken::new();
    let mut reader = CancelDuringRead {
        data: b"never written",
        token: token.clone(),
        cancel_on_read: 1,
    };
    let mut writer = CountingWriter::default();

    let err = Copier::default()
        .copy(&mut reader, &mut writer, None, &token)
        .expect_err("cancellation between read and write must not be dropped");

    assert!(err.is_cancelled());
    assert_eq!(
        writer.writes, 0,
        "bytes read before the cancellation are never written"
    );
}

#[test]
fn test_cancellation_reports_bytes_already_written() {
    // First read is written out; the second read fires the token, so its
    // bytes are discarded at the pre-write checkpoint.
    let token = CancelToken::new();
    let data = vec![0x11u8; 4096 + 100];
    let mut reader = CancelDuringRead {
        data: &data,
        token: token.clone(),
        cancel_on_read: 2,
    };
    let mut writer = CountingWriter::default();

    let err = Copier::default()
        .copy(&mut reader, &mut writer, None, &token)
        .expect_err("cancellation expected");

    match err {
        CopyError::Cancelled { bytes_copied } => {
            assert_eq!(bytes_copied, 4096);
            assert_eq!(writer.data.len(), 4096, "only the first read was written");
        }
        other => panic!("expected Cancelled, got {other}"),
    }
}

// ============================================================================
// Error propagation
// ============================================================================

#[test]
fn test_reader_error_propagates_unchanged() {
    let mut reader = FailingReader {
        good: vec![1, 2, 3],
        kind: io::ErrorKind::TimedOut,
    };
    let mut writer = CountingWriter::default();

    let err = Copier::default()
        .copy(&mut reader, &mut writer, None, &CancelToken::new())
        .expect_err("reader failure must propagate");

    match err {
        CopyError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::TimedOut),
        other => panic!("expected Io, got {other}"),
    }
    assert_eq!(writer.data, vec![1, 2, 3], "bytes written before the failure stay written");
}

#[test]
fn test_writer_error_propagates_unchanged() {
    let err = Copier::default()
        .copy(
            &mut &b"data"[..],
            &mut FailingWriter,
            None,
            &CancelToken::new(),
        )
        .expect_err("writer failure must propagate");

    match err {
        CopyError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected Io, got {other}"),
    }
}

// ============================================================================
// Buffer pool accounting
// ============================================================================

#[test]
fn test_pool_outstanding_restored_after_success() {
    let pool = BufferPool::new(4096);
    let copier = Copier::with_pool(CopyConfig::default(), pool.clone());
    let mut dest = Vec::new();

    copier
        .copy(&mut &b"payload"[..], &mut dest, None, &CancelToken::new())
        .expect("copy should succeed");

    assert_eq!(pool.outstanding(), 0, "no buffer leak on success");
}

#[test]
fn test_pool_outstanding_restored_after_io_failure() {
    let pool = BufferPool::new(4096);
    let copier = Copier::with_pool(CopyConfig::default(), pool.clone());

    let result = copier.copy(
        &mut &b"data"[..],
        &mut FailingWriter,
        None,
        &CancelToken::new(),
    );

    assert!(result.is_err());
    assert_eq!(pool.outstanding(), 0, "no buffer leak on I/O failure");
}

#[test]
fn test_pool_outstanding_restored_after_cancellation() {
    let pool = BufferPool::new(4096);
    let copier = Copier::with_pool(CopyConfig::default(), pool.clone());

    let token = CancelToken::new();
    token.cancel();

    let mut dest = Vec::new();
    let result = copier.copy(&mut &b"data"[..], &mut dest, None, &token);

    assert!(result.is_err());
    assert_eq!(pool.outstanding(), 0, "no buffer leak on cancellation");
}

#[test]
fn test_concurrent_copies_share_one_pool() {
    let pool = BufferPool::new(4096);
    let copier = Copier::with_pool(CopyConfig::default(), pool.clone());

    let handles: Vec<_> = (0..8)
        .map(|seed: u8| {
            let copier = copier.clone();
            std::thread::spawn(move || {
                let data = vec![seed; 20_000];
                let mut dest = Vec::new();
                let copied = copier
                    .copy(&mut data.as_slice(), &mut dest, None, &CancelToken::new())
                    .expect("concurrent copy should succeed");
                assert_eq!(copied, data.len() as u64);
                assert_eq!(dest, data, "each call's byte stream stays intact");
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("copy thread panicked");
    }

    assert_eq!(pool.outstanding(), 0, "all buffers returned after concurrent calls");
}

// ============================================================================
// In-memory convenience
// ============================================================================

#[test]
fn test_copy_bytes_respects_limit_and_cancellation() {
    let copier = Copier::default();
    let mut dest = Vec::new();

    let copied = copier
        .copy_bytes(&b"hello world"[..], &mut dest, Some(5), &CancelToken::new())
        .expect("copy_bytes should succeed");
    assert_eq!(copied, 5);
    assert_eq!(&dest, b"hello");

    let token = CancelToken::new();
    token.cancel();
    let err = copier
        .copy_bytes(&b"hello"[..], &mut dest, None, &token)
        .expect_err("cancelled copy_bytes must fail");
    assert!(err.is_cancelled());
}
