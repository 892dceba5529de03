//! Concurrency-safe buffer pool with scoped rentals.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::DEFAULT_BUFFER_SIZE;

/// Maximum number of idle buffers the pool keeps around.
pub const MAX_POOL_SIZE: usize = 4;

/// A shared pool of fixed-size transfer buffers.
///
/// Cloning a `BufferPool` produces another handle to the same pool, so
/// independent copy calls on separate threads or tasks can share one pool.
/// Rentals are moves: a rented buffer is private to its holder for the
/// duration of the rental and is never aliased across calls.
///
/// Buffers return to the pool when the [`PooledBuf`] guard is dropped, on
/// every exit path including errors, cancellation, and panics.
///
/// # Example
///
/// ```
/// use copyrs::BufferPool;
///
/// let pool = BufferPool::new(4096);
/// assert_eq!(pool.outstanding(), 0);
///
/// {
///     let buf = pool.rent();
///     assert_eq!(buf.len(), 4096);
///     assert_eq!(pool.outstanding(), 1);
/// }
///
/// // Guard dropped, buffer back in the pool
/// assert_eq!(pool.outstanding(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

#[derive(Debug)]
struct PoolInner {
    idle: Mutex<Vec<Vec<u8>>>,
    buffer_size: usize,
    outstanding: AtomicUsize,
}

impl BufferPool {
    /// Creates a pool whose buffers are exactly `buffer_size` bytes.
    ///
    /// No buffers are allocated until the first [`BufferPool::rent`].
    pub fn new(buffer_size: usize) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(Vec::new()),
                buffer_size,
                outstanding: AtomicUsize::new(0),
            }),
        }
    }

    /// Rents a zero-filled buffer of exactly the pool's buffer size.
    ///
    /// Reuses an idle allocation when one is available, otherwise allocates.
    /// The buffer returns to the pool when the guard is dropped.
    pub fn rent(&self) -> PooledBuf {
        let reused = self.lock_idle().pop();
        let data = match reused {
            Some(mut data) => {
                data.resize(self.inner.buffer_size, 0);
                data
            }
            None => vec![0u8; self.inner.buffer_size],
        };

        self.inner.outstanding.fetch_add(1, Ordering::Relaxed);
        PooledBuf {
            data,
            pool: self.clone(),
        }
    }

    /// Returns the size in bytes of buffers rented from this pool.
    pub fn buffer_size(&self) -> usize {
        self.inner.buffer_size
    }

    /// Returns the number of buffers currently rented out.
    ///
    /// After every copy call this count is back at its pre-call value,
    /// whether the call succeeded, failed, or was cancelled.
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Relaxed)
    }

    /// Returns the number of idle buffers cached in the pool.
    pub fn idle(&self) -> usize {
        self.lock_idle().len()
    }

    fn lock_idle(&self) -> MutexGuard<'_, Vec<Vec<u8>>> {
        // A poisoned lock only means another holder panicked mid-push; the
        // Vec of idle buffers is still structurally valid.
        match self.inner.idle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn give_back(&self, mut data: Vec<u8>) {
        self.inner.outstanding.fetch_sub(1, Ordering::Relaxed);

        let mut idle = self.lock_idle();
        if idle.len() < MAX_POOL_SIZE {
            data.clear();
            idle.push(data);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// A buffer rented from a [`BufferPool`].
///
/// Derefs to `[u8]` with length equal to the pool's buffer size. Dropping
/// the guard returns the allocation to the pool.
#[derive(Debug)]
pub struct PooledBuf {
    data: Vec<u8>,
    pool: BufferPool,
}

impl Deref for PooledBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.data));
    }
}
