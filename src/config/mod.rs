//! Configuration for copy behavior.
//!
//! - [`CopyConfig`] - Controls the transfer buffer size
//!
//! # Example
//!
//! ```
//! use copyrs::CopyConfig;
//!
//! // Default 4 KiB transfer buffer
//! let config = CopyConfig::default();
//!
//! // Larger buffer for high-throughput transfers
//! let config = CopyConfig::new(64 * 1024)?;
//! # Ok::<(), copyrs::CopyError>(())
//! ```

use crate::error::CopyError;

/// Default transfer buffer size (4 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Configuration for the copy primitive.
///
/// `CopyConfig` controls the size of the fixed transfer buffer rented from
/// the pool for the duration of one copy call. The buffer size bounds memory
/// use per call and is the unit of one read/write iteration; it does not
/// affect correctness, only throughput.
///
/// # Example
///
/// ```
/// use copyrs::CopyConfig;
///
/// let config = CopyConfig::default();
/// assert_eq!(config.buffer_size(), 4096);
///
/// let config = CopyConfig::new(16 * 1024)?;
/// assert_eq!(config.buffer_size(), 16 * 1024);
/// # Ok::<(), copyrs::CopyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyConfig {
    /// Transfer buffer size in bytes.
    buffer_size: usize,
}

impl CopyConfig {
    /// Creates a new configuration with the specified buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::InvalidConfig`] if `buffer_size` is zero. A
    /// zero-sized buffer would make every read return zero bytes, which is
    /// indistinguishable from end of source.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::CopyConfig;
    ///
    /// let config = CopyConfig::new(8192)?;
    /// assert_eq!(config.buffer_size(), 8192);
    /// # Ok::<(), copyrs::CopyError>(())
    /// ```
    pub fn new(buffer_size: usize) -> Result<Self, CopyError> {
        if buffer_size == 0 {
            return Err(CopyError::InvalidConfig {
                message: "buffer size must be non-zero",
            });
        }

        Ok(Self { buffer_size })
    }

    /// Sets the buffer size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`CopyConfig::validate`] to check if the configuration is valid.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::CopyConfig;
    ///
    /// let config = CopyConfig::default().with_buffer_size(8192);
    /// assert_eq!(config.buffer_size(), 8192);
    /// ```
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Returns the transfer buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Validates the current configuration.
    ///
    /// Returns an error if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use copyrs::CopyConfig;
    ///
    /// let config = CopyConfig::default().with_buffer_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CopyError> {
        Self::new(self.buffer_size).map(|_| ())
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
