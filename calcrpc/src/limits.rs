//! Message size limits for incoming requests.
//!
//! Request bodies are read fully into memory before decoding, so the limit
//! bounds per-request memory. The default of 4 MB matches gRPC's default.

use crate::error::DispatchError;

/// Default maximum message size (4 MB), matching gRPC's default receive limit.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Configuration for message size limits.
///
/// # Example
///
/// ```rust
/// use calcrpc::MessageLimits;
///
/// let limits = MessageLimits::default();
/// let limits = MessageLimits::new(64 * 1024);
/// let limits = MessageLimits::unlimited();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageLimits {
    /// `None` means unlimited.
    max_message_size: Option<usize>,
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_message_size: Some(DEFAULT_MAX_MESSAGE_SIZE),
        }
    }
}

impl MessageLimits {
    /// Create new limits with the specified maximum message size in bytes.
    pub fn new(max_message_size: usize) -> Self {
        Self {
            max_message_size: Some(max_message_size),
        }
    }

    /// Create limits with no maximum. Only use this in trusted environments.
    pub fn unlimited() -> Self {
        Self {
            max_message_size: None,
        }
    }

    /// Returns the maximum message size, or `None` if unlimited.
    pub fn max_message_size(&self) -> Option<usize> {
        self.max_message_size
    }

    /// Check a message size against the configured limit.
    pub fn check_size(&self, size: usize) -> Result<(), DispatchError> {
        match self.max_message_size {
            Some(max) if size > max => Err(DispatchError::PayloadTooLarge(format!(
                "message size {} bytes exceeds maximum allowed size of {} bytes",
                size, max
            ))),
            _ => Ok(()),
        }
    }
}
