//! Fallback values for fields the source left at their zero value.

use std::num::NonZeroUsize;

pub const DEFAULT_RELAY_BUFFER_SIZE: usize = 1000;
pub const DEFAULT_DIALECT_NAME: &str = "common";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FORMAT: &str = "text";
pub const DEFAULT_LOG_OUTPUT: &str = "stdout";


/// `0` means unset.
pub fn buffer_size_or_default(buffer_size: usize) -> NonZeroUsize {
    NonZeroUsize::new(buffer_size)
        .or_else(|| NonZeroUsize::new(DEFAULT_RELAY_BUFFER_SIZE))
        .unwrap_or(NonZeroUsize::MIN)
}

/// An empty string means unset.
pub fn string_or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
