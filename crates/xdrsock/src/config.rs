//! Codec configuration.

/// Default maximum length of a received variable-length string (64 MiB).
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Default maximum element count of a received array.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1024 * 1024;

/// Chunk size used when the transport does not report a buffer size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Lower bound on any chunk size, one XDR unit.
pub const MIN_CHUNK_SIZE: usize = 4;

/// Upper bound on any chunk size (16 MiB).
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Limits and transfer tuning for a [`WireCodec`](crate::WireCodec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest variable-length string accepted by `receive_string`.
    pub max_string_len: usize,
    /// Largest element count accepted by `receive_array`.
    pub max_array_len: usize,
    /// Chunk size when the transport reports no buffer size.
    pub fallback_chunk_size: usize,
    /// Explicit chunk size, overriding whatever the transport reports.
    pub chunk_size: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            fallback_chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_size: None,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_string_len(mut self, max: usize) -> Self {
        self.max_string_len = max;
        self
    }

    pub fn with_max_array_len(mut self, max: usize) -> Self {
        self.max_array_len = max;
        self
    }

    pub fn with_fallback_chunk_size(mut self, size: usize) -> Self {
        self.fallback_chunk_size = size;
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Resolve the chunk size for one direction of a transfer.
    ///
    /// `reported` is the transport's buffer size for that direction, if any.
    pub(crate) fn resolve_chunk_size(&self, reported: Option<usize>) -> usize {
        let size = match (self.chunk_size, reported) {
            (Some(size), _) => size,
            (None, Some(size)) if size > 0 => size,
            _ => {
                log::trace!(
                    "transport reports no buffer size, using fallback chunk size {}",
                    self.fallback_chunk_size
                );
                self.fallback_chunk_size
            }
        };
        size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.max_string_len, DEFAULT_MAX_STRING_LEN);
        assert_eq!(config.max_array_len, DEFAULT_MAX_ARRAY_LEN);
        assert_eq!(config.fallback_chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.chunk_size, None);
    }

    #[test]
    fn test_resolve_prefers_override_then_transport() {
        let config = CodecConfig::new();
        assert_eq!(config.resolve_chunk_size(None), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.resolve_chunk_size(Some(0)), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.resolve_chunk_size(Some(4096)), 4096);

        let config = config.with_chunk_size(100);
        assert_eq!(config.resolve_chunk_size(Some(4096)), 100);
    }

    #[test]
    fn test_resolve_clamps() {
        let config = CodecConfig::new().with_chunk_size(1);
        assert_eq!(config.resolve_chunk_size(None), MIN_CHUNK_SIZE);

        let config = CodecConfig::new();
        assert_eq!(config.resolve_chunk_size(Some(usize::MAX)), MAX_CHUNK_SIZE);
    }
}
