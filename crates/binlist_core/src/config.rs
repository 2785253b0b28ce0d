//! List configuration.

use binlist_codec::MAX_VARIABLE_LEN;

/// Configuration for opening a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether rejected indices and empty-list pops return an error.
    ///
    /// When `false` (the default) they only emit a `warn` event and the
    /// call returns as if it had succeeded.
    pub strict_indices: bool,

    /// Ceiling of the decode guard for variable-width payloads.
    ///
    /// A stored length above this decodes as an empty value.
    pub max_payload_len: usize,

    /// Whether to fsync after every header write (slower, still not atomic).
    pub sync_on_write: bool,

    /// Whether to create missing parent directories on open.
    pub create_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_indices: false,
            max_payload_len: MAX_VARIABLE_LEN,
            sync_on_write: false,
            create_dirs: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether rejected indices return an error.
    #[must_use]
    pub const fn strict_indices(mut self, value: bool) -> Self {
        self.strict_indices = value;
        self
    }

    /// Sets the decode guard ceiling.
    #[must_use]
    pub const fn max_payload_len(mut self, len: usize) -> Self {
        self.max_payload_len = len;
        self
    }

    /// Sets whether to fsync after every header write.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(!config.strict_indices);
        assert!(!config.sync_on_write);
        assert!(!config.create_dirs);
        assert_eq!(config.max_payload_len, 1_000_000);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .strict_indices(true)
            .sync_on_write(true)
            .max_payload_len(64);

        assert!(config.strict_indices);
        assert!(config.sync_on_write);
        assert_eq!(config.max_payload_len, 64);
    }
}
