//! Store configuration.
//!
//! # Responsibility
//! - Describe the runtime environment (production vs development).
//! - Carry storage key and deferred sample-reload timing for `NoteStore`.
//!
//! # Invariants
//! - Sample notes are only ever generated in `Environment::Development`.

use std::time::Duration;

/// Storage key naming the note collection blob.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Delay before sample notes repopulate an emptied development store.
pub const DEFAULT_SAMPLE_RELOAD_DELAY: Duration = Duration::from_millis(500);

/// Runtime environment the store runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Real user data only; no sample notes.
    Production,
    /// Empty stores are populated with generated sample notes.
    Development,
}

impl Environment {
    /// Returns the environment implied by the current build mode.
    ///
    /// - `debug` builds -> `Development`
    /// - `release` builds -> `Production`
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Parses a case-insensitive environment name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Configuration for one `NoteStore` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub environment: Environment,
    /// Key under which the whole collection is persisted.
    pub storage_key: String,
    /// Wait between the collection becoming empty and sample repopulation.
    pub sample_reload_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            environment: Environment::from_build(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sample_reload_delay: DEFAULT_SAMPLE_RELOAD_DELAY,
        }
    }
}

impl StoreConfig {
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_sample_reload_delay(mut self, delay: Duration) -> Self {
        self.sample_reload_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Environment, StoreConfig, DEFAULT_SAMPLE_RELOAD_DELAY, DEFAULT_STORAGE_KEY};
    use std::time::Duration;

    #[test]
    fn parse_accepts_short_and_long_names() {
        assert_eq!(Environment::parse(" PROD "), Some(Environment::Production));
        assert_eq!(
            Environment::parse("development"),
            Some(Environment::Development)
        );
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn defaults_use_fixed_key_and_half_second_delay() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.sample_reload_delay, DEFAULT_SAMPLE_RELOAD_DELAY);
        assert_eq!(config.environment, Environment::from_build());
    }

    #[test]
    fn builder_setters_override_defaults() {
        let config = StoreConfig::default()
            .with_environment(Environment::Production)
            .with_storage_key("archive")
            .with_sample_reload_delay(Duration::from_secs(2));
        assert!(config.environment.is_production());
        assert_eq!(config.storage_key, "archive");
        assert_eq!(config.sample_reload_delay, Duration::from_secs(2));
    }
}
