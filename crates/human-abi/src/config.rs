//! Parser configuration.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the signature parser and the registry builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum length in bytes of a single input string; longer inputs are rejected unscanned.
    pub max_declaration_length: usize,
    /// What to do when a batch declares the same method name twice.
    pub on_duplicate: DuplicateNames,
}

impl ParserConfig {
    /// Prefix of the environment variables overriding config values.
    pub const ENV_PREFIX: &'static str = "HUMAN_ABI_";

    /// The default maximum input length.
    pub const DEFAULT_MAX_DECLARATION_LENGTH: usize = 4096;

    /// Returns the [`Figment`] merging the defaults with `HUMAN_ABI_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Loads the config from the defaults and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Loads the config from a TOML file, with environment variables taking precedence.
    pub fn load_with_file(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(Self::ENV_PREFIX))
            .extract()
    }

    /// Sets the maximum input length.
    pub fn with_max_declaration_length(mut self, max: usize) -> Self {
        self.max_declaration_length = max;
        self
    }

    /// Sets the duplicate name policy.
    pub fn with_on_duplicate(mut self, on_duplicate: DuplicateNames) -> Self {
        self.on_duplicate = on_duplicate;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_declaration_length: Self::DEFAULT_MAX_DECLARATION_LENGTH,
            on_duplicate: DuplicateNames::default(),
        }
    }
}

/// Policy for method name collisions in a registry.
///
/// Methods are identified by bare name only, so overloads collide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNames {
    /// The later declaration replaces the earlier one.
    #[default]
    Overwrite,
    /// The batch fails on the first repeated name.
    Reject,
}

impl DuplicateNames {
    /// Returns true if the option is `Overwrite`
    #[inline]
    pub fn is_overwrite(self) -> bool {
        matches!(self, Self::Overwrite)
    }

    /// Returns true if the option is `Reject`
    #[inline]
    pub fn is_reject(self) -> bool {
        matches!(self, Self::Reject)
    }
}
