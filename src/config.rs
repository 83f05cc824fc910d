//! Layered application configuration.
//!
//! Settings are merged from, lowest priority first:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config <PATH>`, else `config.toml` in the platform
//!    config directory)
//! 3. `RUSTDEDUP_*` environment variables (e.g. `RUSTDEDUP_IO_THREADS=4`)
//! 4. command-line flags
//!
//! # Example
//!
//! ```toml
//! io_threads = 8
//! algorithm = "blake3"
//! skip_hidden = true
//! follow_symlinks = false
//! buffer_size = 131072
//! ```

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::CommonArgs;
use crate::duplicates::FinderConfig;
use crate::scanner::{HashAlgorithm, HashConfig, WalkerConfig, DEFAULT_BUFFER_SIZE};

/// Prefix of environment variables read into [`Config`].
pub const ENV_PREFIX: &str = "RUSTDEDUP_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hashing threads; 0 selects the number of logical CPUs.
    pub io_threads: usize,
    /// Content hash function.
    pub algorithm: HashAlgorithm,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,
    /// Hash read buffer size in bytes.
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: 0,
            algorithm: HashAlgorithm::default(),
            skip_hidden: false,
            follow_symlinks: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from_path(path),
            None => Self::extract_or_default(Self::base_figment().merge(Env::prefixed(ENV_PREFIX))),
        }
    }

    /// Load configuration from a specific TOML file plus the environment.
    ///
    /// A missing file is not an error. A malformed file is logged and
    /// ignored, keeping defaults and environment overrides.
    #[must_use]
    pub fn load_from_path(path: PathBuf) -> Self {
        log::debug!("Loading configuration from {}", path.display());

        let with_file = Self::base_figment()
            .merge(Toml::file(&path))
            .merge(Env::prefixed(ENV_PREFIX));

        match with_file.extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Ignoring invalid configuration in {}: {}",
                    path.display(),
                    e
                );
                Self::extract_or_default(Self::base_figment().merge(Env::prefixed(ENV_PREFIX)))
            }
        }
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn extract_or_default(figment: Figment) -> Self {
        figment.extract().unwrap_or_else(|e| {
            log::warn!("Ignoring invalid configuration: {}", e);
            Self::default()
        })
    }

    /// Platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "rustdedup", "rustdedup")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line overrides.
    ///
    /// Flags only switch boolean options on; an absent flag keeps the
    /// configured value.
    pub fn merge_args(&mut self, args: &CommonArgs) {
        if let Some(threads) = args.io_threads {
            self.io_threads = threads;
        }
        if let Some(algorithm) = args.algorithm {
            self.algorithm = algorithm;
        }
        if args.skip_hidden {
            self.skip_hidden = true;
        }
        if args.follow_symlinks {
            self.follow_symlinks = true;
        }
    }

    /// Pipeline configuration for these settings.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_walker(WalkerConfig::new(self.follow_symlinks, self.skip_hidden))
            .with_hash(
                HashConfig::default()
                    .with_io_threads(self.io_threads)
                    .with_algorithm(self.algorithm)
                    .with_buffer_size(self.buffer_size),
            )
    }
}
