//! Streaming file hasher and parallel hashing phase.
//!
//! # Overview
//!
//! [`Hasher`] computes a 256-bit digest over a file's entire byte content,
//! reading it through a fixed-size buffer. [`hash_files`] runs the hasher over
//! a list of paths on a bounded rayon pool and collects a [`HashMapping`].
//!
//! Files that cannot be opened or read are skipped: they are reported to the
//! observer and counted in [`HashStats`], but never appear in the mapping.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use dashmap::DashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Digest, HashError, HashMapping};
use crate::progress::{DedupObserver, Phase};

/// Default read buffer size for streaming hashes (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Cryptographic hash function used for content digests.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// BLAKE3 (256-bit output)
    Blake3,
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Running digest state for one file.
enum DigestState {
    Sha256(sha2::Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algorithm: HashAlgorithm) -> Self {
        use sha2::Digest as _;

        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        use sha2::Digest as _;

        match self {
            Self::Sha256(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Digest {
        use sha2::Digest as _;

        match self {
            Self::Sha256(h) => Digest::from_bytes(&h.finalize()),
            Self::Blake3(h) => Digest::from_bytes(h.finalize().as_bytes()),
        }
    }
}

/// Streaming content hasher.
///
/// # Example
///
/// ```no_run
/// use rustdedup::scanner::{HashAlgorithm, Hasher};
/// use std::path::Path;
///
/// let hasher = Hasher::new().with_algorithm(HashAlgorithm::Blake3);
/// let digest = hasher.full_hash(Path::new("photo.jpg")).unwrap();
/// println!("{digest}");
/// ```
#[derive(Debug, Clone)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a SHA-256 hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Select the hash function.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the read buffer size in bytes (minimum 1).
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// The hash function in use.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash the entire content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails.
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Hash everything `reader` yields until end of stream.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than `Interrupted`, which is retried.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut state = DigestState::new(self.algorithm);
        let mut buf = vec![0u8; self.buffer_size];

        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => state.update(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(state.finalize())
    }
}

/// Number of hashing workers used when none is configured.
#[must_use]
pub fn default_io_threads() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration for the hashing phase.
#[derive(Debug, Clone)]
pub struct HashConfig {
    /// Number of worker threads. Default is the number of logical CPUs.
    pub io_threads: usize,
    /// Hash function.
    pub algorithm: HashAlgorithm,
    /// Read buffer size per worker, in bytes.
    pub buffer_size: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            io_threads: default_io_threads(),
            algorithm: HashAlgorithm::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl HashConfig {
    /// Set the worker count; zero selects the number of logical CPUs.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = if threads == 0 {
            default_io_threads()
        } else {
            threads
        };
        self
    }

    /// Set the hash function.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    fn hasher(&self) -> Hasher {
        Hasher::new()
            .with_algorithm(self.algorithm)
            .with_buffer_size(self.buffer_size)
    }
}

/// Statistics from the hashing phase.
#[derive(Debug, Default)]
pub struct HashStats {
    /// Number of paths submitted for hashing
    pub input_files: usize,
    /// Number of files hashed successfully
    pub hashed_files: usize,
    /// Number of files skipped because they could not be read
    pub failed_files: usize,
    /// Per-file failures, in path order
    pub errors: Vec<HashError>,
}

/// Hash every file in `paths` in parallel.
///
/// Each worker owns one file end to end and inserts its digest into a sharded
/// concurrent map. The map is only read after every worker has finished, at
/// which point it is drained into an ordered [`HashMapping`].
///
/// Failures are reported through `observer.on_hash_failed`, logged, and
/// collected in [`HashStats::errors`]; they never abort the phase.
///
/// # Example
///
/// ```no_run
/// use rustdedup::progress::NoopObserver;
/// use rustdedup::scanner::{hash_files, HashConfig};
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.txt")];
/// let (mapping, stats) = hash_files(&paths, &HashConfig::default(), &NoopObserver);
/// assert_eq!(mapping.len(), stats.hashed_files);
/// ```
#[must_use]
pub fn hash_files(
    paths: &[PathBuf],
    config: &HashConfig,
    observer: &dyn DedupObserver,
) -> (HashMapping, HashStats) {
    let mut stats = HashStats {
        input_files: paths.len(),
        ..Default::default()
    };

    if paths.is_empty() {
        log::debug!("Hashing: no files to process");
        return (HashMapping::new(), stats);
    }

    observer.on_phase_start(Phase::Hashing, paths.len());
    log::info!(
        "Hashing {} files with {} on {} threads",
        paths.len(),
        config.algorithm,
        config.io_threads
    );

    let hasher = config.hasher();
    let results: DashMap<PathBuf, Digest> = DashMap::with_capacity(paths.len());

    let work = || -> Vec<HashError> {
        paths
            .par_iter()
            .filter_map(|path| match hasher.full_hash(path) {
                Ok(digest) => {
                    log::trace!("Hashed {} -> {}", path.display(), digest);
                    observer.on_hashed(path, &digest);
                    results.insert(path.clone(), digest);
                    None
                }
                Err(e) => {
                    log::warn!("Failed to hash {}: {}", path.display(), e);
                    observer.on_hash_failed(path, &e);
                    Some(e)
                }
            })
            .collect()
    };

    let mut errors = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.io_threads.max(1))
        .thread_name(|i| format!("rustdedup-hash-{i}"))
        .build()
    {
        Ok(pool) => pool.install(work),
        Err(e) => {
            log::warn!(
                "Failed to create hashing thread pool ({}), using global pool with {} threads",
                e,
                rayon::current_num_threads()
            );
            work()
        }
    };

    // Every worker has joined; the map is no longer shared.
    let mapping: HashMapping = results.into_iter().collect();

    errors.sort_by(|a, b| a.path().cmp(b.path()));
    stats.hashed_files = mapping.len();
    stats.failed_files = errors.len();
    stats.errors = errors;

    observer.on_phase_end(Phase::Hashing);
    log::info!(
        "Hashing complete: {} hashed, {} failed",
        stats.hashed_files,
        stats.failed_files
    );

    (mapping, stats)
}
