//! Directory walker implementation using jwalk for parallel traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating every regular
//! file under a root directory. Children are sorted by name so that the
//! resulting list is stable between runs.
//!
//! # Example
//!
//! ```no_run
//! use rustdedup::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Recursive file enumerator.
#[derive(Debug)]
pub struct Walker {
    /// Absolute root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// Relative paths are resolved against the current directory so that
    /// every yielded [`FileEntry`] carries an absolute path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        let root = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self { root, config }
    }

    /// The absolute root this walker enumerates.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotADirectory`, or `PermissionDenied` for the root.
    pub fn validate_root(&self) -> Result<(), ScanError> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) => Err(match e.kind() {
                std::io::ErrorKind::NotFound => ScanError::NotFound(self.root.clone()),
                std::io::ErrorKind::PermissionDenied => {
                    ScanError::PermissionDenied(self.root.clone())
                }
                _ => ScanError::Io {
                    path: self.root.clone(),
                    source: e,
                },
            }),
        }
    }

    /// Validate the root and collect every file beneath it.
    ///
    /// Errors on individual entries are logged and skipped; only a missing or
    /// unreadable root fails the whole walk.
    ///
    /// # Errors
    ///
    /// Returns the [`ScanError`] from [`Walker::validate_root`].
    pub fn collect_files(&self) -> Result<Vec<FileEntry>, ScanError> {
        self.validate_root()?;

        let mut files = Vec::new();
        let mut skipped = 0usize;
        for entry in self.walk() {
            match entry {
                Ok(file) => files.push(file),
                Err(_) => skipped += 1,
            }
        }

        log::info!(
            "Discovered {} files under {} ({} entries skipped)",
            files.len(),
            self.root.display(),
            skipped
        );
        Ok(files)
    }

    /// Walk the directory tree, yielding regular files.
    ///
    /// Symbolic links are skipped unless `follow_symlinks` is set. When they
    /// are followed, every file is reported under its canonical path and only
    /// once, however many links lead to it. Empty files are included.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .skip_hidden(self.config.skip_hidden)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        let mut seen: HashSet<PathBuf> = HashSet::new();
        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    let file_type = entry.file_type();

                    if file_type.is_dir() {
                        return None;
                    }

                    let is_symlink = file_type.is_symlink();
                    if is_symlink && !self.config.follow_symlinks {
                        log::trace!("Skipping symlink: {}", path.display());
                        return None;
                    }

                    let metadata = if self.config.follow_symlinks {
                        std::fs::metadata(&path)
                    } else {
                        std::fs::symlink_metadata(&path)
                    };

                    match metadata {
                        Ok(m) if m.is_file() && self.config.follow_symlinks => {
                            // A link and its target must not both become group members.
                            let real = match std::fs::canonicalize(&path) {
                                Ok(real) => real,
                                Err(e) => return Some(self.handle_io_error(&path, e)),
                            };
                            if !seen.insert(real.clone()) {
                                log::debug!(
                                    "Skipping {}: resolves to already seen {}",
                                    path.display(),
                                    real.display()
                                );
                                return None;
                            }
                            Some(Ok(FileEntry::new(real, m.len())))
                        }
                        Ok(m) if m.is_file() => Some(Ok(FileEntry::new(path, m.len()))),
                        Ok(_) => None,
                        Err(e) => Some(self.handle_io_error(&path, e)),
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    log::warn!("Walker error for {}: {}", path.display(), e);
                    Some(Err(ScanError::Io {
                        path,
                        source: std::io::Error::other(e.to_string()),
                    }))
                }
            })
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: &Path, error: std::io::Error) -> Result<FileEntry, ScanError> {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                Err(ScanError::PermissionDenied(path.to_path_buf()))
            }
            ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
                Err(ScanError::NotFound(path.to_path_buf()))
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
                Err(ScanError::Io {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}
