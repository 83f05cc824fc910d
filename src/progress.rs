//! Per-file outcome reporting for the hashing and deletion phases.
//!
//! The core never formats console output itself. Instead it calls a
//! [`DedupObserver`] for every per-file outcome. Calls may arrive from several
//! hashing workers at once, in no particular order, so implementations must
//! serialize their own output.
//!
//! [`ConsoleReporter`] is the terminal implementation. It drives an indicatif
//! progress bar during hashing and prints one line per outcome through the
//! bar, which keeps lines from interleaving.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use yansi::Paint;

use crate::scanner::{Digest, HashError};

/// Pipeline phase announced to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Full-content hashing of discovered files
    Hashing,
    /// Removal of non-keeper files
    Deleting,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Hashing => write!(f, "hashing"),
            Phase::Deleting => write!(f, "deleting"),
        }
    }
}

/// Receiver of per-file outcomes from the hashing and deletion phases.
///
/// Every method has a no-op default so implementors only override what they
/// display.
pub trait DedupObserver: Send + Sync {
    /// Called once before a phase processes `total` items.
    fn on_phase_start(&self, _phase: Phase, _total: usize) {}

    /// Called once after a phase has processed every item.
    fn on_phase_end(&self, _phase: Phase) {}

    /// A file was hashed successfully.
    fn on_hashed(&self, _path: &Path, _digest: &Digest) {}

    /// A file could not be read and was left out of the hash mapping.
    fn on_hash_failed(&self, _path: &Path, _error: &HashError) {}

    /// A duplicate was removed, reclaiming `size` bytes.
    fn on_deleted(&self, _path: &Path, _size: u64) {}

    /// A duplicate could not be removed.
    fn on_delete_failed(&self, _path: &Path, _error: &str) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DedupObserver for NoopObserver {}

/// Terminal reporter using indicatif.
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is printed and no bar is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustdedup::progress::ConsoleReporter;
    ///
    /// let reporter = ConsoleReporter::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn hashing_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    /// Print one line without tearing the active bar.
    ///
    /// The bar slot lock is held while printing, so concurrent callers
    /// produce whole lines one at a time.
    fn line(&self, text: String, advance: bool) {
        if self.quiet {
            return;
        }

        let guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(pb) => {
                pb.suspend(|| println!("{text}"));
                if advance {
                    pb.inc(1);
                }
            }
            None => println!("{text}"),
        }
    }
}

impl DedupObserver for ConsoleReporter {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        if self.quiet || phase != Phase::Hashing {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::hashing_style());
        pb.set_message("Hashing");
        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_phase_end(&self, phase: Phase) {
        if phase != Phase::Hashing {
            return;
        }

        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }

    fn on_hashed(&self, path: &Path, digest: &Digest) {
        self.line(
            format!("  Hashed: {} -> {}...", display_name(path), digest.short()),
            true,
        );
    }

    fn on_hash_failed(&self, path: &Path, error: &HashError) {
        self.line(
            format!(
                "  {} {}: {}",
                "Error hashing".red(),
                display_name(path),
                error
            ),
            true,
        );
    }

    fn on_deleted(&self, path: &Path, _size: u64) {
        self.line(
            format!("  {} {}", "Deleted:".green(), path.display()),
            false,
        );
    }

    fn on_delete_failed(&self, _path: &Path, error: &str) {
        self.line(format!("  {}", error.red()), false);
    }
}

/// Last path segment for compact per-file lines.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
