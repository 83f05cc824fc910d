use rustdedup::duplicates::DuplicateFinder;
use rustdedup::progress::{DedupObserver, NoopObserver, Phase};
use rustdedup::scanner::{Digest, FileEntry, HashError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::tempdir;

#[derive(Default)]
struct Recorder {
    hashed: Mutex<Vec<PathBuf>>,
    failed: Mutex<Vec<PathBuf>>,
    phases: Mutex<Vec<(Phase, usize)>>,
}

impl DedupObserver for Recorder {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        self.phases.lock().unwrap().push((phase, total));
    }

    fn on_hashed(&self, path: &Path, _digest: &Digest) {
        self.hashed.lock().unwrap().push(path.to_path_buf());
    }

    fn on_hash_failed(&self, path: &Path, _error: &HashError) {
        self.failed.lock().unwrap().push(path.to_path_buf());
    }
}

#[test]
fn test_vanished_file_is_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a"), "same").unwrap();
    fs::write(root.join("b"), "same").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let mut files = finder.discover(root).unwrap();
    files.push(FileEntry::new(root.join("vanished"), 4));

    let recorder = Recorder::default();
    let (groups, summary) = finder.find_duplicates_in_files(files, &recorder);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 2);
    assert_eq!(summary.failed_files, 1);
    // Unreadable files are neither unique nor duplicates.
    assert_eq!(summary.unique_files, 1);
    assert_eq!(summary.duplicate_files, 1);
    assert!(summary.has_errors());
    assert!(matches!(summary.hash_errors[0], HashError::NotFound(_)));

    assert_eq!(recorder.hashed.lock().unwrap().len(), 2);
    assert_eq!(*recorder.failed.lock().unwrap(), vec![root.join("vanished")]);
    assert_eq!(*recorder.phases.lock().unwrap(), vec![(Phase::Hashing, 3)]);
}

#[test]
fn test_only_unreadable_files_yields_no_groups() {
    let dir = tempdir().unwrap();
    let files = vec![
        FileEntry::new(dir.path().join("x"), 1),
        FileEntry::new(dir.path().join("y"), 1),
    ];

    let (groups, summary) =
        DuplicateFinder::with_defaults().find_duplicates_in_files(files, &NoopObserver);

    assert!(groups.is_empty());
    assert_eq!(summary.hashed_files, 0);
    assert_eq!(summary.failed_files, 2);
    assert_eq!(summary.unique_files, 0);
    assert_eq!(summary.duplicate_files, 0);
}

#[test]
fn test_file_as_root_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "x").unwrap();

    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&file, &NoopObserver)
        .unwrap_err();

    assert!(err.to_string().starts_with("Not a directory"));
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_does_not_abort_scan() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("one"), "dup").unwrap();
    fs::write(root.join("two"), "dup").unwrap();
    std::os::unix::fs::symlink(root.join("nowhere"), root.join("dangling")).unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}
