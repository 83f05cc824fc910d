use rustdedup::actions::{delete_duplicates, delete_duplicates_with, FileRemover, FsRemover};
use rustdedup::duplicates::DuplicateFinder;
use rustdedup::progress::NoopObserver;
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_deduplicate_hello_world() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("A"), "hello").unwrap();
    fs::write(root.join("B"), "hello").unwrap();
    fs::write(root.join("C"), "world").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].keeper(), &root.join("A"));

    let result = delete_duplicates(&groups, &NoopObserver);

    assert_eq!(result.deleted_count(), 1);
    assert_eq!(result.bytes_reclaimed(), "hello".len() as u64);
    assert!(result.all_succeeded());

    assert!(root.join("A").exists());
    assert!(!root.join("B").exists());
    assert_eq!(fs::read_to_string(root.join("C")).unwrap(), "world");
}

#[test]
fn test_deduplicate_keeps_shortest_name() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("photo (1).jpg"), "pixels").unwrap();
    fs::write(root.join("photo.jpg"), "pixels").unwrap();
    fs::write(root.join("img.jpg"), "pixels").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();
    let result = delete_duplicates(&groups, &NoopObserver);

    assert_eq!(result.deleted_count(), 2);
    assert_eq!(result.bytes_reclaimed(), 12);
    assert!(root.join("img.jpg").exists());
    assert!(!root.join("photo.jpg").exists());
    assert!(!root.join("photo (1).jpg").exists());
}

#[test]
fn test_rescan_after_deduplicate_finds_nothing() {
    let dir = tempdir().unwrap();
    for name in ["one", "two", "three"] {
        fs::write(dir.path().join(name), "copy").unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (groups, _) = finder.find_duplicates(dir.path(), &NoopObserver).unwrap();
    let first = delete_duplicates(&groups, &NoopObserver);
    assert_eq!(first.deleted_count(), 2);

    let (again, summary) = finder.find_duplicates(dir.path(), &NoopObserver).unwrap();
    assert!(again.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_replaying_stale_groups_reports_missing_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "data").unwrap();
    fs::write(dir.path().join("bb"), "data").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &NoopObserver)
        .unwrap();

    let first = delete_duplicates(&groups, &NoopObserver);
    assert_eq!(first.deleted_count(), 1);

    let second = delete_duplicates(&groups, &NoopObserver);
    assert_eq!(second.deleted_count(), 0);
    assert_eq!(second.bytes_reclaimed(), 0);
    assert_eq!(second.errors().len(), 1);
    assert!(second.errors()[0].contains("file not found"));
    assert!(dir.path().join("a").exists());
}

/// Fails the n-th removal with a permission error.
struct FailNth {
    fail_at: usize,
    calls: Cell<usize>,
}

impl FileRemover for FailNth {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        FsRemover.file_size(path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n == self.fail_at {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        FsRemover.remove(path)
    }
}

#[test]
fn test_permission_failure_mid_group_continues() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("k"), "triplet").unwrap();
    fs::write(root.join("d1"), "triplet").unwrap();
    fs::write(root.join("d2"), "triplet").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();
    assert_eq!(groups[0].keeper(), &root.join("k"));

    let remover = FailNth {
        fail_at: 2,
        calls: Cell::new(0),
    };
    let result = delete_duplicates_with(&groups, &remover, &NoopObserver);

    assert_eq!(remover.calls.get(), 2);
    assert_eq!(result.deleted_count(), 1);
    assert_eq!(result.bytes_reclaimed(), 7);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].starts_with("Error deleting "));
    assert!(result.errors()[0].ends_with("permission denied"));

    assert!(root.join("k").exists());
    assert!(!root.join("d1").exists());
    assert!(root.join("d2").exists());
}

#[test]
fn test_deleted_count_matches_group_sizes() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    for i in 0..4 {
        fs::write(root.join(format!("x{i}")), "xxxx").unwrap();
    }
    for i in 0..3 {
        fs::write(root.join(format!("y{i}")), "yy").unwrap();
    }
    fs::write(root.join("z"), "z").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();
    let expected: usize = groups.iter().map(|g| g.len() - 1).sum();
    assert_eq!(expected, 5);

    let result = delete_duplicates(&groups, &NoopObserver);

    assert_eq!(result.deleted_count(), expected);
    assert_eq!(result.bytes_reclaimed(), 3 * 4 + 2 * 2);
    assert_eq!(result.bytes_reclaimed(), summary.reclaimable_space);
    assert_eq!(fs::read_dir(root).unwrap().count(), 3);
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_never_costs_the_real_file() {
    use rustdedup::duplicates::FinderConfig;
    use rustdedup::scanner::WalkerConfig;

    let dir = tempdir().unwrap();
    let root = dir.path();
    let real = root.join("original-photo.jpg");
    fs::write(&real, "precious bytes").unwrap();
    std::os::unix::fs::symlink(&real, root.join("p.jpg")).unwrap();

    let config = FinderConfig::default().with_walker(WalkerConfig::new(true, false));
    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates(root, &NoopObserver)
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);

    let result = delete_duplicates(&groups, &NoopObserver);
    assert_eq!(result.deleted_count(), 0);
    assert_eq!(fs::read_to_string(&real).unwrap(), "precious bytes");
    assert_eq!(
        fs::read_to_string(root.join("p.jpg")).unwrap(),
        "precious bytes"
    );
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_beside_real_copy_keeps_content() {
    use rustdedup::duplicates::FinderConfig;
    use rustdedup::scanner::WalkerConfig;

    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("original-photo.jpg"), "precious bytes").unwrap();
    fs::write(root.join("copy-of-photo.jpg"), "precious bytes").unwrap();
    std::os::unix::fs::symlink(root.join("original-photo.jpg"), root.join("p.jpg")).unwrap();

    let config = FinderConfig::default().with_walker(WalkerConfig::new(true, false));
    let (groups, _) = DuplicateFinder::new(config)
        .find_duplicates(root, &NoopObserver)
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0].files().iter().all(|p| !p.ends_with("p.jpg")));

    let result = delete_duplicates(&groups, &NoopObserver);
    assert_eq!(result.deleted_count(), 1);

    let survivors = ["original-photo.jpg", "copy-of-photo.jpg"]
        .iter()
        .filter(|name| root.join(name).exists())
        .count();
    assert_eq!(survivors, 1);
}

#[cfg(unix)]
#[test]
fn test_hard_links_counted_as_reclaimed_bytes() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a"), "linked").unwrap();
    fs::hard_link(root.join("a"), root.join("bb")).unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();
    assert_eq!(groups.len(), 1);

    let result = delete_duplicates(&groups, &NoopObserver);

    // The inode survives through the keeper; the report still counts the
    // removed name's length.
    assert_eq!(result.deleted_count(), 1);
    assert_eq!(result.bytes_reclaimed(), 6);
    assert_eq!(fs::read_to_string(root.join("a")).unwrap(), "linked");
    assert!(!root.join("bb").exists());
}
