use rustdedup::duplicates::{DuplicateFinder, FinderConfig};
use rustdedup::progress::NoopObserver;
use rustdedup::scanner::{HashAlgorithm, HashConfig, WalkerConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_end_to_end_scan() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("A.txt"), "hello").unwrap();
    fs::write(root.join("B.txt"), "hello").unwrap();
    fs::write(root.join("C.txt"), "world").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(root, &NoopObserver).unwrap();

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.len(), 2);
    assert_eq!(group.size(), 5);
    assert!(group.files().contains(&root.join("A.txt")));
    assert!(group.files().contains(&root.join("B.txt")));
    assert!(!group.files().contains(&root.join("C.txt")));

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 3);
    assert_eq!(summary.unique_files, 2);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 5);
    assert!(!summary.has_errors());
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &NoopObserver)
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.reclaimable_space, 0);
}

#[test]
fn test_scan_all_unique() {
    let dir = tempdir().unwrap();
    for i in 0..10 {
        fs::write(dir.path().join(format!("file{i}.txt")), format!("content {i}")).unwrap();
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &NoopObserver)
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.hashed_files, 10);
    assert_eq!(summary.unique_files, 10);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let deep = root.join("one").join("two").join("three");
    fs::create_dir_all(&deep).unwrap();

    fs::write(root.join("top.dat"), "same bytes").unwrap();
    fs::write(root.join("one").join("mid.dat"), "same bytes").unwrap();
    fs::write(deep.join("bottom.dat"), "same bytes").unwrap();
    fs::write(deep.join("other.dat"), "different").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    // top.dat and mid.dat tie on length; ".../one/mid.dat" sorts first.
    assert_eq!(groups[0].keeper(), &root.join("one").join("mid.dat"));
}

#[test]
fn test_scan_multiple_groups_in_digest_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a1"), "alpha").unwrap();
    fs::write(root.join("a2"), "alpha").unwrap();
    fs::write(root.join("b1"), "beta").unwrap();
    fs::write(root.join("b2"), "beta").unwrap();
    fs::write(root.join("b3"), "beta").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert!(groups[0].hash() < groups[1].hash());

    let mut sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![2, 3]);

    assert_eq!(summary.duplicate_files, 3);
    assert_eq!(summary.reclaimable_space, 5 + 2 * 4);
}

#[test]
fn test_scan_skip_hidden() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join(".cache")).unwrap();

    fs::write(root.join("visible.txt"), "twin").unwrap();
    fs::write(root.join(".hidden.txt"), "twin").unwrap();
    fs::write(root.join(".cache").join("copy.txt"), "twin").unwrap();

    let all = DuplicateFinder::with_defaults()
        .find_duplicates(root, &NoopObserver)
        .unwrap()
        .0;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].len(), 3);

    let config = FinderConfig::default().with_walker(WalkerConfig::new(false, true));
    let (visible, summary) = DuplicateFinder::new(config)
        .find_duplicates(root, &NoopObserver)
        .unwrap();
    assert!(visible.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_scan_blake3_single_thread() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.bin"), [7u8; 1000]).unwrap();
    fs::write(dir.path().join("y.bin"), [7u8; 1000]).unwrap();

    let config = FinderConfig::default().with_hash(
        HashConfig::default()
            .with_algorithm(HashAlgorithm::Blake3)
            .with_io_threads(1)
            .with_buffer_size(64),
    );
    let (groups, _) = DuplicateFinder::new(config)
        .find_duplicates(dir.path(), &NoopObserver)
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].hash().as_str().len(), 64);
    assert_eq!(groups[0].keeper(), &dir.path().join("x.bin"));
}

#[test]
fn test_find_duplicates_in_explicit_file_list() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("p"), "same").unwrap();
    fs::write(dir.path().join("q"), "same").unwrap();
    fs::write(dir.path().join("r"), "same").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let files: Vec<_> = finder
        .discover(dir.path())
        .unwrap()
        .into_iter()
        .filter(|f| f.path.file_name().is_some_and(|n| n != "r"))
        .collect();

    let (groups, summary) = finder.find_duplicates_in_files(files, &NoopObserver);

    assert_eq!(summary.total_files, 2);
    assert_eq!(groups.len(), 1);
    let names: Vec<PathBuf> = groups[0].files().to_vec();
    assert_eq!(names, vec![dir.path().join("p"), dir.path().join("q")]);
}
