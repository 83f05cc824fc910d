use rustdedup::cli::{
    CommonArgs, DeduplicateArgs, DryRunArgs, OutputFormat, ScanArgs, StatsArgs, StatsFormat,
};
use rustdedup::commands::{deduplicate, dry_run, scan, stats, Console};
use rustdedup::config::Config;
use rustdedup::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn common(path: &Path) -> CommonArgs {
    CommonArgs {
        path: Some(path.to_path_buf()),
        ..Default::default()
    }
}

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("A"), "hello").unwrap();
    fs::write(dir.path().join("B"), "hello").unwrap();
    fs::write(dir.path().join("C"), "world").unwrap();
    dir
}

#[test]
fn test_scan_text_lists_keep_and_delete() {
    let dir = fixture();
    let args = ScanArgs {
        common: common(dir.path()),
        output: OutputFormat::Text,
    };
    let mut console = Console::new(&b""[..], Vec::new(), false);

    let code = scan::run(&args, &Config::default(), &mut console).unwrap();
    let out = String::from_utf8(console.output).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("Scanning: "));
    assert!(out.contains("Found 3 file(s)."));
    assert!(out.contains("Found 1 group(s) of duplicate files:"));
    assert!(out.contains(&format!("{} [KEEP]", dir.path().join("A").display())));
    assert!(out.contains(&format!("{} [DELETE]", dir.path().join("B").display())));
    assert!(!out.contains(&dir.path().join("C").display().to_string()));
    assert!(dir.path().join("B").exists());
}

#[test]
fn test_scan_json_is_parseable() {
    let dir = fixture();
    let args = ScanArgs {
        common: common(dir.path()),
        output: OutputFormat::Json,
    };
    let mut console = Console::new(&b""[..], Vec::new(), false);

    let code = scan::run(&args, &Config::default(), &mut console).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&console.output).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(value["duplicates"][0]["copies"], 2);
    assert_eq!(value["summary"]["reclaimable_space"], 5);
    assert_eq!(value["summary"]["exit_code_name"], "DD000");
}

#[test]
fn test_scan_csv_has_row_per_file() {
    let dir = fixture();
    let args = ScanArgs {
        common: common(dir.path()),
        output: OutputFormat::Csv,
    };
    let mut console = Console::new(&b""[..], Vec::new(), false);

    scan::run(&args, &Config::default(), &mut console).unwrap();
    let out = String::from_utf8(console.output).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("group_id,hash,path,size,action"));
    assert!(lines[1].ends_with(",keep"));
    assert!(lines[2].ends_with(",delete"));
}

#[test]
fn test_dry_run_reports_plan_without_deleting() {
    let dir = fixture();
    let args = DryRunArgs {
        common: common(dir.path()),
    };
    let mut console = Console::new(&b""[..], Vec::new(), true);

    let code = dry_run::run(&args, &Config::default(), &mut console).unwrap();
    let out = String::from_utf8(console.output).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("--- Dry Run Summary ---"));
    assert!(out.contains("Files to delete: 1"));
    assert!(dir.path().join("A").exists());
    assert!(dir.path().join("B").exists());
}

#[test]
fn test_deduplicate_prompts_for_path_and_confirmation() {
    let dir = fixture();
    let answers = format!("{}\ny\n", dir.path().display());
    let args = DeduplicateArgs {
        common: CommonArgs::default(),
        yes: false,
    };
    let mut console = Console::new(answers.as_bytes(), Vec::new(), true);

    let code = deduplicate::run(&args, &Config::default(), &mut console).unwrap();
    let out = String::from_utf8(console.output).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("Enter the path to deduplicate: "));
    assert!(out.contains("Proceed with deletion? (y/N): "));
    assert!(out.contains("Deleted 1 file(s)."));
    assert!(dir.path().join("A").exists());
    assert!(!dir.path().join("B").exists());
    assert!(dir.path().join("C").exists());
}

#[test]
fn test_deduplicate_declined_keeps_files() {
    let dir = fixture();
    let args = DeduplicateArgs {
        common: common(dir.path()),
        yes: false,
    };
    let mut console = Console::new(&b"n\n"[..], Vec::new(), true);

    let code = deduplicate::run(&args, &Config::default(), &mut console).unwrap();

    assert_eq!(code, ExitCode::Aborted);
    assert!(String::from_utf8(console.output).unwrap().contains("Aborted."));
    assert!(dir.path().join("B").exists());
}

#[test]
fn test_deduplicate_twice_second_finds_nothing() {
    let dir = fixture();
    let args = DeduplicateArgs {
        common: common(dir.path()),
        yes: true,
    };

    let mut first = Console::new(&b""[..], Vec::new(), true);
    assert_eq!(
        deduplicate::run(&args, &Config::default(), &mut first).unwrap(),
        ExitCode::Success
    );

    let mut second = Console::new(&b""[..], Vec::new(), true);
    assert_eq!(
        deduplicate::run(&args, &Config::default(), &mut second).unwrap(),
        ExitCode::NoDuplicates
    );
    assert!(String::from_utf8(second.output)
        .unwrap()
        .contains("No duplicate files found."));
}

#[test]
fn test_stats_json_counts() {
    let dir = fixture();
    let args = StatsArgs {
        common: common(dir.path()),
        output: StatsFormat::Json,
    };
    let mut console = Console::new(&b""[..], Vec::new(), false);

    let code = stats::run(&args, &Config::default(), &mut console).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&console.output).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(value["summary"]["total_files"], 3);
    assert_eq!(value["summary"]["unique_files"], 2);
    assert_eq!(value["duplicates"]["wasted_space"], 5);
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let args = StatsArgs {
        common: common(&dir.path().join("gone")),
        output: StatsFormat::Text,
    };
    let mut console = Console::new(&b""[..], Vec::new(), true);

    let err = stats::run(&args, &Config::default(), &mut console).unwrap_err();

    assert!(err.to_string().contains("Directory not found"));
}
