//! Interactive prompts on stdin/stdout.
//!
//! Both prompts take their reader and writer as parameters so tests can feed
//! canned answers.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Resolve the root path for a command.
///
/// A given path other than `.` or empty is returned unchanged. Otherwise the
/// user is asked with `Enter the path to <verb>: `; an empty answer or end of
/// input yields `None`.
///
/// # Errors
///
/// Returns any I/O error from reading or writing.
///
/// # Example
///
/// ```
/// use rustdedup::prompt::resolve_path;
/// use std::path::{Path, PathBuf};
///
/// let mut out = Vec::new();
/// let path = resolve_path(None, "scan", &b"/data\n"[..], &mut out).unwrap();
///
/// assert_eq!(path, Some(PathBuf::from("/data")));
/// assert_eq!(out, b"Enter the path to scan: ");
/// ```
pub fn resolve_path<R: BufRead, W: Write>(
    given: Option<&Path>,
    verb: &str,
    input: R,
    output: &mut W,
) -> io::Result<Option<PathBuf>> {
    if let Some(path) = given.filter(|p| !needs_prompt(p)) {
        return Ok(Some(path.to_path_buf()));
    }

    let answer = ask(&format!("Enter the path to {verb}: "), input, output)?;
    Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
}

/// Ask `Proceed with deletion? (y/N): ` and accept only `y` or `Y`.
///
/// # Errors
///
/// Returns any I/O error from reading or writing.
pub fn confirm_deletion<R: BufRead, W: Write>(input: R, output: &mut W) -> io::Result<bool> {
    let answer = ask("Proceed with deletion? (y/N): ", input, output)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

fn needs_prompt(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(".")
}

fn ask<R: BufRead, W: Write>(question: &str, mut input: R, output: &mut W) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
