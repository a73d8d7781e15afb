//! Local directory operations

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Make `dir` exist and be empty.
///
/// Only the entries are removed; the directory itself is kept so that
/// open handles or watchers on it stay valid.
pub fn clear_dir_contents(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // DirEntry::file_type does not follow symlinks, so a link to a
        // directory is unlinked rather than emptied.
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }

    Ok(())
}

/// Recursively copy every entry of `src` into `dst`, returning the number
/// of files copied.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copied += copy_dir_contents(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Regular files directly inside `dir` whose name ends with `suffix`
/// (ASCII case-insensitive), sorted by path.
pub fn list_files_with_suffix(dir: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    let suffix = suffix.to_ascii_lowercase();
    list_files(dir, |name| name.to_ascii_lowercase().ends_with(&suffix))
}

/// Regular files directly inside `dir` with the given extension
/// (no leading dot, ASCII case-insensitive), sorted by path.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    list_files(dir, |name| {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension))
    })
}

fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if keep(name) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
