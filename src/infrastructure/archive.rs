//! Zip Archives
//!
//! Packs a directory's contents into a zip (entries relative to the
//! directory, no wrapping folder) and unpacks bundled tool archives.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::SpecBuildResult;

/// Zip every entry under `dir` into `dest`, returning the number of files.
///
/// `dest` may live inside `dir`; it is excluded from its own contents. The
/// archive is written to a temporary file first and moved into place.
pub fn zip_dir_contents(dir: &Path, dest: &Path) -> SpecBuildResult<usize> {
    let mut entries = Vec::new();
    collect_entries(dir, dir, dest, &mut entries)?;
    entries.sort();

    let parent = dest.parent().unwrap_or(dir);
    let tmp = tempfile::Builder::new()
        .prefix(".specbuild-")
        .suffix(".zip.tmp")
        .tempfile_in(parent)?;

    let mut writer = ZipWriter::new(BufWriter::new(tmp.as_file()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files = 0;

    for (name, path) in &entries {
        if path.is_dir() {
            writer.add_directory(format!("{}/", name), options)?;
        } else {
            writer.start_file(name.clone(), options)?;
            let mut reader = BufReader::new(File::open(path)?);
            io::copy(&mut reader, &mut writer)?;
            files += 1;
        }
    }

    let mut inner = writer.finish()?;
    inner.flush()?;
    drop(inner);
    tmp.persist(dest).map_err(|e| e.error)?;

    tracing::debug!(archive = %dest.display(), files, "archive written");
    Ok(files)
}

fn collect_entries(
    root: &Path,
    dir: &Path,
    exclude: &Path,
    out: &mut Vec<(String, PathBuf)>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path == exclude || is_temp_archive(&path) {
            continue;
        }

        let name = archive_name(root, &path);
        if path.is_dir() {
            out.push((name, path.clone()));
            collect_entries(root, &path, exclude, out)?;
        } else {
            out.push((name, path));
        }
    }
    Ok(())
}

fn is_temp_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(".specbuild-") && n.ends_with(".zip.tmp"))
}

/// Forward-slash path of `path` relative to `root`
fn archive_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extract `archive` into `dest` (created if needed).
pub fn unzip_into(archive: &Path, dest: &Path) -> SpecBuildResult<()> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;
    fs::create_dir_all(dest)?;
    zip.extract(dest)?;
    Ok(())
}
