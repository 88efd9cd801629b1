use crate::domain::model::CopyProgress;
use crate::utils::error::{KitError, Result};
use crate::utils::validation::{validate_path, validate_positive_number};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Creates `path` and any missing parents. Fails if a non-directory is in the way.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    validate_path("path", path)?;

    if path.exists() && !path.is_dir() {
        return Err(KitError::IoError(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        )));
    }
    fs::create_dir_all(path)?;
    Ok(())
}

pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Regular files under `dir`, sorted by path.
pub fn list_files<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk(dir.as_ref(), recursive, false, &mut out)?;
    out.sort();
    Ok(out)
}

/// Files and directories under `dir`, recursively, sorted by path.
pub fn list_all<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk(dir.as_ref(), true, true, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk(dir: &Path, recursive: bool, include_dirs: bool, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if include_dirs {
                out.push(path.clone());
            }
            if recursive {
                walk(&path, recursive, include_dirs, out)?;
            }
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Size of a file, or the summed size of every file below a directory.
pub fn total_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    let meta = fs::metadata(path)?;
    if meta.is_file() {
        return Ok(meta.len());
    }

    let mut total = 0u64;
    for file in list_files(path, true)? {
        total += fs::metadata(&file)?.len();
    }
    Ok(total)
}

/// Human-readable size in base 1024, e.g. `0 B`, `1 KB`, `1.5 KB`, `2.25 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let mut rounded = format!("{:.2}", value);
    if rounded == "1024.00" && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
        rounded = format!("{:.2}", value);
    }
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Streams `reader` into `writer` in `buffer_size` chunks, reporting after each chunk.
pub fn copy_with_progress<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    total: Option<u64>,
    buffer_size: usize,
    mut on_progress: F,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    F: FnMut(CopyProgress),
{
    validate_positive_number("buffer_size", buffer_size, 1)?;

    let mut buffer = vec![0u8; buffer_size];
    let mut copied = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer.write_all(&buffer[..read])?;
        copied += read as u64;
        on_progress(CopyProgress { copied, total });
    }
    writer.flush()?;
    Ok(copied)
}

/// Copies `src` to `dest`, creating parent directories as needed.
pub fn copy_file<P, Q, F>(src: P, dest: Q, buffer_size: usize, on_progress: F) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(CopyProgress),
{
    let (src, dest) = (src.as_ref(), dest.as_ref());
    validate_path("dest", dest)?;
    ensure_parent_dir(dest)?;

    let mut input = fs::File::open(src)?;
    let total = input.metadata()?.len();
    let mut output = io::BufWriter::new(fs::File::create(dest)?);

    tracing::debug!("Copying {} -> {} ({} bytes)", src.display(), dest.display(), total);
    copy_with_progress(&mut input, &mut output, Some(total), buffer_size, on_progress)
}

/// Deletes a file or a whole tree. Returns `false` when nothing existed.
pub fn remove_recursively<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    fs::write(path, text)?;
    Ok(())
}
