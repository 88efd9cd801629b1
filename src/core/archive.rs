use crate::core::file::{ensure_dir, ensure_parent_dir, list_all};
use crate::domain::model::EntryProgress;
use crate::domain::ports::ProgressListener;
use crate::utils::error::{KitError, Result};
use crate::utils::validation::{validate_path, validate_range};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::{Component, Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

type NameTransform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Settings shared by the zip and unzip helpers.
#[derive(Default)]
pub struct ZipOptions {
    compression_level: Option<i64>,
    name_transform: Option<NameTransform>,
}

impl fmt::Debug for ZipOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipOptions")
            .field("compression_level", &self.compression_level)
            .field("name_transform", &self.name_transform.is_some())
            .finish()
    }
}

impl ZipOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deflate level 0..=9; 0 stores entries uncompressed.
    pub fn with_level(mut self, level: i64) -> Result<Self> {
        validate_range("compression_level", level, 0, 9)?;
        self.compression_level = Some(level);
        Ok(self)
    }

    /// Rewrites every entry name when zipping and every relative output path
    /// when unzipping.
    pub fn with_name_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.name_transform = Some(Box::new(transform));
        self
    }

    fn entry_name(&self, name: &str) -> String {
        match &self.name_transform {
            Some(transform) => transform(name),
            None => name.to_string(),
        }
    }

    fn file_options(&self) -> SimpleFileOptions {
        match self.compression_level {
            Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            level => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(level),
        }
    }
}

fn check_canceled<L: ProgressListener + ?Sized>(listener: &L, operation: &str) -> Result<()> {
    if listener.is_canceled() {
        tracing::info!("{} canceled by listener", operation);
        return Err(KitError::Canceled {
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// `/`-joined relative name of `path` below `base`.
fn relative_entry_name(base: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        KitError::invalid_argument("path", path.display(), "Path is not below the source directory")
    })?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

fn write_zip_file<W, L>(
    writer: &mut ZipWriter<W>,
    entries: &[(PathBuf, String)],
    options: &ZipOptions,
    listener: &mut L,
) -> Result<()>
where
    W: Write + Seek,
    L: ProgressListener + ?Sized,
{
    let total = entries.len();

    for (index, (path, name)) in entries.iter().enumerate() {
        check_canceled(&*listener, "zip")?;

        let bytes = if path.is_dir() {
            let dir_name = format!("{}/", name.trim_end_matches('/'));
            writer.add_directory(dir_name, options.file_options())?;
            0
        } else {
            writer.start_file(name.as_str(), options.file_options())?;
            let mut input = BufReader::new(File::open(path)?);
            io::copy(&mut input, writer)?
        };

        tracing::debug!("Zipped {} ({} bytes)", name, bytes);
        listener.on_entry(&EntryProgress {
            name: name.clone(),
            index,
            total,
            bytes,
        });
    }
    Ok(())
}

fn write_zip_to<L>(
    dest: &Path,
    entries: &[(PathBuf, String)],
    options: &ZipOptions,
    listener: &mut L,
) -> Result<()>
where
    L: ProgressListener + ?Sized,
{
    validate_path("dest", dest)?;
    ensure_parent_dir(dest)?;

    let mut writer = ZipWriter::new(BufWriter::new(File::create(dest)?));
    let written = write_zip_file(&mut writer, entries, options, listener)
        .and_then(|_| writer.finish().map_err(KitError::from))
        .and_then(|mut inner| inner.flush().map_err(KitError::from));

    if let Err(e) = written {
        // Never leave a truncated archive behind.
        if let Err(cleanup) = fs::remove_file(dest) {
            tracing::warn!("Could not remove partial archive {}: {}", dest.display(), cleanup);
        }
        return Err(e);
    }

    tracing::info!("Wrote {} entries to {}", entries.len(), dest.display());
    Ok(())
}

/// Zips `files` as flat entries named by file name.
pub fn zip_files<P, L>(
    files: &[P],
    dest: &Path,
    options: &ZipOptions,
    listener: &mut L,
) -> Result<()>
where
    P: AsRef<Path>,
    L: ProgressListener + ?Sized,
{
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let path = file.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| {
                KitError::invalid_argument("files", path.display(), "Path has no file name")
            })?
            .to_string_lossy()
            .into_owned();
        entries.push((path.to_path_buf(), options.entry_name(&file_name)));
    }
    write_zip_to(dest, &entries, options, listener)
}

/// Zips the tree below `dir`. With `include_root` every entry is prefixed
/// with the directory's own name.
pub fn zip_dir<L>(
    dir: &Path,
    dest: &Path,
    include_root: bool,
    options: &ZipOptions,
    listener: &mut L,
) -> Result<()>
where
    L: ProgressListener + ?Sized,
{
    let root_name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let mut entries = Vec::new();
    for path in list_all(dir)? {
        if path == dest {
            continue;
        }
        let relative = relative_entry_name(dir, &path)?;
        let name = match (&root_name, include_root) {
            (Some(root), true) => format!("{}/{}", root, relative),
            _ => relative,
        };
        entries.push((path, options.entry_name(&name)));
    }
    write_zip_to(dest, &entries, options, listener)
}

fn safe_relative_path(name: &str) -> Result<PathBuf> {
    let path = PathBuf::from(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.as_os_str().is_empty() {
        return Err(KitError::invalid_argument(
            "entry",
            name,
            "Entry would be written outside the destination directory",
        ));
    }
    Ok(path)
}

/// Extracts `archive` below `dest_dir`, returning the written paths in
/// archive order.
pub fn unzip<L>(
    archive: &Path,
    dest_dir: &Path,
    options: &ZipOptions,
    listener: &mut L,
) -> Result<Vec<PathBuf>>
where
    L: ProgressListener + ?Sized,
{
    let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
    ensure_dir(dest_dir)?;

    let total = zip.len();
    let mut extracted = Vec::with_capacity(total);
    for index in 0..total {
        check_canceled(&*listener, "unzip")?;

        let mut entry = zip.by_index(index)?;
        let raw_name = entry.name().to_string();
        let enclosed = entry.enclosed_name().ok_or_else(|| {
            KitError::invalid_argument(
                "entry",
                &raw_name,
                "Entry would be written outside the destination directory",
            )
        })?;
        let relative = safe_relative_path(&options.entry_name(&enclosed.to_string_lossy()))?;
        let out_path = dest_dir.join(relative);

        let bytes = if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            0
        } else {
            ensure_parent_dir(&out_path)?;
            let mut output = BufWriter::new(File::create(&out_path)?);
            let copied = io::copy(&mut entry, &mut output)?;
            output.flush()?;
            copied
        };

        tracing::debug!("Extracted {} -> {}", raw_name, out_path.display());
        listener.on_entry(&EntryProgress {
            name: raw_name,
            index,
            total,
            bytes,
        });
        extracted.push(out_path);
    }

    tracing::info!("Extracted {} entries into {}", total, dest_dir.display());
    Ok(extracted)
}

/// Builds an in-memory zip from `(name, contents)` pairs.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let options = ZipOptions::default();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(*name, options.file_options())?;
        zip.write_all(contents)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// File entries of an in-memory zip; directory entries are skipped.
pub fn unzip_bytes(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut out = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        out.push((entry.name().to_string(), contents));
    }
    Ok(out)
}

pub fn list_entries(archive: &Path) -> Result<Vec<String>> {
    let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
    let mut names = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        names.push(zip.by_index(index)?.name().to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_bytes_round_trip() {
        let zipped = zip_bytes(&[("a.txt", b"alpha"), ("nested/b.txt", b"beta")]).unwrap();
        let entries = unzip_bytes(&zipped).unwrap();
        assert_eq!(
            entries,
            vec![
                ("a.txt".to_string(), b"alpha".to_vec()),
                ("nested/b.txt".to_string(), b"beta".to_vec()),
            ]
        );
    }

    #[test]
    fn test_level_is_validated() {
        assert!(ZipOptions::new().with_level(9).is_ok());
        assert!(matches!(
            ZipOptions::new().with_level(10),
            Err(KitError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_safe_relative_path() {
        assert!(safe_relative_path("dir/file.txt").is_ok());
        assert!(safe_relative_path("../escape.txt").is_err());
        assert!(safe_relative_path("/etc/passwd").is_err());
        assert!(safe_relative_path("").is_err());
    }

    #[test]
    fn test_name_transform_applies() {
        let options = ZipOptions::new().with_name_transform(|name| name.to_uppercase());
        assert_eq!(options.entry_name("a/b.txt"), "A/B.TXT");
        assert_eq!(ZipOptions::new().entry_name("a/b.txt"), "a/b.txt");
    }
}
