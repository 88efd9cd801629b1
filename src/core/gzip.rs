use crate::core::file::ensure_parent_dir;
use crate::utils::error::{KitError, Result};
use crate::utils::validation::{validate_path, validate_range};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_LEVEL: u32 = 6;

fn compression(level: u32) -> Result<Compression> {
    validate_range("level", level, 0, 9)?;
    Ok(Compression::new(level))
}

pub fn gzip_bytes(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), compression(level)?);
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decodes every gzip member in `data`.
pub fn gunzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// Compresses `src` into `dest`, returning the compressed size.
pub fn gzip_file(src: &Path, dest: &Path, level: u32) -> Result<u64> {
    let level = compression(level)?;
    validate_path("dest", dest)?;
    ensure_parent_dir(dest)?;

    let mut input = BufReader::new(File::open(src)?);
    let mut encoder = GzEncoder::new(BufWriter::new(File::create(dest)?), level);
    let read = io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.flush()?;

    let written = fs::metadata(dest)?.len();
    tracing::debug!(
        "gzip {} ({} bytes) -> {} ({} bytes)",
        src.display(),
        read,
        dest.display(),
        written
    );
    Ok(written)
}

/// Decompresses `src` into `dest`, returning the decompressed size.
pub fn gunzip_file(src: &Path, dest: &Path) -> Result<u64> {
    validate_path("dest", dest)?;
    ensure_parent_dir(dest)?;

    let mut decoder = MultiGzDecoder::new(BufReader::new(File::open(src)?));
    let mut output = BufWriter::new(File::create(dest)?);
    let written = io::copy(&mut decoder, &mut output)?;
    output.flush()?;

    tracing::debug!("gunzip {} -> {} ({} bytes)", src.display(), dest.display(), written);
    Ok(written)
}

/// `notes.txt` -> `notes.txt.gz`.
pub fn gz_path_for(src: &Path) -> PathBuf {
    let mut name = src.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

/// `notes.txt.gz` -> `notes.txt`; other names are rejected.
pub fn ungz_path_for(src: &Path) -> Result<PathBuf> {
    match src.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("gz") => Ok(src.with_extension("")),
        _ => Err(KitError::invalid_argument(
            "src",
            src.display(),
            "Expected a .gz file; pass an explicit output path",
        )),
    }
}
