use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One recorded lap of a [`Stopwatch`](crate::core::duration::Stopwatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lap {
    pub name: String,
    /// Time since the previous lap (or the start for the first lap).
    pub split: Duration,
    /// Time since the stopwatch started.
    pub total: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParts {
    pub parent: Option<String>,
    pub file_name: Option<String>,
    pub stem: Option<String>,
    pub extension: Option<String>,
}

impl PathParts {
    pub fn parse<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let lossy = |s: &std::ffi::OsStr| s.to_string_lossy().into_owned();

        Self {
            parent: path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_string_lossy().into_owned()),
            file_name: path.file_name().map(lossy),
            stem: path.file_stem().map(lossy),
            extension: path.extension().map(lossy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyProgress {
    pub copied: u64,
    pub total: Option<u64>,
}

impl CopyProgress {
    /// Completed fraction in `0.0..=1.0`, when the total is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some((self.copied as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryProgress {
    pub name: String,
    /// Zero-based position of the entry.
    pub index: usize,
    pub total: usize,
    pub bytes: u64,
}
