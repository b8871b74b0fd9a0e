use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CorpusError;

/// Where a corpus file comes from. Merge order is Base, then Bundled, then
/// User; within a kind the listed order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// The large reference word list. Contributes frequency and a lowercase
    /// display baseline.
    Base,
    /// Read-only supplementary dictionary shipped with the application.
    /// Contributes casing only.
    Bundled,
    /// User-editable copy of a supplementary dictionary. Contributes
    /// frequency and casing, and its casing wins conflicts.
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSource {
    pub kind: SourceKind,
    pub path: PathBuf,
}

impl CorpusSource {
    pub fn new(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn base(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceKind::Base, path)
    }

    pub fn bundled(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceKind::Bundled, path)
    }

    pub fn user(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceKind::User, path)
    }

    /// Read the raw file. A missing file is `Ok(None)`.
    pub fn read(&self) -> Result<Option<Vec<u8>>, CorpusError> {
        read_optional(&self.path)
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, CorpusError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CorpusError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Split raw bytes into lines, dropping any line that is not valid UTF-8.
/// Returns the lines plus the number dropped.
pub(super) fn utf8_lines(bytes: &[u8]) -> (Vec<&str>, usize) {
    let mut lines = Vec::new();
    let mut dropped = 0;
    for raw in bytes.split(|&b| b == b'\n') {
        match std::str::from_utf8(raw) {
            Ok(line) => lines.push(line),
            Err(_) => dropped += 1,
        }
    }
    (lines, dropped)
}
