// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Golden reference storage.
//!
//! References for a case named `N` in directory `D` live at `D/N.out`
//! (stdout) and `D/N.err` (stderr). Under update the observed bytes are
//! written and synced before being read back, so updating and verifying
//! share one code path.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Captured stream a golden reference belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Out,
    Err,
}

impl StreamKind {
    /// File extension of the reference for this stream
    pub fn extension(self) -> &'static str {
        match self {
            StreamKind::Out => "out",
            StreamKind::Err => "err",
        }
    }

    /// Conventional stream name
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Out => "stdout",
            StreamKind::Err => "stderr",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while resolving a golden reference
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("invalid golden name '{name}': {reason}")]
    InvalidKey { name: String, reason: &'static str },

    #[error("golden file {} not found; run with GOLDFISH_UPDATE=1 to record it", .path.display())]
    Missing { path: PathBuf },

    #[error("failed to read golden file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write golden file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Location of one golden reference: `(directory, name, stream)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GoldenKey {
    dir: PathBuf,
    name: String,
    stream: StreamKind,
}

impl GoldenKey {
    /// Build a key, rejecting names that would escape the golden directory.
    pub fn new(
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
        stream: StreamKind,
    ) -> Result<Self, GoldenError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            dir: dir.into(),
            name,
            stream,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream(&self) -> StreamKind {
        self.stream
    }

    /// Path of the reference file, `<dir>/<name>.<out|err>`
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.name, self.stream.extension()))
    }
}

fn validate_name(name: &str) -> Result<(), GoldenError> {
    let invalid = |reason| GoldenError::InvalidKey {
        name: name.to_string(),
        reason,
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.ends_with(std::path::is_separator) {
        return Err(invalid("name cannot end with a path separator"));
    }
    let escapes = Path::new(name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(invalid("name must be a relative path inside the golden directory"));
    }
    Ok(())
}

/// Filesystem capability used by [`GoldenStore`]
pub trait GoldenFs {
    /// Read a whole file. A missing file must surface as `ErrorKind::NotFound`.
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace a file's contents. Must be durable when it returns.
    fn write_all(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Golden files on the local disk
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFs;

impl GoldenFs for DiskFs {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_all(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.flush()?;
        // Closed on drop, before the caller reopens it for reading.
        file.sync_all()
    }
}

/// In-memory golden files, shared between clones
#[derive(Clone, Debug, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn with_file(self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.lock().insert(path.into(), bytes.into());
        self
    }

    /// Current contents of a file, if present
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl GoldenFs for MemoryFs {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.get(path).ok_or_else(|| io::ErrorKind::NotFound.into())
    }

    fn write_all(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.lock().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

/// Resolves golden keys to reference bytes, rewriting them under update
#[derive(Clone, Debug, Default)]
pub struct GoldenStore<F = DiskFs> {
    fs: F,
}

impl GoldenStore<DiskFs> {
    /// Store backed by the local disk
    pub fn on_disk() -> Self {
        Self { fs: DiskFs }
    }
}

impl<F: GoldenFs> GoldenStore<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Return the reference bytes for `key`.
    ///
    /// When `update` is set, `actual` first replaces the reference. A missing
    /// reference without `update` is an error, never an empty reference.
    pub fn resolve(
        &self,
        key: &GoldenKey,
        actual: &[u8],
        update: bool,
    ) -> Result<Vec<u8>, GoldenError> {
        let path = key.path();

        if update {
            self.fs
                .write_all(&path, actual)
                .map_err(|source| GoldenError::Write {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(path = %path.display(), bytes = actual.len(), "updated golden file");
        }

        match self.fs.read_all(&path) {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "read golden file");
                Ok(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(GoldenError::Missing { path }),
            Err(source) => Err(GoldenError::Read { path, source }),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
