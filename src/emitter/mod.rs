//! Manifest emitter
//!
//! Writes every manifest entry under a base directory:
//! - parent directories are created on demand (an existing directory is fine)
//! - existing files are truncated and overwritten
//! - entries are independent; a failed entry never rolls back another
//!
//! Under [`ErrorPolicy::Continue`] a failure is recorded and the run moves on.
//! [`ErrorPolicy::Strict`] stops at the first failure and counts the rest as
//! skipped.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::models::{Manifest, ManifestEntry, Report, WriteResult};

/// Emitter error
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Invalid relative path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Base directory {} cannot be created: {source}", .path.display())]
    BaseDirectory { path: PathBuf, source: io::Error },
}

/// What to do after an entry fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the failure and keep going
    #[default]
    Continue,
    /// Stop at the first failure
    Strict,
}

pub struct Emitter {
    base_dir: PathBuf,
    policy: ErrorPolicy,
}

impl Emitter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create the base directory itself.
    /// Failing here aborts the run before any entry is attempted.
    pub fn prepare(&self) -> Result<(), EmitError> {
        fs::create_dir_all(&self.base_dir).map_err(|source| EmitError::BaseDirectory {
            path: self.base_dir.clone(),
            source,
        })
    }

    pub fn emit(&self, manifest: &Manifest) -> Result<Report, EmitError> {
        self.emit_with(manifest, |_| {})
    }

    /// Emit the manifest, calling `on_result` after each entry is processed.
    pub fn emit_with<F>(&self, manifest: &Manifest, mut on_result: F) -> Result<Report, EmitError>
    where
        F: FnMut(&WriteResult),
    {
        self.prepare()?;

        let mut report = Report::new(&self.base_dir);

        for (idx, entry) in manifest.iter().enumerate() {
            let result = match self.write_entry(entry) {
                Ok(path) => {
                    debug!(path = %path.display(), bytes = entry.content.len(), "wrote entry");
                    WriteResult::success(&entry.relative_path)
                }
                Err(e) => {
                    warn!(entry = %entry.relative_path, error = %e, "entry failed");
                    WriteResult::failure(&entry.relative_path, e.to_string())
                }
            };

            let failed = !result.outcome.is_success();
            on_result(&result);
            report.record(result);

            if failed && self.policy == ErrorPolicy::Strict {
                let remaining = manifest.len() - idx - 1;
                if remaining > 0 {
                    warn!(remaining, "strict mode: skipping remaining entries");
                }
                report.mark_skipped(remaining);
                break;
            }
        }

        info!(
            base_dir = %self.base_dir.display(),
            written = report.successes(),
            errors = report.failures(),
            skipped = report.skipped(),
            "emit finished"
        );

        Ok(report)
    }

    /// Write one entry, returning the resolved path.
    /// The file handle is dropped on every path out of this function.
    fn write_entry(&self, entry: &ManifestEntry) -> Result<PathBuf, EmitError> {
        let path = entry.resolve(&self.base_dir)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| EmitError::DirectoryCreation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let write_err = |source| EmitError::Write {
            path: path.clone(),
            source,
        };
        let mut file = File::create(&path).map_err(write_err)?;
        file.write_all(entry.content.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        Ok(path)
    }
}

/// Emit `manifest` under `base_dir` with the default best-effort policy
pub fn emit(base_dir: &Path, manifest: &Manifest) -> Result<Report, EmitError> {
    Emitter::new(base_dir).emit(manifest)
}
