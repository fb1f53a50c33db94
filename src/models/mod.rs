//! Core data models for docemit
//!
//! A manifest is an ordered list of (relative path, content) pairs. Emitting
//! it produces a report with one result per entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::emitter::EmitError;

/// One file to materialize: a slash-separated path under the base directory
/// and its full text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub relative_path: String,
    pub content: String,
}

impl ManifestEntry {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }

    /// Resolve the logical path against `base_dir` using native separators.
    ///
    /// Rejects anything that could land outside `base_dir`: absolute paths,
    /// `..` segments and segments carrying a drive or root prefix.
    pub fn resolve(&self, base_dir: &Path) -> Result<PathBuf, EmitError> {
        let raw = self.relative_path.as_str();
        let invalid = |reason: &str| EmitError::InvalidPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.starts_with('/') || raw.starts_with('\\') {
            return Err(invalid("path must be relative"));
        }

        let mut resolved = base_dir.to_path_buf();
        let mut segments = 0usize;

        for segment in raw.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == ".." {
                return Err(invalid("parent directory segments are not allowed"));
            }

            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(_)), None) => {}
                _ => return Err(invalid("segment is not a plain file name")),
            }

            resolved.push(segment);
            segments += 1;
        }

        if segments == 0 {
            return Err(invalid("path is empty"));
        }

        Ok(resolved)
    }
}

/// Ordered collection of entries.
///
/// Duplicate paths are kept: every entry is written in order, so the last
/// one wins on disk and each still gets its own result in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, relative_path: impl Into<String>, content: impl Into<String>) {
        self.entries.push(ManifestEntry::new(relative_path, content));
    }

    pub fn with_entry(mut self, relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        self.push(relative_path, content);
        self
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only entries whose path starts with one of `prefixes`.
    /// An empty prefix list keeps everything.
    pub fn retain_prefixes(&mut self, prefixes: &[String]) {
        if prefixes.is_empty() {
            return;
        }
        self.entries
            .retain(|entry| prefixes.iter().any(|p| entry.relative_path.starts_with(p.as_str())));
    }
}

impl FromIterator<ManifestEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// What happened to a single entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub relative_path: String,
    pub outcome: Outcome,
}

impl WriteResult {
    pub fn success(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            outcome: Outcome::Success,
        }
    }

    pub fn failure(relative_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            outcome: Outcome::Failure {
                reason: reason.into(),
            },
        }
    }
}

/// Aggregate outcome of one emit run
///
/// Only serialized; the counters are maintained by [`Report::record`].
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub base_dir: PathBuf,
    pub generated_at: DateTime<Utc>,
    results: Vec<WriteResult>,
    written: usize,
    errors: usize,
    skipped: usize,
}

impl Report {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            generated_at: Utc::now(),
            results: Vec::new(),
            written: 0,
            errors: 0,
            skipped: 0,
        }
    }

    pub fn record(&mut self, result: WriteResult) {
        if result.outcome.is_success() {
            self.written += 1;
        } else {
            self.errors += 1;
        }
        self.results.push(result);
    }

    /// Count entries that were never attempted (strict mode only)
    pub fn mark_skipped(&mut self, count: usize) {
        self.skipped += count;
    }

    pub fn results(&self) -> &[WriteResult] {
        &self.results
    }

    pub fn successes(&self) -> usize {
        self.written
    }

    pub fn failures(&self) -> usize {
        self.errors
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed_entries(&self) -> impl Iterator<Item = &WriteResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.skipped == 0
    }

    /// Process exit status for this run: 1 if anything failed or was skipped
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_translates_separators() {
        let entry = ManifestEntry::new("member/general/PROFILE.md", "");
        let path = entry.resolve(Path::new("base")).unwrap();
        let expected: PathBuf = ["base", "member", "general", "PROFILE.md"].iter().collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn test_resolve_skips_empty_and_dot_segments() {
        let entry = ManifestEntry::new("a//./b.md", "");
        let path = entry.resolve(Path::new("base")).unwrap();
        let expected: PathBuf = ["base", "a", "b.md"].iter().collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        for bad in ["/etc/passwd", "../x.md", "a/../../x.md", "", "./", "\\share\\x.md"] {
            let entry = ManifestEntry::new(bad, "");
            let err = entry.resolve(Path::new("base")).unwrap_err();
            assert!(
                matches!(err, EmitError::InvalidPath { .. }),
                "expected invalid path for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_manifest_keeps_order_and_duplicates() {
        let manifest = Manifest::new()
            .with_entry("a.md", "one")
            .with_entry("b.md", "two")
            .with_entry("a.md", "three");

        let paths: Vec<_> = manifest.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["a.md", "b.md", "a.md"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_retain_prefixes() {
        let mut manifest = Manifest::new()
            .with_entry("member/general/PROFILE.md", "")
            .with_entry("admin/README.md", "");

        manifest.retain_prefixes(&[]);
        assert_eq!(manifest.len(), 2);

        manifest.retain_prefixes(&["member/".to_string()]);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.entries()[0].relative_path, "member/general/PROFILE.md");
    }

    #[test]
    fn test_report_counts() {
        let mut report = Report::new("base");
        report.record(WriteResult::success("a.md"));
        report.record(WriteResult::failure("b.md", "disk full"));
        report.record(WriteResult::success("c.md"));

        assert_eq!(report.successes(), 2);
        assert_eq!(report.failures(), 1);
        assert_eq!(report.results().len(), 3);
        assert!(!report.is_clean());

        let failed: Vec<_> = report.failed_entries().map(|r| r.relative_path.as_str()).collect();
        assert_eq!(failed, vec!["b.md"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["written"], 2);
        assert_eq!(json["errors"], 1);
        assert_eq!(json["results"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_exit_code() {
        let mut report = Report::new("base");
        report.record(WriteResult::success("a.md"));
        assert!(report.is_clean());
        assert_eq!(report.exit_code(), 0);

        report.record(WriteResult::failure("b.md", "disk full"));
        assert_eq!(report.exit_code(), 1);

        let mut strict = Report::new("base");
        strict.record(WriteResult::success("a.md"));
        strict.mark_skipped(2);
        assert_eq!(strict.exit_code(), 1);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(WriteResult::failure("x.md", "nope")).unwrap();
        assert_eq!(json["outcome"]["status"], "failure");
        assert_eq!(json["outcome"]["reason"], "nope");
    }
}
