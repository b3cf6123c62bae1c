//! Artifact location
//!
//! Picks the newest file matching a glob pattern inside a results directory.
//! The choice is behind [`ArtifactResolver`] so tests can swap in fixtures
//! instead of depending on real filesystem timestamps.

use crate::artifacts::creation_time;
use crate::error::{InspectError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Strategy for turning (directory, pattern) into a single artifact path
pub trait ArtifactResolver {
    /// `Ok(None)` when nothing matches
    fn resolve(&self, dir: &Path, pattern: &str) -> Result<Option<PathBuf>>;
}

/// Resolves to the matching file with the latest creation time
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestCreated;

impl ArtifactResolver for LatestCreated {
    fn resolve(&self, dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
        let mut candidates = Vec::new();
        for path in matching_files(dir, pattern)? {
            let metadata = fs::metadata(&path).map_err(|e| InspectError::io(&path, e))?;
            candidates.push((path, creation_time(&metadata)));
        }

        debug!("{} candidate(s) for {:?} in {}", candidates.len(), pattern, dir.display());
        Ok(select_latest(candidates))
    }
}

/// Newest candidate by timestamp, or `None` for an empty set.
///
/// Candidates sharing the newest timestamp are not ordered any further: the
/// first one in iteration order is returned. [`matching_files`] yields paths
/// in lexicographic order, so on a given directory the result is stable, but
/// callers should not rely on which of several same-instant files wins.
pub fn select_latest<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = (PathBuf, SystemTime)>,
{
    let mut latest: Option<(PathBuf, SystemTime)> = None;
    for (path, created) in candidates {
        match &latest {
            Some((_, best)) if created <= *best => {}
            _ => latest = Some((path, created)),
        }
    }
    latest.map(|(path, _)| path)
}

/// All regular files under `dir` matching `pattern`, in glob order
pub fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = dir.join(pattern);

    let paths = glob::glob(&full_pattern.to_string_lossy()).map_err(|e| {
        InspectError::InvalidPattern {
            pattern: pattern.to_string(),
            details: e.to_string(),
        }
    })?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            _ => None,
        })
        .collect())
}
