//! Staging-directory discovery: candidate files named `{slug}-{n}.{ext}`
//! grouped by slug, ordered by ascending numeric suffix.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("staging directory not found: {0}")]
    MissingStagingDir(PathBuf),
    #[error("failed to read staging directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no staging groups found in {0} (expected files named {{slug}}-1.jpg, {{slug}}-2.jpg, ...)")]
    NoGroups(PathBuf),
}

/// Scan `staging_dir` (non-recursively) for candidate images.
///
/// Files without a `-{n}` numeric suffix or with an unsupported extension
/// are ignored; subdirectories (including `cropped/`) are never entered.
/// The `BTreeMap` gives a deterministic slug order; each group's paths
/// are sorted by numeric suffix ascending.
pub fn discover_groups(staging_dir: &Path) -> Result<BTreeMap<String, Vec<PathBuf>>, GroupError> {
    if !staging_dir.is_dir() {
        return Err(GroupError::MissingStagingDir(staging_dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(staging_dir).map_err(|e| GroupError::ReadDir {
        path: staging_dir.to_path_buf(),
        source: e,
    })?;

    let mut numbered: BTreeMap<String, Vec<(u64, PathBuf)>> = BTreeMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() || !has_image_extension(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some((slug, index)) = parse_candidate_stem(stem) else {
            continue;
        };
        numbered
            .entry(slug.to_string())
            .or_default()
            .push((index, path));
    }

    if numbered.is_empty() {
        return Err(GroupError::NoGroups(staging_dir.to_path_buf()));
    }

    let mut groups = BTreeMap::new();
    for (slug, mut files) in numbered {
        files.sort_by_key(|(index, _)| *index);
        groups.insert(slug, files.into_iter().map(|(_, path)| path).collect());
    }
    Ok(groups)
}

/// Split `{slug}-{n}` into slug and numeric suffix. Returns `None` when
/// the stem has no dash, no digits after the last dash, or an empty slug.
fn parse_candidate_stem(stem: &str) -> Option<(&str, u64)> {
    let (slug, suffix) = stem.rsplit_once('-')?;
    if slug.is_empty() || suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = suffix.parse().ok()?;
    Some((slug, index))
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
