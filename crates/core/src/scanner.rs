//! Lists the immediate files of one directory for a sorting run.

use crate::models::FileDescriptor;
use anyhow::{bail, Context};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

pub fn list_files(
    root: &Path,
    excludes: &[String],
    include_hidden: bool,
) -> anyhow::Result<Vec<FileDescriptor>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    let exclude_set = build_globset(excludes)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = entry.with_context(|| format!("listing {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if !include_hidden && is_hidden(path) {
            continue;
        }
        if is_excluded(path, &exclude_set) {
            debug!(path = %path.display(), "excluded");
            continue;
        }
        files.push(FileDescriptor::new(path));
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("bad exclude pattern {pat:?}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Patterns match either the bare file name or the whole path.
fn is_excluded(path: &Path, excludes: &GlobSet) -> bool {
    excludes.is_match(path) || path.file_name().is_some_and(|n| excludes.is_match(n))
}
