use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    #[default]
    Rename,
    Skip,
    Overwrite,
}

impl FromStr for ConflictPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rename" => Ok(ConflictPolicy::Rename),
            "skip" => Ok(ConflictPolicy::Skip),
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            other => bail!("unknown conflict policy {other:?} (expected rename|skip|overwrite)"),
        }
    }
}

/// Where `from` would land inside `dest_dir`, or `None` when the policy skips it.
pub fn plan_destination(from: &Path, dest_dir: &Path, policy: ConflictPolicy) -> Option<PathBuf> {
    let file_name = from.file_name()?;
    let to = dest_dir.join(file_name);
    if !to.exists() {
        return Some(to);
    }
    match policy {
        ConflictPolicy::Skip => None,
        ConflictPolicy::Overwrite => Some(to),
        ConflictPolicy::Rename => Some(resolve_conflict(&to)),
    }
}

/// Moves `from` into `dest_dir`, creating the directory when missing.
/// Returns the final path, or `None` when skipped because of a name clash.
pub fn move_into(
    from: &Path,
    dest_dir: &Path,
    policy: ConflictPolicy,
    copy_then_delete: bool,
) -> Result<Option<PathBuf>> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("creating {}", dest_dir.display()))?;
    let Some(to) = plan_destination(from, dest_dir, policy) else {
        return Ok(None);
    };
    apply_move(from, &to, copy_then_delete)
        .with_context(|| format!("moving {} to {}", from.display(), to.display()))?;
    Ok(Some(to))
}

fn resolve_conflict(dest: &Path) -> PathBuf {
    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    let ext = dest
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut counter = 1;
    loop {
        let name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn apply_move(from: &Path, to: &Path, copy_then_delete: bool) -> Result<()> {
    if copy_then_delete {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    } else {
        fs::rename(from, to)?;
    }
    Ok(())
}
