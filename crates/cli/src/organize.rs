//! Sorts one directory: list, classify each file in turn, move it under its label.

use crate::fs_apply::{move_into, plan_destination, ConflictPolicy};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sorter_core::classifier::Classifier;
use sorter_core::config::OrganizeConfig;
use sorter_core::models::{CategoryLabel, LabelKind};
use sorter_core::scanner;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct OrganizeOptions {
    pub dry_run: bool,
    pub conflict: ConflictPolicy,
    pub copy_then_delete: bool,
    pub include_hidden: bool,
    pub exclude: Vec<String>,
}

impl OrganizeOptions {
    pub fn from_config(cfg: &OrganizeConfig) -> Result<Self> {
        Ok(Self {
            dry_run: cfg.dry_run,
            conflict: cfg.conflict.parse()?,
            copy_then_delete: cfg.copy_then_delete,
            include_hidden: cfg.include_hidden,
            exclude: cfg.exclude.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Moved,
    /// Dry run: the move that would have happened.
    Planned,
    /// Name clash under the `skip` policy.
    Skipped,
    /// Not processed; the file stays where it is.
    Left,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub label: CategoryLabel,
    pub destination: Option<PathBuf>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub moved: usize,
    pub planned: usize,
    pub skipped: usize,
    pub left: usize,
    pub failed: usize,
    pub sentinel_labels: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizeReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<FileOutcome>,
    pub summary: Summary,
}

fn summarize(files: &[FileOutcome]) -> Summary {
    let mut s = Summary {
        total: files.len(),
        ..Summary::default()
    };
    for f in files {
        match f.status {
            OutcomeStatus::Moved => s.moved += 1,
            OutcomeStatus::Planned => s.planned += 1,
            OutcomeStatus::Skipped => s.skipped += 1,
            OutcomeStatus::Left => s.left += 1,
            OutcomeStatus::Failed => s.failed += 1,
        }
        if f.label.is_sentinel() {
            s.sentinel_labels += 1;
        }
    }
    s
}

/// Files are handled strictly one after another. A failure on one file is
/// recorded in its outcome and the loop moves on.
pub async fn organize_directory(
    root: &Path,
    classifier: &Classifier,
    opts: &OrganizeOptions,
    progress: &mut dyn FnMut(usize, usize, &FileOutcome),
) -> Result<OrganizeReport> {
    let started_at = Utc::now();
    let files = scanner::list_files(root, &opts.exclude, opts.include_hidden)?;
    let total = files.len();
    info!(root = %root.display(), files = total, dry_run = opts.dry_run, "organizing");

    let mut outcomes = Vec::with_capacity(total);
    for (idx, file) in files.iter().enumerate() {
        let label = classifier.classify(file).await;
        debug!(path = %file.path.display(), label = %label.name, kind = ?label.kind, "classified");

        let outcome = place(&file.path, root, label, opts);
        progress(idx + 1, total, &outcome);
        outcomes.push(outcome);
    }

    let summary = summarize(&outcomes);
    info!(
        moved = summary.moved,
        planned = summary.planned,
        skipped = summary.skipped,
        left = summary.left,
        failed = summary.failed,
        "done"
    );
    Ok(OrganizeReport {
        root: root.to_path_buf(),
        dry_run: opts.dry_run,
        started_at,
        finished_at: Utc::now(),
        files: outcomes,
        summary,
    })
}

fn place(path: &Path, root: &Path, label: CategoryLabel, opts: &OrganizeOptions) -> FileOutcome {
    let mut outcome = FileOutcome {
        path: path.to_path_buf(),
        destination: None,
        status: OutcomeStatus::Left,
        error: None,
        label,
    };
    if outcome.label.kind == LabelKind::NotProcessed {
        return outcome;
    }

    let dest_dir = root.join(&outcome.label.name);
    if opts.dry_run {
        outcome.destination = plan_destination(path, &dest_dir, opts.conflict);
        outcome.status = match outcome.destination {
            Some(_) => OutcomeStatus::Planned,
            None => OutcomeStatus::Skipped,
        };
        return outcome;
    }

    match move_into(path, &dest_dir, opts.conflict, opts.copy_then_delete) {
        Ok(Some(to)) => {
            outcome.destination = Some(to);
            outcome.status = OutcomeStatus::Moved;
        }
        Ok(None) => outcome.status = OutcomeStatus::Skipped,
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(path = %path.display(), error = %reason, "move failed");
            outcome.status = OutcomeStatus::Failed;
            outcome.error = Some(reason);
        }
    }
    outcome
}
