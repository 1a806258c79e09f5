//! Tree synchronization: walk the source, stage the output, swap it live.

pub mod swap;
pub mod walker;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::classify::FileAction;
use crate::transform::Category;

/// Subdirectories of the output root that ferry owns and replaces as whole
/// units. Anything else under the output root is never touched.
pub const MANAGED_SUBDIRS: &[&str] = &["agents", "commands", "skills"];

/// Inputs for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Root of the marketplace plugin tree.
    pub source: PathBuf,
    /// Root of the opencode configuration tree.
    pub output: PathBuf,
    /// Classify and plan only; mutate nothing.
    pub dry_run: bool,
}

/// Per-category and per-action counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub commands: usize,
    pub agents: usize,
    pub skills: usize,
    pub copied: usize,
    pub skipped: usize,
}

impl RunCounts {
    pub(crate) fn bump(&mut self, category: Category) {
        match category {
            Category::Commands => self.commands += 1,
            Category::Agents => self.agents += 1,
            Category::Skills => self.skills += 1,
        }
    }
}

impl fmt::Display for RunCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done: {} commands, {} agents, {} skills, {} copied, {} skipped",
            self.commands, self.agents, self.skills, self.copied, self.skipped
        )
    }
}

/// One planned file operation, as printed by `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Path relative to the source root.
    pub source_rel: PathBuf,
    /// Path relative to the output root, after any flattening.
    pub dest_rel: PathBuf,
    pub action: FileAction,
}

/// Outcome of a run: counters plus the per-file plan of every non-skipped
/// entry, in walk order.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub counts: RunCounts,
    pub plan: Vec<PlanEntry>,
}

/// Run one full synchronization.
///
/// Walks the source tree, stages all output in a temporary sibling of the
/// output root, then swaps each managed subdirectory into place with a
/// single rename. In dry-run mode only the report is produced.
pub fn sync_tree(opts: &SyncOptions) -> anyhow::Result<SyncReport> {
    if !opts.source.is_dir() {
        anyhow::bail!(
            "Source '{}' not found or not a directory",
            opts.source.display()
        );
    }

    if opts.dry_run {
        return walker::walk(opts, None);
    }

    let staged_root = swap::staging_root(&opts.output)?;
    if staged_root.exists() {
        fs::remove_dir_all(&staged_root).with_context(|| {
            format!(
                "Failed to clear stale staging root: {}",
                staged_root.display()
            )
        })?;
    }

    let report = walker::walk(opts, Some(&staged_root))?;
    swap::commit(&staged_root, &opts.output)?;

    Ok(report)
}
