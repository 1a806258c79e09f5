//! Source-tree walk and staging.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use filetime::FileTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::classify::{FileAction, classify};
use crate::deploy::{PlanEntry, RunCounts, SyncOptions, SyncReport};
use crate::transform::Category;
use crate::transform::pipeline::transform_file;

/// Walk every file under the source root, classify it, and (when a staging
/// root is given) materialize its output there. With `staged_root` of
/// `None` the walk is a pure planning pass that touches nothing.
pub(crate) fn walk(
    opts: &SyncOptions,
    staged_root: Option<&Path>,
) -> anyhow::Result<SyncReport> {
    let resolved_root = opts.source.canonicalize().with_context(|| {
        format!("Failed to resolve source root: {}", opts.source.display())
    })?;

    let mut counts = RunCounts::default();
    let mut plan = Vec::new();

    for entry in WalkDir::new(&opts.source)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("Failed to walk source tree: {}", opts.source.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        if !is_safe_entry(&entry, &resolved_root) {
            warn!(path = %entry.path().display(), "Skipping unsafe path");
            counts.skipped += 1;
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(&opts.source)
            .with_context(|| format!("Walked entry outside source root: {}", entry.path().display()))?
            .to_path_buf();

        let action = classify(&rel);
        match action {
            FileAction::Skip => {
                counts.skipped += 1;
                continue;
            }
            FileAction::CopyVerbatim => counts.copied += 1,
            FileAction::Transform(category) => counts.bump(category),
        }

        let dest_rel = dest_rel_for(&rel, action);
        debug!(source = %rel.display(), dest = %dest_rel.display(), %action, "planned");
        plan.push(PlanEntry {
            source_rel: rel,
            dest_rel: dest_rel.clone(),
            action,
        });

        if let Some(staged_root) = staged_root {
            let dest = staged_root.join(&dest_rel);
            match action {
                FileAction::CopyVerbatim => copy_verbatim(entry.path(), &dest)?,
                FileAction::Transform(category) => transform_file(entry.path(), &dest, category)?,
                FileAction::Skip => {}
            }
        }
    }

    Ok(SyncReport { counts, plan })
}

/// Symlinks are never followed or copied, and an entry whose resolved path
/// escapes the resolved source root is treated the same way.
fn is_safe_entry(entry: &walkdir::DirEntry, resolved_root: &Path) -> bool {
    if entry.path_is_symlink() {
        return false;
    }
    match entry.path().canonicalize() {
        Ok(resolved) => resolved.starts_with(resolved_root),
        Err(_) => false,
    }
}

/// Commands nested under a namespace folder land directly in `commands/`;
/// everything else keeps its relative path.
fn dest_rel_for(rel: &Path, action: FileAction) -> PathBuf {
    if let FileAction::Transform(Category::Commands) = action
        && rel.components().count() > 2
        && let Some(name) = rel.file_name()
    {
        return Path::new("commands").join(name);
    }
    rel.to_path_buf()
}

/// Byte-for-byte copy that also carries the source's permissions and mtime.
fn copy_verbatim(src: &Path, dest: &Path) -> anyhow::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create destination parent: {}", parent.display())
        })?;
    }

    fs::copy(src, dest).with_context(|| {
        format!(
            "Failed to copy file from {} to {}",
            src.display(),
            dest.display()
        )
    })?;

    let meta = fs::metadata(src)
        .with_context(|| format!("Failed to stat source file: {}", src.display()))?;
    filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&meta))
        .with_context(|| format!("Failed to set mtime on {}", dest.display()))?;

    Ok(())
}
