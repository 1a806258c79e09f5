//! Staged-tree commit: whole-directory atomic replacement.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::deploy::MANAGED_SUBDIRS;

/// Dot-prefixed sibling of the output root. Staying next to the output
/// keeps the final renames on a single filesystem.
pub(crate) fn staging_root(output: &Path) -> anyhow::Result<PathBuf> {
    let name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Output path has no file name: {}", output.display()))?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(parent.join(format!(".{}.tmp", name.to_string_lossy())))
}

/// Move each staged managed subdirectory into the live output root.
///
/// One rename per subdirectory: at any instant the live subdirectory is
/// either the complete old version or the complete new one. Subdirectories
/// the walk produced nothing for are left alone, and so is everything else
/// in the output root.
pub(crate) fn commit(staged_root: &Path, output: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output root: {}", output.display()))?;

    for subdir in MANAGED_SUBDIRS {
        let staged = staged_root.join(subdir);
        if !staged.exists() {
            continue;
        }

        let live = output.join(subdir);
        if live.exists() {
            fs::remove_dir_all(&live).with_context(|| {
                format!("Failed to remove old subdirectory: {}", live.display())
            })?;
        }
        fs::rename(&staged, &live).with_context(|| {
            format!(
                "Failed to move staged {} into {}",
                staged.display(),
                live.display()
            )
        })?;
        debug!(subdir, "committed managed subdirectory");
    }

    if staged_root.exists() {
        fs::remove_dir_all(staged_root).with_context(|| {
            format!("Failed to remove staging root: {}", staged_root.display())
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn staging_root_is_a_hidden_sibling_of_the_output() {
        let staged = staging_root(Path::new("/home/u/.config/opencode"))
            .expect("staging_root should succeed");
        assert_eq!(staged, Path::new("/home/u/.config/.opencode.tmp"));
    }

    #[test]
    fn staging_root_for_a_bare_name_stays_in_the_current_directory() {
        let staged = staging_root(Path::new("opencode")).expect("staging_root should succeed");
        assert_eq!(staged, Path::new("./.opencode.tmp"));
    }

    #[test]
    fn commit_swaps_only_the_subdirectories_that_were_staged() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let staged = tmp.path().join(".out.tmp");
        let output = tmp.path().join("out");

        fs::create_dir_all(staged.join("commands")).expect("create_dir_all should succeed");
        fs::write(staged.join("commands").join("a.md"), "new")
            .expect("write should succeed in test temp dirs");

        fs::create_dir_all(output.join("agents")).expect("create_dir_all should succeed");
        fs::write(output.join("agents").join("keep.md"), "old")
            .expect("write should succeed in test temp dirs");

        commit(&staged, &output).expect("commit should succeed");

        assert!(output.join("commands").join("a.md").exists());
        // agents was not staged this run, so the old version survives.
        assert!(output.join("agents").join("keep.md").exists());
        assert!(!staged.exists());
    }

    #[test]
    fn commit_replaces_an_existing_subdirectory_wholesale() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let staged = tmp.path().join(".out.tmp");
        let output = tmp.path().join("out");

        fs::create_dir_all(staged.join("commands")).expect("create_dir_all should succeed");
        fs::write(staged.join("commands").join("new.md"), "new")
            .expect("write should succeed in test temp dirs");

        fs::create_dir_all(output.join("commands")).expect("create_dir_all should succeed");
        fs::write(output.join("commands").join("stale.md"), "old")
            .expect("write should succeed in test temp dirs");

        commit(&staged, &output).expect("commit should succeed");

        assert!(output.join("commands").join("new.md").exists());
        assert!(!output.join("commands").join("stale.md").exists());
    }
}
