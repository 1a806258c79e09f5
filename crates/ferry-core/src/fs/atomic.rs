//! Whole-file atomic replacement.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Write `content` to `path` so that no reader ever observes a partial file.
///
/// The temp file lives in the destination's own directory: a rename within
/// one directory never crosses a filesystem boundary, which is what makes
/// the final step atomic.
pub fn write_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Destination path has no parent: {}", path.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create destination parent: {}", parent.display()))?;

    let tmp = unique_temp_path(path, parent)?;

    if let Err(err) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(anyhow::Error::new(err)
            .context(format!("Failed to write temp file for {}", path.display())));
    }

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(anyhow::Error::new(err).context(format!(
            "Failed to move temp file into destination {}",
            path.display()
        )));
    }

    Ok(())
}

fn unique_temp_path(dst: &Path, parent: &Path) -> anyhow::Result<PathBuf> {
    let base = dst
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Destination path has no filename: {}", dst.display()))?;
    let pid = std::process::id();

    for attempt in 0u32..1000 {
        let candidate = parent.join(format!(".{}.{pid}.{attempt}.tmp", base.to_string_lossy()));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("Failed to allocate a unique temp path for {}", dst.display());
}
