//! Source-path classification.
//!
//! Decides what happens to each file found under the source root. The
//! decision is a pure function of the relative path's first segment, file
//! name, and extension; file content is never inspected.

use std::path::Path;

use crate::transform::Category;

/// First path segments that are never processed: plugin metadata and the
/// marketplace's own top-level readme.
const SKIP_ROOTS: &[&str] = &[".claude-plugin", "README.md"];

/// File names skipped anywhere in the tree.
const SKIP_NAMES: &[&str] = &[".DS_Store"];

/// The skill manifest file name.
const SKILL_MANIFEST: &str = "SKILL.md";

/// What to do with a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Ignore the file entirely.
    Skip,
    /// Copy bytes and metadata unchanged.
    CopyVerbatim,
    /// Run the file through the transform pipeline for a category.
    Transform(Category),
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::CopyVerbatim => write!(f, "copy"),
            Self::Transform(category) => write!(f, "transform ({category})"),
        }
    }
}

/// Classify a path relative to the source root.
pub fn classify(rel: &Path) -> FileAction {
    let Some(first) = rel
        .components()
        .next()
        .and_then(|c| c.as_os_str().to_str())
    else {
        return FileAction::Skip;
    };
    let Some(name) = rel.file_name().and_then(|n| n.to_str()) else {
        return FileAction::Skip;
    };

    if SKIP_ROOTS.contains(&first) {
        return FileAction::Skip;
    }
    if SKIP_NAMES.contains(&name) || name.starts_with('.') {
        return FileAction::Skip;
    }

    let is_markdown = rel.extension().is_some_and(|ext| ext == "md");

    match first {
        "commands" if is_markdown => FileAction::Transform(Category::Commands),
        "commands" => FileAction::Skip,
        "agents" if is_markdown => FileAction::Transform(Category::Agents),
        "agents" => FileAction::Skip,
        "skills" if name == SKILL_MANIFEST => FileAction::Transform(Category::Skills),
        "skills" => FileAction::CopyVerbatim,
        _ => FileAction::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_str(path: &str) -> FileAction {
        classify(Path::new(path))
    }

    #[test]
    fn plugin_metadata_and_top_level_readme_are_skipped() {
        assert_eq!(classify_str(".claude-plugin/plugin.json"), FileAction::Skip);
        assert_eq!(classify_str("README.md"), FileAction::Skip);
    }

    #[test]
    fn hidden_and_junk_files_are_skipped_anywhere() {
        assert_eq!(classify_str("commands/.DS_Store"), FileAction::Skip);
        assert_eq!(classify_str("skills/foo/.hidden"), FileAction::Skip);
    }

    #[test]
    fn markdown_under_commands_transforms_as_commands() {
        assert_eq!(
            classify_str("commands/deploy.md"),
            FileAction::Transform(Category::Commands)
        );
        assert_eq!(
            classify_str("commands/fly/deploy.md"),
            FileAction::Transform(Category::Commands)
        );
        assert_eq!(classify_str("commands/notes.txt"), FileAction::Skip);
    }

    #[test]
    fn markdown_under_agents_transforms_as_agents() {
        assert_eq!(
            classify_str("agents/reviewer.md"),
            FileAction::Transform(Category::Agents)
        );
        assert_eq!(classify_str("agents/reviewer.yaml"), FileAction::Skip);
    }

    #[test]
    fn skill_manifests_transform_and_other_skill_files_copy() {
        assert_eq!(
            classify_str("skills/my-skill/SKILL.md"),
            FileAction::Transform(Category::Skills)
        );
        assert_eq!(
            classify_str("skills/my-skill/scripts/run.sh"),
            FileAction::CopyVerbatim
        );
        assert_eq!(
            classify_str("skills/my-skill/reference.md"),
            FileAction::CopyVerbatim
        );
    }

    #[test]
    fn unknown_top_level_segments_are_skipped() {
        assert_eq!(classify_str("hooks/on-save.ts"), FileAction::Skip);
        assert_eq!(classify_str("LICENSE"), FileAction::Skip);
    }

    #[test]
    fn nested_readme_under_a_category_is_not_skipped() {
        // Only the top-level readme is metadata; a command happens to be
        // able to carry that name.
        assert_eq!(
            classify_str("commands/README.md"),
            FileAction::Transform(Category::Commands)
        );
    }

    #[test]
    fn action_display_matches_plan_output() {
        assert_eq!(FileAction::CopyVerbatim.to_string(), "copy");
        assert_eq!(
            FileAction::Transform(Category::Agents).to_string(),
            "transform (agents)"
        );
    }
}
