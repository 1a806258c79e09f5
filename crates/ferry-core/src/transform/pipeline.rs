//! Whole-document transform: split the header, edit both halves, reassemble.

use std::path::Path;

use anyhow::Context;

use crate::fs::write_atomic;
use crate::transform::rule::Category;
use crate::transform::{body, frontmatter};

const DELIMITER: &str = "---\n";

/// Transform one document's content for a category.
///
/// A file without a well-formed delimiter pair passes through unchanged.
/// That is not an error and is not logged; hand-authored files with broken
/// headers still get deployed, just untransformed.
pub fn transform_content(content: &str, category: Category) -> String {
    let rule = category.rule();

    if !content.starts_with(DELIMITER) {
        return content.to_string();
    }

    let mut parts = content.splitn(3, DELIMITER);
    let _leading = parts.next();
    let (Some(header), Some(tail)) = (parts.next(), parts.next()) else {
        return content.to_string();
    };

    let header = frontmatter::apply_rule(header, &rule);
    let tail = if rule.rewrite_body {
        body::rewrite(tail)
    } else {
        tail.to_string()
    };

    format!("{DELIMITER}{header}{DELIMITER}{tail}")
}

/// Read `src`, transform it for `category`, and atomically write `dest`.
pub fn transform_file(src: &Path, dest: &Path, category: Category) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(src)
        .with_context(|| format!("Failed to read source file: {}", src.display()))?;
    write_atomic(dest, &transform_content(&content, category))
}
