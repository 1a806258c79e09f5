//! Line-oriented frontmatter editing.
//!
//! The header block is treated as plain text lines, not parsed YAML.
//! Removal is a `key:` prefix match anchored at the start of a line, and a
//! removed key takes its indented continuation lines with it. Consumers
//! hand-author this frontmatter, so the line heuristic is the contract; a
//! real YAML round-trip could reformat lines it does not touch.

use crate::transform::rule::TransformRule;

/// Apply a rule to the text between the two `---` delimiter lines.
///
/// `block` keeps its line endings and so does the result. Added keys land
/// after all surviving lines, one `key: value` line each, in rule order.
pub fn apply_rule(block: &str, rule: &TransformRule) -> String {
    let mut out = String::with_capacity(block.len());
    let mut in_removed_block = false;

    for line in block.split_inclusive('\n') {
        if rule.remove.iter().any(|key| is_key_line(line, key)) {
            // An inline flow sequence (`tools: [read, write]`) ends on its
            // own line; a block value continues through indented children.
            in_removed_block = !line.trim_end().ends_with(']');
            continue;
        }

        if in_removed_block {
            if line.starts_with("  ") || line.starts_with('\t') {
                continue;
            }
            in_removed_block = false;
        }

        out.push_str(line);
    }

    for (key, value) in rule.add {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }

    out
}

fn is_key_line(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .is_some_and(|rest| rest.starts_with(':'))
}
