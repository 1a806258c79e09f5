//! The closed category set and its per-category rewrite rules.

/// Document category governing which transform rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Commands,
    Agents,
    Skills,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commands => "commands",
            Self::Agents => "agents",
            Self::Skills => "skills",
        }
    }

    /// The rewrite rule for this category. Defined once, immutable.
    pub fn rule(self) -> TransformRule {
        match self {
            Self::Commands => TransformRule {
                remove: &["name", "argument-hint"],
                add: &[],
                rewrite_body: true,
            },
            Self::Agents => TransformRule {
                remove: &["model", "tools"],
                add: &[("mode", "subagent")],
                rewrite_body: false,
            },
            Self::Skills => TransformRule {
                remove: &["allowed-tools"],
                add: &[],
                rewrite_body: false,
            },
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Frontmatter edits and the body-rewrite opt-in for one category.
#[derive(Debug, Clone, Copy)]
pub struct TransformRule {
    /// Frontmatter keys removed together with any indented continuation
    /// lines they own.
    pub remove: &'static [&'static str],
    /// Key/value pairs appended to the frontmatter, in order.
    pub add: &'static [(&'static str, &'static str)],
    /// Whether the body substitutions run for this category.
    pub rewrite_body: bool,
}
