//! Body text substitutions for command documents.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Ordered substitutions; each output feeds the next. The order is part of
/// the contract even though the current patterns do not overlap.
static BODY_PATTERNS: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        // The marketplace convention prefixes the arguments placeholder
        // with a `#` sentinel that opencode does not understand.
        (
            Regex::new(r"#\$ARGUMENTS").expect("arguments pattern must compile"),
            "$$ARGUMENTS",
        ),
        // Namespaced invocations like `/fly:deploy` become bare `/deploy`.
        (
            Regex::new(r"/fly:(\w+)").expect("namespace pattern must compile"),
            "/$1",
        ),
        // A standalone `skill: my-skill` line becomes a call-style
        // invocation with the identifier as a quoted name argument.
        (
            Regex::new(r"(?m)^skill:\s*([\w-]+)\s*$").expect("skill pattern must compile"),
            r#"skill({ name: "$1" })"#,
        ),
        // Cross-references into the marketplace skills tree make no sense
        // in the output; the whole line goes, trailing newline included.
        (
            Regex::new(r"(?m)^See `marketplace/flywheel/skills/.*$\n?")
                .expect("see-also pattern must compile"),
            "",
        ),
    ]
});

/// Run every substitution, in declaration order, over the full body.
pub fn rewrite(body: &str) -> String {
    let mut text = body.to_string();
    for (pattern, replacement) in BODY_PATTERNS.iter() {
        if let Cow::Owned(next) = pattern.replace_all(&text, *replacement) {
            text = next;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_the_arguments_sentinel() {
        assert_eq!(rewrite("run with #$ARGUMENTS now"), "run with $ARGUMENTS now");
    }

    #[test]
    fn strips_the_command_namespace_prefix() {
        assert_eq!(rewrite("then call /fly:deploy here"), "then call /deploy here");
        assert_eq!(rewrite("/fly:run_all"), "/run_all");
    }

    #[test]
    fn rewrites_a_standalone_skill_line_to_a_call() {
        let body = "intro\nskill: my-skill\noutro\n";
        assert_eq!(rewrite(body), "intro\nskill({ name: \"my-skill\" })\noutro\n");
    }

    #[test]
    fn skill_line_with_trailing_text_is_not_a_match() {
        let body = "skill: my-skill does things\n";
        assert_eq!(rewrite(body), body);
    }

    #[test]
    fn deletes_see_also_lines_including_their_newline() {
        let body = "before\nSee `marketplace/flywheel/skills/foo.md` for details\nafter\n";
        assert_eq!(rewrite(body), "before\nafter\n");
    }

    #[test]
    fn see_also_line_at_end_of_body_is_deleted() {
        let body = "before\nSee `marketplace/flywheel/skills/foo.md`";
        assert_eq!(rewrite(body), "before\n");
    }

    #[test]
    fn all_substitutions_compose_over_one_body() {
        let body = "\
Use #$ARGUMENTS with /fly:deploy.
skill: helper
See `marketplace/flywheel/skills/helper/SKILL.md`
done
";
        assert_eq!(
            rewrite(body),
            "Use $ARGUMENTS with /deploy.\nskill({ name: \"helper\" })\ndone\n"
        );
    }
}
