// Shared prompt fragments and placeholder handling.
// Each task defines its own templates in insights/prompts.rs; this file holds
// what every task prompt needs.

/// Appended to every task system role. Structured output already constrains
/// the reply, this keeps fenced or chatty replies rare on backends that ignore it.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Returns `value` trimmed, or `placeholder` when it is absent or blank.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Joins non-blank items with ", ", or returns `placeholder` when none remain.
pub fn join_or_placeholder<S: AsRef<str>>(items: &[S], placeholder: &str) -> String {
    let joined = items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}

/// Substitutes `{key}` markers in one pass. Values are never rescanned, so
/// user text containing a marker is inserted verbatim. Unknown braces (JSON
/// examples in templates) are left alone.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = values.iter().find_map(|(key, value)| {
            let marker_len = key.len() + 2;
            let is_marker = tail.len() >= marker_len
                && tail[1..].starts_with(key)
                && tail[1 + key.len()..].starts_with('}');
            is_marker.then_some((marker_len, *value))
        });

        match matched {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Builds a task system instruction: role sentence followed by the JSON rule.
pub fn system_instruction(role: &str) -> String {
    format!("{role} {JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_placeholder_blank_uses_placeholder() {
        assert_eq!(or_placeholder(Some("  "), "Not specified"), "Not specified");
        assert_eq!(or_placeholder(None, "Not specified"), "Not specified");
    }

    #[test]
    fn test_or_placeholder_trims_value() {
        assert_eq!(or_placeholder(Some(" Senior "), "x"), "Senior");
    }

    #[test]
    fn test_join_skips_blank_items() {
        let items = vec!["React", " ", "Node.js"];
        assert_eq!(join_or_placeholder(&items, "none"), "React, Node.js");
    }

    #[test]
    fn test_join_empty_uses_placeholder() {
        let items: Vec<String> = vec![];
        assert_eq!(join_or_placeholder(&items, "None specified"), "None specified");
    }

    #[test]
    fn test_fill_template_replaces_known_markers_only() {
        let out = fill_template("Hi {name}, {\"a\": 1} {other}", &[("name", "Ada")]);
        assert_eq!(out, "Hi Ada, {\"a\": 1} {other}");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("{a} {b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(out, "{b} B");
    }

    #[test]
    fn test_system_instruction_appends_json_rule() {
        let s = system_instruction("You are a coach.");
        assert!(s.starts_with("You are a coach. "));
        assert!(s.ends_with(JSON_ONLY_INSTRUCTION));
    }
}
