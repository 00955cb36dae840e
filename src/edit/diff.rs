use similar::TextDiff;

/// Unified diff between the old and new content, for display only.
///
/// Headers follow the conventional `a/` and `b/` prefixes so the output
/// reads like `git diff`.
pub fn unified_diff(old: &str, new: &str, display_path: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(3)
        .header(
            &format!("a/{display_path}"),
            &format!("b/{display_path}"),
        )
        .to_string()
}
