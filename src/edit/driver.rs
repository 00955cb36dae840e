//! Drives the replacer cascade against a content buffer.
//!
//! Strategies are consulted strictly in order; within a strategy,
//! candidates are tried in the order they were generated. A candidate that
//! occurs more than once is skipped rather than failing the whole call,
//! since a later candidate or strategy may still pin down a unique region.

use thiserror::Error;

use crate::edit::replacer::CASCADE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplaceError {
    /// The search and replacement text are identical.
    #[error("search and replacement text are identical; no change would be made")]
    NoChange,

    /// No strategy produced a candidate that occurs in the content.
    #[error("no occurrence of the search text was found")]
    NotFound,

    /// Every locatable candidate occurred more than once.
    #[error("the search text matches more than one region")]
    Ambiguous,
}

/// A successful replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub content: String,
    /// Number of textual substitutions performed (1 unless `replace_all`).
    pub replacements: usize,
    /// Which strategy located the accepted candidate.
    pub strategy: &'static str,
}

/// Replace `search` with `replace` in `content`.
///
/// With `replace_all` set, every occurrence of the first locatable
/// candidate is substituted. Otherwise the accepted candidate must occur
/// exactly once.
pub fn replace(
    content: &str,
    search: &str,
    replace: &str,
    replace_all: bool,
) -> Result<Replacement, ReplaceError> {
    if search == replace {
        return Err(ReplaceError::NoChange);
    }
    if search.is_empty() {
        return Err(ReplaceError::NotFound);
    }

    let mut found_any = false;

    for replacer in CASCADE {
        for candidate in replacer.candidates(content, search) {
            let Some(index) = content.find(&candidate) else {
                continue;
            };
            found_any = true;

            if replace_all {
                let occurrences = content.matches(&candidate).count();
                tracing::debug!(
                    strategy = replacer.name(),
                    occurrences,
                    "replacing every occurrence of candidate"
                );
                return Ok(Replacement {
                    content: content.replace(&candidate, replace),
                    replacements: occurrences,
                    strategy: replacer.name(),
                });
            }

            if content.rfind(&candidate) != Some(index) {
                tracing::debug!(
                    strategy = replacer.name(),
                    "candidate occurs more than once, continuing cascade"
                );
                continue;
            }

            let mut new_content =
                String::with_capacity(content.len() - candidate.len() + replace.len());
            new_content.push_str(&content[..index]);
            new_content.push_str(replace);
            new_content.push_str(&content[index + candidate.len()..]);

            tracing::debug!(strategy = replacer.name(), "replaced unique candidate");
            return Ok(Replacement {
                content: new_content,
                replacements: 1,
                strategy: replacer.name(),
            });
        }
    }

    if found_any {
        Err(ReplaceError::Ambiguous)
    } else {
        tracing::debug!("no strategy located the search text");
        Err(ReplaceError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_unique_replace() {
        let result = replace("a=1\nb=2\nc=3\n", "b=2", "b=20", false).unwrap();
        assert_eq!(result.content, "a=1\nb=20\nc=3\n");
        assert_eq!(result.replacements, 1);
        assert_eq!(result.strategy, "exact");
    }

    #[test]
    fn test_ambiguous_without_replace_all() {
        let result = replace("x\nx\n", "x", "y", false);
        assert_eq!(result, Err(ReplaceError::Ambiguous));
    }

    #[test]
    fn test_replace_all() {
        let result = replace("x\nx\n", "x", "y", true).unwrap();
        assert_eq!(result.content, "y\ny\n");
        assert_eq!(result.replacements, 2);
    }

    #[test]
    fn test_line_trimmed_rescue() {
        let result = replace(
            "def f():\n    return 1\n",
            "def f():\nreturn 1",
            "def f():\n    return 2",
            false,
        )
        .unwrap();
        assert_eq!(result.content, "def f():\n    return 2\n");
        assert_eq!(result.replacements, 1);
        assert_eq!(result.strategy, "line_trimmed");
    }

    #[test]
    fn test_block_anchor_rescue() {
        let content = "class A:\n    def m(self):\n        x = 1\n        y = 2\n        return x + y\n";
        let search = "class A:\ndef m(self):\nreturn x + y";

        let result = replace(content, search, "class A:\n    pass", false).unwrap();
        assert_eq!(result.content, "class A:\n    pass");
        assert_eq!(result.strategy, "block_anchor");
    }

    #[test]
    fn test_paraphrased_interior_is_not_found() {
        let content = "class A:\n    def m(self):\n        x = 1\n        y = 2\n        return x + y\n";
        let search = "class A:\n    ...\n    return x + y";

        let result = replace(content, search, "class A:\n    pass", false);
        assert_eq!(result, Err(ReplaceError::NotFound));
    }

    #[test]
    fn test_no_change_rejected() {
        assert_eq!(
            replace("anything", "same", "same", false),
            Err(ReplaceError::NoChange)
        );
        assert_eq!(
            replace("anything", "same", "same", true),
            Err(ReplaceError::NoChange)
        );
    }

    #[test]
    fn test_empty_search_is_not_found() {
        assert_eq!(
            replace("content", "", "new", false),
            Err(ReplaceError::NotFound)
        );
    }

    #[test]
    fn test_search_equals_entire_content() {
        let result = replace("whole file\n", "whole file\n", "rewritten\n", false).unwrap();
        assert_eq!(result.content, "rewritten\n");
    }

    #[test]
    fn test_single_character_search() {
        let result = replace("abc", "b", "B", false).unwrap();
        assert_eq!(result.content, "aBc");
    }

    #[test]
    fn test_file_without_trailing_lf() {
        let result = replace("a\nb", "b", "c", false).unwrap();
        assert_eq!(result.content, "a\nc");
    }

    #[test]
    fn test_cascade_resumes_past_ambiguous_candidate() {
        // "x" occurs literally twice (alone and inside "  x"), so the exact
        // candidate is ambiguous. The line-trimmed pass also proposes the
        // indented rendition, which is unique.
        let result = replace("x\nfoo\n  x\n", "x", "y", false).unwrap();
        assert_eq!(result.content, "x\nfoo\ny\n");
        assert_eq!(result.strategy, "line_trimmed");
    }

    #[test]
    fn test_replace_all_substitutes_every_occurrence_of_fuzzy_candidate() {
        // The exact search fails (trailing space), the trimmed candidate
        // resolves to "    return 1", and every occurrence of that text is
        // substituted.
        let content = "    return 1\nother\n    return 1\n";
        let result = replace(content, "return 1 ", "return 2", true).unwrap();
        assert_eq!(result.strategy, "line_trimmed");
        assert_eq!(result.replacements, 2);
        assert_eq!(result.content, "return 2\nother\nreturn 2\n");
    }

    #[test]
    fn test_identical_regions_stay_ambiguous() {
        let content = "begin\nmid\nend\nbegin\nmid\nend\n";
        let result = replace(content, "begin\nmid\nend", "replaced", false);
        assert_eq!(result, Err(ReplaceError::Ambiguous));
    }

    #[test]
    fn test_exact_match_reports_exact_strategy() {
        // Uniquely matched by the first strategy; later strategies never run.
        let result = replace("alpha\nbeta\n", "beta", "gamma", false).unwrap();
        assert_eq!(result.strategy, "exact");
    }
}
