//! Candidate generators for locating a model-produced search fragment in
//! file content.
//!
//! Models reproduce the region they want to edit imperfectly: whitespace
//! drifts, indentation is dropped, interior lines get paraphrased. Each
//! replacer proposes substrings of the real content that the driver should
//! try to replace literally, in decreasing order of strictness:
//!
//! 1. Exact: the fragment as given.
//! 2. Line-trimmed: match line contents ignoring leading/trailing
//!    whitespace per line.
//! 3. Block-anchor: locate a 3+ line block by its first and last lines and
//!    admit it if the interior is similar enough.

use crate::file::find::similarity;

/// A single candidate meeting its anchors is strong evidence on its own;
/// competing candidates must be separated by their interiors.
const SINGLE_CANDIDATE_THRESHOLD: f64 = 0.3;
const MULTI_CANDIDATE_THRESHOLD: f64 = 0.5;

/// The matching strategies, in the order the driver consults them.
///
/// A closed set: new strategies may be appended behind the existing three,
/// never reordered ahead of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacer {
    Exact,
    LineTrimmed,
    BlockAnchor,
}

pub const CASCADE: [Replacer; 3] = [
    Replacer::Exact,
    Replacer::LineTrimmed,
    Replacer::BlockAnchor,
];

impl Replacer {
    pub fn name(self) -> &'static str {
        match self {
            Replacer::Exact => "exact",
            Replacer::LineTrimmed => "line_trimmed",
            Replacer::BlockAnchor => "block_anchor",
        }
    }

    /// Candidate substrings of `content` to try replacing, in preference
    /// order. Every returned string occurs verbatim in `content`, except
    /// for `Exact`, which proposes the search text as-is and leaves the
    /// occurrence check to the driver.
    pub fn candidates(self, content: &str, search: &str) -> Vec<String> {
        match self {
            Replacer::Exact => vec![search.to_string()],
            Replacer::LineTrimmed => line_trimmed_candidates(content, search),
            Replacer::BlockAnchor => block_anchor_candidates(content, search),
        }
    }
}

/// Search text split on LF, with the empty last element from a trailing LF
/// dropped so it doesn't demand a phantom line.
pub(crate) fn search_lines(search: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = search.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Byte offset of line `i` in content split on LF.
fn line_start_offset(orig_lines: &[&str], i: usize) -> usize {
    orig_lines[..i].iter().map(|l| l.len() + 1).sum()
}

fn line_trimmed_candidates(content: &str, search: &str) -> Vec<String> {
    let orig_lines: Vec<&str> = content.split('\n').collect();
    let search_lines = search_lines(search);

    if search_lines.is_empty() || search_lines.len() > orig_lines.len() {
        return Vec::new();
    }

    let mut candidates = Vec::new();

    for i in 0..=orig_lines.len() - search_lines.len() {
        let matches = search_lines
            .iter()
            .enumerate()
            .all(|(j, s)| orig_lines[i + j].trim_ascii() == s.trim_ascii());
        if !matches {
            continue;
        }

        let start = line_start_offset(&orig_lines, i);
        let mut end = start;
        for (k, line) in orig_lines[i..i + search_lines.len()].iter().enumerate() {
            end += line.len();
            if k + 1 < search_lines.len() {
                end += 1;
            }
        }

        candidates.push(content[start..end].to_string());
    }

    candidates
}

fn block_anchor_candidates(content: &str, search: &str) -> Vec<String> {
    let orig_lines: Vec<&str> = content.split('\n').collect();
    let search_lines = search_lines(search);

    if search_lines.len() < 3 {
        return Vec::new();
    }

    let first_anchor = search_lines[0].trim_ascii();
    let last_anchor = search_lines[search_lines.len() - 1].trim_ascii();

    // Each start anchor pairs with its nearest closing anchor.
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for i in 0..orig_lines.len() {
        if orig_lines[i].trim_ascii() != first_anchor {
            continue;
        }
        for j in i + 2..orig_lines.len() {
            if orig_lines[j].trim_ascii() == last_anchor {
                spans.push((i, j));
                break;
            }
        }
    }

    if spans.is_empty() {
        return Vec::new();
    }

    let interior = &search_lines[1..search_lines.len() - 1];

    let accepted = if spans.len() == 1 {
        let (i, j) = spans[0];
        match interior_similarity(&orig_lines, i, j, interior) {
            // Anchors alone decide when there is nothing to compare
            None => Some(spans[0]),
            Some(score) if score >= SINGLE_CANDIDATE_THRESHOLD => Some(spans[0]),
            Some(_) => None,
        }
    } else {
        let mut best: Option<((usize, usize), f64)> = None;
        for &span in &spans {
            let score = interior_similarity(&orig_lines, span.0, span.1, interior).unwrap_or(0.0);
            match best {
                None => best = Some((span, score)),
                Some((_, best_score)) if score > best_score => best = Some((span, score)),
                _ => {}
            }
        }
        best.filter(|&(_, score)| score >= MULTI_CANDIDATE_THRESHOLD)
            .map(|(span, _)| span)
    };

    let Some((i, j)) = accepted else {
        return Vec::new();
    };

    let start = line_start_offset(&orig_lines, i);
    let mut end = start;
    for line in &orig_lines[i..=j] {
        end += line.len() + 1;
    }
    if j + 1 == orig_lines.len() {
        // Final content line without a trailing LF
        end -= 1;
    }

    vec![content[start..end].to_string()]
}

/// Mean similarity over the aligned interior prefix of a candidate block.
///
/// Compares the first `n` interior lines of the search text against the
/// first `n` interior lines of the block, where `n` is the shorter of the
/// two interiors. Returns None when the block has no interior to compare.
fn interior_similarity(
    orig_lines: &[&str],
    i: usize,
    j: usize,
    search_interior: &[&str],
) -> Option<f64> {
    let lines_to_check = search_interior.len().min(j - i + 1 - 2);
    if lines_to_check == 0 {
        return None;
    }

    let mut score = 0.0;
    for (k, search_line) in search_interior.iter().enumerate() {
        let orig_index = i + 1 + k;
        if orig_index >= j {
            break;
        }
        score += similarity(
            orig_lines[orig_index].trim_ascii(),
            search_line.trim_ascii(),
        ) / lines_to_check as f64;
    }

    Some(score)
}
