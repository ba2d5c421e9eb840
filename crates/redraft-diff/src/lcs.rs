//! Word-granularity diff via longest common subsequence.
//!
//! Texts are tokenized on whitespace boundaries into alternating word and
//! whitespace tokens, so the edit script is lossless. An LCS dynamic program
//! over the tokens yields a minimal edit script; contiguous runs of the same
//! kind are merged, and at each divergence removed content precedes added
//! content. A whitespace-only equal gap between two replacements is folded
//! into the surrounding change so phrases like "has a" -> "have an" come out
//! as one removed run and one added run.

use crate::segment::{DiffKind, DiffSegment};

/// Split text into alternating word and whitespace-run tokens.
///
/// Concatenating the tokens reproduces the input exactly.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_ws: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        match prev_ws {
            Some(p) if p != ws => {
                tokens.push(&text[start..i]);
                start = i;
                prev_ws = Some(ws);
            }
            Some(_) => {}
            None => prev_ws = Some(ws),
        }
    }
    if !text.is_empty() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Raw per-token edit operation, in original-to-revised order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenOp {
    Equal,
    Added,
    Removed,
}

/// LCS dynamic program over the token sequences, backtracked into a forward
/// edit script of `(op, token)` pairs.
fn token_script<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<(TokenOp, &'a str)> {
    let n = a.len();
    let m = b.len();

    // dp[i * (m + 1) + j] = LCS length of a[..i] and b[..j].
    let mut dp = vec![0u32; (n + 1) * (m + 1)];
    for i in 1..=n {
        for j in 1..=m {
            dp[i * (m + 1) + j] = if a[i - 1] == b[j - 1] {
                dp[(i - 1) * (m + 1) + (j - 1)] + 1
            } else {
                dp[(i - 1) * (m + 1) + j].max(dp[i * (m + 1) + (j - 1)])
            };
        }
    }

    let mut script = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            script.push((TokenOp::Equal, a[i - 1]));
            i -= 1;
            j -= 1;
        } else if dp[i * (m + 1) + (j - 1)] >= dp[(i - 1) * (m + 1) + j] {
            script.push((TokenOp::Added, b[j - 1]));
            j -= 1;
        } else {
            script.push((TokenOp::Removed, a[i - 1]));
            i -= 1;
        }
    }
    while i > 0 {
        script.push((TokenOp::Removed, a[i - 1]));
        i -= 1;
    }
    while j > 0 {
        script.push((TokenOp::Added, b[j - 1]));
        j -= 1;
    }
    script.reverse();
    script
}

/// Intermediate run representation used while merging.
#[derive(Debug)]
enum Run {
    Equal(String),
    Change { removed: String, added: String },
}

/// Group the token script into equal runs and change blocks.
fn group_runs(script: &[(TokenOp, &str)]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &(op, token) in script {
        match op {
            TokenOp::Equal => {
                if let Some(Run::Equal(s)) = runs.last_mut() {
                    s.push_str(token);
                } else {
                    runs.push(Run::Equal(token.to_string()));
                }
            }
            TokenOp::Removed => {
                if let Some(Run::Change { removed, .. }) = runs.last_mut() {
                    removed.push_str(token);
                } else {
                    runs.push(Run::Change {
                        removed: token.to_string(),
                        added: String::new(),
                    });
                }
            }
            TokenOp::Added => {
                if let Some(Run::Change { added, .. }) = runs.last_mut() {
                    added.push_str(token);
                } else {
                    runs.push(Run::Change {
                        removed: String::new(),
                        added: token.to_string(),
                    });
                }
            }
        }
    }
    runs
}

/// Fold a whitespace-only equal gap between two replacements into one change.
///
/// The gap text is appended to both sides of the fused change, so both
/// copy-out reconstructions are preserved.
fn fold_whitespace_gaps(runs: Vec<Run>) -> Vec<Run> {
    let mut folded: Vec<Run> = Vec::new();
    let mut pending_gap: Option<String> = None;

    for run in runs {
        match run {
            Run::Equal(s) => {
                let is_replacement_before = matches!(
                    folded.last(),
                    Some(Run::Change { removed, added }) if !removed.is_empty() && !added.is_empty()
                );
                if is_replacement_before
                    && !s.is_empty()
                    && s.chars().all(char::is_whitespace)
                    && pending_gap.is_none()
                {
                    pending_gap = Some(s);
                } else {
                    if let Some(gap) = pending_gap.take() {
                        folded.push(Run::Equal(gap));
                    }
                    folded.push(Run::Equal(s));
                }
            }
            Run::Change { removed, added } => {
                let fuse = pending_gap.is_some() && !removed.is_empty() && !added.is_empty();
                if fuse {
                    let gap = pending_gap.take().unwrap();
                    if let Some(Run::Change {
                        removed: prev_removed,
                        added: prev_added,
                    }) = folded.last_mut()
                    {
                        prev_removed.push_str(&gap);
                        prev_removed.push_str(&removed);
                        prev_added.push_str(&gap);
                        prev_added.push_str(&added);
                        continue;
                    }
                }
                if let Some(gap) = pending_gap.take() {
                    folded.push(Run::Equal(gap));
                }
                folded.push(Run::Change { removed, added });
            }
        }
    }
    if let Some(gap) = pending_gap.take() {
        folded.push(Run::Equal(gap));
    }
    folded
}

/// Compute the word-level diff between `original` and `revised`.
///
/// Segments come out in original-to-revised order; at each divergence the
/// removed segment precedes the added one. Concatenating equal+added values
/// yields `revised` exactly, equal+removed yields `original` exactly.
pub fn compute_diff(original: &str, revised: &str) -> Vec<DiffSegment> {
    let a = tokenize(original);
    let b = tokenize(revised);
    let script = token_script(&a, &b);
    let runs = fold_whitespace_gaps(group_runs(&script));

    let mut segments = Vec::with_capacity(runs.len());
    for run in runs {
        match run {
            Run::Equal(value) => segments.push(DiffSegment {
                kind: DiffKind::Equal,
                value,
            }),
            Run::Change { removed, added } => {
                if !removed.is_empty() {
                    segments.push(DiffSegment {
                        kind: DiffKind::Removed,
                        value: removed,
                    });
                }
                if !added.is_empty() {
                    segments.push(DiffSegment {
                        kind: DiffKind::Added,
                        value: added,
                    });
                }
            }
        }
    }
    segments
}

// =============================================================================
// Tests
// =============================================================================
