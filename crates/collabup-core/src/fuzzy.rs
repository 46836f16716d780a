//! Fuzzy String Similarity
//!
//! Tiered similarity between a query term and a field value. Cheap tiers run
//! first and the first applicable tier decides the score:
//!
//! | Tier | Condition | Score |
//! |------|-----------|-------|
//! | 1 | either side empty | 0.0 |
//! | 2 | case-insensitive equality | 1.0 |
//! | 3 | one side contains the other | 0.8 |
//! | 4 | word-set Jaccard > 0 | jaccard × 0.6 |
//! | 5 | otherwise | sequence ratio × 0.4 |

use std::collections::{HashMap, HashSet};

pub const EXACT_SCORE: f64 = 1.0;
pub const CONTAINS_SCORE: f64 = 0.8;
pub const JACCARD_SCALE: f64 = 0.6;
pub const SEQUENCE_SCALE: f64 = 0.4;

/// Sequences at least this long get their most common characters ignored
/// when seeding matches.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of two strings in `[0.0, 1.0]`
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return EXACT_SCORE;
    }

    if a.contains(&b) || b.contains(&a) {
        return CONTAINS_SCORE;
    }

    let jaccard = word_jaccard(&a, &b);
    if jaccard > 0.0 {
        return jaccard * JACCARD_SCALE;
    }

    sequence_ratio(&a, &b) * SEQUENCE_SCALE
}

/// Jaccard similarity of the whitespace-separated word sets.
///
/// Returns 0.0 when either side has no words.
pub fn word_jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Ratcliff/Obershelp similarity: `2 * matched / (len(a) + len(b))`.
///
/// Matched characters come from recursively taking the longest common block
/// and repeating on both sides of it. Two empty strings are identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = SequenceMatcher::new(&a, &b).matched_chars();
    2.0 * matched as f64 / total as f64
}

struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character of `b`, popular characters removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular);
        }

        Self { a, b, b2j }
    }

    fn matched_chars(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular characters never seed a match but may still extend one
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

// ============================================================================
// TESTS
// ============================================================================
