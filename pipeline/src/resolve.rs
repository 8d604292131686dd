//! Fuzzy entry resolution.
//!
//! Each entry is matched against mapping descriptions by word-set overlap
//! (Jaccard similarity over normalized tokens). Scores are kept as exact
//! ratios so equal scores always compare equal, and ties go to the candidate
//! that appears first in the mapping table.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use help_index_core::{Document, MappingEntry, MappingTable};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::report::ResolutionSummary;

// SAFETY: These regexes are compile-time constants and are validated by tests.
static APOSTROPHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"['’`]").expect("static regex must compile"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("static regex must compile"));

/// Lower-cases `text`, drops apostrophes, turns every other run of
/// punctuation or whitespace into a single space, and trims.
///
/// # Examples
///
/// ```
/// use help_index_pipeline::resolve::normalize;
///
/// assert_eq!(normalize("  MC6700P:  Getting-Started  Guide! "), "mc6700p getting started guide");
/// assert_eq!(normalize("Designer's Gallery"), "designers gallery");
/// ```
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let without_apostrophes = APOSTROPHES.replace_all(&lower, "");
    NON_WORD
        .replace_all(&without_apostrophes, " ")
        .trim()
        .to_string()
}

/// Distinct normalized word tokens of `text`.
pub fn tokens(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Similarity score as the exact ratio `shared / union` of two token sets.
///
/// Scores compare by value, so `1/3` equals `2/6`.
#[derive(Debug, Clone, Copy)]
pub struct Score {
    shared: usize,
    union: usize,
}

impl Score {
    pub const ZERO: Score = Score { shared: 0, union: 1 };

    pub fn new(shared: usize, union: usize) -> Self {
        if shared == 0 || union == 0 {
            Self::ZERO
        } else {
            Self { shared, union }
        }
    }

    pub fn shared(&self) -> usize {
        self.shared
    }

    pub fn union(&self) -> usize {
        self.union
    }

    pub fn is_zero(&self) -> bool {
        self.shared == 0
    }

    pub fn value(&self) -> f64 {
        self.shared as f64 / self.union as f64
    }

    /// Non-zero and strictly above `min_score`.
    pub fn qualifies(&self, min_score: f64) -> bool {
        !self.is_zero() && self.value() > min_score
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.shared * other.union).cmp(&(other.shared * self.union))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

/// Jaccard similarity of two token sets.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> Score {
    let shared = a.intersection(b).count();
    Score::new(shared, a.len() + b.len() - shared)
}

/// Jaccard similarity of two texts after normalization.
///
/// # Examples
///
/// ```
/// use help_index_pipeline::resolve::{Score, similarity};
///
/// let score = similarity("MC6700P: Getting Started Guide", "MC6700P Getting Started Guide");
/// assert_eq!(score.value(), 1.0);
/// assert_eq!(similarity("Quick Guide", "Quick Start"), Score::new(1, 3));
/// assert!(similarity("abc", "xyz").is_zero());
/// ```
pub fn similarity(a: &str, b: &str) -> Score {
    jaccard(&tokens(a), &tokens(b))
}

/// Candidates with their description tokens computed once.
pub struct CandidateIndex<'t> {
    candidates: Vec<(&'t MappingEntry, HashSet<String>)>,
}

impl<'t> CandidateIndex<'t> {
    /// Indexes `entries` in iteration order.
    pub fn new(entries: impl IntoIterator<Item = &'t MappingEntry>) -> Self {
        Self {
            candidates: entries
                .into_iter()
                .map(|entry| (entry, tokens(entry.description())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Best qualifying candidate for the given tokens; earlier candidates win
    /// ties.
    pub fn best(&self, query: &HashSet<String>, min_score: f64) -> Option<(&'t MappingEntry, Score)> {
        if query.is_empty() {
            return None;
        }
        let mut best: Option<(&'t MappingEntry, Score)> = None;
        for (entry, candidate_tokens) in &self.candidates {
            let score = jaccard(query, candidate_tokens);
            if !score.qualifies(min_score) {
                continue;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*entry, score));
            }
        }
        best
    }
}

/// Finds the best-matching candidate for `text`.
///
/// # Examples
///
/// ```
/// use help_index_core::{MappingEntry, MappingKind};
/// use help_index_pipeline::resolve::best_match;
///
/// let candidates = [
///     MappingEntry::new("Extras/a.pdf", "Quilting Basics", MappingKind::Document),
///     MappingEntry::new("Extras/b.pdf", "Quilting Basics", MappingKind::Document),
/// ];
/// let found = best_match("Basics of quilting", &candidates, 0.2).unwrap();
/// assert_eq!(found.path(), "Extras/a.pdf");
/// assert!(best_match("Threading", &candidates, 0.2).is_none());
/// ```
pub fn best_match<'t>(
    text: &str,
    candidates: impl IntoIterator<Item = &'t MappingEntry>,
    min_score: f64,
) -> Option<&'t MappingEntry> {
    CandidateIndex::new(candidates)
        .best(&tokens(text), min_score)
        .map(|(entry, _)| entry)
}

/// Resolves every entry of `document` against `table`.
///
/// Entries in linkable sections get the best document mapping; when image
/// resolution is on, every entry also gets the best image mapping. Paths
/// already set are never overwritten, so running this twice gives the same
/// tree.
pub fn resolve_document(
    document: &mut Document,
    table: &MappingTable,
    config: &ResolverConfig,
) -> ResolutionSummary {
    let documents = CandidateIndex::new(table.documents());
    let images = CandidateIndex::new(table.images());
    let mut summary = ResolutionSummary::default();

    for (kind, entry) in document.entries_mut() {
        let text = entry.text();
        let query = tokens(&text);

        if config.is_linkable(kind) {
            summary.linkable += 1;
            if !entry.is_resolved() {
                if let Some((found, score)) = documents.best(&query, config.min_score) {
                    debug!(entry = %text, path = found.path(), score = score.value(), "Resolved entry");
                    if let Err(err) = entry.set_resolved_path(found.path()) {
                        warn!(error = %err, "Skipping document resolution");
                    }
                }
            }

            if entry.is_resolved() {
                summary.resolved += 1;
            } else {
                debug!(entry = %text, section = %kind, "No document matched entry");
                summary.unresolved += 1;
                summary.unresolved_entries.push(text.clone());
            }
        }

        if config.resolve_images && entry.image_path().is_none() {
            if let Some((found, _)) = images.best(&query, config.min_score) {
                if let Err(err) = entry.set_image_path(found.path()) {
                    warn!(error = %err, "Skipping image resolution");
                }
            }
        }
        if entry.image_path().is_some() {
            summary.images += 1;
        }
    }

    info!(
        linkable = summary.linkable,
        resolved = summary.resolved,
        unresolved = summary.unresolved,
        images = summary.images,
        candidates = documents.len(),
        "Resolved entries"
    );
    summary
}
