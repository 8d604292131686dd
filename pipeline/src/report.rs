//! Per-stage statistics and the run summary.

use serde::{Deserialize, Serialize};

/// Counters collected while building the document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub lines: usize,
    pub ignored_lines: usize,
    pub brands: usize,
    pub categories: usize,
    pub sections: usize,
    pub entries: usize,
    /// Bullets whose body was the EMPTY marker or blank.
    pub empty_markers: usize,
    /// Ancestors created because a line appeared without its parent context.
    pub implicit_contexts: usize,
}

/// Counters collected while loading the mapping list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingStats {
    pub lines: usize,
    pub images: usize,
    pub documents: usize,
    pub region_headers: usize,
    /// Non-blank, non-comment lines that did not match `<path>: <description>`.
    pub skipped_lines: usize,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Entries in sections that link to documents.
    pub linkable: usize,
    pub resolved: usize,
    pub unresolved: usize,
    /// Entries with a card image.
    pub images: usize,
    /// Text of each linkable entry left without a document, in tree order.
    pub unresolved_entries: Vec<String>,
}

/// Summary of a complete pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub build: BuildStats,
    pub mapping: MappingStats,
    pub resolution: ResolutionSummary,
    /// Distinct resolved paths listed in the checklist.
    pub referenced_files: usize,
    /// Referenced paths not found on disk; only counted when the existence
    /// check is enabled.
    pub missing_files: usize,
}
