//! Mapping list loading.
//!
//! The mapping list pairs file paths with descriptions, one `<path>:
//! <description>` per line. Comment lines act as region headers: a header
//! mentioning images switches the loader to [`MappingKind::Image`], one
//! mentioning PDFs or documents switches it to [`MappingKind::Document`].
//! Lines that match neither form are skipped.

use std::path::Path;
use std::sync::LazyLock;

use help_index_core::{MappingEntry, MappingKind, MappingTable};
use regex::Regex;
use tracing::debug;

use crate::classify::strip_bom;
use crate::config::MappingConfig;
use crate::report::MappingStats;

// SAFETY: This regex is a compile-time constant and is validated by tests.
static MAPPING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>\S.*?):\s+(?P<description>\S.*)$").expect("static regex must compile")
});

/// Parses a mapping list into an ordered [`MappingTable`].
///
/// # Examples
///
/// ```
/// use help_index_core::MappingKind;
/// use help_index_pipeline::config::MappingConfig;
/// use help_index_pipeline::mapping::load_mapping;
///
/// let text = [
///     "# Image Mappings",
///     "images/mc6700p.png: MC6700P",
///     "# PDF Mappings",
///     "Extras/mc6700p-start.pdf: MC6700P Getting Started Guide",
///     "not a mapping line",
/// ]
/// .join("\n");
/// let (table, stats) = load_mapping(&text, &MappingConfig::default());
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.entries()[0].kind(), MappingKind::Image);
/// assert_eq!(table.entries()[1].path(), "Extras/mc6700p-start.pdf");
/// assert_eq!(stats.skipped_lines, 1);
/// ```
pub fn load_mapping(text: &str, config: &MappingConfig) -> (MappingTable, MappingStats) {
    let mut table = MappingTable::new();
    let mut stats = MappingStats::default();
    let mut region: Option<MappingKind> = None;

    for (index, raw) in strip_bom(text).lines().enumerate() {
        stats.lines += 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = strip_comment(line, &config.comment_prefixes) {
            if let Some(kind) = region_for_header(header, config) {
                debug!(line = index + 1, region = ?kind, "Switching mapping region");
                stats.region_headers += 1;
                region = Some(kind);
            }
            continue;
        }

        let Some((path, description)) = parse_mapping_line(line) else {
            debug!(line = index + 1, text = line, "Skipping malformed mapping line");
            stats.skipped_lines += 1;
            continue;
        };

        let kind = region.unwrap_or_else(|| infer_kind(path, config));
        match kind {
            MappingKind::Image => stats.images += 1,
            MappingKind::Document => stats.documents += 1,
        }
        table.push(MappingEntry::new(path, description, kind));
    }

    (table, stats)
}

/// Splits `<path>: <description>` at the first colon followed by whitespace.
///
/// Returns `None` when either side is empty.
pub fn parse_mapping_line(line: &str) -> Option<(&str, &str)> {
    let captures = MAPPING_LINE.captures(line.trim())?;
    let path = captures.name("path")?.as_str().trim();
    let description = captures.name("description")?.as_str().trim();
    if path.is_empty() || description.is_empty() {
        return None;
    }
    Some((path, description))
}

fn strip_comment<'a>(line: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| line.strip_prefix(prefix.as_str()))
}

/// Region selected by a comment header, or `None` when the header names
/// neither images nor documents.
fn region_for_header(header: &str, config: &MappingConfig) -> Option<MappingKind> {
    let words: Vec<String> = header
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();
    let mentions = |keywords: &[String]| {
        words
            .iter()
            .any(|word| keywords.iter().any(|keyword| keyword.eq_ignore_ascii_case(word)))
    };

    if mentions(&config.image_keywords) {
        Some(MappingKind::Image)
    } else if mentions(&config.document_keywords) {
        Some(MappingKind::Document)
    } else {
        None
    }
}

fn infer_kind(path: &str, config: &MappingConfig) -> MappingKind {
    let is_image = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            config
                .image_extensions
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        });
    if is_image {
        MappingKind::Image
    } else {
        MappingKind::Document
    }
}
