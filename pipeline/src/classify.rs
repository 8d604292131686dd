//! Line classification.
//!
//! Maps one trimmed input line onto a small fixed alphabet of line kinds.
//! Classification is pure and total: anything unrecognized is
//! [`LineKind::Ignorable`].

use help_index_core::SectionKind;

use crate::config::ClassifierConfig;

/// Structural role of one help index line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    BrandHeader(String),
    CategoryHeader(String),
    SectionHeader(SectionKind),
    BulletEntry(String),
    Ignorable,
}

/// A classified line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub line_number: usize,
    pub kind: LineKind,
}

/// Classifies a single line.
///
/// # Examples
///
/// ```
/// use help_index_core::SectionKind;
/// use help_index_pipeline::classify::{LineKind, classify_line};
/// use help_index_pipeline::config::ClassifierConfig;
///
/// let config = ClassifierConfig::default();
/// assert_eq!(
///     classify_line("## Janome", &config),
///     LineKind::BrandHeader("Janome".to_string())
/// );
/// assert_eq!(
///     classify_line("#### tutorials", &config),
///     LineKind::SectionHeader(SectionKind::Tutorials)
/// );
/// assert_eq!(
///     classify_line("  - MC6700P: Getting Started Guide ", &config),
///     LineKind::BulletEntry("MC6700P: Getting Started Guide".to_string())
/// );
/// assert_eq!(classify_line("#### DOWNLOADS", &config), LineKind::Ignorable);
/// ```
pub fn classify_line(line: &str, config: &ClassifierConfig) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Ignorable;
    }

    if let Some(kind) = classify_header(trimmed, config) {
        return kind;
    }

    match strip_bullet(trimmed, &config.bullet_markers) {
        Some(body) => LineKind::BulletEntry(body.to_string()),
        None => LineKind::Ignorable,
    }
}

/// Classifies every line of `text`, keeping line numbers. A leading byte
/// order mark is skipped.
pub fn classify_lines(text: &str, config: &ClassifierConfig) -> Vec<ClassifiedLine> {
    strip_bom(text)
        .lines()
        .enumerate()
        .map(|(index, line)| ClassifiedLine {
            line_number: index + 1,
            kind: classify_line(line, config),
        })
        .collect()
}

/// Drops a UTF-8 byte order mark, which `trim` does not treat as whitespace.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Returns `Some` when the first token is one of the header markers. A
/// header with an empty or unknown name is still consumed as ignorable so it
/// cannot be mistaken for a bullet.
fn classify_header(trimmed: &str, config: &ClassifierConfig) -> Option<LineKind> {
    let (marker, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((marker, rest)) => (marker, rest.trim()),
        None => (trimmed, ""),
    };

    let kind = if marker == config.brand_marker {
        named(rest, LineKind::BrandHeader)
    } else if marker == config.category_marker {
        named(rest, LineKind::CategoryHeader)
    } else if marker == config.section_marker {
        SectionKind::parse(rest.trim_end_matches(':')).map_or(LineKind::Ignorable, LineKind::SectionHeader)
    } else {
        return None;
    };
    Some(kind)
}

fn named(name: &str, make: fn(String) -> LineKind) -> LineKind {
    if name.is_empty() {
        LineKind::Ignorable
    } else {
        make(name.to_string())
    }
}

/// Strips a bullet marker that is followed by whitespace or ends the line.
fn strip_bullet<'a>(trimmed: &'a str, markers: &[String]) -> Option<&'a str> {
    markers.iter().find_map(|marker| {
        let rest = trimmed.strip_prefix(marker.as_str())?;
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest.trim())
        } else {
            None
        }
    })
}
