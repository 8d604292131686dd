//! Document tree construction.
//!
//! [`DocumentBuilder`] consumes classified lines in order and keeps a cursor
//! of the open brand, category and section. Headers close the contexts
//! below them; lines that arrive without a parent context get an implicit
//! ancestor instead of an error, so building never fails.

use help_index_core::{Brand, Category, Document, Entry, Section};
use tracing::debug;

use crate::classify::{LineKind, classify_lines};
use crate::config::{BuilderConfig, IndexConfig};
use crate::report::BuildStats;

/// Incremental builder for a [`Document`].
///
/// # Examples
///
/// ```
/// use help_index_core::SectionKind;
/// use help_index_pipeline::builder::DocumentBuilder;
/// use help_index_pipeline::classify::LineKind;
/// use help_index_pipeline::config::BuilderConfig;
///
/// let config = BuilderConfig::default();
/// let mut builder = DocumentBuilder::new(&config);
/// builder.push(LineKind::BrandHeader("Janome".into()));
/// builder.push(LineKind::CategoryHeader("Sewing".into()));
/// builder.push(LineKind::SectionHeader(SectionKind::Videos));
/// builder.push(LineKind::BulletEntry("EMPTY".into()));
/// builder.push(LineKind::SectionHeader(SectionKind::Help));
/// builder.push(LineKind::BulletEntry("MC6700P: Getting Started Guide".into()));
///
/// let (document, stats) = builder.finish();
/// let sections = &document.brands[0].categories[0].sections;
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].kind, SectionKind::Help);
/// assert_eq!(sections[0].entries[0].code(), "MC6700P");
/// assert_eq!(stats.empty_markers, 1);
/// ```
pub struct DocumentBuilder<'a> {
    config: &'a BuilderConfig,
    document: Document,
    brand: Option<Brand>,
    category: Option<Category>,
    section: Option<Section>,
    line: usize,
    stats: BuildStats,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a BuilderConfig) -> Self {
        Self {
            config,
            document: Document::default(),
            brand: None,
            category: None,
            section: None,
            line: 0,
            stats: BuildStats::default(),
        }
    }

    /// Feeds the line after the last one pushed.
    pub fn push(&mut self, kind: LineKind) {
        self.push_at(self.line + 1, kind);
    }

    /// Feeds a classified line with its 1-based number in the source text.
    pub fn push_at(&mut self, line_number: usize, kind: LineKind) {
        self.line = line_number;
        self.stats.lines += 1;
        match kind {
            LineKind::BrandHeader(name) => {
                self.close_brand();
                self.brand = Some(Brand::new(name));
            }
            LineKind::CategoryHeader(name) => {
                self.close_category();
                self.ensure_brand();
                self.category = Some(Category::new(name));
            }
            LineKind::SectionHeader(kind) => {
                self.close_section();
                self.ensure_category();
                self.section = Some(Section::new(kind));
            }
            LineKind::BulletEntry(body) => match parse_entry(&body, self.config) {
                Some(entry) => {
                    self.ensure_section();
                    if let Some(section) = self.section.as_mut() {
                        section.entries.push(entry);
                    }
                }
                None => self.stats.empty_markers += 1,
            },
            LineKind::Ignorable => self.stats.ignored_lines += 1,
        }
    }

    /// Number of the last line pushed.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Closes all open contexts, prunes empty nodes and returns the tree.
    pub fn finish(mut self) -> (Document, BuildStats) {
        self.close_brand();
        let mut document = self.document;
        document.prune();

        let mut stats = self.stats;
        stats.brands = document.brands.len();
        stats.categories = document.brands.iter().map(|brand| brand.categories.len()).sum();
        stats.sections = document
            .brands
            .iter()
            .flat_map(|brand| brand.categories.iter())
            .map(|category| category.sections.len())
            .sum();
        stats.entries = document.entry_count();
        (document, stats)
    }

    fn close_section(&mut self) {
        if let Some(section) = self.section.take() {
            if let Some(category) = self.category.as_mut() {
                category.sections.push(section);
            }
        }
    }

    fn close_category(&mut self) {
        self.close_section();
        if let Some(category) = self.category.take() {
            if let Some(brand) = self.brand.as_mut() {
                brand.categories.push(category);
            }
        }
    }

    fn close_brand(&mut self) {
        self.close_category();
        if let Some(brand) = self.brand.take() {
            self.document.brands.push(brand);
        }
    }

    fn ensure_brand(&mut self) {
        if self.brand.is_none() {
            debug!(line = self.line, brand = %self.config.implicit_brand, "Opening implicit brand");
            self.stats.implicit_contexts += 1;
            self.brand = Some(Brand::new(self.config.implicit_brand.clone()));
        }
    }

    fn ensure_category(&mut self) {
        self.ensure_brand();
        if self.category.is_none() {
            debug!(line = self.line, category = %self.config.implicit_category, "Opening implicit category");
            self.stats.implicit_contexts += 1;
            self.category = Some(Category::new(self.config.implicit_category.clone()));
        }
    }

    fn ensure_section(&mut self) {
        self.ensure_category();
        if self.section.is_none() {
            debug!(line = self.line, section = %self.config.implicit_section, "Opening implicit section");
            self.stats.implicit_contexts += 1;
            self.section = Some(Section::new(self.config.implicit_section));
        }
    }
}

/// Splits a bullet body into an [`Entry`].
///
/// The body is split at the first separator into code and label; without a
/// separator the whole body is the code. Returns `None` for the EMPTY marker
/// (also when followed by a bare separator, as in `EMPTY:`) and for bodies
/// with no content.
///
/// # Examples
///
/// ```
/// use help_index_pipeline::builder::parse_entry;
/// use help_index_pipeline::config::BuilderConfig;
///
/// let config = BuilderConfig::default();
/// let entry = parse_entry("MC6700P: Getting Started: Part 1", &config).unwrap();
/// assert_eq!(entry.code(), "MC6700P");
/// assert_eq!(entry.label(), "Getting Started: Part 1");
///
/// let bare = parse_entry("MC6700P", &config).unwrap();
/// assert_eq!((bare.code(), bare.label()), ("MC6700P", ""));
///
/// assert!(parse_entry("  empty ", &config).is_none());
/// ```
pub fn parse_entry(body: &str, config: &BuilderConfig) -> Option<Entry> {
    let body = body.trim();
    if body.eq_ignore_ascii_case(config.empty_marker.trim()) {
        return None;
    }

    let (code, label) = match split_at_separator(body, config.separator) {
        Some((code, label)) => (code.trim(), label.trim()),
        None => (body, ""),
    };
    if code.is_empty() && label.is_empty() {
        return None;
    }
    if label.is_empty() && code.eq_ignore_ascii_case(config.empty_marker.trim()) {
        return None;
    }
    Some(Entry::new(code, label))
}

/// Splits at the first separator that is not the scheme delimiter of a URL
/// (`https://...`).
fn split_at_separator(body: &str, separator: char) -> Option<(&str, &str)> {
    body.match_indices(separator)
        .map(|(index, _)| index)
        .find(|&index| !body[index + separator.len_utf8()..].starts_with("//"))
        .map(|index| (&body[..index], &body[index + separator.len_utf8()..]))
}

/// Classifies and builds a whole help index text.
pub fn build_document(text: &str, config: &IndexConfig) -> (Document, BuildStats) {
    let mut builder = DocumentBuilder::new(&config.builder);
    for line in classify_lines(text, &config.classifier) {
        builder.push_at(line.line_number, line.kind);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use help_index_core::SectionKind;

    use super::*;

    fn build(text: &str) -> (Document, BuildStats) {
        build_document(text, &IndexConfig::default())
    }

    fn outline(document: &Document) -> Vec<String> {
        let mut out = Vec::new();
        for brand in &document.brands {
            out.push(brand.name.clone());
            for category in &brand.categories {
                out.push(format!("  {}", category.name));
                for section in &category.sections {
                    out.push(format!("    {}", section.kind));
                    for entry in &section.entries {
                        out.push(format!("      {}|{}", entry.code(), entry.label()));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_build_preserves_input_order() {
        let text = "\
## Zeta
### Series B
#### VIDEOS
- Z2: Threading https://example.com/z2
#### HELP
- Z1: Manual
## Alpha
### Series A
#### DESIGNERS
- A1: Pattern pack
";
        let (document, stats) = build(text);
        assert_eq!(
            outline(&document),
            vec![
                "Zeta",
                "  Series B",
                "    VIDEOS",
                "      Z2|Threading https://example.com/z2",
                "    HELP",
                "      Z1|Manual",
                "Alpha",
                "  Series A",
                "    DESIGNERS",
                "      A1|Pattern pack",
            ]
        );
        assert_eq!(stats.brands, 2);
        assert_eq!(stats.sections, 3);
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.implicit_contexts, 0);
    }

    #[test]
    fn test_empty_videos_section_is_pruned() {
        let (document, stats) = build("## Janome\n### Sewing\n#### HELP\n- A1\n#### VIDEOS\n- EMPTY\n");
        let sections = &document.brands[0].categories[0].sections;
        assert_eq!(sections.len(), 1);
        assert!(sections.iter().all(|section| section.kind != SectionKind::Videos));
        assert_eq!(stats.empty_markers, 1);
    }

    #[test]
    fn test_section_without_context_gets_implicit_ancestors() {
        let (document, stats) = build("#### HELP\n- MC6700P: Getting Started Guide\n");
        assert_eq!(
            outline(&document),
            vec![
                "Uncategorized",
                "  General",
                "    HELP",
                "      MC6700P|Getting Started Guide",
            ]
        );
        assert_eq!(stats.implicit_contexts, 2);
    }

    #[test]
    fn test_bullet_before_any_header_uses_default_section() {
        let (document, _) = build("- Loose entry\n## Brand\n### Cat\n#### TUTORIALS\n- T1: Basics\n");
        assert_eq!(
            outline(&document),
            vec![
                "Uncategorized",
                "  General",
                "    HELP",
                "      Loose entry|",
                "Brand",
                "  Cat",
                "    TUTORIALS",
                "      T1|Basics",
            ]
        );
    }

    #[test]
    fn test_category_without_brand_gets_implicit_brand() {
        let (document, stats) = build("### Lonely\n#### HELP\n- X1\n");
        assert_eq!(document.brands[0].name, "Uncategorized");
        assert_eq!(document.brands[0].categories[0].name, "Lonely");
        assert_eq!(stats.implicit_contexts, 1);
    }

    #[test]
    fn test_brands_and_categories_without_entries_are_pruned() {
        let text = "\
## Empty Brand
### Nothing Here
#### HELP
- EMPTY
## Real
### Hollow
### Filled
#### HELP
- R1: Guide
";
        let (document, _) = build(text);
        assert_eq!(
            outline(&document),
            vec!["Real", "  Filled", "    HELP", "      R1|Guide"]
        );
    }

    #[test]
    fn test_empty_marker_variants_are_dropped() {
        let (document, stats) =
            build("#### HELP\n- EMPTY\n-   empty  \n- Empty\n-\n- :\n- EMPTY:\n- empty :  \n");
        assert!(document.is_empty());
        assert_eq!(stats.empty_markers, 7);
    }

    #[test]
    fn test_url_scheme_colon_is_not_a_separator() {
        let config = BuilderConfig::default();
        let bare = parse_entry("https://example.com/intro", &config).unwrap();
        assert_eq!(bare.code(), "https://example.com/intro");
        assert_eq!(bare.label(), "");

        let labeled = parse_entry("Intro video: https://example.com/intro", &config).unwrap();
        assert_eq!(labeled.code(), "Intro video");
        assert_eq!(labeled.link_url(), Some("https://example.com/intro"));
    }

    #[test]
    fn test_repeated_section_headers_stay_separate() {
        let (document, _) = build("## B\n### C\n#### HELP\n- A\n#### HELP\n- B\n");
        assert_eq!(document.brands[0].categories[0].sections.len(), 2);
    }

    #[test]
    fn test_unrecognized_section_lines_are_ignored() {
        let (document, stats) = build("## B\n### C\n#### DOWNLOADS\n- D1: Driver\n");
        // Entries after an unknown section header fall into the implicit section.
        assert_eq!(document.brands[0].categories[0].sections[0].kind, SectionKind::Help);
        assert_eq!(stats.ignored_lines, 1);
    }

    #[test]
    fn test_empty_marker_with_label_is_kept() {
        let config = BuilderConfig::default();
        let entry = parse_entry("EMPTY: Placeholder card", &config).unwrap();
        assert_eq!(entry.code(), "EMPTY");
        assert_eq!(entry.label(), "Placeholder card");
    }

    #[test]
    fn test_build_tracks_source_line_numbers() {
        let config = IndexConfig::default();
        let mut builder = DocumentBuilder::new(&config.builder);
        for line in classify_lines("\n\n## B\n\n### C", &config.classifier) {
            builder.push_at(line.line_number, line.kind);
        }
        assert_eq!(builder.line(), 5);

        builder.push_at(9, LineKind::Ignorable);
        builder.push(LineKind::BulletEntry("A1".into()));
        assert_eq!(builder.line(), 10);
    }
}
