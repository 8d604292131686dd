//! Re-serialization of a document tree back into help index markup.

use help_index_core::Document;

use crate::config::IndexConfig;

/// Writes `document` as header and bullet lines that build back into the
/// same tree.
///
/// # Examples
///
/// ```
/// use help_index_pipeline::builder::build_document;
/// use help_index_pipeline::config::IndexConfig;
/// use help_index_pipeline::markup::write_markup;
///
/// let config = IndexConfig::default();
/// let (document, _) = build_document("#### HELP\n- MC6700P: Getting Started Guide\n", &config);
/// let markup = write_markup(&document, &config);
/// assert_eq!(
///     markup,
///     "## Uncategorized\n### General\n#### HELP\n- MC6700P: Getting Started Guide\n"
/// );
/// ```
pub fn write_markup(document: &Document, config: &IndexConfig) -> String {
    let markers = &config.classifier;
    let bullet = markers
        .bullet_markers
        .first()
        .map(String::as_str)
        .unwrap_or("-");
    let separator = config.builder.separator;

    let mut out = String::new();
    for brand in &document.brands {
        out.push_str(&format!("{} {}\n", markers.brand_marker, brand.name));
        for category in &brand.categories {
            out.push_str(&format!("{} {}\n", markers.category_marker, category.name));
            for section in &category.sections {
                out.push_str(&format!("{} {}\n", markers.section_marker, section.kind));
                for entry in &section.entries {
                    if entry.label().is_empty() {
                        out.push_str(&format!("{bullet} {}\n", entry.code()));
                    } else {
                        out.push_str(&format!(
                            "{bullet} {}{separator} {}\n",
                            entry.code(),
                            entry.label()
                        ));
                    }
                }
            }
        }
    }
    out
}
