//! Output rendering: the HTML index page and the referenced-files checklist.

mod checklist;
mod html;

use std::collections::HashSet;

use chrono::NaiveDateTime;
use help_index_core::Document;

use crate::config::RenderConfig;

pub use checklist::render_checklist;
pub use html::{escape_html, render_html};

/// Format used for every generation timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inputs shared by the renderers besides the document itself.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub config: &'a RenderConfig,
    pub generated_at: NaiveDateTime,
    /// Linkable entries left without a document.
    pub unresolved: usize,
}

/// Distinct resolved paths in first-seen tree order.
///
/// # Examples
///
/// ```
/// use help_index_core::*;
/// use help_index_pipeline::render::distinct_resolved_paths;
///
/// let mut section = Section::new(SectionKind::Help);
/// for (code, path) in [("A", "b.pdf"), ("B", "a.pdf"), ("C", "b.pdf")] {
///     let mut entry = Entry::new(code, "");
///     entry.set_resolved_path(path).unwrap();
///     section.entries.push(entry);
/// }
/// section.entries.push(Entry::new("D", "unresolved"));
/// let mut category = Category::new("C");
/// category.sections.push(section);
/// let mut brand = Brand::new("B");
/// brand.categories.push(category);
/// let document = Document { brands: vec![brand] };
///
/// assert_eq!(distinct_resolved_paths(&document), vec!["b.pdf", "a.pdf"]);
/// ```
pub fn distinct_resolved_paths(document: &Document) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    document
        .entries()
        .filter_map(|(_, entry)| entry.resolved_path())
        .filter(|path| seen.insert(*path))
        .map(str::to_string)
        .collect()
}
