//! Document tree definitions for help index modeling.
//!
//! A help index is a strictly ordered tree: [`Document`] → [`Brand`] →
//! [`Category`] → [`Section`] → [`Entry`]. The types serialize with
//! [`serde`] so a resolved tree can be dumped as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by model mutations that would break a tree invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A write-once path field already holds a value.
    #[error("entry '{code}' is already resolved to '{existing}'")]
    AlreadyResolved { code: String, existing: String },
}

/// The four content kinds a section can hold.
///
/// Section literals are matched case-insensitively; unknown literals are
/// rejected rather than mapped to a fallback kind.
///
/// # Examples
///
/// ```
/// use help_index_core::SectionKind;
///
/// assert_eq!(SectionKind::parse("tutorials"), Some(SectionKind::Tutorials));
/// assert_eq!(SectionKind::parse(" Videos "), Some(SectionKind::Videos));
/// assert_eq!(SectionKind::parse("DOWNLOADS"), None);
/// assert_eq!(SectionKind::Designers.as_str(), "DESIGNERS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    Help,
    Tutorials,
    Videos,
    Designers,
}

impl SectionKind {
    /// Every kind, in canonical order.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Help,
        SectionKind::Tutorials,
        SectionKind::Videos,
        SectionKind::Designers,
    ];

    /// Parses a section literal, ignoring ASCII case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Canonical upper-case literal (e.g. `"HELP"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Help => "HELP",
            Self::Tutorials => "TUTORIALS",
            Self::Videos => "VIDEOS",
            Self::Designers => "DESIGNERS",
        }
    }

    /// Lower-case literal, used for CSS class names.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Tutorials => "tutorials",
            Self::Videos => "videos",
            Self::Designers => "designers",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bullet line under a section.
///
/// `code` is the token before the separator (usually a model number) and
/// `label` the remaining description. The resolved document path and the
/// card image path are write-once: once set they are never overwritten.
///
/// # Examples
///
/// ```
/// use help_index_core::Entry;
///
/// let mut entry = Entry::new("MC6700P", "Getting Started Guide");
/// assert_eq!(entry.text(), "MC6700P Getting Started Guide");
/// assert!(entry.resolved_path().is_none());
///
/// entry.set_resolved_path("Extras/mc6700p-start.pdf").unwrap();
/// assert!(entry.set_resolved_path("Extras/other.pdf").is_err());
/// assert_eq!(entry.resolved_path(), Some("Extras/mc6700p-start.pdf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    code: String,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_path: Option<String>,
}

impl Entry {
    /// Creates an unresolved entry.
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            resolved_path: None,
            image_path: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Code and label joined by a single space; the label is omitted when empty.
    pub fn text(&self) -> String {
        if self.label.is_empty() {
            self.code.clone()
        } else {
            format!("{} {}", self.code, self.label)
        }
    }

    pub fn resolved_path(&self) -> Option<&str> {
        self.resolved_path.as_deref()
    }

    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_path.is_some()
    }

    /// Sets the resolved document path.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyResolved`] if a path was already set.
    pub fn set_resolved_path(&mut self, path: impl Into<String>) -> Result<(), ModelError> {
        set_once(&mut self.resolved_path, path.into(), &self.code)
    }

    /// Sets the card image path.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyResolved`] if an image was already set.
    pub fn set_image_path(&mut self, path: impl Into<String>) -> Result<(), ModelError> {
        set_once(&mut self.image_path, path.into(), &self.code)
    }

    /// Returns the first `http://` or `https://` token in the entry, if any.
    ///
    /// Video entries usually carry their link inline instead of pointing at
    /// a local file.
    ///
    /// # Examples
    ///
    /// ```
    /// use help_index_core::Entry;
    ///
    /// let entry = Entry::new("Intro", "Watch at https://example.com/v/1");
    /// assert_eq!(entry.link_url(), Some("https://example.com/v/1"));
    /// assert_eq!(Entry::new("Intro", "no link").link_url(), None);
    /// ```
    pub fn link_url(&self) -> Option<&str> {
        self.code
            .split_whitespace()
            .chain(self.label.split_whitespace())
            .find(|token| token.starts_with("http://") || token.starts_with("https://"))
    }
}

fn set_once(slot: &mut Option<String>, value: String, code: &str) -> Result<(), ModelError> {
    if let Some(existing) = slot {
        return Err(ModelError::AlreadyResolved {
            code: code.to_string(),
            existing: existing.clone(),
        });
    }
    *slot = Some(value);
    Ok(())
}

/// A run of entries of one [`SectionKind`] under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }
}

/// A grouping beneath a brand (e.g. a product series).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub sections: Vec<Section>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }
}

/// Top-level grouping in the help index (e.g. a manufacturer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub categories: Vec<Category>,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Name for display.
    ///
    /// A `GEN2` suffix becomes a separate ` Gen 2` word first; a name that
    /// is then still entirely upper-case is title-cased word by word.
    /// Anything else is returned verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use help_index_core::Brand;
    ///
    /// assert_eq!(Brand::new("QUILTMOTION").display_name(), "Quiltmotion");
    /// assert_eq!(Brand::new("APQSGEN2").display_name(), "APQS Gen 2");
    /// assert_eq!(Brand::new("APQS GEN2").display_name(), "APQS Gen 2");
    /// assert_eq!(Brand::new("Handi Quilter").display_name(), "Handi Quilter");
    /// ```
    pub fn display_name(&self) -> String {
        let name = if self.name.contains("GEN2") {
            self.name
                .replace("GEN2", " Gen 2")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            self.name.clone()
        };

        let has_letters = name.chars().any(char::is_alphabetic);
        let all_upper = !name.chars().any(char::is_lowercase);
        if !has_letters || !all_upper {
            return name;
        }

        name.split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Root of the normalized help index tree.
///
/// # Examples
///
/// ```
/// use help_index_core::*;
///
/// let mut section = Section::new(SectionKind::Help);
/// section.entries.push(Entry::new("MC6700P", "Getting Started Guide"));
/// let mut category = Category::new("Sewing");
/// category.sections.push(section);
/// category.sections.push(Section::new(SectionKind::Videos));
/// let mut brand = Brand::new("Janome");
/// brand.categories.push(category);
/// let mut document = Document::default();
/// document.brands.push(brand);
/// document.brands.push(Brand::new("Empty"));
///
/// document.prune();
/// assert_eq!(document.brands.len(), 1);
/// assert_eq!(document.brands[0].categories[0].sections.len(), 1);
/// assert_eq!(document.entry_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub brands: Vec<Brand>,
}

impl Document {
    /// Drops empty sections, then empty categories, then empty brands.
    /// Surviving nodes keep their order.
    pub fn prune(&mut self) {
        for brand in &mut self.brands {
            for category in &mut brand.categories {
                category.sections.retain(|section| !section.entries.is_empty());
            }
            brand.categories.retain(|category| !category.sections.is_empty());
        }
        self.brands.retain(|brand| !brand.categories.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Iterates every entry with the kind of its enclosing section, in tree order.
    pub fn entries(&self) -> impl Iterator<Item = (SectionKind, &Entry)> {
        self.brands
            .iter()
            .flat_map(|brand| brand.categories.iter())
            .flat_map(|category| category.sections.iter())
            .flat_map(|section| section.entries.iter().map(move |entry| (section.kind, entry)))
    }

    /// Mutable counterpart of [`entries`](Document::entries).
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (SectionKind, &mut Entry)> {
        self.brands
            .iter_mut()
            .flat_map(|brand| brand.categories.iter_mut())
            .flat_map(|category| category.sections.iter_mut())
            .flat_map(|section| {
                let kind = section.kind;
                section.entries.iter_mut().map(move |entry| (kind, entry))
            })
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }
}
