use serde::{Deserialize, Serialize};

/// Whether a mapped file is a card image or a linkable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    Image,
    Document,
}

/// One file-path-to-description association from the mapping list.
///
/// Entries are immutable once created: fields are private and only
/// readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    path: String,
    description: String,
    kind: MappingKind,
}

impl MappingEntry {
    pub fn new(path: impl Into<String>, description: impl Into<String>, kind: MappingKind) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }
}

/// Ordered table of mapping entries.
///
/// Insertion order is preserved and decides ties during resolution, so the
/// table is append-only and never sorted.
///
/// # Examples
///
/// ```
/// use help_index_core::*;
///
/// let mut table = MappingTable::new();
/// table.push(MappingEntry::new("images/a.png", "Series A", MappingKind::Image));
/// table.push(MappingEntry::new("Extras/a.pdf", "Series A Manual", MappingKind::Document));
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.documents().count(), 1);
/// assert_eq!(table.images().next().unwrap().path(), "images/a.png");
/// assert!(table.contains_path("Extras/a.pdf"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end of the table.
    pub fn push(&mut self, entry: MappingEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Entries of the given kind, in insertion order.
    pub fn of_kind(&self, kind: MappingKind) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    pub fn documents(&self) -> impl Iterator<Item = &MappingEntry> {
        self.of_kind(MappingKind::Document)
    }

    pub fn images(&self) -> impl Iterator<Item = &MappingEntry> {
        self.of_kind(MappingKind::Image)
    }

    /// Returns `true` if some entry carries exactly this path.
    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
