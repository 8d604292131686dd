//! Core document and mapping types for help index transformation.
//!
//! This crate defines the normalized tree that the pipeline builds from a
//! help index, and the mapping table it resolves entries against:
//!
//! - [`Document`] → [`Brand`] → [`Category`] → [`Section`] → [`Entry`]: the
//!   ordered help index tree. Sections carry one of four [`SectionKind`]s.
//! - [`MappingTable`]: an ordered, append-only list of [`MappingEntry`]
//!   values, each tagged [`MappingKind::Image`] or [`MappingKind::Document`].
//!
//! Validation ([`validate_document`]) checks the structural invariants a
//! finished tree must satisfy.
//!
//! # Example
//!
//! ```
//! use help_index_core::*;
//!
//! let mut section = Section::new(SectionKind::Help);
//! section.entries.push(Entry::new("MC6700P", "Getting Started Guide"));
//! let mut category = Category::new("Sewing");
//! category.sections.push(section);
//! let mut brand = Brand::new("Janome");
//! brand.categories.push(category);
//! let document = Document { brands: vec![brand] };
//!
//! let mut table = MappingTable::new();
//! table.push(MappingEntry::new(
//!     "Extras/mc6700p-start.pdf",
//!     "MC6700P Getting Started Guide",
//!     MappingKind::Document,
//! ));
//!
//! assert_eq!(document.entry_count(), 1);
//! assert!(validate_document(&document, Some(&table)).is_empty());
//! ```

mod mapping;
mod types;
mod validate;

pub use mapping::{MappingEntry, MappingKind, MappingTable};
pub use types::*;
pub use validate::{ValidationError, validate_document};
