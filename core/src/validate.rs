//! Structural validation of document trees.
//!
//! Checks the invariants a built and resolved [`Document`] must satisfy:
//! named brands and categories, no empty nodes after pruning, and resolved
//! paths that come verbatim from the mapping table.
//!
//! # Examples
//!
//! ```
//! use help_index_core::*;
//!
//! let mut section = Section::new(SectionKind::Help);
//! section.entries.push(Entry::new("A1", "Manual"));
//! let mut category = Category::new("Series A");
//! category.sections.push(section);
//! let mut brand = Brand::new("ACME");
//! brand.categories.push(category);
//! let document = Document { brands: vec![brand] };
//! assert!(validate_document(&document, None).is_empty());
//!
//! // A brand with nothing under it should have been pruned.
//! let mut bad = document.clone();
//! bad.brands.push(Brand::new("Ghost"));
//! assert!(!validate_document(&bad, None).is_empty());
//! ```

use thiserror::Error;

use crate::{Document, MappingTable};

/// Document validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Brand name is empty or whitespace-only.
    #[error("brand name cannot be empty")]
    EmptyBrandName,
    /// Category name is empty or whitespace-only.
    #[error("category name cannot be empty (brand: {0})")]
    EmptyCategoryName(String),
    /// Brand survived with no categories.
    #[error("brand has no categories: {0}")]
    EmptyBrand(String),
    /// Category survived with no sections.
    #[error("category has no sections: {0}")]
    EmptyCategory(String),
    /// Section survived with no entries.
    #[error("section has no entries: {0}")]
    EmptySection(String),
    /// A resolved or image path is not present in the mapping table.
    #[error("path not present in mapping table: {0}")]
    UnknownPath(String),
}

/// Validates a document tree, optionally against the mapping table it was
/// resolved with.
///
/// Returns every problem found, in tree order.
pub fn validate_document(document: &Document, table: Option<&MappingTable>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for brand in &document.brands {
        if brand.name.trim().is_empty() {
            errors.push(ValidationError::EmptyBrandName);
        }
        if brand.categories.is_empty() {
            errors.push(ValidationError::EmptyBrand(brand.name.clone()));
        }

        for category in &brand.categories {
            let category_path = format!("{} / {}", brand.name, category.name);
            if category.name.trim().is_empty() {
                errors.push(ValidationError::EmptyCategoryName(brand.name.clone()));
            }
            if category.sections.is_empty() {
                errors.push(ValidationError::EmptyCategory(category_path.clone()));
            }

            for section in &category.sections {
                if section.entries.is_empty() {
                    errors.push(ValidationError::EmptySection(format!(
                        "{category_path} / {}",
                        section.kind
                    )));
                }
            }
        }
    }

    if let Some(table) = table {
        for (_, entry) in document.entries() {
            for path in [entry.resolved_path(), entry.image_path()].into_iter().flatten() {
                if !table.contains_path(path) {
                    errors.push(ValidationError::UnknownPath(path.to_string()));
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::{Brand, Category, Entry, MappingEntry, MappingKind, Section, SectionKind};

    use super::*;

    fn document_with(entry: Entry) -> Document {
        let mut section = Section::new(SectionKind::Help);
        section.entries.push(entry);
        let mut category = Category::new("Series A");
        category.sections.push(section);
        let mut brand = Brand::new("ACME");
        brand.categories.push(category);
        Document {
            brands: vec![brand],
        }
    }

    #[test]
    fn test_validate_rejects_empty_section() {
        let mut document = document_with(Entry::new("A1", "Manual"));
        document.brands[0].categories[0]
            .sections
            .push(Section::new(SectionKind::Videos));

        let errors = validate_document(&document, None);
        assert_eq!(
            errors,
            vec![ValidationError::EmptySection(
                "ACME / Series A / VIDEOS".to_string()
            )]
        );
    }

    #[test]
    fn test_validate_rejects_unknown_resolved_path() {
        let mut entry = Entry::new("A1", "Manual");
        entry.set_resolved_path("Extras/missing.pdf").unwrap();
        let document = document_with(entry);

        let mut table = MappingTable::new();
        table.push(MappingEntry::new("Extras/a1.pdf", "A1 Manual", MappingKind::Document));

        let errors = validate_document(&document, Some(&table));
        assert_eq!(
            errors,
            vec![ValidationError::UnknownPath("Extras/missing.pdf".to_string())]
        );
    }

    #[test]
    fn test_validate_accepts_known_paths() {
        let mut entry = Entry::new("A1", "Manual");
        entry.set_resolved_path("Extras/a1.pdf").unwrap();
        entry.set_image_path("images/a1.png").unwrap();
        let document = document_with(entry);

        let mut table = MappingTable::new();
        table.push(MappingEntry::new("images/a1.png", "A1", MappingKind::Image));
        table.push(MappingEntry::new("Extras/a1.pdf", "A1 Manual", MappingKind::Document));

        assert!(validate_document(&document, Some(&table)).is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        let mut document = document_with(Entry::new("A1", "Manual"));
        document.brands[0].name = " ".to_string();
        document.brands[0].categories[0].name = String::new();

        let errors = validate_document(&document, None);
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyBrandName,
                ValidationError::EmptyCategoryName(" ".to_string()),
            ]
        );
    }
}
