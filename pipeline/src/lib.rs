//! Plain-text help index processing.
//!
//! This crate turns a hand-maintained help index into a browsable HTML page
//! and a checklist of the files the page references. A run has four stages:
//!
//! - [`builder::build_document`] classifies every line of the index and folds
//!   the result into a [`Document`] tree, dropping `EMPTY` placeholders and
//!   pruning branches left without entries.
//! - [`mapping::load_mapping`] reads the file listing into a [`MappingTable`]
//!   of image and document paths.
//! - [`resolve::resolve_document`] attaches the best-matching document (and
//!   image) to each entry by token overlap.
//! - [`render::render_html`] and [`render::render_checklist`] produce the
//!   outputs.
//!
//! [`run`] drives all stages against files on disk; [`transform`] does the
//! same on in-memory text.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use help_index_pipeline::config::IndexConfig;
//! use help_index_pipeline::transform;
//!
//! let index = "## ACME\n### Printers\n#### HELP\n- MC6700P: Getting Started Guide\n";
//! let mapping = "Extras/mc6700p-start.pdf: MC6700P Getting Started Guide\n";
//! let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//!
//! let out = transform(index, mapping, &IndexConfig::default(), at);
//! assert_eq!(out.referenced, vec!["Extras/mc6700p-start.pdf"]);
//! assert!(out.html.contains("href=\"Extras/mc6700p-start.pdf\""));
//! assert!(out.checklist.contains("✓ 1. Extras/mc6700p-start.pdf"));
//! ```
//!
//! [`Document`]: help_index_core::Document
//! [`MappingTable`]: help_index_core::MappingTable

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod mapping;
pub mod markup;
pub mod render;
pub mod report;
pub mod resolve;

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use help_index_core::{Document, MappingTable};
use tracing::{info, warn};

use config::IndexConfig;
use error::{PipelineError, Result};
use render::RenderContext;
use report::RunSummary;

/// Default help index path, relative to the working directory.
pub const DEFAULT_INDEX_PATH: &str = "HelpIndex.txt";
/// Default mapping list path.
pub const DEFAULT_MAPPING_PATH: &str = "listing.txt";
/// Default HTML output path.
pub const DEFAULT_HTML_PATH: &str = "index.html";
/// Default checklist output path.
pub const DEFAULT_CHECKLIST_PATH: &str = "file-checklist.txt";

/// Input and output locations for [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub index_path: PathBuf,
    pub mapping_path: PathBuf,
    pub html_path: PathBuf,
    pub checklist_path: PathBuf,
    /// Where to dump the resolved document as JSON, if anywhere.
    pub json_path: Option<PathBuf>,
    /// Mark referenced files missing from disk with `✗` in the checklist.
    ///
    /// Paths are looked up relative to the directory of the HTML output,
    /// since that is where the page's links point.
    pub check_files: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            mapping_path: PathBuf::from(DEFAULT_MAPPING_PATH),
            html_path: PathBuf::from(DEFAULT_HTML_PATH),
            checklist_path: PathBuf::from(DEFAULT_CHECKLIST_PATH),
            json_path: None,
            check_files: false,
        }
    }
}

/// Everything one pass over in-memory inputs produces.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// The resolved document tree.
    pub document: Document,
    pub table: MappingTable,
    /// Distinct resolved paths in first-seen order.
    pub referenced: Vec<String>,
    pub html: String,
    pub checklist: String,
    pub summary: RunSummary,
}

/// Runs every stage on in-memory text and renders with a fixed timestamp.
///
/// Every checklist path is marked present; use [`transform_with`] to decide
/// the glyph per path.
pub fn transform(
    index_text: &str,
    mapping_text: &str,
    config: &IndexConfig,
    generated_at: NaiveDateTime,
) -> Transformed {
    transform_with(index_text, mapping_text, config, generated_at, |_| true)
}

/// Like [`transform`], with `present` deciding whether each referenced
/// path exists.
pub fn transform_with(
    index_text: &str,
    mapping_text: &str,
    config: &IndexConfig,
    generated_at: NaiveDateTime,
    present: impl Fn(&str) -> bool,
) -> Transformed {
    let (mut document, build) = builder::build_document(index_text, config);
    info!(
        brands = build.brands,
        sections = build.sections,
        entries = build.entries,
        dropped = build.empty_markers,
        "Built document"
    );
    if document.is_empty() {
        warn!("Help index contains no entries");
    }

    let (table, mapping) = mapping::load_mapping(mapping_text, &config.mapping);
    info!(
        documents = mapping.documents,
        images = mapping.images,
        skipped = mapping.skipped_lines,
        "Loaded mapping"
    );
    if table.is_empty() {
        warn!("Mapping list contains no entries; nothing will be linked");
    }

    let resolution = resolve::resolve_document(&mut document, &table, &config.resolver);
    let referenced = render::distinct_resolved_paths(&document);

    let context = RenderContext {
        config: &config.render,
        generated_at,
        unresolved: resolution.unresolved,
    };
    let html = render::render_html(&document, &referenced, &context);

    let (checklist, missing_files) = {
        let missing: HashSet<&str> = referenced
            .iter()
            .map(String::as_str)
            .filter(|path| !present(*path))
            .collect();
        let checklist =
            render::render_checklist(&referenced, resolution.unresolved, generated_at, |path| {
                !missing.contains(path)
            });
        (checklist, missing.len())
    };

    let summary = RunSummary {
        build,
        mapping,
        referenced_files: referenced.len(),
        missing_files,
        resolution,
    };

    Transformed {
        document,
        table,
        referenced,
        html,
        checklist,
        summary,
    }
}

/// Reads both inputs, runs the pipeline and writes the outputs.
///
/// Both inputs are read before anything is written, so a missing input
/// leaves existing outputs untouched.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInput`] if an input cannot be read,
/// [`PipelineError::OutputWrite`] if an output cannot be written, and
/// [`PipelineError::Json`] if the JSON dump cannot be serialized.
pub fn run(options: &RunOptions, config: &IndexConfig) -> Result<RunSummary> {
    let index_text = read_input(&options.index_path)?;
    let mapping_text = read_input(&options.mapping_path)?;

    let generated_at = chrono::Local::now().naive_local();
    let base = options
        .html_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let check_files = options.check_files;

    let out = transform_with(&index_text, &mapping_text, config, generated_at, |path| {
        !check_files || base.join(path).exists()
    });
    if out.summary.missing_files > 0 {
        warn!(missing = out.summary.missing_files, "Referenced files not found on disk");
    }

    write_atomic(&options.html_path, &out.html)?;
    write_atomic(&options.checklist_path, &out.checklist)?;
    if let Some(json_path) = &options.json_path {
        let json = serde_json::to_string_pretty(&out.document)?;
        write_atomic(json_path, &json)?;
    }

    info!(
        html = %options.html_path.display(),
        checklist = %options.checklist_path.display(),
        referenced = out.summary.referenced_files,
        "Wrote outputs"
    );
    Ok(out.summary)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PipelineError::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let output_error = |source| PipelineError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        output_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(output_error(source));
    }
    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        output_error(source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_run_options_default_paths() {
        let options = RunOptions::default();
        assert_eq!(options.index_path, PathBuf::from("HelpIndex.txt"));
        assert_eq!(options.mapping_path, PathBuf::from("listing.txt"));
        assert_eq!(options.html_path, PathBuf::from("index.html"));
        assert_eq!(options.checklist_path, PathBuf::from("file-checklist.txt"));
        assert!(options.json_path.is_none());
        assert!(!options.check_files);
    }

    #[test]
    fn test_transform_counts_unresolved_entries() {
        let index = "## ACME\n### Printers\n#### HELP\n- MC6700P: Getting Started Guide\n- Zebra: Label Setup\n";
        let mapping = "Extras/mc6700p-start.pdf: MC6700P Getting Started Guide\n";
        let out = transform(index, mapping, &IndexConfig::default(), at());

        assert_eq!(out.summary.resolution.resolved, 1);
        assert_eq!(out.summary.resolution.unresolved, 1);
        assert_eq!(out.summary.referenced_files, 1);
        assert!(out.checklist.contains("Unresolved Entries: 1\n"));
        assert!(out.html.contains("Entries without a file: 1"));
    }

    #[test]
    fn test_transform_with_marks_missing_paths() {
        let index = "#### HELP\n- Alpha Guide\n- Beta Guide\n";
        let mapping = "docs/alpha.pdf: Alpha Guide\ndocs/beta.pdf: Beta Guide\n";
        let out = transform_with(index, mapping, &IndexConfig::default(), at(), |path| {
            path == "docs/alpha.pdf"
        });

        assert_eq!(out.summary.missing_files, 1);
        assert!(out.checklist.contains("✓ 1. docs/alpha.pdf\n"));
        assert!(out.checklist.contains("✗ 2. docs/beta.pdf\n"));
    }

    #[test]
    fn test_write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old contents that are longer").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join(".out.txt.tmp").exists());
    }

    #[test]
    fn test_write_atomic_reports_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.txt");

        let err = write_atomic(&path, "x").unwrap_err();
        assert!(matches!(err, PipelineError::OutputWrite { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_run_missing_index_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            index_path: dir.path().join("HelpIndex.txt"),
            mapping_path: dir.path().join("listing.txt"),
            html_path: dir.path().join("index.html"),
            checklist_path: dir.path().join("file-checklist.txt"),
            ..RunOptions::default()
        };
        fs::write(&options.mapping_path, "a.pdf: A\n").unwrap();

        let err = run(&options, &IndexConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { .. }));
        assert_eq!(err.path(), Some(options.index_path.as_path()));
        assert!(!options.html_path.exists());
        assert!(!options.checklist_path.exists());
    }
}
