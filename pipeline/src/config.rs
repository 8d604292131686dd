//! Pipeline configuration.
//!
//! Every marker, keyword, threshold and style the pipeline uses lives in an
//! [`IndexConfig`] that is passed explicitly to each stage. The config can
//! be loaded from YAML; omitted fields fall back to the built-in defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! classifier:
//!   brand_marker: "##"
//!   category_marker: "###"
//!   section_marker: "####"
//! resolver:
//!   min_score: 0.3
//!   linkable_sections: [HELP, TUTORIALS]
//! render:
//!   title: "Machine Help Index"
//! ```

use std::io::BufReader;
use std::path::Path;

use help_index_core::SectionKind;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Lexical markers recognized by the line classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// First token of a brand header line.
    pub brand_marker: String,
    /// First token of a category header line.
    pub category_marker: String,
    /// First token of a section header line.
    pub section_marker: String,
    /// Prefixes that start a bullet entry.
    pub bullet_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            brand_marker: "##".to_string(),
            category_marker: "###".to_string(),
            section_marker: "####".to_string(),
            bullet_markers: vec!["-".to_string(), "*".to_string(), "•".to_string()],
        }
    }
}

/// Settings for turning classified lines into a document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Splits a bullet body into code and label at its first occurrence.
    pub separator: char,
    /// Bullet body marking a section with no content.
    pub empty_marker: String,
    /// Brand name used when a category appears before any brand.
    pub implicit_brand: String,
    /// Category name used when a section appears before any category.
    pub implicit_category: String,
    /// Section kind used when an entry appears before any section.
    pub implicit_section: SectionKind,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            separator: ':',
            empty_marker: "EMPTY".to_string(),
            implicit_brand: "Uncategorized".to_string(),
            implicit_category: "General".to_string(),
            implicit_section: SectionKind::Help,
        }
    }
}

/// Settings for the mapping list loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Prefixes that mark a comment (region header) line.
    pub comment_prefixes: Vec<String>,
    /// Words in a comment header that switch to image mode.
    pub image_keywords: Vec<String>,
    /// Words in a comment header that switch to document mode.
    pub document_keywords: Vec<String>,
    /// Extensions treated as images before any region header is seen.
    pub image_extensions: Vec<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            comment_prefixes: vec!["#".to_string(), "//".to_string()],
            image_keywords: ["image", "images", "img"].map(String::from).to_vec(),
            document_keywords: ["pdf", "pdfs", "document", "documents", "help", "tutorial", "tutorials"]
                .map(String::from)
                .to_vec(),
            image_extensions: ["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Settings for fuzzy entry resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// A candidate qualifies only when its score is strictly above this value.
    pub min_score: f64,
    /// Section kinds whose entries are resolved to document files. VIDEOS is
    /// never linkable; its entries carry their own URLs.
    pub linkable_sections: Vec<SectionKind>,
    /// Also match every entry against image mappings for card thumbnails.
    pub resolve_images: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_score: 0.2,
            linkable_sections: vec![SectionKind::Help, SectionKind::Tutorials, SectionKind::Designers],
            resolve_images: true,
        }
    }
}

impl ResolverConfig {
    pub fn is_linkable(&self, kind: SectionKind) -> bool {
        kind != SectionKind::Videos && self.linkable_sections.contains(&kind)
    }
}

/// Icon and accent color for one section kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStyle {
    pub icon: String,
    pub color: String,
}

impl SectionStyle {
    fn new(icon: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// Page text and per-section styling for the HTML renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub title: String,
    pub subtitle: String,
    pub help: SectionStyle,
    pub tutorials: SectionStyle,
    pub videos: SectionStyle,
    pub designers: SectionStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Quilt Help Index".to_string(),
            subtitle: "Your comprehensive guide to quilting machine resources".to_string(),
            help: SectionStyle::new("📖", "#e74c3c"),
            tutorials: SectionStyle::new("🎓", "#f39c12"),
            videos: SectionStyle::new("🎥", "#9b59b6"),
            designers: SectionStyle::new("✨", "#1abc9c"),
        }
    }
}

impl RenderConfig {
    pub fn style(&self, kind: SectionKind) -> &SectionStyle {
        match kind {
            SectionKind::Help => &self.help,
            SectionKind::Tutorials => &self.tutorials,
            SectionKind::Videos => &self.videos,
            SectionKind::Designers => &self.designers,
        }
    }
}

/// Top-level pipeline configuration.
///
/// # Examples
///
/// ```
/// use help_index_pipeline::config::IndexConfig;
///
/// let config: IndexConfig = serde_yaml::from_str("resolver:\n  min_score: 0.5\n").unwrap();
/// assert_eq!(config.resolver.min_score, 0.5);
/// assert_eq!(config.classifier.section_marker, "####");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub classifier: ClassifierConfig,
    pub builder: BuilderConfig,
    pub mapping: MappingConfig,
    pub resolver: ResolverConfig,
    pub render: RenderConfig,
}

impl IndexConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the file cannot be read or is
    /// not valid YAML for this structure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| PipelineError::Config {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        let config: Self =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|err| PipelineError::Config {
                path: path.to_path_buf(),
                detail: err.to_string(),
            })?;
        config.check().map_err(|detail| PipelineError::Config {
            path: path.to_path_buf(),
            detail,
        })?;
        Ok(config)
    }

    /// Rejects settings no stage can work with.
    pub fn check(&self) -> std::result::Result<(), String> {
        let markers = [
            &self.classifier.brand_marker,
            &self.classifier.category_marker,
            &self.classifier.section_marker,
        ];
        if markers.iter().any(|marker| marker.trim().is_empty()) {
            return Err("header markers cannot be empty".to_string());
        }
        if markers[0] == markers[1] || markers[0] == markers[2] || markers[1] == markers[2] {
            return Err("header markers must be distinct".to_string());
        }
        if self.classifier.bullet_markers.iter().any(|marker| marker.is_empty()) {
            return Err("bullet markers cannot be empty".to_string());
        }
        if self.resolver.linkable_sections.contains(&SectionKind::Videos) {
            return Err("resolver.linkable_sections cannot include VIDEOS".to_string());
        }
        if !(0.0..1.0).contains(&self.resolver.min_score) {
            return Err("resolver.min_score must be in [0.0, 1.0)".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
resolver:
  linkable_sections: [HELP]
render:
  title: "Shop Index"
"#;
        let config: IndexConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.resolver.linkable_sections, vec![SectionKind::Help]);
        assert_eq!(config.resolver.min_score, 0.2);
        assert!(config.resolver.resolve_images);
        assert_eq!(config.render.title, "Shop Index");
        assert_eq!(config.render.videos.icon, "🎥");
        assert_eq!(config.builder, BuilderConfig::default());
    }

    #[test]
    fn test_load_reports_invalid_yaml_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "resolver: [not, a, map]\n").unwrap();

        let err = IndexConfig::load(&path).unwrap_err();
        match err {
            PipelineError::Config { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_rejects_duplicate_markers() {
        let mut config = IndexConfig::default();
        config.classifier.category_marker = "##".to_string();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_check_rejects_out_of_range_threshold() {
        let mut config = IndexConfig::default();
        config.resolver.min_score = 1.0;
        assert!(config.check().is_err());
        config.resolver.min_score = 0.0;
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_check_rejects_linkable_videos() {
        let config: IndexConfig =
            serde_yaml::from_str("resolver:\n  linkable_sections: [HELP, VIDEOS]\n").unwrap();
        let err = config.check().unwrap_err();
        assert!(err.contains("VIDEOS"));
        assert!(!config.resolver.is_linkable(SectionKind::Videos));
        assert!(config.resolver.is_linkable(SectionKind::Help));
    }

    #[test]
    fn test_load_refuses_linkable_videos() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "resolver:\n  linkable_sections: [VIDEOS]\n").unwrap();

        let err = IndexConfig::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config { .. }));
    }

    #[test]
    fn test_linkable_sections_exclude_videos_by_default() {
        let config = ResolverConfig::default();
        assert!(config.is_linkable(SectionKind::Help));
        assert!(config.is_linkable(SectionKind::Designers));
        assert!(!config.is_linkable(SectionKind::Videos));
    }
}
