//! HTML index page rendering.
//!
//! Produces one self-contained page: embedded CSS, one block per brand and
//! category, and a grid of cards per section with one card per entry.

use help_index_core::{Category, Document, Entry, Section, SectionKind};

use super::{RenderContext, TIMESTAMP_FORMAT};

const BASE_CSS: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            background: #f4f6f9;
            color: #333;
            padding: 20px;
            min-height: 100vh;
        }
        .container { max-width: 1400px; margin: 0 auto; }
        header, .brand, footer {
            background: #fff;
            border-radius: 14px;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.08);
            padding: 28px;
            margin-bottom: 28px;
        }
        header { text-align: center; }
        h1 { color: #2c3e50; font-size: 2.4em; margin-bottom: 8px; }
        .subtitle { color: #7f8c8d; font-size: 1.1em; }
        .brand-title {
            color: #3498db;
            font-size: 2em;
            padding-bottom: 10px;
            margin-bottom: 18px;
            border-bottom: 3px solid #3498db;
        }
        .category { margin-bottom: 22px; }
        .category-title { color: #34495e; font-size: 1.4em; margin-bottom: 12px; }
        .section { margin-bottom: 18px; }
        .section-header {
            display: flex;
            align-items: center;
            gap: 10px;
            font-size: 1.15em;
            font-weight: bold;
            margin-bottom: 10px;
        }
        .card-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
            gap: 16px;
        }
        .card {
            background: #f8f9fa;
            border-left: 4px solid #bdc3c7;
            border-radius: 10px;
            padding: 16px;
            transition: transform 0.2s, box-shadow 0.2s;
        }
        .card:hover { transform: translateY(-4px); box-shadow: 0 6px 12px rgba(0, 0, 0, 0.12); }
        .card-image { width: 100%; max-height: 160px; object-fit: contain; margin-bottom: 10px; }
        .card-code { display: block; font-weight: bold; color: #2c3e50; }
        .card-label { display: block; color: #555; margin-top: 4px; }
        .card-link {
            display: inline-flex;
            align-items: center;
            gap: 6px;
            margin-top: 10px;
            color: #3498db;
            text-decoration: none;
        }
        .card-link:hover { text-decoration: underline; }
        .empty-index { color: #7f8c8d; text-align: center; }
        footer { text-align: center; color: #7f8c8d; }
        @media (max-width: 768px) {
            .card-grid { grid-template-columns: 1fr; }
            h1 { font-size: 1.8em; }
            .brand-title { font-size: 1.5em; }
        }
"#;

/// Escapes text for use in HTML content and quoted attribute values.
///
/// # Examples
///
/// ```
/// use help_index_pipeline::render::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Keeps only characters that can appear in a plain CSS color value.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '#' | '(' | ')' | ',' | '.' | '%' | ' '))
        .collect()
}

/// Renders the complete HTML page.
///
/// `referenced` is the list of distinct resolved paths; only its length is
/// shown, in the footer.
pub fn render_html(document: &Document, referenced: &[String], context: &RenderContext<'_>) -> String {
    let config = context.config;
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("    <title>{}</title>\n", escape_html(&config.title)));
    out.push_str("    <style>");
    out.push_str(BASE_CSS);
    for kind in SectionKind::ALL {
        let color = css_value(&config.style(kind).color);
        let class = kind.css_class();
        out.push_str(&format!(
            "        .card.{class} {{ border-left-color: {color}; }}\n        .section-header.{class} {{ color: {color}; }}\n"
        ));
    }
    out.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");

    out.push_str("        <header>\n");
    out.push_str(&format!("            <h1>🧵 {}</h1>\n", escape_html(&config.title)));
    out.push_str(&format!(
        "            <p class=\"subtitle\">{}</p>\n",
        escape_html(&config.subtitle)
    ));
    out.push_str("        </header>\n");

    if document.is_empty() {
        out.push_str("        <section class=\"brand\">\n");
        out.push_str("            <p class=\"empty-index\">No help entries found.</p>\n");
        out.push_str("        </section>\n");
    }

    for brand in &document.brands {
        out.push_str("        <section class=\"brand\">\n");
        out.push_str(&format!(
            "            <h2 class=\"brand-title\">{}</h2>\n",
            escape_html(&brand.display_name())
        ));
        for category in &brand.categories {
            render_category(&mut out, category, context);
        }
        out.push_str("        </section>\n");
    }

    out.push_str("        <footer>\n");
    out.push_str(&format!(
        "            <p>Generated on {}</p>\n",
        context.generated_at.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!(
        "            <p>Total resources: {} files referenced</p>\n",
        referenced.len()
    ));
    if context.unresolved > 0 {
        out.push_str(&format!(
            "            <p>Entries without a file: {}</p>\n",
            context.unresolved
        ));
    }
    out.push_str("        </footer>\n");
    out.push_str("    </div>\n</body>\n</html>\n");
    out
}

fn render_category(out: &mut String, category: &Category, context: &RenderContext<'_>) {
    out.push_str("            <div class=\"category\">\n");
    out.push_str(&format!(
        "                <h3 class=\"category-title\">{}</h3>\n",
        escape_html(&category.name)
    ));
    for section in &category.sections {
        render_section(out, section, context);
    }
    out.push_str("            </div>\n");
}

fn render_section(out: &mut String, section: &Section, context: &RenderContext<'_>) {
    let class = section.kind.css_class();
    let style = context.config.style(section.kind);

    out.push_str(&format!("                <div class=\"section {class}\">\n"));
    out.push_str(&format!(
        "                    <h4 class=\"section-header {class}\"><span class=\"icon\">{}</span><span>{}</span></h4>\n",
        escape_html(&style.icon),
        section.kind
    ));
    out.push_str("                    <div class=\"card-grid\">\n");
    for entry in &section.entries {
        render_card(out, entry, section.kind);
    }
    out.push_str("                    </div>\n");
    out.push_str("                </div>\n");
}

fn render_card(out: &mut String, entry: &Entry, kind: SectionKind) {
    out.push_str(&format!(
        "                        <article class=\"card {}\">\n",
        kind.css_class()
    ));
    if let Some(image) = entry.image_path() {
        out.push_str(&format!(
            "                            <img class=\"card-image\" src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
            escape_html(image),
            escape_html(entry.code())
        ));
    }
    out.push_str(&format!(
        "                            <span class=\"card-code\">{}</span>\n",
        escape_html(entry.code())
    ));
    if !entry.label().is_empty() {
        out.push_str(&format!(
            "                            <span class=\"card-label\">{}</span>\n",
            escape_html(entry.label())
        ));
    }

    let link = match entry.resolved_path() {
        Some(path) => Some((path, "📄", "Open document")),
        None if kind == SectionKind::Videos => entry.link_url().map(|url| (url, "🎥", "Watch video")),
        None => None,
    };
    if let Some((href, icon, text)) = link {
        out.push_str(&format!(
            "                            <a class=\"card-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\"><span>{icon}</span><span>{text}</span></a>\n",
            escape_html(href)
        ));
    }
    out.push_str("                        </article>\n");
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::builder::build_document;
    use crate::config::{IndexConfig, RenderConfig};
    use crate::mapping::load_mapping;
    use crate::render::distinct_resolved_paths;
    use crate::resolve::resolve_document;

    fn render(index: &str, mapping: &str) -> String {
        let config = IndexConfig::default();
        let (mut document, _) = build_document(index, &config);
        let (table, _) = load_mapping(mapping, &config.mapping);
        let summary = resolve_document(&mut document, &table, &config.resolver);
        let referenced = distinct_resolved_paths(&document);
        let render_config = RenderConfig::default();
        let context = RenderContext {
            config: &render_config,
            generated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            unresolved: summary.unresolved,
        };
        render_html(&document, &referenced, &context)
    }

    #[test]
    fn test_resolved_entry_links_to_document() {
        let html = render(
            "## JANOME\n### Sewing\n#### HELP\n- MC6700P: Getting Started Guide\n",
            "Extras/mc6700p-start.pdf: MC6700P Getting Started Guide\n",
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2 class=\"brand-title\">Janome</h2>"));
        assert!(html.contains("<h3 class=\"category-title\">Sewing</h3>"));
        assert!(html.contains("href=\"Extras/mc6700p-start.pdf\""));
        assert!(html.contains("<span class=\"card-code\">MC6700P</span>"));
        assert!(html.contains("Generated on 2024-05-01 09:30:00"));
        assert!(html.contains("Total resources: 1 files referenced"));
        assert!(!html.contains("Entries without a file"));
    }

    #[test]
    fn test_unresolved_entry_has_no_link() {
        let html = render("#### HELP\n- Z9: Unknown\n", "a.pdf: Something Else\n");
        assert!(html.contains("<span class=\"card-code\">Z9</span>"));
        assert!(!html.contains("class=\"card-link\""));
        assert!(html.contains("Entries without a file: 1"));
    }

    #[test]
    fn test_empty_marker_never_reaches_html() {
        let html = render(
            "## Brand\n### Cat\n#### HELP\n- A1: Manual\n#### VIDEOS\n- EMPTY\n",
            "",
        );
        assert!(!html.contains("EMPTY"));
        assert!(!html.contains("section videos"));
        assert!(html.contains("section help"));
    }

    #[test]
    fn test_video_entries_link_inline_urls() {
        let html = render(
            "#### VIDEOS\n- Threading: https://example.com/watch?v=1&t=2\n",
            "",
        );
        assert!(html.contains("href=\"https://example.com/watch?v=1&amp;t=2\""));
        assert!(html.contains("Watch video"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render("## <script>\n### A & B\n#### HELP\n- X<1>: \"quoted\"\n", "");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("X&lt;1&gt;"));
        assert!(html.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_card_image_is_rendered() {
        let html = render("#### HELP\n- A1: Manual\n", "# Images\nimages/a1.png: A1\n");
        assert!(html.contains("<img class=\"card-image\" src=\"images/a1.png\" alt=\"A1\""));
    }

    #[test]
    fn test_empty_document_renders_placeholder() {
        let html = render("nothing useful\n", "");
        assert!(html.contains("No help entries found."));
        assert!(html.contains("Total resources: 0 files referenced"));
    }

    #[test]
    fn test_css_value_strips_markup() {
        assert_eq!(css_value("#e74c3c"), "#e74c3c");
        assert_eq!(css_value("red;}</style><script>"), "redstylescript");
        assert_eq!(css_value("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
    }
}
