//! Referenced-files checklist rendering.

use chrono::NaiveDateTime;

use super::TIMESTAMP_FORMAT;

/// Renders the checklist of distinct referenced paths.
///
/// `present` decides the status glyph of each path (`✓` or `✗`); pass
/// `|_| true` when files are not checked on disk.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use help_index_pipeline::render::render_checklist;
///
/// let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let paths = vec!["Extras/a.pdf".to_string(), "Extras/b.pdf".to_string()];
/// let text = render_checklist(&paths, 3, at, |_| true);
/// assert!(text.starts_with("# Referenced Files Checklist\nGenerated: 2024-05-01 09:30:00\n"));
/// assert!(text.ends_with("Total Files: 2\nUnresolved Entries: 3\n\n✓ 1. Extras/a.pdf\n✓ 2. Extras/b.pdf\n"));
/// ```
pub fn render_checklist(
    paths: &[String],
    unresolved: usize,
    generated_at: NaiveDateTime,
    present: impl Fn(&str) -> bool,
) -> String {
    let mut out = String::new();
    out.push_str("# Referenced Files Checklist\n");
    out.push_str(&format!("Generated: {}\n", generated_at.format(TIMESTAMP_FORMAT)));
    out.push_str(&format!("Total Files: {}\n", paths.len()));
    out.push_str(&format!("Unresolved Entries: {unresolved}\n"));
    out.push('\n');

    for (index, path) in paths.iter().enumerate() {
        let status = if present(path) { '✓' } else { '✗' };
        out.push_str(&format!("{status} {}. {path}\n", index + 1));
    }
    out
}
