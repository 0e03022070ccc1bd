//! Plain-text table rendering.

use std::fmt::Write;

use artworks_lib::model::Artwork;
use artworks_lib::PageView;

/// Column titles and widths, in display order.
const COLUMNS: &[(&str, usize)] = &[
    ("", 3),
    ("ID", 7),
    ("Title", 32),
    ("Place of Origin", 16),
    ("Artist Display", 28),
    ("Inscriptions", 20),
    ("Start", 6),
    ("End", 6),
];

/// Renders one page of the table, followed by a status line.
pub fn render_page(view: &PageView<'_>, selected_total: usize) -> String {
    let mut out = String::new();

    let header: Vec<_> = COLUMNS
        .iter()
        .map(|(title, width)| pad(title, *width))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));
    let rule: Vec<_> = COLUMNS.iter().map(|(_, width)| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    if view.records.is_empty() {
        let message = if view.loading {
            "Loading..."
        } else {
            "No artworks found."
        };
        let _ = writeln!(out, "{message}");
    }

    for artwork in view.records {
        let cells = row(artwork, view.is_checked(artwork.id));
        let line: Vec<_> = cells
            .iter()
            .zip(COLUMNS)
            .map(|(cell, (_, width))| pad(cell, *width))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | "));
    }

    let _ = write!(
        out,
        "Page {} of {} ({} records) | {} selected",
        view.page_number,
        view.total_pages.max(1),
        view.total_records,
        selected_total
    );
    if view.loading {
        out.push_str(" | loading");
    }

    out
}

fn row(artwork: &Artwork, checked: bool) -> [String; 8] {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .and_then(|s| s.lines().next())
            .unwrap_or_default()
            .to_string()
    };
    let year = |value: Option<i32>| value.map(|y| y.to_string()).unwrap_or_default();

    [
        if checked { "[x]" } else { "[ ]" }.to_string(),
        artwork.id.to_string(),
        text(&artwork.title),
        text(&artwork.place_of_origin),
        text(&artwork.artist_display),
        text(&artwork.inscriptions),
        year(artwork.date_start),
        year(artwork.date_end),
    ]
}

/// Pads or truncates `value` to exactly `width` characters.
fn pad(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        format!("{value:<width$}")
    } else {
        let mut truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}
