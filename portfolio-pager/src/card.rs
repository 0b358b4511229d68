//! Project card markup.
//!
//! Rendering is a pure function of the record: no lookups, no I/O.

use alloc::string::String;
use core::fmt::Write;

use crate::Project;

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the gallery card for one project.
///
/// The root element carries `data-category` and `data-id` so adapters can find and dedupe
/// rendered cards.
pub fn render_card(project: &Project) -> String {
    let title = escape_html(&project.title);
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        concat!(
            "<div class=\"project-card\" data-category=\"{category}\" data-id=\"{id}\">",
            "<img src=\"{image}\" alt=\"{title}\" loading=\"lazy\">",
            "<div class=\"project-card-content\">",
            "<span class=\"project-category\">{label}</span>",
            "<h3>{title}</h3>",
            "<a href=\"{url}\" class=\"project-link\" target=\"_blank\" rel=\"noopener\">",
            "<span>Visit Website</span>",
            "</a>",
            "</div>",
            "</div>"
        ),
        category = project.category.as_str(),
        id = project.id,
        image = escape_html(&project.image),
        title = title,
        label = escape_html(&project.display_category),
        url = escape_html(&project.url),
    );
    out
}

/// Renders `count` placeholder cards for the skeleton region.
pub fn render_skeleton_cards(count: usize) -> String {
    const SKELETON: &str = concat!(
        "<div class=\"project-card skeleton-card\">",
        "<div class=\"skeleton-image\"></div>",
        "<div class=\"project-card-content\">",
        "<div class=\"skeleton-category\"></div>",
        "<div class=\"skeleton-title\"></div>",
        "<div class=\"skeleton-link\"></div>",
        "</div>",
        "</div>"
    );
    SKELETON.repeat(count)
}
