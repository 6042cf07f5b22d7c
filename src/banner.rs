//! Startup banner printed before the listener binds.

use std::env;

const APP_NAME: &str = "RESTam";
const PADDING: usize = 4;
const MIN_BOX_WIDTH: usize = 10;
const DEFAULT_WIDTH: usize = 80;

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_BOLD_CYAN: &str = "\u{1b}[1m\u{1b}[36m";
const ANSI_YELLOW: &str = "\u{1b}[33m";

fn centered(text: &str, inner: usize, margin: &str, color: &str) -> String {
    let len = text.chars().count();
    let start = inner.saturating_sub(len) / 2;
    let end = inner.saturating_sub(start + len);
    format!(
        "{margin}║{}{color}{text}{ANSI_RESET}{}║\n",
        " ".repeat(start),
        " ".repeat(end)
    )
}

/// Render the boxed banner centred in a terminal `width` columns wide.
///
/// The second line, when given, is wrapped in typographic quotes.
#[must_use]
pub fn render(title: &str, inspiration: Option<&str>, width: usize) -> String {
    let quoted = inspiration.map(|text| format!("“{text}”"));
    let widest = title
        .chars()
        .count()
        .max(quoted.as_deref().map_or(0, |q| q.chars().count()));
    let content_width = widest + PADDING * 2;
    let box_width = (content_width + 2)
        .max(MIN_BOX_WIDTH)
        .min(width.saturating_sub(2).max(MIN_BOX_WIDTH));
    let margin = " ".repeat(width.saturating_sub(box_width) / 2);
    let horizontal = "═".repeat(box_width - 2);

    let mut out = String::from("\n");
    out.push_str(&format!("{margin}╔{horizontal}╗\n"));
    out.push_str(&centered(title, box_width - 2, &margin, ANSI_BOLD_CYAN));
    if let Some(q) = &quoted {
        out.push_str(&centered(q, box_width - 2, &margin, ANSI_YELLOW));
    }
    out.push_str(&format!("{margin}╚{horizontal}╝\n"));
    out
}

fn terminal_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .unwrap_or(DEFAULT_WIDTH)
}

/// Print the banner for this build to stdout.
///
/// The version comes from the crate manifest; `RESTAM_INSPIRATION` adds an
/// optional quoted second line.
pub fn print() {
    let title = format!("{APP_NAME} v{}", env!("CARGO_PKG_VERSION"));
    let inspiration = env::var("RESTAM_INSPIRATION")
        .ok()
        .map(|s| s.replace('"', "").trim().to_string())
        .filter(|s| !s.is_empty());
    println!("{}", render(&title, inspiration.as_deref(), terminal_width()));
}
