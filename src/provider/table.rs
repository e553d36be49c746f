//! Extraction of media variants from the recovered download-section HTML
//!
//! HTML parsing stays inside this module; nothing scraper-specific leaks
//! into the provider contracts.

use crate::core::MediaVariant;
use crate::error::IgdlError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Origin used to absolutize relative progress-API targets
const SCRAPE_ORIGIN: &str = "https://snapsave.app";

/// Parse the download-section fragment into a ranked variant list.
///
/// Fails with `NoMediaFound` when neither the download table nor the
/// fallback button yields a usable URL.
pub fn parse_download_table(html: &str) -> Result<Vec<MediaVariant>, IgdlError> {
    let document = Html::parse_fragment(html);
    let row_selector = Selector::parse("table.table tr").expect("row selector");
    let cell_selector = Selector::parse("td").expect("cell selector");

    let mut variants = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.is_empty() {
            // Header rows and template fragments are tolerated silently
            continue;
        }

        let label = cell_text(&cells[0]);
        let url = cells.iter().find_map(|cell| action_url(cell));

        match url {
            Some(url) => {
                let label = if label.is_empty() { "video".to_string() } else { label };
                variants.push(MediaVariant::new(label, url));
            }
            None => {
                debug!(label = %label, "skipping row without a usable URL");
            }
        }
    }

    if variants.is_empty() {
        // Photo posts render a single primary button instead of a table
        let button_selector = Selector::parse("a.button.is-success").expect("button selector");
        if let Some(anchor) = document.select(&button_selector).next() {
            if let Some(href) = anchor.value().attr("href") {
                let label = {
                    let text = cell_text(&anchor);
                    if text.is_empty() { "download".to_string() } else { text }
                };
                variants.push(MediaVariant::new(label, href));
            }
        }
    }

    if variants.is_empty() {
        return Err(IgdlError::NoMediaFound);
    }

    Ok(rank(variants))
}

/// Text content of a cell, whitespace-collapsed
fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Direct URL carried by an action cell: an anchor `href`, or the target
/// of an inline `get_progressApi('...')` handler resolved against the
/// provider's origin.
///
/// The progress-API target is returned without a verification fetch and
/// may point at a non-terminal URL.
fn action_url(cell: &ElementRef) -> Option<String> {
    let anchor_selector = Selector::parse("a[href]").expect("anchor selector");
    if let Some(anchor) = cell.select(&anchor_selector).next() {
        let href = anchor.value().attr("href")?;
        if href.starts_with("http") {
            return Some(href.to_string());
        }
    }

    let handler_selector = Selector::parse("[onclick]").expect("handler selector");
    let progress_re = Regex::new(r"get_progressApi\('([^']+)'\)").ok()?;
    for element in cell.select(&handler_selector) {
        let onclick = element.value().attr("onclick")?;
        if let Some(captures) = progress_re.captures(onclick) {
            let target = captures.get(1)?.as_str();
            return Some(if target.starts_with("http") {
                target.to_string()
            } else if target.starts_with('/') {
                format!("{}{}", SCRAPE_ORIGIN, target)
            } else {
                format!("{}/{}", SCRAPE_ORIGIN, target)
            });
        }
    }

    None
}

/// Move the canonical best variant to the front.
///
/// The first label containing "1080" wins; otherwise document order is
/// already the ranking. Nothing is discarded so callers can still offer
/// a quality choice.
pub fn rank(mut variants: Vec<MediaVariant>) -> Vec<MediaVariant> {
    if let Some(pos) = variants.iter().position(|v| v.label.contains("1080")) {
        let best = variants.remove(pos);
        variants.insert(0, best);
    }
    variants
}
