//! HTML document helpers shared by the listing and detail scrapers
//!
//! This module handles:
//! - Turning a fetched page into a queryable [`Html`] document
//! - Normalizing element text
//! - Resolving link targets against the page URL

use crate::syllabus::fetcher::FetchedPage;
use crate::ParseError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Parses a fetched page into an HTML document
///
/// Fails when the server declared a non-HTML content type or the body is
/// blank. html5ever recovers from any malformed markup, so those are the
/// only pages that cannot be treated as HTML.
pub fn parse_page(page: &FetchedPage) -> Result<Html, ParseError> {
    if let Some(content_type) = &page.content_type {
        if !is_html_content_type(content_type) {
            return Err(ParseError::NotHtml {
                url: page.final_url.clone(),
                content_type: content_type.clone(),
            });
        }
    }

    if page.body.trim().is_empty() {
        return Err(ParseError::EmptyDocument {
            url: page.final_url.clone(),
        });
    }

    Ok(Html::parse_document(&page.body))
}

fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

/// Parses a CSS selector
pub fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::InvalidSelector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Text content of an element with runs of whitespace collapsed to one space
pub fn inline_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content of an element keeping its line structure
///
/// `<br>` elements become line breaks; each line is collapsed like
/// [`inline_text`] and blank lines are dropped.
pub fn block_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        if let Some(text) = node.value().as_text() {
            raw.push_str(text);
        } else if let Some(el) = node.value().as_element() {
            if el.name() == "br" {
                raw.push('\n');
            }
        }
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves a link href to an absolute http(s) URL
///
/// Returns None for empty, fragment-only and `javascript:`/`mailto:` links
/// and for anything that does not resolve to http or https.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
