//! Lecture listing scraper
//!
//! Extracts `(name, url)` pairs for one lecture category from the parsed
//! syllabus listing page.

use crate::syllabus::document::{inline_text, resolve_link, selector};
use crate::syllabus::model::{LectureCategory, LectureNameUrl};
use crate::ParseError;
use scraper::Html;
use url::Url;

/// Extracts the lectures listed under `category`, in document order
///
/// Every table row holding a link yields one entry. Rows without a usable
/// link or without link text are skipped. Duplicate rows are kept. A
/// category whose section is missing from the page yields an empty list.
///
/// # Arguments
///
/// * `document` - The parsed listing page
/// * `base_url` - URL of the listing page, for resolving relative links
/// * `category` - The category whose section to read
pub fn scrape_name_and_url(
    document: &Html,
    base_url: &Url,
    category: LectureCategory,
) -> Result<Vec<LectureNameUrl>, ParseError> {
    let section_selector = selector(category.section_selector())?;
    let row_selector = selector("tr")?;
    let link_selector = selector("a[href]")?;

    let mut lectures = Vec::new();
    let mut sections = 0;

    for section in document.select(&section_selector) {
        sections += 1;

        for row in section.select(&row_selector) {
            let Some(link) = row.select(&link_selector).next() else {
                continue;
            };

            let name = inline_text(&link);
            let url = link
                .value()
                .attr("href")
                .and_then(|href| resolve_link(href, base_url));

            match url {
                Some(url) if !name.is_empty() => lectures.push(LectureNameUrl { name, url }),
                _ => tracing::debug!("Skipping {} row without a usable link", category),
            }
        }
    }

    if sections == 0 {
        tracing::warn!(
            "No '{}' section ({}) on listing page {}",
            category,
            category.section_selector(),
            base_url
        );
    }

    Ok(lectures)
}
