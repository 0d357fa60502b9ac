//! Lecture detail scraper
//!
//! Reads the session plan table of a lecture detail page.

use crate::syllabus::document::{block_text, inline_text, selector};
use crate::syllabus::model::LectureDetail;
use crate::ParseError;
use scraper::Html;

/// Selector of the session plan table on a detail page
pub const LECTURE_PLAN_SELECTOR: &str = "table.lecture-plan";

/// Extracts the session records of a lecture detail page
///
/// Each row with a `td.date` and a `td.theme` cell becomes one record;
/// `td.content` is optional. A record takes its number from the row's leading
/// `th` cell when that holds a positive integer above the previous number;
/// otherwise it takes the next number after the previous record.
///
/// # Returns
///
/// * `Ok(Vec<LectureDetail>)` - The sessions; empty when the table has no session rows
/// * `Err(ParseError::MissingSection)` - The page has no session plan table
pub fn scrape_detail_of_lecture(
    document: &Html,
    page_url: &str,
) -> Result<Vec<LectureDetail>, ParseError> {
    let section_selector = selector(LECTURE_PLAN_SELECTOR)?;
    let row_selector = selector("tr")?;
    let date_selector = selector("td.date")?;
    let theme_selector = selector("td.theme")?;
    let content_selector = selector("td.content")?;
    let number_selector = selector("th")?;

    let section = document
        .select(&section_selector)
        .next()
        .ok_or_else(|| ParseError::MissingSection {
            url: page_url.to_string(),
            selector: LECTURE_PLAN_SELECTOR.to_string(),
        })?;

    let mut details: Vec<LectureDetail> = Vec::new();

    for row in section.select(&row_selector) {
        let date = row.select(&date_selector).next();
        let theme = row.select(&theme_selector).next();

        let (Some(date), Some(theme)) = (date, theme) else {
            continue;
        };

        let content = row
            .select(&content_selector)
            .next()
            .map(|cell| block_text(&cell))
            .unwrap_or_default();

        let previous = details.last().map_or(0, |d| d.number);
        let number = row
            .select(&number_selector)
            .next()
            .and_then(|cell| inline_text(&cell).parse::<u32>().ok())
            .filter(|n| *n > previous)
            .unwrap_or(previous + 1);

        details.push(LectureDetail {
            number,
            date: inline_text(&date),
            theme: inline_text(&theme),
            content,
        });
    }

    tracing::debug!("{} sessions on {}", details.len(), page_url);
    Ok(details)
}
