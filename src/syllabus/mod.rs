//! Syllabus scraping
//!
//! This module contains the scraping pipeline, including:
//! - HTTP fetching of listing and detail pages
//! - Lecture extraction per category from the listing page
//! - Session extraction from lecture detail pages
//! - The configuration-driven run that stores and summarizes the results

mod detail;
mod document;
mod fetcher;
mod listing;
mod model;
mod pipeline;
mod runner;

pub use detail::{scrape_detail_of_lecture, LECTURE_PLAN_SELECTOR};
pub use document::parse_page;
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use listing::scrape_name_and_url;
pub use model::{LectureCategory, LectureDetail, LectureDetails, LectureInput, LectureNameUrl};
pub use pipeline::Pipeline;
pub use runner::{load_lecture_batch, run_scrape, run_scrape_with, RunReport};
