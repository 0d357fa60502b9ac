//! Syllabus scraping pipeline
//!
//! A [`Pipeline`] fetches the listing page once when it is built and keeps
//! the parsed document. Lecture lists and session records are then scraped
//! on demand and accumulated until the pipeline is dropped.

use crate::config::FetcherConfig;
use crate::syllabus::detail;
use crate::syllabus::document::parse_page;
use crate::syllabus::fetcher::{FetchedPage, Fetcher, HttpFetcher};
use crate::syllabus::listing;
use crate::syllabus::model::{
    LectureCategory, LectureDetail, LectureDetails, LectureInput, LectureNameUrl,
};
use crate::{FetchError, Result, SyllabusError};
use scraper::Html;
use std::collections::HashMap;
use url::Url;

/// Scraper state for one syllabus listing page
pub struct Pipeline<F: Fetcher = HttpFetcher> {
    fetcher: F,
    listing_url: Url,
    listing: Html,
    name_and_url_of_lectures: HashMap<LectureCategory, Vec<LectureNameUrl>>,
    /// None until [`Pipeline::scrape_details`] has run once
    lecture_details: Option<LectureDetails>,
}

impl Pipeline<HttpFetcher> {
    /// Fetches and parses the listing page with a default HTTP fetcher
    ///
    /// # Example
    ///
    /// ```no_run
    /// use naist_syllabus::{LectureCategory, Pipeline};
    ///
    /// # async fn run() -> naist_syllabus::Result<()> {
    /// let mut pipeline = Pipeline::new("https://syllabus.naist.jp/subjects/preview_list").await?;
    /// pipeline.scrape_lectures(&[LectureCategory::Basic])?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(listing_url: &str) -> Result<Self> {
        let fetcher = HttpFetcher::new(&FetcherConfig::default())?;
        Self::with_fetcher(fetcher, listing_url).await
    }
}

impl<F: Fetcher> Pipeline<F> {
    /// Fetches and parses the listing page through `fetcher`
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - The listing page was fetched and parsed
    /// * `Err(SyllabusError::Fetch)` - The URL is invalid or the request failed
    /// * `Err(SyllabusError::Parse)` - The response is not an HTML document
    pub async fn with_fetcher(fetcher: F, listing_url: &str) -> Result<Self> {
        let page = fetcher.fetch(listing_url).await?;
        let listing = parse_page(&page)?;
        let base_url = Url::parse(&page.final_url).map_err(|e| FetchError::InvalidUrl {
            url: page.final_url.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!("Fetched syllabus listing from {}", base_url);
        Ok(Self::from_listing(fetcher, base_url, listing))
    }

    /// Builds a pipeline around an already parsed listing page
    pub fn from_listing(fetcher: F, listing_url: Url, listing: Html) -> Self {
        Self {
            fetcher,
            listing_url,
            listing,
            name_and_url_of_lectures: HashMap::new(),
            lecture_details: None,
        }
    }

    /// URL the listing page was served from
    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    /// Extracts the lectures of one category from the listing page
    pub fn scrape_name_and_url(&self, category: LectureCategory) -> Result<Vec<LectureNameUrl>> {
        Ok(listing::scrape_name_and_url(
            &self.listing,
            &self.listing_url,
            category,
        )?)
    }

    /// Like [`Pipeline::scrape_name_and_url`], resolving the category by name
    ///
    /// Fails with [`SyllabusError::Lookup`] for an unknown name.
    pub fn scrape_name_and_url_by_key(&self, key: &str) -> Result<Vec<LectureNameUrl>> {
        let category = key.parse::<LectureCategory>()?;
        self.scrape_name_and_url(category)
    }

    /// Scrapes each category and stores its lectures, replacing earlier results
    pub fn scrape_lectures(&mut self, categories: &[LectureCategory]) -> Result<()> {
        for &category in categories {
            let lectures = self.scrape_name_and_url(category)?;
            tracing::info!("{} lectures in category '{}'", lectures.len(), category);
            self.name_and_url_of_lectures.insert(category, lectures);
        }
        Ok(())
    }

    /// Like [`Pipeline::scrape_lectures`], resolving categories by name
    ///
    /// Stops at the first unknown name. Categories before it stay stored.
    pub fn scrape_lectures_by_key<S: AsRef<str>>(&mut self, keys: &[S]) -> Result<()> {
        for key in keys {
            let category = key.as_ref().parse::<LectureCategory>()?;
            self.scrape_lectures(&[category])?;
        }
        Ok(())
    }

    /// Lectures stored by [`Pipeline::scrape_lectures`], keyed by category
    pub fn name_and_url_of_lectures(&self) -> &HashMap<LectureCategory, Vec<LectureNameUrl>> {
        &self.name_and_url_of_lectures
    }

    /// Stored lectures of every category, in category order then page order
    pub fn scraped_lectures(&self) -> Vec<LectureNameUrl> {
        LectureCategory::ALL
            .iter()
            .filter_map(|category| self.name_and_url_of_lectures.get(category))
            .flatten()
            .cloned()
            .collect()
    }

    /// Extracts session records from a fetched detail page
    pub fn scrape_detail_of_lecture(&self, page: &FetchedPage) -> Result<Vec<LectureDetail>> {
        let document = parse_page(page)?;
        Ok(detail::scrape_detail_of_lecture(&document, &page.final_url)?)
    }

    /// Fetches and scrapes the detail page of every valid lecture in the batch
    ///
    /// Results are stored under the lecture name, replacing earlier results.
    /// Invalid batch elements are skipped. A failed fetch or parse of a valid
    /// lecture aborts the batch; lectures stored before it are kept.
    pub async fn scrape_details<I>(&mut self, lectures: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<LectureInput>,
    {
        let details = self.lecture_details.get_or_insert_with(HashMap::new);

        for input in lectures {
            let input: LectureInput = input.into();
            let lecture = match input {
                LectureInput::Valid(lecture) => lecture,
                LectureInput::Invalid { reason } => {
                    tracing::warn!("Skipping malformed lecture entry: {}", reason);
                    continue;
                }
            };

            let page = self.fetcher.fetch(&lecture.url).await?;
            let document = parse_page(&page)?;
            let sessions = detail::scrape_detail_of_lecture(&document, &page.final_url)?;

            tracing::info!("{} sessions for '{}'", sessions.len(), lecture.name);
            details.insert(lecture.name, sessions);
        }

        Ok(())
    }

    /// Session records accumulated by [`Pipeline::scrape_details`]
    ///
    /// Fails with [`SyllabusError::Uninitialized`] if `scrape_details` has
    /// never been called; after any call the map is returned, even if empty.
    pub fn get_lecture_details(&self) -> Result<&LectureDetails> {
        self.lecture_details
            .as_ref()
            .ok_or(SyllabusError::Uninitialized {
                field: "lecture_details",
            })
    }
}
