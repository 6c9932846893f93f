//! # IMDb Page Metadata
//!
//! Scrapes poster URLs and a short description (director, cast, story,
//! rating count) from IMDb title pages. Scraping never fails: any network
//! error or unexpected page falls back to placeholders.

use std::fmt;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

const IMDB_BASE: &str = "https://www.imdb.com";

/// Image shown when no poster could be scraped.
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/158x301?text=No+Image";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/128.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Class of the span holding the total rating count on title pages.
const RATING_COUNT_CLASS: &str = "sc-bde20123-1 iZlgcd";

/// Turns a site-relative IMDb link into an absolute URL.
#[must_use]
pub fn absolute_link(link: &str) -> String {
    if link.starts_with("http") {
        link.to_owned()
    } else {
        format!("{IMDB_BASE}{link}")
    }
}

/// Descriptive metadata scraped from a title page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieDetails {
    pub director: Option<String>,
    pub cast: Option<String>,
    pub story: Option<String>,
    pub rating_count: Option<String>,
}

impl fmt::Display for MovieDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MISSING: &str = "Not available";
        writeln!(f, "Director: {}", self.director.as_deref().unwrap_or(MISSING))?;
        writeln!(f, "Cast: {}", self.cast.as_deref().unwrap_or(MISSING))?;
        writeln!(f, "Story: {}", self.story.as_deref().unwrap_or(MISSING))?;
        write!(
            f,
            "Total Rating count: {}",
            self.rating_count.as_deref().unwrap_or("N/A")
        )
    }
}

/// Pre-compiled patterns for the bits of a title page we read.
#[derive(Debug, Clone)]
pub struct PageParser {
    re_meta: Regex,
    re_property: Regex,
    re_content: Regex,
    re_rating_count: Regex,
}

impl PageParser {
    /// # Errors
    ///
    /// Returns `CatalogError::Regex` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_meta: Regex::new(r"(?is)<meta\b[^>]*>")?,
            re_property: Regex::new(r#"(?i)\bproperty\s*=\s*["']([^"']+)["']"#)?,
            re_content: Regex::new(r#"(?is)\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
            re_rating_count: Regex::new(&format!(
                r#"(?is)<span[^>]*class\s*=\s*"{}"[^>]*>(.*?)</span>"#,
                regex::escape(RATING_COUNT_CLASS)
            ))?,
        })
    }

    /// Content of the `<meta property="...">` tag, if present.
    #[must_use]
    pub fn meta_property(&self, html: &str, property: &str) -> Option<String> {
        self.re_meta
            .find_iter(html)
            .map(|tag| tag.as_str())
            .find(|tag| {
                self.re_property
                    .captures(tag)
                    .is_some_and(|caps| caps[1].eq_ignore_ascii_case(property))
            })
            .and_then(|tag| self.re_content.captures(tag))
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|content| unescape(content.as_str()))
    }

    /// Poster image URL from `og:image`.
    #[must_use]
    pub fn poster(&self, html: &str) -> Option<String> {
        self.meta_property(html, "og:image")
            .filter(|url| !url.trim().is_empty())
    }

    /// Director, cast and story from the sentences of `og:description`,
    /// plus the rating count span.
    #[must_use]
    pub fn details(&self, html: &str) -> MovieDetails {
        let mut details = MovieDetails::default();

        if let Some(description) = self.meta_property(html, "og:description") {
            let mut sentences = description.split('.');
            details.director = sentences.next().and_then(non_empty);
            details.cast = sentences
                .next()
                .and_then(|cast| non_empty(&cast.replace("With", "")));
            details.story = sentences
                .next()
                .and_then(non_empty)
                .map(|story| format!("{story}."));
        }

        details.rating_count = self
            .re_rating_count
            .captures(html)
            .and_then(|caps| non_empty(&unescape(&caps[1])));

        details
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Decodes the handful of entities IMDb uses in meta content.
fn unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Blocking IMDb client with browser-like headers.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    http: Client,
    parser: PageParser,
}

impl MetadataClient {
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built, or
    /// `CatalogError::Regex` from [`PageParser::new`].
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            parser: PageParser::new()?,
        })
    }

    /// Poster URL for an IMDb link, or [`PLACEHOLDER_POSTER`].
    pub fn poster(&self, link: &str) -> String {
        self.fetch_page(link)
            .and_then(|html| self.parser.poster(&html))
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_owned())
    }

    /// Details for an IMDb link; every field is `None` when the page is
    /// unavailable.
    pub fn details(&self, link: &str) -> MovieDetails {
        self.fetch_page(link)
            .map(|html| self.parser.details(&html))
            .unwrap_or_default()
    }

    fn fetch_page(&self, link: &str) -> Option<String> {
        let url = absolute_link(link);
        debug!(%url, "fetching title page");

        let response = match self.http.get(&url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "title page request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "title page returned an error status");
            return None;
        }

        match response.text() {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(%url, error = %e, "failed to read title page body");
                None
            }
        }
    }
}
