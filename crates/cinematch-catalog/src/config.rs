/// Smallest number of recommendations offered per request.
pub const MIN_COUNT: usize = 5;
/// Largest number of recommendations offered per request.
pub const MAX_COUNT: usize = 20;
/// Lowest selectable IMDb score.
pub const MIN_SCORE: f64 = 1.0;
/// Highest selectable IMDb score.
pub const MAX_SCORE: f64 = 10.0;
/// Score preselected for genre-based queries.
pub const DEFAULT_SCORE: f64 = 8.0;

/// Clamps a target IMDb score into `MIN_SCORE..=MAX_SCORE`.
///
/// NaN falls back to [`DEFAULT_SCORE`].
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        DEFAULT_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Configuration for a recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendConfig {
    /// How many movies to recommend, within `MIN_COUNT..=MAX_COUNT`.
    pub count: usize,
    /// Whether to scrape poster URLs for each recommendation.
    pub fetch_posters: bool,
    /// Whether to scrape director, cast and story for each recommendation.
    pub fetch_details: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            count: MIN_COUNT,
            fetch_posters: true,
            fetch_details: true,
        }
    }
}

impl RecommendConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of recommendations.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.clamp(MIN_COUNT, MAX_COUNT);
        self
    }

    /// Enable or disable poster scraping.
    pub fn with_posters(mut self, enabled: bool) -> Self {
        self.fetch_posters = enabled;
        self
    }

    /// Enable or disable description scraping.
    pub fn with_details(mut self, enabled: bool) -> Self {
        self.fetch_details = enabled;
        self
    }

    /// Returns `true` if any IMDb page has to be fetched.
    #[must_use]
    pub fn needs_scraping(&self) -> bool {
        self.fetch_posters || self.fetch_details
    }
}
