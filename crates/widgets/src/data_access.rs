// SPDX-License-Identifier: MIT

//!
//! Data access
//!
//! Fetches what the widgets display from an [`ArticleSource`] (normally the
//! web API, see [`HttpArticleSource`]).  Failures never reach the widgets:
//! month fetches degrade to no articles and range fetches to `None`, so that
//! the previous dataset is kept.
//!

use crate::Effect;
use async_trait::async_trait;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use timeline_calendar_core::{
    ArticleSummary, Month, RangeCountsResponse, SparklineDataset, Year, YearPolicy,
    YearRange,
};
use url::Url;

/// Errors that can arise when fetching from an [`ArticleSource`]
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport error, non-success status, or a body that didn't decode
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// E.g. a `mailto:` URL, which has no path to put endpoints below
    #[error("`{0}` can't be used as a base URL")]
    NotABaseUrl(String),

    /// The range counts response had `success: false`
    #[error("The source reported an unsuccessful response")]
    Unsuccessful,

    /// For sources that aren't backed by HTTP
    #[error("{0}")]
    Other(String),
}

/// Where the articles come from
#[async_trait]
pub trait ArticleSource {
    /// The published articles of a month, in no particular order
    async fn month_articles(
        &self,
        year: Year,
        month: Month,
    ) -> Result<Vec<ArticleSummary>, SourceError>;

    /// Per-month counts for every year of the range
    async fn range_counts(&self, range: YearRange) -> Result<RangeCountsResponse, SourceError>;

    /// The years that have articles, as sent on the wire (strings)
    async fn distinct_years(&self) -> Result<Vec<String>, SourceError>;

    async fn settings(&self) -> Result<YearPolicy, SourceError>;
}

/// An [`ArticleSource`] that uses the web API
#[derive(Debug, Clone)]
pub struct HttpArticleSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpArticleSource {
    /// `base_url` is where the API is mounted, e.g. `http://localhost:2408/api/v1`
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_client(reqwest::Client::new(), Url::parse(base_url)?)
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Result<Self, SourceError> {
        if base_url.cannot_be_a_base() {
            return Err(SourceError::NotABaseUrl(base_url.to_string()));
        }
        Ok(HttpArticleSource { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL of an endpoint below the base, with the query parameters
    /// encoded
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| SourceError::NotABaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = self.endpoint(path, query)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    async fn month_articles(
        &self,
        year: Year,
        month: Month,
    ) -> Result<Vec<ArticleSummary>, SourceError> {
        let query = [("year", year.to_string()), ("month", month.to_string())];
        self.get("articles", &query).await
    }

    async fn range_counts(&self, range: YearRange) -> Result<RangeCountsResponse, SourceError> {
        let query = [
            ("start_year", range.start().to_string()),
            ("end_year", range.end().to_string()),
        ];
        self.get("sparkline", &query).await
    }

    async fn distinct_years(&self) -> Result<Vec<String>, SourceError> {
        self.get("years", &[]).await
    }

    async fn settings(&self) -> Result<YearPolicy, SourceError> {
        self.get("settings", &[]).await
    }
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a fetch.  Later fetches have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Latest-wins bookkeeping for one stream of fetches.  Issuing a new request
/// supersedes the one in flight, whose result is then ignored.
#[derive(Debug, Default, Clone)]
pub struct LatestWins {
    pending: Option<RequestId>,
}

impl LatestWins {
    pub fn new() -> Self {
        LatestWins::default()
    }

    pub fn issue(&mut self) -> RequestId {
        let id = RequestId(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed));
        self.pending = Some(id);
        id
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.pending == Some(id)
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget the request in flight, so that its result will be ignored
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether the result of the request should be applied.  A result is
    /// accepted at most once.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if self.is_current(id) {
            self.pending = None;
            true
        } else {
            debug!("Discarding stale response ({id:?})");
            false
        }
    }
}

/// Request for the articles of a month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRequest {
    pub id: RequestId,
    pub year: Year,
    pub month: Month,
}

/// Request for the per-month counts of a range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    pub id: RequestId,
    pub range: YearRange,
}

/// The result of carrying out a fetch [`Effect`], to be handed back to the
/// widgets
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    MonthArticles {
        request: MonthRequest,
        articles: Vec<ArticleSummary>,
    },
    RangeCounts {
        request: RangeRequest,
        dataset: Option<SparklineDataset>,
    },
}

/// The widgets' view of an [`ArticleSource`]
#[derive(Debug, Clone)]
pub struct DataAccess<S> {
    source: S,
}

impl<S: ArticleSource> DataAccess<S> {
    pub fn new(source: S) -> Self {
        DataAccess { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The articles of a month, or none if they couldn't be fetched
    pub async fn fetch_month_articles(&self, year: Year, month: Month) -> Vec<ArticleSummary> {
        match self.source.month_articles(year, month).await {
            Ok(articles) => articles,
            Err(err) => {
                warn!("Failed to fetch the articles of {year}/{month}: {err}");
                Vec::new()
            }
        }
    }

    /// The counts for the whole range, or `None` if they couldn't be fetched
    pub async fn fetch_range_counts(&self, range: YearRange) -> Option<SparklineDataset> {
        let result = match self.source.range_counts(range).await {
            Ok(response) if response.success => Ok(response.data),
            Ok(_) => Err(SourceError::Unsuccessful),
            Err(err) => Err(err),
        };
        match result {
            Ok(dataset) => Some(dataset),
            Err(err) => {
                error!(
                    "Failed to fetch the counts for years {} to {}: {err}",
                    range.start(),
                    range.end()
                );
                None
            }
        }
    }

    /// The years with articles in ascending order, or `None` if they couldn't
    /// be fetched.  Years that don't parse are skipped.
    pub async fn fetch_distinct_years(&self) -> Option<Vec<Year>> {
        let years = match self.source.distinct_years().await {
            Ok(years) => years,
            Err(err) => {
                error!("Failed to fetch the list of years: {err}");
                return None;
            }
        };
        let mut years: Vec<Year> = years
            .iter()
            .filter_map(|year| match year.parse() {
                Ok(year) => Some(year),
                Err(err) => {
                    warn!("Skipping year `{year}`: {err}");
                    None
                }
            })
            .collect();
        years.sort();
        years.dedup();
        Some(years)
    }

    /// The calendar settings, or the defaults if they couldn't be fetched
    pub async fn fetch_policy(&self) -> YearPolicy {
        self.source.settings().await.unwrap_or_else(|err| {
            warn!("Failed to fetch the settings, using the defaults: {err}");
            YearPolicy::default()
        })
    }

    /// Carry out a fetch effect.  Other effects are for the host and give
    /// `None`.
    pub async fn complete(&self, effect: &Effect) -> Option<Completion> {
        match effect {
            Effect::FetchMonth(request) => Some(Completion::MonthArticles {
                request: *request,
                articles: self.fetch_month_articles(request.year, request.month).await,
            }),
            Effect::FetchRange(request) => Some(Completion::RangeCounts {
                request: *request,
                dataset: self.fetch_range_counts(request.range).await,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use std::collections::BTreeMap;
    use timeline_calendar_core::{Day, MonthCount, TimeOfDay};
    use timeline_calendar_macros::{day, month, year};

    /// An in-memory [`ArticleSource`] for widget tests
    #[derive(Debug, Default, Clone)]
    pub struct FakeSource {
        pub articles: BTreeMap<(Year, Month), Vec<ArticleSummary>>,
        pub counts: BTreeMap<Year, MonthCount>,
        pub years: Vec<String>,
        pub policy: YearPolicy,
        pub failing: bool,
    }

    pub fn summary(title: &str, day: Day, time_of_day: Option<TimeOfDay>) -> ArticleSummary {
        ArticleSummary {
            id: 0,
            title: title.to_string(),
            permalink: format!("/{title}/"),
            day,
            time_of_day,
        }
    }

    impl FakeSource {
        fn check(&self) -> Result<(), SourceError> {
            match self.failing {
                true => Err(SourceError::Other("unreachable".to_string())),
                false => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ArticleSource for FakeSource {
        async fn month_articles(
            &self,
            year: Year,
            month: Month,
        ) -> Result<Vec<ArticleSummary>, SourceError> {
            self.check()?;
            Ok(self.articles.get(&(year, month)).cloned().unwrap_or_default())
        }

        async fn range_counts(
            &self,
            range: YearRange,
        ) -> Result<RangeCountsResponse, SourceError> {
            self.check()?;
            let counts = self
                .counts
                .iter()
                .filter(|(year, _)| range.contains(**year))
                .map(|(year, counts)| (*year, *counts));
            Ok(RangeCountsResponse {
                success: true,
                data: SparklineDataset::zero_filled(range, counts),
            })
        }

        async fn distinct_years(&self) -> Result<Vec<String>, SourceError> {
            self.check()?;
            Ok(self.years.clone())
        }

        async fn settings(&self) -> Result<YearPolicy, SourceError> {
            self.check()?;
            Ok(self.policy)
        }
    }

    #[test]
    fn latest_wins() {
        let mut latest = LatestWins::new();
        let first = latest.issue();
        let second = latest.issue();
        assert!(first < second);
        assert!(!latest.accept(first));
        assert!(latest.is_pending());
        assert!(latest.accept(second));
        assert!(!latest.is_pending());
        assert!(!latest.accept(second));
    }

    #[test]
    fn endpoints() {
        let source = HttpArticleSource::new("http://localhost:2408/api/v1/").unwrap();
        let url = source
            .endpoint("articles", &[("year", "-2".to_string()), ("month", "8".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:2408/api/v1/articles?year=-2&month=8");

        // No trailing slash, and a query on the base is dropped
        let source = HttpArticleSource::new("http://localhost:2408/api/v1?debug=1").unwrap();
        let url = source.endpoint("years", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:2408/api/v1/years");

        assert!(matches!(
            HttpArticleSource::new("mailto:someone@example.com"),
            Err(SourceError::NotABaseUrl(_))
        ));
        assert!(matches!(
            HttpArticleSource::new("not a url"),
            Err(SourceError::Url(_))
        ));
    }

    #[tokio::test]
    async fn failures_degrade() {
        let access = DataAccess::new(FakeSource {
            failing: true,
            ..Default::default()
        });
        assert!(access.fetch_month_articles(year!(1), month!(8)).await.is_empty());
        let range = YearRange::new(year!(1), year!(7)).unwrap();
        assert_eq!(access.fetch_range_counts(range).await, None);
        assert_eq!(access.fetch_distinct_years().await, None);
        assert_eq!(access.fetch_policy().await, YearPolicy::default());
    }

    #[tokio::test]
    async fn distinct_years_are_sorted_numerically() {
        let access = DataAccess::new(FakeSource {
            years: ["12", "3", "-2", "x", "3"].map(String::from).to_vec(),
            ..Default::default()
        });
        assert_eq!(
            access.fetch_distinct_years().await,
            Some(vec![year!(-2), year!(3), year!(12)])
        );
    }

    #[tokio::test]
    async fn complete_fetch_effects() {
        let mut source = FakeSource::default();
        source
            .articles
            .insert((year!(1), month!(8)), vec![summary("Drought", day!(1), None)]);
        let access = DataAccess::new(source);

        let mut latest = LatestWins::new();
        let request = MonthRequest {
            id: latest.issue(),
            year: year!(1),
            month: month!(8),
        };
        let completion = access.complete(&Effect::FetchMonth(request)).await;
        let Some(Completion::MonthArticles { request: done, articles }) = completion else {
            panic!("expected month articles");
        };
        assert_eq!(done, request);
        assert_eq!(articles.len(), 1);

        let effect = Effect::UpdateAddress {
            query: String::new(),
        };
        assert_eq!(access.complete(&effect).await, None);
    }

    /// Against the real web API, served on a local port
    #[tokio::test]
    async fn http_source() {
        use timeline_calendar_store::{Articles, import_articles, in_memory_database};

        let articles: Articles = serde_json::from_str(
            r#"[
                { "title": "Drought", "slug": "drought", "year": 1, "month": 8, "day": 1, "time_of_day": "Night" },
                { "title": "Harvest", "slug": "harvest", "year": 1, "month": 8, "day": 15 },
                { "title": "Exile", "slug": "exile", "year": 12, "month": 1, "day": 1 }
            ]"#,
        )
        .unwrap();
        let pool = in_memory_database().await.unwrap();
        let mut transaction = pool.begin().await.unwrap();
        import_articles(&mut transaction, articles).await.unwrap();
        transaction.commit().await.unwrap();

        let app = timeline_calendar_www_api::api_router(pool, YearPolicy::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let source = HttpArticleSource::new(&format!("http://{address}/api/v1/")).unwrap();
        let access = DataAccess::new(source);

        let articles = access.fetch_month_articles(year!(1), month!(8)).await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].time_of_day, Some(TimeOfDay::Night));

        let range = YearRange::new(year!(1), year!(7)).unwrap();
        let dataset = access.fetch_range_counts(range).await.unwrap();
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.count(year!(1), month!(8)), 2);

        assert_eq!(
            access.fetch_distinct_years().await,
            Some(vec![year!(1), year!(12)])
        );
        assert_eq!(access.fetch_policy().await, YearPolicy::default());
    }
}
