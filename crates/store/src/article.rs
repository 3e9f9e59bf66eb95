// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Stored articles, and fetching them by month or by day of the year
//!

use crate::{Create, FetchById, StoreError};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Sqlite, Transaction};
use timeline_calendar_core::{
    ArticleSummary, Day, FictionalDate, Month, NavigationTarget, ThisDayArticle, TimeOfDay, Year,
};

/// An article as stored
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    title: String,
    slug: String,
    #[serde(flatten)]
    date: FictionalDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_of_day: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excerpt: Option<String>,
    published: bool,
}

impl Article {
    /// A new, published, article with no ID yet
    pub fn new(title: &str, slug: &str, date: FictionalDate) -> Self {
        Article {
            id: None,
            title: title.to_string(),
            slug: slug.to_string(),
            date,
            time_of_day: None,
            excerpt: None,
            published: true,
        }
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = Some(excerpt.to_string());
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn date(&self) -> FictionalDate {
        self.date
    }

    pub fn time_of_day(&self) -> Option<TimeOfDay> {
        self.time_of_day
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// e.g. `/timeline/3/8/15/the-long-night/`
    pub fn permalink(&self) -> String {
        NavigationTarget::Article {
            date: self.date,
            slug: self.slug.clone(),
        }
        .to_string()
    }

    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.unwrap_or_default(),
            title: self.title.clone(),
            permalink: self.permalink(),
            day: self.date.day(),
            time_of_day: self.time_of_day,
        }
    }

    pub fn this_day(&self) -> ThisDayArticle {
        ThisDayArticle {
            id: self.id.unwrap_or_default(),
            title: self.title.clone(),
            year: self.date.year(),
            permalink: self.permalink(),
            excerpt: self.excerpt.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RawArticle {
    #[serde(default)]
    id: Option<i64>,
    title: String,
    slug: String,
    year: i64,
    month: i64,
    day: i64,
    #[serde(default)]
    time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default = "published_by_default")]
    published: bool,
}

fn published_by_default() -> bool {
    true
}

impl<'de> Deserialize<'de> for Article {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawArticle::deserialize(deserializer)?;
        let date = FictionalDate::from_values(raw.year, raw.month, raw.day)
            .map_err(serde::de::Error::custom)?;
        Ok(Article {
            id: raw.id,
            title: raw.title,
            slug: raw.slug,
            date,
            time_of_day: raw.time_of_day,
            excerpt: raw.excerpt,
            published: raw.published,
        })
    }
}

/// A row of the `articles` table
#[derive(FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    year: i64,
    month: i64,
    day: i64,
    time_of_day: Option<String>,
    excerpt: Option<String>,
    published: bool,
}

impl TryFrom<ArticleRow> for Article {
    type Error = StoreError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: Some(row.id),
            title: row.title,
            slug: row.slug,
            date: FictionalDate::from_values(row.year, row.month, row.day)?,
            time_of_day: row.time_of_day.and_then(|label| label.parse().ok()),
            excerpt: row.excerpt,
            published: row.published,
        })
    }
}

const SELECT_ARTICLES: &str = r#"
    SELECT id, title, slug, year, month, day, time_of_day, excerpt, published
    FROM articles
"#;

impl Create for Article {
    /// Create an [`Article`] in the database.  The database chooses the ID if
    /// none is set.
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
                INSERT INTO articles
                (
                    id,
                    title,
                    slug,
                    year,
                    month,
                    day,
                    time_of_day,
                    excerpt,
                    published
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.slug)
        .bind(self.date.year().value())
        .bind(i64::from(self.date.month().value()))
        .bind(i64::from(self.date.day().value()))
        .bind(self.time_of_day.map(|time_of_day| time_of_day.as_str()))
        .bind(&self.excerpt)
        .bind(self.published)
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            if let Some(db_err) = error.as_database_error() {
                if db_err.is_unique_violation() {
                    return StoreError::SlugAlreadyInUse(self.slug.clone());
                }
            }
            StoreError::from(error)
        })?;

        self.id = Some(result.last_insert_rowid());
        Ok(())
    }
}

impl FetchById for Article {
    async fn fetch_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Self, StoreError> {
        let row: ArticleRow = sqlx::query_as(&format!("{SELECT_ARTICLES} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut **transaction)
            .await?;
        Article::try_from(row)
    }
}

/// The published articles of one month, by day
pub async fn fetch_month_articles(
    transaction: &mut Transaction<'_, Sqlite>,
    year: Year,
    month: Month,
) -> Result<Vec<ArticleSummary>, StoreError> {
    let rows: Vec<ArticleRow> = sqlx::query_as(&format!(
        "{SELECT_ARTICLES} WHERE published = 1 AND year = ? AND month = ? ORDER BY day, id"
    ))
    .bind(year.value())
    .bind(i64::from(month.value()))
    .fetch_all(&mut **transaction)
    .await?;

    rows.into_iter()
        .map(|row| Article::try_from(row).map(|article| article.summary()))
        .collect()
}

/// The published articles on this day of the year, in any year, by title
pub async fn fetch_this_day(
    transaction: &mut Transaction<'_, Sqlite>,
    month: Month,
    day: Day,
) -> Result<Vec<ThisDayArticle>, StoreError> {
    let rows: Vec<ArticleRow> = sqlx::query_as(&format!(
        "{SELECT_ARTICLES} WHERE published = 1 AND month = ? AND day = ? ORDER BY title COLLATE NOCASE, id"
    ))
    .bind(i64::from(month.value()))
    .bind(i64::from(day.value()))
    .fetch_all(&mut **transaction)
    .await?;

    rows.into_iter()
        .map(|row| Article::try_from(row).map(|article| article.this_day()))
        .collect()
}

/// Number of articles in the store, published or not
pub async fn count_articles(transaction: &mut Transaction<'_, Sqlite>) -> Result<i64, StoreError> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM articles")
        .fetch_one(&mut **transaction)
        .await?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::seeded_database;
    use timeline_calendar_macros::{day, month, year};

    #[tokio::test]
    async fn month_articles() {
        let pool = seeded_database().await;
        let mut transaction = pool.begin().await.unwrap();

        let articles = fetch_month_articles(&mut transaction, year!(1), month!(8))
            .await
            .unwrap();
        let days: Vec<Day> = articles.iter().map(|article| article.day).collect();
        assert_eq!(days, [day!(1), day!(1), day!(15)]);
        assert_eq!(articles[2].permalink, "/timeline/1/8/15/the-long-night/");
        assert_eq!(articles[2].time_of_day, Some(TimeOfDay::Evening));

        // Unpublished articles are never listed
        let articles = fetch_month_articles(&mut transaction, year!(3), month!(12))
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);

        let articles = fetch_month_articles(&mut transaction, year!(2), month!(2))
            .await
            .unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn this_day() {
        let pool = seeded_database().await;
        let mut transaction = pool.begin().await.unwrap();

        let articles = fetch_this_day(&mut transaction, month!(1), day!(1))
            .await
            .unwrap();
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Ancient Rumours", "Return", "The Founding"]);
        assert_eq!(articles[0].year, year!(-2));
        assert_eq!(articles[2].excerpt.as_deref(), Some("Where it all began."));
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let pool = seeded_database().await;
        let mut transaction = pool.begin().await.unwrap();

        let date = FictionalDate::from_values(-5, 2, 28).unwrap();
        let mut article = Article::new("Frost", "frost", date)
            .with_time_of_day(TimeOfDay::Morning)
            .with_excerpt("Cold.");
        article.create(&mut transaction).await.unwrap();
        let id = article.id().unwrap();

        let fetched = Article::fetch_by_id(&mut transaction, id).await.unwrap();
        assert_eq!(fetched, article);
        assert_eq!(fetched.permalink(), "/timeline/-5/2/28/frost/");

        // Slugs are unique
        let mut duplicate = Article::new("Frost again", "frost", date);
        assert_eq!(
            duplicate.create(&mut transaction).await,
            Err(StoreError::SlugAlreadyInUse("frost".to_string()))
        );

        assert_eq!(
            Article::fetch_by_id(&mut transaction, 99_999).await,
            Err(StoreError::IdNotInDb)
        );
    }

    #[test]
    fn deserialize() {
        let article: Article = serde_json::from_str(
            r#"{"title": "T", "slug": "t", "year": 0, "month": 2, "day": 28}"#,
        )
        .unwrap();
        assert!(article.is_published());
        assert_eq!(article.id(), None);

        // 29th of February never exists
        assert!(
            serde_json::from_str::<Article>(
                r#"{"title": "T", "slug": "t", "year": 4, "month": 2, "day": 29}"#
            )
            .is_err()
        );
    }
}
