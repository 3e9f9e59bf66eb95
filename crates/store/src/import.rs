// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Import articles from JSON
//!

use crate::{Article, Create, RowsAffected, StoreError};
use log::info;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, Transaction};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A collection of [`Article`]s, as found in an import file
#[derive(
    derive_more::IntoIterator,
    derive_more::Index,
    Clone,
    Debug,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
)]
#[into_iterator(owned, ref)]
pub struct Articles(Vec<Article>);

impl FromIterator<Article> for Articles {
    fn from_iter<I: IntoIterator<Item = Article>>(iter: I) -> Self {
        Articles(iter.into_iter().collect())
    }
}

impl Articles {
    /// Read a JSON array of articles from a file
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Create every article in the database.  Nothing is written unless the
/// caller commits the transaction.
pub async fn import_articles(
    transaction: &mut Transaction<'_, Sqlite>,
    articles: Articles,
) -> Result<RowsAffected, StoreError> {
    let mut rows_affected = 0;
    for mut article in articles {
        article.create(transaction).await?;
        rows_affected += 1;
    }
    info!("Imported {rows_affected} articles");
    Ok(rows_affected)
}
