// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timeline Calendar project*
//!
//! Create the article database and import articles into it
//!

use clap::{CommandFactory, Parser, ValueEnum, builder::PossibleValue};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use timeline_calendar_store::{
    Articles, count_articles, import_articles, open_database_at_path, setup_database_at_path,
};

/// Timeline Calendar database tool entry point
///
/// One of:
/// - Create the database
/// - Import articles into the database
/// - Print database stats
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Check the options
    match (&args.cli_command, &args.database, &args.json) {
        //----------------------------------------------------------------------
        // Valid
        //----------------------------------------------------------------------
        (Command::Create, database, _) => match setup_database_at_path(database).await {
            Ok(()) => println!("Success"),
            Err(error) => {
                eprintln!("Error: {error}");
                std::process::exit(1);
            }
        },
        (Command::Import, database, Some(json)) => match import(database, json).await {
            Ok(count) => println!("Sucessfully imported {count} articles"),
            Err(error) => {
                eprintln!("Error importing articles: {error}");
                std::process::exit(1);
            }
        },
        (Command::Stats, database, _) => {
            let pool = open(database).await;
            let mut transaction = pool.begin().await?;
            let count = count_articles(&mut transaction).await?;
            println!("Articles: {count}");
        }
        //----------------------------------------------------------------------
        // Invalid
        //----------------------------------------------------------------------
        _ => {
            eprintln!("CLI Error: invalid options");
            Cli::command().print_long_help()?;
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Open the database, exiting if it can't be
async fn open(database: &Path) -> SqlitePool {
    match open_database_at_path(database).await {
        Ok(pool) => pool,
        Err(error) => {
            eprintln!("Error connecting to database: {error}");
            std::process::exit(1);
        }
    }
}

/// Import the articles in the JSON file, all or nothing
async fn import(database: &Path, json: &Path) -> Result<u64, Box<dyn std::error::Error>> {
    let articles = Articles::from_path(json)?;
    let pool = open(database).await;
    let mut transaction = pool.begin().await?;
    let count = import_articles(&mut transaction, articles).await?;
    transaction.commit().await?;
    Ok(count)
}

/// Timeline Calendar database CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Timeline Calendar tool for basic database management",
    after_help = "This is intended for use when deploying to a server and in CI"
)]
pub struct Cli {
    // Database command
    #[arg(value_enum)]
    pub cli_command: Command,

    /// Path to the database
    #[arg(long)]
    pub database: PathBuf,

    /// Path to a JSON file holding an array of articles
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum Command {
    Create,
    Import,
    Stats,
}

impl ValueEnum for Command {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Create, Self::Import, Self::Stats]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Command::Create => {
                Some(PossibleValue::new("create").help("Create a new database at the path"))
            }
            Command::Import => Some(
                PossibleValue::new("import")
                    .help("Import the articles in the JSON file at path into the database"),
            ),
            Command::Stats => Some(PossibleValue::new("stats").help("Print database stats")),
        }
    }
}
