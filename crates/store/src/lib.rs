// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the Timeline Calendar project*
//!
//! This library crate is responsible for all database interactions and
//! management for the Timeline Calendar project.  It does the following:
//!
//! - Creates, opens and migrates SQLite article stores
//! - Lists the articles of a month, and of a day of the year across years
//! - Counts articles per month over a range of years
//! - Lists the distinct years that have articles
//! - Imports articles from JSON
//!
//! This crate makes use of the `core` crate for primitive types, and is
//! itself used by the `www-api` crate and the `db` binary.
//!

mod article;
mod common;
mod counts;
mod db;
mod import;

pub use article::*;
pub use common::*;
pub use counts::*;
pub use db::*;
pub use import::*;
