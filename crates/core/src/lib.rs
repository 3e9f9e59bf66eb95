// SPDX-License-Identifier: MIT

//!
//! *Part of the Timeline Calendar project*
//!
//! This crate defines the basic datatypes and the calendar arithmetic used
//! across the Timeline Calendar project (article store, web API, widgets).
//!
//! Fictional dates only map onto real dates to give each day a day of the
//! week.  Which fictional years may be shown is decided by a [`YearPolicy`].
//!
//! As elsewhere in the project, if a type is instantiated it is valid.
//!

mod article;
mod calendar;
mod counts;
mod date;
mod policy;
mod range;
mod urls;

pub use article::*;
pub use calendar::*;
pub use counts::*;
pub use date::*;
pub use policy::*;
pub use range::*;
pub use urls::*;
