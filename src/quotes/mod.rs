//! Quote domain models and queries
//!
//! This module contains the core quote data structures and their operations.
//! It is split into submodules:
//! - `quote`: the `{text, category}` record, the category filter and the seed list
//! - `quote_book`: ordered collection with append and merge operations
//! - `queries`: derived category list and random selection

mod queries;
mod quote;
mod quote_book;

pub use queries::{categories, pick};
pub use quote::{ALL_CATEGORIES, CategoryFilter, Quote, seed_quotes};
pub use quote_book::QuoteBook;
