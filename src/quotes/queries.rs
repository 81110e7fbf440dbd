//! Derived views over a quote collection
//!
//! Category lists and random selection are recomputed from the collection on
//! every call; nothing here is cached.

use super::quote::{ALL_CATEGORIES, CategoryFilter, Quote};
use super::quote_book::QuoteBook;
use rand::Rng;
use rand::seq::SliceRandom;

/// List the categories present in the collection
///
/// # Returns
/// `"all"` followed by every distinct category in first-seen order. A stored
/// category literally named `"all"` is folded into the synthetic entry.
pub fn categories(quotes: &QuoteBook) -> Vec<String> {
    let mut result = vec![ALL_CATEGORIES.to_string()];
    for quote in quotes {
        if !result.contains(&quote.category) {
            result.push(quote.category.clone());
        }
    }
    result
}

/// Pick one quote at random among those passing `filter`
///
/// # Arguments
/// * `quotes` - The collection to pick from
/// * `filter` - Category constraint applied before picking
/// * `rng` - Random source; every matching quote has the same chance
///
/// # Returns
/// `None` when no quote matches, which callers display as "no quotes available"
pub fn pick<'a, R: Rng + ?Sized>(
    quotes: &'a QuoteBook,
    filter: &CategoryFilter,
    rng: &mut R,
) -> Option<&'a Quote> {
    let matching: Vec<&Quote> = quotes.iter().filter(|q| filter.matches(q)).collect();
    matching.choose(rng).copied()
}
