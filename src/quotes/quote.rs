use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Name of the synthetic category that stands for "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// A single quote record
///
/// Records carry no identifier: two quotes are the same quote exactly when
/// both `text` and `category` match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// The quote itself
    pub text: String,
    /// Free-text category (e.g., "Motivation", "Life")
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.category)
    }
}

/// Category constraint applied before random selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No constraint
    #[default]
    All,
    /// Only quotes whose category matches exactly
    Category(String),
}

impl CategoryFilter {
    /// Check whether a quote passes this filter
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => quote.category == *name,
        }
    }

    /// The category name as stored and displayed (`"all"` for no filter)
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(name) => name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Category(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in quotes used when nothing valid has been persisted yet
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The best way to predict the future is to create it.",
            "Motivation",
        ),
        Quote::new(
            "Life is 10% what happens to us and 90% how we react to it.",
            "Life",
        ),
        Quote::new("Happiness depends upon ourselves.", "Happiness"),
    ]
}
