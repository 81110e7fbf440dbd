//! Validation helper functions for the quote MCP server
//!
//! This module contains input validation for new quotes and the mapping from
//! domain errors to MCP errors.

use crate::error::QuoteError;
use crate::quotes::Quote;

/// Validate and normalize user input for a new quote
///
/// # Arguments
/// * `text` - Quote text as entered
/// * `category` - Category as entered
///
/// # Returns
/// The quote with surrounding whitespace trimmed from both fields, or
/// `QuoteError::Validation` if either field is empty after trimming
pub fn validate_new_quote(text: &str, category: &str) -> Result<Quote, QuoteError> {
    let text = text.trim();
    let category = category.trim();

    match (text.is_empty(), category.is_empty()) {
        (true, true) => Err(QuoteError::Validation(
            "Please enter both quote text and category.".to_string(),
        )),
        (true, false) => Err(QuoteError::Validation(
            "Quote text must not be empty.".to_string(),
        )),
        (false, true) => Err(QuoteError::Validation(
            "Quote category must not be empty.".to_string(),
        )),
        (false, false) => Ok(Quote::new(text, category)),
    }
}

/// Convert a domain error into an MCP error
///
/// Validation and format problems are reported as invalid parameters so the
/// client knows to fix its input; storage and remote failures are internal.
pub fn to_mcp_error(err: QuoteError) -> mcp_attr::Error {
    let code = if err.is_client_error() {
        mcp_attr::ErrorCode::INVALID_PARAMS
    } else {
        mcp_attr::ErrorCode::INTERNAL_ERROR
    };
    mcp_attr::Error::new(code).with_message(err.to_string(), true)
}
