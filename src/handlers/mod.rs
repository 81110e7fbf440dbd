//! MCP tool handlers for the quote server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod add_quote;
pub mod categories;
pub mod show_quote;
pub mod sync;
pub mod transfer;
