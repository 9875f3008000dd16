//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and shape checks
//! - [`original_url`] - Short-link target URL validation
//! - [`shopping_list_csv`] - CSV rendering for shopping list downloads

pub mod code_generator;
pub mod original_url;
pub mod shopping_list_csv;

pub use shopping_list_csv::render_shopping_list_csv;
