//! Storyteller-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across storyteller:
//!
//! - **Story vocabulary**: Complexity levels, supported languages, client platforms
//! - **Path Utilities**: Upload filename generation and extension allow-lists
//! - **Error Handling**: Common error type with HTTP status mapping
//!
//! # Examples
//!
//! ```
//! use storyteller_common::{Complexity, Error, Language, Result};
//! use storyteller_common::paths::is_allowed_extension;
//!
//! let complexity = Complexity::Level(1);
//! assert!(complexity.prompt().starts_with("3rd grade"));
//!
//! assert_eq!(Language::from_code("it"), Language::Italian);
//! assert!(is_allowed_extension("PNG", &["jpg", "png"]));
//!
//! fn example() -> Result<()> {
//!     Err(Error::missing_data())
//! }
//! assert_eq!(example().unwrap_err().http_status(), 400);
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
