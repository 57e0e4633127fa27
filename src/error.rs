//! # Error Types
//!
//! This module defines all error types for the tabkit engine.
//!
//! Parser errors carry the offending token text so a host can highlight it in
//! the input field.
//!
//! ## Error Types
//! - `InvalidToken` - A position token that is not `string:fret`
//! - `StringOutOfRange` - A string number outside 1-6
//! - `Config` - Invalid YAML in an editor configuration
//!
//! ## Usage
//! ```rust
//! use tabkit::{parse, TabError};
//!
//! match parse("4:5,x:7") {
//!     Ok(seq) => println!("{} notes", seq.notes.len()),
//!     Err(TabError::InvalidToken { token }) => {
//!         eprintln!("Bad token: {}", token);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabError {
    /// Malformed position token.
    ///
    /// Occurs when a token has no `:`, when the string part is not an
    /// integer, or when the fret part is empty. The message quotes the
    /// offending token text.
    ///
    /// # Example
    /// ```
    /// # use tabkit::TabError;
    /// let err = TabError::InvalidToken {
    ///     token: "x:5".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid token: \"x:5\"");
    /// ```
    #[error("Invalid token: \"{token}\"")]
    InvalidToken { token: String },

    /// String number outside the six guitar strings.
    ///
    /// Occurs when a token's string part parses as an integer but is not in
    /// 1-6 (1 = thinnest string, 6 = thickest).
    ///
    /// # Example
    /// ```
    /// # use tabkit::TabError;
    /// let err = TabError::StringOutOfRange {
    ///     token: "9:0".to_string(),
    ///     string: 9,
    /// };
    /// assert_eq!(err.to_string(), "String 9 is out of range 1-6 in \"9:0\"");
    /// ```
    #[error("String {string} is out of range 1-6 in \"{token}\"")]
    StringOutOfRange { token: String, string: i32 },

    /// Invalid editor configuration.
    ///
    /// Occurs when a YAML configuration document cannot be deserialized, or
    /// deserializes to values the editor cannot run with (e.g. a
    /// non-positive tempo).
    ///
    /// # Example
    /// ```
    /// # use tabkit::TabError;
    /// let err = TabError::Config("unknown field `temp`".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: unknown field `temp`");
    /// ```
    #[error("Invalid config: {0}")]
    Config(String),
}
