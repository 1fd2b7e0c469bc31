//! Markup adapter for the tag dictionary
//!
//! Turns XML text (inline or read from a file) into an owned, ordered tree of
//! [`Element`]s. The resolution engine only ever sees this tree; it never looks
//! at markup syntax itself.

pub mod element;
pub mod error;
pub mod parse;

pub use element::{Element, IDENTITY_ATTRIBUTE};
pub use error::{Error, Result};
pub use parse::{load, parse};
