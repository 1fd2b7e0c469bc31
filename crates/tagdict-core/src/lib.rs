//! Tag resolution engine
//!
//! Reads key/value tags from the process environment and from XML markup,
//! merges them by precedence, and exposes the result as an immutable
//! [`TagDictionary`]:
//!
//! - **Sources**: environment snapshots and markup text or files, each read
//!   into the same property shape
//! - **Friendly names**: well-known deployment variables are renamed to short
//!   tags such as `Environment`
//! - **Precedence**: identity-scoped values beat generic ones, earlier
//!   sources beat later ones
//! - **Templates**: `{Name}` tokens inside values are expanded recursively
//! - **Derived views**: label groups and database logins
//!
//! # Example
//!
//! ```
//! use tagdict_core::{EnvSnapshot, TagDictionary, TagSource};
//!
//! let env: EnvSnapshot = [("ClientCode", "FAA")].into_iter().collect();
//! let dict = TagDictionary::builder("web01")
//!     .environment(env)
//!     .source(TagSource::Environment)
//!     .source(TagSource::markup_text(
//!         "<Structure><Site>www.{ClientCode}.example</Site></Structure>",
//!     ))
//!     .build()?;
//!
//! assert_eq!(dict["Site"], "www.FAA.example");
//! # Ok::<(), tagdict_core::Error>(())
//! ```

pub mod config;
pub mod derive;
pub mod dictionary;
pub mod error;
pub mod logging;
pub mod merge;
pub mod source;
pub mod substitute;
pub mod tag;
pub mod translate;

pub use config::Settings;
pub use dictionary::{DictionaryBuilder, TagDictionary};
pub use error::{Error, Result};
pub use source::{EnvSnapshot, TagSource};
pub use tag::{DbLogin, GroupInstance, IDENTITY_KEY, TagValue, TaggedProperty};
