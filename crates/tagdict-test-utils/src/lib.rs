//! Shared test utilities for the tag dictionary workspace.
//!
//! This crate provides the fixture markup and environments used across crate
//! test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`fixtures`]: paths and contents of the files under `test-fixtures/`
//! - [`env`]: canned environment variable sets
//! - [`markup`]: [`TempMarkup`](markup::TempMarkup) for writing markup files

pub mod env;
pub mod fixtures;
pub mod markup;
