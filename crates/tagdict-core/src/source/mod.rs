//! Tag sources and the readers that turn them into tagged properties
//!
//! Every reader produces the same [`SourceTags`] shape, so the merger never
//! needs to know where a property came from beyond its rank.

mod env;
mod markup;

pub use env::{EnvSnapshot, read_environment};
pub use markup::{
    GROUP_TEXT_KEY, IDENTITY_MARKER, MARKER_NAME_ATTRIBUTE, MarkupContext, read_markup,
};

use std::path::PathBuf;

use crate::Result;
use crate::tag::{GroupInstance, TaggedProperty};

/// Where a set of tags comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSource {
    /// The process environment, taken from the dictionary's snapshot
    Environment,
    /// Inline markup text
    MarkupText(String),
    /// A markup file to read
    MarkupFile(PathBuf),
}

impl TagSource {
    pub fn markup_text(text: impl Into<String>) -> Self {
        Self::MarkupText(text.into())
    }

    pub fn markup_file(path: impl Into<PathBuf>) -> Self {
        Self::MarkupFile(path.into())
    }

    /// Label used in logs and error messages
    pub fn origin(&self) -> String {
        match self {
            Self::Environment => "<environment>".to_string(),
            Self::MarkupText(_) => "<markup text>".to_string(),
            Self::MarkupFile(path) => path.display().to_string(),
        }
    }
}

/// One instance of a label group as read from a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub label: String,
    pub instance: GroupInstance,
    pub source_rank: usize,
}

/// Everything one source contributed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTags {
    pub properties: Vec<TaggedProperty>,
    pub groups: Vec<GroupEntry>,
}

/// Shared inputs for reading sources
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReadOptions<'a> {
    pub identity: &'a str,
    pub env: &'a EnvSnapshot,
    pub trim_text: bool,
}

/// Read one source at the given rank.
pub(crate) fn read_source(
    source: &TagSource,
    source_rank: usize,
    opts: ReadOptions<'_>,
) -> Result<SourceTags> {
    let origin = source.origin();
    let root = match source {
        TagSource::Environment => {
            return Ok(SourceTags {
                properties: read_environment(opts.env, source_rank),
                groups: Vec::new(),
            });
        }
        TagSource::MarkupText(text) => tagdict_markup::parse(text)?,
        TagSource::MarkupFile(path) => tagdict_markup::load(path)?,
    };

    read_markup(
        root.as_ref(),
        MarkupContext {
            identity: opts.identity,
            origin: &origin,
            source_rank,
            trim_text: opts.trim_text,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_labels() {
        assert_eq!(TagSource::Environment.origin(), "<environment>");
        assert_eq!(TagSource::markup_text("<a/>").origin(), "<markup text>");
        assert_eq!(
            TagSource::markup_file("structure.xml").origin(),
            "structure.xml"
        );
    }

    #[test]
    fn read_source_dispatches_on_kind() {
        let env: EnvSnapshot = [("ClientCode", "FAA")].into_iter().collect();
        let opts = ReadOptions {
            identity: "ident",
            env: &env,
            trim_text: true,
        };

        let from_env = read_source(&TagSource::Environment, 0, opts).unwrap();
        assert_eq!(from_env.properties.len(), 1);

        let from_text =
            read_source(&TagSource::markup_text("<S><A>1</A></S>"), 1, opts).unwrap();
        assert_eq!(from_text.properties[0].source_rank, 1);

        let empty = read_source(&TagSource::markup_text(""), 2, opts).unwrap();
        assert_eq!(empty, SourceTags::default());
    }
}
