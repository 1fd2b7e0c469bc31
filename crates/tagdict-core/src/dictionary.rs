//! The `TagDictionary` facade
//!
//! A dictionary is built once from an identity and an ordered list of
//! sources, then never changes. Building runs every stage in order:
//!
//! ```text
//! read sources -> merge -> substitute -> finalize groups -> derive logins
//! ```
//!
//! Any data error aborts the build, so a `TagDictionary` value is always
//! fully resolved.

use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Index;

use crate::config::Settings;
use crate::derive::{build_logins, finalize_groups};
use crate::error::{Error, Result};
use crate::merge::merge;
use crate::source::{EnvSnapshot, ReadOptions, TagSource, read_source};
use crate::substitute::Substitutor;
use crate::tag::{DbLogin, GroupInstance, TagValue};

/// Resolved, read-only view of all tags for one identity
#[derive(Debug, Clone)]
pub struct TagDictionary {
    identity: String,
    entries: BTreeMap<String, TagValue>,
    scalars: BTreeMap<String, String>,
    logins: BTreeMap<String, DbLogin>,
    max_substitution_depth: usize,
}

impl TagDictionary {
    /// Start building a dictionary for `identity`.
    pub fn builder(identity: impl Into<String>) -> DictionaryBuilder {
        DictionaryBuilder::new(identity)
    }

    /// Build from sources in precedence order (first wins), reading the
    /// process environment if an [`TagSource::Environment`] source is listed.
    pub fn new(
        identity: impl Into<String>,
        sources: impl IntoIterator<Item = TagSource>,
    ) -> Result<Self> {
        Self::builder(identity).sources(sources).build()
    }

    /// Build from the process environment followed by inline markup.
    ///
    /// Equivalent to `new(identity, [Environment, MarkupText(markup)])`: the
    /// environment outranks the markup for generic values.
    pub fn from_markup(identity: impl Into<String>, markup: impl Into<String>) -> Result<Self> {
        Self::builder(identity).markup_defaults(markup).build()
    }

    /// The identity this dictionary was built for
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries.get(name)
    }

    /// Like [`get`](Self::get) but fails with [`Error::KeyNotFound`].
    pub fn lookup(&self, name: &str) -> Result<&TagValue> {
        self.entries.get(name).ok_or_else(|| Error::KeyNotFound {
            key: name.to_string(),
        })
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Scalar value of a tag, `None` if absent or not a scalar
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(TagValue::as_scalar)
    }

    /// Instances of a label group, `None` if absent or not a group
    pub fn group(&self, name: &str) -> Option<&[GroupInstance]> {
        self.entries.get(name).and_then(TagValue::as_group)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Database logins keyed by login name
    pub fn db_logins(&self) -> &BTreeMap<String, DbLogin> {
        &self.logins
    }

    /// Password of a database login
    pub fn db_password(&self, login_name: &str) -> Result<&str> {
        self.logins
            .get(login_name)
            .map(|login| login.password.as_str())
            .ok_or_else(|| Error::LoginNotFound {
                name: login_name.to_string(),
            })
    }

    /// Substitute `{Name}` tokens in arbitrary text with resolved scalars.
    pub fn render(&self, text: &str) -> Result<String> {
        let empty = BTreeMap::new();
        Substitutor::new(&empty, self.max_substitution_depth)
            .with_fallback(&self.scalars)
            .render("<template>", text)
    }

    /// All entries as a JSON object
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.entries).unwrap_or_else(|_| serde_json::json!({}))
    }
}

impl Index<&str> for TagDictionary {
    type Output = TagValue;

    fn index(&self, name: &str) -> &TagValue {
        match self.entries.get(name) {
            Some(value) => value,
            None => panic!("tag '{name}' not found in dictionary for '{}'", self.identity),
        }
    }
}

/// Collects the inputs of a [`TagDictionary`] and builds it.
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    identity: String,
    sources: Vec<TagSource>,
    env: Option<EnvSnapshot>,
    settings: Settings,
}

impl DictionaryBuilder {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            sources: Vec::new(),
            env: None,
            settings: Settings::default(),
        }
    }

    /// Append a source; earlier sources take precedence.
    pub fn source(mut self, source: TagSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = TagSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Append the default pair: the environment, then inline markup.
    pub fn markup_defaults(self, markup: impl Into<String>) -> Self {
        self.source(TagSource::Environment)
            .source(TagSource::MarkupText(markup.into()))
    }

    /// Use this snapshot instead of the live process environment.
    pub fn environment(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Read, merge and resolve every source.
    pub fn build(self) -> Result<TagDictionary> {
        let Self {
            identity,
            sources,
            env,
            settings,
        } = self;

        let env = match env {
            Some(env) => env,
            None if sources.contains(&TagSource::Environment) => EnvSnapshot::capture(),
            None => EnvSnapshot::default(),
        };

        tracing::debug!(
            identity = %identity,
            sources = sources.len(),
            "Building tag dictionary"
        );

        let opts = ReadOptions {
            identity: &identity,
            env: &env,
            trim_text: settings.trim_text,
        };
        let tags = sources
            .iter()
            .enumerate()
            .map(|(rank, source)| read_source(source, rank, opts))
            .collect::<Result<Vec<_>>>()?;

        let merged = merge(&identity, tags)?;
        let depth = settings.max_substitution_depth;
        let scalars = Substitutor::new(&merged.scalars, depth).resolve_all()?;
        let groups = finalize_groups(merged.groups, &scalars, depth)?;
        let logins = build_logins(&scalars);

        let mut entries: BTreeMap<String, TagValue> = scalars
            .iter()
            .map(|(k, v)| (k.clone(), TagValue::Scalar(v.clone())))
            .collect();
        for (label, instances) in groups {
            entries.insert(label, TagValue::Group(instances));
        }
        for (name, login) in &logins {
            entries
                .entry(name.clone())
                .or_insert_with(|| TagValue::Login(login.clone()));
        }

        tracing::debug!(
            identity = %identity,
            entries = entries.len(),
            logins = logins.len(),
            "Built tag dictionary"
        );

        Ok(TagDictionary {
            identity,
            entries,
            scalars,
            logins,
            max_substitution_depth: depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> EnvSnapshot {
        vars.iter().copied().collect()
    }

    #[test]
    fn dictionary_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TagDictionary>();
    }

    #[test]
    fn builder_without_environment_source_ignores_snapshot() {
        let dict = TagDictionary::builder("ident")
            .environment(env(&[("IsSys", "IsSys")]))
            .source(TagSource::markup_text("<S><A>1</A></S>"))
            .build()
            .unwrap();

        assert!(!dict.contains_key("IsSys"));
        assert_eq!(dict.scalar("A"), Some("1"));
    }

    #[test]
    fn login_name_is_reachable_by_lookup_when_free() {
        let dict = TagDictionary::builder("ident")
            .source(TagSource::markup_text(
                "<S><config.Username>config</config.Username>\
                 <config.Password>pw</config.Password>\
                 <config.DefaultDb>db</config.DefaultDb></S>",
            ))
            .build()
            .unwrap();

        let login = dict["config"].as_login().expect("login entry");
        assert_eq!(login.password, "pw");
        assert_eq!(dict.db_password("config").unwrap(), "pw");
    }

    #[test]
    fn lookup_failure_leaves_dictionary_usable() {
        let dict = TagDictionary::builder("ident")
            .source(TagSource::markup_text("<S><A>1</A></S>"))
            .build()
            .unwrap();

        let err = dict.lookup("missing").unwrap_err();
        assert!(err.is_lookup());
        assert_eq!(dict.lookup("A").unwrap(), "1");
    }

    #[test]
    #[should_panic(expected = "tag 'missing' not found")]
    fn index_panics_on_missing_tag() {
        let dict = TagDictionary::builder("ident").build().unwrap();
        let _ = &dict["missing"];
    }

    #[test]
    fn to_json_exposes_scalars_and_groups() {
        let dict = TagDictionary::builder("ident")
            .source(TagSource::markup_text(
                r#"<S><A>1</A><G identity="x"><B>2</B></G></S>"#,
            ))
            .build()
            .unwrap();

        let json = dict.to_json();
        assert_eq!(json["A"], "1");
        assert_eq!(json["G"][0]["values"]["B"], "2");
        assert_eq!(json["G"][0]["identity"], "x");
    }
}
