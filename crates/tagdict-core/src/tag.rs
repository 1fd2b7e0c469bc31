//! Core value types shared by every resolution stage

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Key under which a group instance exposes its own identity
pub const IDENTITY_KEY: &str = "identity";

/// One fact read from a source, before precedence is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedProperty {
    pub name: String,
    /// Raw value, possibly containing `{Name}` template tokens
    pub value: String,
    /// Scope the property is bound to; `None` applies to any identity
    pub identity: Option<String>,
    /// Position of the originating source; lower wins
    pub source_rank: usize,
}

impl TaggedProperty {
    pub fn generic(name: impl Into<String>, value: impl Into<String>, source_rank: usize) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            identity: None,
            source_rank,
        }
    }

    pub fn scoped(
        name: impl Into<String>,
        value: impl Into<String>,
        identity: impl Into<String>,
        source_rank: usize,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            identity: Some(identity.into()),
            source_rank,
        }
    }
}

/// One instance of a label group: a small mapping of tags with its own identity.
///
/// Once a dictionary is built, `values` always contains [`IDENTITY_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInstance {
    identity: String,
    values: BTreeMap<String, String>,
}

impl GroupInstance {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn with_values(identity: String, values: BTreeMap<String, String>) -> Self {
        Self { identity, values }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl Index<&str> for GroupInstance {
    type Output = str;

    fn index(&self, key: &str) -> &str {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no tag '{key}' in group instance '{}'", self.identity),
        }
    }
}

/// A database login assembled from `<LoginName>.<Field>` tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbLogin {
    pub login_name: String,
    pub username: String,
    pub password: String,
    pub default_db: String,
}

/// What a tag name resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Scalar(String),
    Group(Vec<GroupInstance>),
    Login(DbLogin),
}

impl TagValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&[GroupInstance]> {
        match self {
            Self::Group(instances) => Some(instances),
            _ => None,
        }
    }

    pub fn as_login(&self) -> Option<&DbLogin> {
        match self {
            Self::Login(login) => Some(login),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.write_str(value),
            Self::Group(instances) => {
                let identities: Vec<_> = instances.iter().map(|i| i.identity()).collect();
                write!(f, "[{}]", identities.join(", "))
            }
            Self::Login(login) => f.write_str(&login.username),
        }
    }
}

impl PartialEq<str> for TagValue {
    fn eq(&self, other: &str) -> bool {
        self.as_scalar() == Some(other)
    }
}

impl PartialEq<&str> for TagValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_scalar() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_compares_with_str() {
        let value = TagValue::Scalar("SYS".into());
        assert_eq!(value, "SYS");
        assert_ne!(value, "notSYS");
        assert_eq!(value.to_string(), "SYS");
    }

    #[test]
    fn group_display_lists_identities() {
        let value = TagValue::Group(vec![GroupInstance::new("myId"), GroupInstance::new("myId2")]);
        assert_eq!(value.to_string(), "[myId, myId2]");
        assert_ne!(value, "myId");
    }

    #[test]
    #[should_panic(expected = "no tag 'missing'")]
    fn group_instance_index_panics_on_missing_key() {
        let instance = GroupInstance::new("myId");
        let _ = &instance["missing"];
    }
}
