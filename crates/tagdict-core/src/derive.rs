//! Derived views: finalised label groups and database logins
//!
//! Login records follow one fixed key convention over the resolved scalars:
//!
//! ```text
//! AUDIT.Username  = {ClientCode}-{Environment}-AUDIT
//! AUDIT.Password  = Some high entropy random text
//! AUDIT.DefaultDb = {ClientCode}-{Environment}-AUDIT
//! ```
//!
//! The login name is everything before the only `.` in the key and must not
//! be empty. A prefix becomes a login only when all three fields are present;
//! anything else is not a login record and is left alone.

use std::collections::BTreeMap;

use crate::Result;
use crate::substitute::Substitutor;
use crate::tag::{DbLogin, GroupInstance, IDENTITY_KEY};

pub const LOGIN_SEPARATOR: char = '.';
pub const USERNAME_FIELD: &str = "Username";
pub const PASSWORD_FIELD: &str = "Password";
pub const DEFAULT_DB_FIELD: &str = "DefaultDb";

/// Substitute every group instance and expose its identity as a tag.
///
/// Tokens resolve against the instance's own tags first, then `resolved`.
pub fn finalize_groups(
    groups: BTreeMap<String, Vec<GroupInstance>>,
    resolved: &BTreeMap<String, String>,
    max_depth: usize,
) -> Result<BTreeMap<String, Vec<GroupInstance>>> {
    let mut finalized = BTreeMap::new();

    for (label, instances) in groups {
        let mut done = Vec::with_capacity(instances.len());
        for instance in instances {
            let identity = instance.identity().to_string();
            let mut local = instance.values().clone();
            local.insert(IDENTITY_KEY.to_string(), identity.clone());

            let values = Substitutor::new(&local, max_depth)
                .with_fallback(resolved)
                .resolve_all()?;
            // The instance identity is the substituted `identity` tag
            let identity = values.get(IDENTITY_KEY).cloned().unwrap_or(identity);
            done.push(GroupInstance::with_values(identity, values));
        }
        tracing::debug!(label = %label, instances = done.len(), "Finalized label group");
        finalized.insert(label, done);
    }

    Ok(finalized)
}

/// Split a key into `(login name, field)` if it follows the login convention.
pub fn parse_login_key(key: &str) -> Option<(&str, &str)> {
    let (login, field) = key.split_once(LOGIN_SEPARATOR)?;
    if login.is_empty() || field.contains(LOGIN_SEPARATOR) {
        return None;
    }
    match field {
        USERNAME_FIELD | PASSWORD_FIELD | DEFAULT_DB_FIELD => Some((login, field)),
        _ => None,
    }
}

#[derive(Default)]
struct LoginFields<'a> {
    username: Option<&'a str>,
    password: Option<&'a str>,
    default_db: Option<&'a str>,
}

/// Build login records from fully substituted scalars.
pub fn build_logins(resolved: &BTreeMap<String, String>) -> BTreeMap<String, DbLogin> {
    let mut candidates: BTreeMap<&str, LoginFields<'_>> = BTreeMap::new();

    for (key, value) in resolved {
        let Some((login, field)) = parse_login_key(key) else {
            continue;
        };
        let fields = candidates.entry(login).or_default();
        match field {
            USERNAME_FIELD => fields.username = Some(value.as_str()),
            PASSWORD_FIELD => fields.password = Some(value.as_str()),
            _ => fields.default_db = Some(value.as_str()),
        }
    }

    let mut logins = BTreeMap::new();
    for (login, fields) in candidates {
        match (fields.username, fields.password, fields.default_db) {
            (Some(username), Some(password), Some(default_db)) => {
                logins.insert(
                    login.to_string(),
                    DbLogin {
                        login_name: login.to_string(),
                        username: username.to_string(),
                        password: password.to_string(),
                        default_db: default_db.to_string(),
                    },
                );
            }
            _ => tracing::debug!(login, "Incomplete login fields, not a login record"),
        }
    }

    tracing::debug!(count = logins.len(), "Derived database logins");
    logins
}
