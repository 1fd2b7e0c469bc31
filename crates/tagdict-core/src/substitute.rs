//! `{Name}` template expansion
//!
//! A token is `{` + name + `}` where the name starts with a letter or
//! underscore and continues with letters, digits, `_`, `.` or `-`. Any other
//! brace is literal text, so JSON fragments and shell snippets pass through.
//! A name wrapped in doubled braces, as in `{{Name}}`, or with any extra brace
//! on either side, is literal too and is copied unchanged. Expansion never
//! removes braces around literal text, so resolving a resolved table again
//! returns it unchanged.
//!
//! Expansion is recursive and memoised per key. Cycles are detected on the
//! resolution stack and the chain length is bounded by
//! [`Settings::max_substitution_depth`](crate::Settings).

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Pattern of a braced name; group 1 is the name. Only a match with exactly
/// one brace on each side is a token.
pub static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{+([A-Za-z_][A-Za-z0-9_.\-]*)\}+").unwrap());

/// True when `text` contains at least one template token.
pub fn has_tokens(text: &str) -> bool {
    tokens(text).next().is_some()
}

/// Tokens of `text` as (byte range of the token, referenced name)
fn tokens(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    TOKEN_PATTERN
        .captures_iter(text)
        .map(|caps| token_parts(&caps))
        .filter(|(whole, name)| whole.len() == name.len() + 2)
}

/// Resolves tokens against a table of raw values, falling back to an already
/// resolved table for names the raw table does not define.
pub struct Substitutor<'a> {
    raw: &'a BTreeMap<String, String>,
    fallback: Option<&'a BTreeMap<String, String>>,
    resolved: BTreeMap<String, String>,
    stack: Vec<String>,
    max_depth: usize,
}

impl<'a> Substitutor<'a> {
    pub fn new(raw: &'a BTreeMap<String, String>, max_depth: usize) -> Self {
        Self {
            raw,
            fallback: None,
            resolved: BTreeMap::new(),
            stack: Vec::new(),
            max_depth,
        }
    }

    /// Names missing from `raw` are looked up in `fallback`, which must
    /// already be fully resolved.
    pub fn with_fallback(mut self, fallback: &'a BTreeMap<String, String>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Resolve every raw value.
    pub fn resolve_all(mut self) -> Result<BTreeMap<String, String>> {
        let raw = self.raw;
        for (key, template) in raw {
            self.resolve_key(key, template)?;
        }
        Ok(self.resolved)
    }

    /// Expand tokens in arbitrary text. `owner` names the text in errors.
    pub fn render(&mut self, owner: &str, text: &str) -> Result<String> {
        self.expand(owner, text)
    }

    fn resolve_key(&mut self, key: &str, template: &str) -> Result<String> {
        if let Some(value) = self.resolved.get(key) {
            return Ok(value.clone());
        }

        if let Some(start) = self.stack.iter().position(|k| k == key) {
            let mut chain = self.stack[start..].to_vec();
            chain.push(key.to_string());
            return Err(Error::SubstitutionCycle { chain });
        }

        if self.stack.len() >= self.max_depth {
            return Err(Error::SubstitutionTooDeep {
                key: key.to_string(),
                limit: self.max_depth,
            });
        }

        self.stack.push(key.to_string());
        let expanded = self.expand(key, template);
        self.stack.pop();
        let expanded = expanded?;

        self.resolved.insert(key.to_string(), expanded.clone());
        Ok(expanded)
    }

    fn lookup(&mut self, owner: &str, reference: &str) -> Result<String> {
        let raw = self.raw;
        if let Some(template) = raw.get(reference) {
            return self.resolve_key(reference, template);
        }
        if let Some(value) = self.fallback.and_then(|f| f.get(reference)) {
            return Ok(value.clone());
        }
        Err(Error::UnresolvedReference {
            key: owner.to_string(),
            reference: reference.to_string(),
        })
    }

    fn expand(&mut self, owner: &str, template: &str) -> Result<String> {
        if !has_tokens(template) {
            return Ok(template.to_string());
        }

        let mut output = String::with_capacity(template.len());
        let mut last = 0;
        for (whole, name) in tokens(template) {
            output.push_str(&template[last..whole.start]);
            output.push_str(&self.lookup(owner, name)?);
            last = whole.end;
        }
        output.push_str(&template[last..]);
        Ok(output)
    }
}

fn token_parts<'t>(caps: &Captures<'t>) -> (Range<usize>, &'t str) {
    // Both groups always participate in a match of TOKEN_PATTERN
    let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
    let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    (whole, name)
}
