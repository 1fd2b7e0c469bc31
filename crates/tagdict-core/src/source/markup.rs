//! Markup source: walks an element tree into properties and label groups
//!
//! Schema, relative to the root element (whose own name is not significant):
//!
//! ```text
//! <Structure>
//!   <DbUser>SomeUserName</DbUser>              scalar, generic
//!   <avalue identity="myId">idvalue</avalue>   scalar, scoped to myId
//!   <Identity name="myId">                     identity marker
//!     <IsSys>SYS</IsSys>                       scalar, scoped to myId
//!   </Identity>
//!   <GDS identity="myId"><IsSys>SYS</IsSys></GDS>    label group instance
//!   <GDS identity="myId2"><IsSys>SYS2</IsSys></GDS>  label group instance
//! </Structure>
//! ```
//!
//! A tag repeated among its siblings, or an element with child elements, is a
//! label group instance. Identity markers are never groups and do not nest.

use std::collections::{BTreeMap, HashSet};

use tagdict_markup::{Element, IDENTITY_ATTRIBUTE};

use super::{GroupEntry, SourceTags};
use crate::error::{Error, Result};
use crate::tag::{GroupInstance, IDENTITY_KEY, TaggedProperty};

/// Element name of a root-level identity marker
pub const IDENTITY_MARKER: &str = "Identity";

/// Attribute naming the identity of a marker
pub const MARKER_NAME_ATTRIBUTE: &str = "name";

/// Key holding the text of a group instance that has no child elements
pub const GROUP_TEXT_KEY: &str = "value";

/// Options for reading one markup tree
#[derive(Debug, Clone, Copy)]
pub struct MarkupContext<'a> {
    /// Identity the dictionary is built for; unscoped group instances inherit it
    pub identity: &'a str,
    /// Label used in error messages
    pub origin: &'a str,
    pub source_rank: usize,
    pub trim_text: bool,
}

/// Read a parsed markup tree. `None` (empty markup) yields no tags.
pub fn read_markup(root: Option<&Element>, ctx: MarkupContext<'_>) -> Result<SourceTags> {
    let mut reader = MarkupReader {
        ctx,
        tags: SourceTags::default(),
        seen: HashSet::new(),
    };

    if let Some(root) = root {
        reader.walk(root, None)?;
    }

    tracing::debug!(
        origin = ctx.origin,
        properties = reader.tags.properties.len(),
        groups = reader.tags.groups.len(),
        "Read markup source"
    );
    Ok(reader.tags)
}

struct MarkupReader<'a> {
    ctx: MarkupContext<'a>,
    tags: SourceTags,
    seen: HashSet<(String, Option<String>)>,
}

impl MarkupReader<'_> {
    fn walk(&mut self, container: &Element, scope: Option<&str>) -> Result<()> {
        for child in &container.children {
            if child.name == IDENTITY_MARKER {
                if scope.is_some() {
                    return Err(self.malformed(format!(
                        "<{IDENTITY_MARKER}> markers cannot be nested"
                    )));
                }
                let name = child.attribute(MARKER_NAME_ATTRIBUTE).ok_or_else(|| {
                    self.malformed(format!(
                        "<{IDENTITY_MARKER}> is missing its '{MARKER_NAME_ATTRIBUTE}' attribute"
                    ))
                })?;
                self.walk(child, Some(name))?;
                continue;
            }

            let repeated = container.count_children_named(&child.name) > 1;
            if repeated || !child.is_leaf() {
                self.push_group(child, scope)?;
            } else {
                self.push_scalar(child, scope)?;
            }
        }
        Ok(())
    }

    fn push_scalar(&mut self, element: &Element, scope: Option<&str>) -> Result<()> {
        let identity = element.identity().or(scope).map(str::to_string);
        if !self.seen.insert((element.name.clone(), identity.clone())) {
            return Err(self.malformed(match &identity {
                Some(identity) => format!(
                    "tag '{}' is defined twice for identity '{identity}'",
                    element.name
                ),
                None => format!("tag '{}' is defined twice", element.name),
            }));
        }

        self.tags.properties.push(TaggedProperty {
            name: element.name.clone(),
            value: self.text_of(element),
            identity,
            source_rank: self.ctx.source_rank,
        });
        Ok(())
    }

    fn push_group(&mut self, element: &Element, scope: Option<&str>) -> Result<()> {
        let identity = element
            .identity()
            .or(scope)
            .unwrap_or(self.ctx.identity)
            .to_string();

        let mut values = BTreeMap::new();
        for (key, value) in &element.attributes {
            if key != IDENTITY_ATTRIBUTE {
                values.insert(key.clone(), value.clone());
            }
        }

        if element.is_leaf() {
            values.insert(GROUP_TEXT_KEY.to_string(), self.text_of(element));
        }

        for child in &element.children {
            if !child.is_leaf() {
                return Err(self.malformed(format!(
                    "group '{}' contains nested element '{}'",
                    element.name, child.name
                )));
            }
            if child.name == IDENTITY_KEY {
                return Err(self.malformed(format!(
                    "group '{}' cannot define the reserved tag '{IDENTITY_KEY}'",
                    element.name
                )));
            }
            if values
                .insert(child.name.clone(), self.text_of(child))
                .is_some()
            {
                return Err(self.malformed(format!(
                    "group '{}' defines tag '{}' twice",
                    element.name, child.name
                )));
            }
        }

        self.tags.groups.push(GroupEntry {
            label: element.name.clone(),
            instance: GroupInstance::with_values(identity, values),
            source_rank: self.ctx.source_rank,
        });
        Ok(())
    }

    fn text_of(&self, element: &Element) -> String {
        let text = element.text.as_deref().unwrap_or("");
        if self.ctx.trim_text {
            text.trim().to_string()
        } else {
            text.to_string()
        }
    }

    fn malformed(&self, message: String) -> Error {
        Error::malformed(self.ctx.origin, message)
    }
}
