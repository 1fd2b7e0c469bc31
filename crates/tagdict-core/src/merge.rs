//! Precedence merge of tags from multiple sources
//!
//! For every name the winner is chosen by, in order:
//!
//! 1. identity match: a property scoped to the dictionary identity beats any
//!    property that is not, wherever its source sits in the list;
//! 2. source rank: a lower (earlier) source beats a later one;
//! 3. within one source, a generic property beats one scoped to some other
//!    identity, then document order decides.
//!
//! A name used both for a scalar and for a label group is a data error.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::source::SourceTags;
use crate::tag::{GroupInstance, TaggedProperty};

/// Scalars and label groups after precedence has been applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTags {
    pub scalars: BTreeMap<String, String>,
    /// Instances in source order, then document order
    pub groups: BTreeMap<String, Vec<GroupInstance>>,
}

/// Ordering key; the smallest key wins
type Precedence = (bool, usize, bool, usize);

fn precedence(property: &TaggedProperty, identity: &str, position: usize) -> Precedence {
    let matches = property.identity.as_deref() == Some(identity);
    let foreign = property.identity.is_some() && !matches;
    (!matches, property.source_rank, foreign, position)
}

/// Merge the tags of every source, given in rank order.
pub fn merge(identity: &str, sources: Vec<SourceTags>) -> Result<MergedTags> {
    let mut winners: BTreeMap<String, (Precedence, String)> = BTreeMap::new();
    let mut groups: BTreeMap<String, Vec<(usize, GroupInstance)>> = BTreeMap::new();
    let mut position = 0usize;

    for source in sources {
        for property in source.properties {
            let key = precedence(&property, identity, position);
            position += 1;

            match winners.get(&property.name) {
                Some((current, _)) if *current <= key => {}
                _ => {
                    winners.insert(property.name, (key, property.value));
                }
            }
        }

        for entry in source.groups {
            groups
                .entry(entry.label)
                .or_default()
                .push((entry.source_rank, entry.instance));
        }
    }

    if let Some(name) = groups.keys().find(|name| winners.contains_key(*name)) {
        return Err(Error::NameCollision { name: name.clone() });
    }

    let groups: BTreeMap<String, Vec<GroupInstance>> = groups
        .into_iter()
        .map(|(label, mut instances)| {
            // Stable: keeps document order within one source
            instances.sort_by_key(|(rank, _)| *rank);
            (label, instances.into_iter().map(|(_, i)| i).collect())
        })
        .collect();

    tracing::debug!(
        scalars = winners.len(),
        groups = groups.len(),
        "Merged tag sources"
    );

    Ok(MergedTags {
        scalars: winners
            .into_iter()
            .map(|(name, (_, value))| (name, value))
            .collect(),
        groups,
    })
}
