//! Property tests for precedence and template expansion

use proptest::prelude::*;
use std::collections::BTreeMap;
use tagdict_core::TaggedProperty;
use tagdict_core::merge::merge;
use tagdict_core::source::SourceTags;
use tagdict_core::substitute::Substitutor;

const IDENTITY: &str = "me";

/// Scope of the single `Tag` property a generated source carries
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scope {
    Generic,
    Matching,
    Foreign,
}

fn scope() -> impl Strategy<Value = Scope> {
    prop_oneof![Just(Scope::Generic), Just(Scope::Matching), Just(Scope::Foreign)]
}

fn sources_from(scopes: &[Scope]) -> Vec<SourceTags> {
    scopes
        .iter()
        .enumerate()
        .map(|(rank, scope)| {
            let value = format!("from-{rank}");
            let property = match scope {
                Scope::Generic => TaggedProperty::generic("Tag", value, rank),
                Scope::Matching => TaggedProperty::scoped("Tag", value, IDENTITY, rank),
                Scope::Foreign => TaggedProperty::scoped("Tag", value, "someone-else", rank),
            };
            SourceTags {
                properties: vec![property],
                groups: Vec::new(),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn identity_match_wins_regardless_of_position(scopes in prop::collection::vec(scope(), 1..8)) {
        let merged = merge(IDENTITY, sources_from(&scopes)).unwrap();
        let winner = &merged.scalars["Tag"];

        // First matching source, else the first source
        let expected_rank = scopes
            .iter()
            .position(|s| *s == Scope::Matching)
            .unwrap_or(0);
        prop_assert_eq!(winner, &format!("from-{expected_rank}"));
    }

    #[test]
    fn substitution_is_idempotent(
        values in prop::collection::vec("[a-z]{0,3}(\\{\\{[a-z]{1,2}\\}\\}|\\{\\})?", 1..6)
    ) {
        // Values may carry literal `{}` and `{{name}}` text
        // Each key references the next one, the last is a literal
        let mut raw = BTreeMap::new();
        for (i, value) in values.iter().enumerate() {
            let template = if i + 1 < values.len() {
                format!("{value}{{K{}}}", i + 1)
            } else {
                value.clone()
            };
            raw.insert(format!("K{i}"), template);
        }

        let once = Substitutor::new(&raw, 64).resolve_all().unwrap();
        let twice = Substitutor::new(&once, 64).resolve_all().unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once["K0"], &values.concat());
    }
}
