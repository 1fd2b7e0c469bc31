//! Canned environment variable sets.
//!
//! Returned as plain pairs so every crate can collect them into its own
//! snapshot type.

pub const CLIENT_CODE: &str = "FAA";
pub const ENVIRONMENT: &str = "LOC";

/// The environment a deployment agent would export on a developer machine.
pub fn deployment_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("IsSys", "IsSys"),
        ("QueueAppServer", "QueueAppServer"),
        ("ClientCode", CLIENT_CODE),
        ("Environment", ENVIRONMENT),
    ]
}

/// [`deployment_env`] minus the names in `without`, plus the `extra` pairs.
pub fn deployment_env_with(
    without: &[&str],
    extra: &[(&'static str, &'static str)],
) -> Vec<(&'static str, &'static str)> {
    deployment_env()
        .into_iter()
        .filter(|(name, _)| !without.contains(name))
        .chain(extra.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_env_with_replaces_entries() {
        let env = deployment_env_with(&["Environment"], &[("OctopusEnvironmentName", "DIF")]);
        assert!(!env.iter().any(|(k, _)| *k == "Environment"));
        assert!(env.contains(&("OctopusEnvironmentName", "DIF")));
    }
}
