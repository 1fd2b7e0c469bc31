//! Friendly names for externally imposed environment variables
//!
//! Deployment orchestrators export variables with long, vendor-specific
//! names. The rest of the engine and every template refer to them by the
//! short tag names below. Only environment sources are translated.

/// Raw variable name to friendly tag name
const FRIENDLY_NAMES: &[(&str, &str)] = &[
    ("OctopusEnvironmentName", "Environment"),
    ("OctopusPackageVersion", "PackageVersion"),
    ("OctopusMachineName", "MachineName"),
    ("OctopusProjectName", "ProjectName"),
    ("OctopusReleaseNumber", "ReleaseNumber"),
    ("OctopusTenantName", "TenantName"),
];

/// Translate a raw environment variable name, passing unmapped names through.
pub fn translate(name: &str) -> &str {
    FRIENDLY_NAMES
        .iter()
        .find(|(raw, _)| *raw == name)
        .map(|(_, friendly)| *friendly)
        .unwrap_or(name)
}

/// True when `name` is one of the raw variable names the table maps.
pub fn is_translated(name: &str) -> bool {
    FRIENDLY_NAMES.iter().any(|(raw, _)| *raw == name)
}

/// Iterate the fixed translation table as `(raw, friendly)` pairs.
pub fn friendly_names() -> impl Iterator<Item = (&'static str, &'static str)> {
    FRIENDLY_NAMES.iter().copied()
}
