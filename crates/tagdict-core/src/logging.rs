//! Logging setup for hosts embedding the tag dictionary

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber that prints compact logs to stdout.
///
/// The level comes from `RUST_LOG`, defaulting to "info". Resolution stages
/// log at debug level, so `RUST_LOG=tagdict_core=debug` shows how each tag
/// was chosen.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_init_is_repeatable() {
        // A second init fails because a global subscriber is already set
        let _ = init();
        assert!(init().is_err());

        tracing::debug!("debug message after init");
    }
}
