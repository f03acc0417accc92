//! Shared setup for the command-line binaries.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::{ContentCatalog, GeneratorConfig, Registries};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `DUNGEON_LOG=debug`.
pub const LOG_ENV: &str = "DUNGEON_LOG";

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(io::stderr).init();
}

/// Built-in registries and content, extended from `config` when given.
pub fn load_registries(config: Option<&Path>) -> Result<(Registries, ContentCatalog)> {
    let mut registries = Registries::with_defaults();
    let mut catalog = ContentCatalog::build_default();

    if let Some(path) = config {
        GeneratorConfig::load(path)
            .and_then(|config| config.apply(&mut registries, &mut catalog))
            .with_context(|| format!("Failed to apply generator config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded generator config");
    }

    Ok((registries, catalog))
}
