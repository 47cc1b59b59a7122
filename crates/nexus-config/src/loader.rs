// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./nexus.toml` > `~/.config/nexus/nexus.toml` > `/etc/nexus/nexus.toml`
//! with environment variable overrides via the `NEXUS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::NexusConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/nexus/nexus.toml`
/// 3. `~/.config/nexus/nexus.toml`
/// 4. `./nexus.toml`
/// 5. `NEXUS_*` environment variables
pub fn load_config() -> Result<NexusConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<NexusConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NexusConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NexusConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NexusConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the XDG lookup, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(NexusConfig::default()))
        .merge(Toml::file("/etc/nexus/nexus.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("nexus/nexus.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("nexus.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `NEXUS_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `NEXUS_WEBHOOK_TIMEOUT_SECS`
/// must become `webhook.timeout_secs`, not `webhook.timeout.secs`. Variables
/// outside the known sections are ignored.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("NEXUS_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            key.starts_with("webhook_") || key.starts_with("console_")
        })
        .map(|key| {
            let mapped = key
                .as_str()
                .to_ascii_lowercase()
                .replacen("webhook_", "webhook.", 1)
                .replacen("console_", "console.", 1);
            mapped.into()
        })
}
