// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::NexusConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &NexusConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let url = config.webhook.url.trim();
    if url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "webhook.url must not be empty".to_string(),
        });
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("webhook.url `{url}` must start with http:// or https://"),
        });
    }

    if config.webhook.source.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "webhook.source must not be empty".to_string(),
        });
    }

    if config.webhook.timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "webhook.timeout_secs must be at least 1 when set".to_string(),
        });
    }

    let level = config.console.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.log_level `{}` is not one of {}",
                config.console.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&NexusConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = NexusConfig::default();
        config.webhook.url = "ftp://example.com/hook".into();
        config.webhook.source = "  ".into();
        config.webhook.timeout_secs = Some(0);
        config.console.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("ftp://"))
        ));
    }

    #[test]
    fn empty_url_fails() {
        let mut config = NexusConfig::default();
        config.webhook.url = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("must not be empty"))
        ));
    }

    #[test]
    fn parsed_https_endpoint_is_valid() {
        let toml_str = r#"
[webhook]
url = "https://automation.example.com/webhook/nexus"
timeout_secs = 15

[console]
fallback_to_samples = false
"#;
        let config: NexusConfig = toml::from_str(toml_str).unwrap();
        assert!(validate_config(&config).is_ok());
        assert!(!config.console.fallback_to_samples);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = NexusConfig::default();
        config.console.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
