// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Nexus configuration system.

use nexus_config::diagnostic::ConfigError;
use nexus_config::model::NexusConfig;
use nexus_config::{load_and_validate_str, load_config_from_path, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_nexus_config() {
    let toml = r#"
[webhook]
url = "https://automation.example.com/webhook/abc"
source = "ops_console"
timeout_secs = 15

[console]
log_level = "debug"
fallback_to_samples = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.webhook.url, "https://automation.example.com/webhook/abc");
    assert_eq!(config.webhook.source, "ops_console");
    assert_eq!(config.webhook.timeout_secs, Some(15));
    assert_eq!(config.console.log_level, "debug");
    assert!(!config.console.fallback_to_samples);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.webhook.url, "http://localhost:5678/webhook/nexus");
    assert_eq!(config.webhook.source, "nexus_ai_web_client");
    assert!(config.webhook.timeout_secs.is_none());
    assert_eq!(config.console.log_level, "info");
    assert!(config.console.fallback_to_samples);
}

#[test]
fn unknown_field_in_webhook_produces_error() {
    let toml = r#"
[webhook]
ulr = "http://x"
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("ulr"),
        "error should mention unknown field, got: {err_str}"
    );
}

#[test]
fn unknown_key_becomes_diagnostic_with_suggestion() {
    let toml = r#"
[console]
log_levle = "info"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "log_levle" && suggestion.as_deref() == Some("log_level")
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

#[test]
fn wrong_type_becomes_invalid_type() {
    let toml = r#"
[webhook]
timeout_secs = "soon"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs"))),
        "got: {errors:?}"
    );
}

#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[webhook]
url = "localhost:5678"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn env_style_override_via_figment() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: NexusConfig = Figment::new()
        .merge(Serialized::defaults(NexusConfig::default()))
        .merge(Toml::string("[webhook]\nsource = \"from_file\"\n"))
        .merge(("webhook.source", "from_env"))
        .extract()
        .expect("should extract");
    assert_eq!(config.webhook.source, "from_env");
}

#[test]
fn env_vars_map_onto_sections() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "console.toml",
            "[webhook]\nsource = \"from_file\"\n\n[console]\nfallback_to_samples = true\n",
        )?;
        jail.set_env("NEXUS_WEBHOOK_TIMEOUT_SECS", "15");
        jail.set_env("NEXUS_WEBHOOK_SOURCE", "from_env");
        jail.set_env("NEXUS_CONSOLE_FALLBACK_TO_SAMPLES", "false");
        jail.set_env("NEXUS_LOG", "x");

        let config = load_config_from_path(std::path::Path::new("console.toml"))?;
        assert_eq!(config.webhook.timeout_secs, Some(15));
        assert_eq!(config.webhook.source, "from_env");
        assert!(!config.console.fallback_to_samples);
        Ok(())
    });
}

#[test]
fn config_serializes_to_json() {
    let json = serde_json::to_value(NexusConfig::default()).unwrap();
    assert_eq!(json["webhook"]["source"], "nexus_ai_web_client");
    assert_eq!(json["console"]["fallback_to_samples"], true);
}
