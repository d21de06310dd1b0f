#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::race::FailurePolicy;
use crate::domain::model::SourceDescriptor;
use crate::utils::error::{CepError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url_template,
    Validate,
};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Everything one race needs besides the key.
#[derive(Debug, Clone)]
pub struct RaceSettings {
    pub sources: Vec<SourceDescriptor>,
    pub timeout: Duration,
    pub policy: FailurePolicy,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            sources: SourceDescriptor::defaults(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            policy: FailurePolicy::default(),
        }
    }
}

impl RaceSettings {
    /// 以檔案中的設定覆蓋預設值
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();

        if let Some(sources) = &config.sources {
            settings.sources = sources.clone();
        }
        if let Some(timeout_ms) = config.timeout_ms() {
            settings.timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(true) = config.fail_fast() {
            settings.policy = FailurePolicy::AbortOnFailure;
        }

        settings
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Validate for RaceSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("sources", self.sources.len(), 1)?;

        let timeout_ms = u64::try_from(self.timeout.as_millis()).map_err(|_| {
            CepError::InvalidConfigValueError {
                field: "timeout_ms".to_string(),
                value: format!("{:?}", self.timeout),
                reason: "Value does not fit in milliseconds".to_string(),
            }
        })?;
        validate_range("timeout_ms", timeout_ms, 1, MAX_TIMEOUT_MS)?;

        for source in &self.sources {
            validate_non_empty_string("sources.name", &source.name)?;
            validate_url_template(&format!("sources.{}", source.name), &source.url_template)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RaceSettings::default();

        assert_eq!(settings.sources.len(), 2);
        assert_eq!(settings.timeout, Duration::from_secs(1));
        assert_eq!(settings.policy, FailurePolicy::SkipFailed);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[race]
timeout_ms = 300
fail_fast = true

[[sources]]
name = "Only"
url_template = "http://only.example.com/{cep}"
"#,
        )
        .unwrap();

        let settings = RaceSettings::from_toml(&config);

        assert_eq!(settings.timeout, Duration::from_millis(300));
        assert_eq!(settings.policy, FailurePolicy::AbortOnFailure);
        assert_eq!(
            settings.sources,
            vec![SourceDescriptor::new("Only", "http://only.example.com/{cep}")]
        );
    }

    #[test]
    fn test_partial_toml_keeps_default_sources() {
        let config = TomlConfig::from_toml_str("[race]\ntimeout_ms = 1500\n").unwrap();
        let settings = RaceSettings::from_toml(&config);

        assert_eq!(settings.sources, SourceDescriptor::defaults());
        assert_eq!(settings.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        let no_sources = RaceSettings {
            sources: vec![],
            ..RaceSettings::default()
        };
        assert!(no_sources.validate().is_err());

        assert!(RaceSettings::default().with_timeout_ms(0).validate().is_err());
        assert!(RaceSettings::default()
            .with_timeout_ms(MAX_TIMEOUT_MS + 1)
            .validate()
            .is_err());
    }
}
