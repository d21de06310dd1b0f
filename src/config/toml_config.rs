use crate::domain::model::SourceDescriptor;
use crate::utils::error::{CepError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url_template, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::MAX_TIMEOUT_MS;

/// Optional file-based configuration. Every section may be omitted.
///
/// ```toml
/// [race]
/// timeout_ms = 1000
/// fail_fast = false
///
/// [[sources]]
/// name = "ViaCep"
/// url_template = "https://viacep.com.br/ws/{cep}/json/"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub race: Option<RaceSection>,
    pub sources: Option<Vec<SourceDescriptor>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceSection {
    pub timeout_ms: Option<u64>,
    pub fail_fast: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CepError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CepError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MIRROR_HOST})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| CepError::Configuration {
            message: format!("error occurred during regex compilation: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_ms(&self) -> Option<u64> {
        self.race.as_ref().and_then(|r| r.timeout_ms)
    }

    pub fn fail_fast(&self) -> Option<bool> {
        self.race.as_ref().and_then(|r| r.fail_fast)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(timeout_ms) = self.timeout_ms() {
            validate_range("race.timeout_ms", timeout_ms, 1, MAX_TIMEOUT_MS)?;
        }

        if let Some(sources) = &self.sources {
            if sources.is_empty() {
                return Err(CepError::ConfigValidationError {
                    field: "sources".to_string(),
                    message: "at least one source is required when [[sources]] is present"
                        .to_string(),
                });
            }
            for (index, source) in sources.iter().enumerate() {
                validate_non_empty_string(&format!("sources[{}].name", index), &source.name)?;
                validate_url_template(
                    &format!("sources[{}].url_template", index),
                    &source.url_template,
                )?;
            }
        }

        Ok(())
    }
}
