use crate::domain::model::{LookupKey, CEP_PLACEHOLDER};
use crate::utils::error::{CepError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const POSTAL_CODE_PATTERN: &str = r"^[0-9]{5}-[0-9]{3}$";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Matches the `00000-000` postal code shape.
#[derive(Debug, Clone)]
pub struct PostalCodeValidator {
    pattern: Regex,
}

impl PostalCodeValidator {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(POSTAL_CODE_PATTERN).map_err(|e| CepError::Configuration {
            message: format!("error occurred during regex compilation: {}", e),
        })?;
        Ok(Self { pattern })
    }

    /// 整個行程只編譯一次
    pub fn shared() -> Result<&'static PostalCodeValidator> {
        static SHARED: OnceLock<std::result::Result<PostalCodeValidator, String>> = OnceLock::new();

        SHARED
            .get_or_init(|| Self::new().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| CepError::Configuration {
                message: message.clone(),
            })
    }

    pub fn is_valid(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}

/// Returns true iff `candidate` is exactly five ASCII digits, a hyphen and three ASCII digits.
pub fn validate(candidate: &str) -> bool {
    PostalCodeValidator::shared()
        .map(|validator| validator.is_valid(candidate))
        .unwrap_or(false)
}

impl LookupKey {
    /// Builds a key from one line of user input.
    ///
    /// Only the line terminator is stripped; any other surrounding character makes
    /// the input invalid.
    pub fn parse(input: &str) -> Result<Self> {
        let candidate = input.strip_suffix('\n').unwrap_or(input);
        let candidate = candidate.strip_suffix('\r').unwrap_or(candidate);

        if !PostalCodeValidator::shared()?.is_valid(candidate) {
            return Err(CepError::InvalidInput {
                input: candidate.to_string(),
            });
        }

        Ok(LookupKey::new_unchecked(candidate.to_string()))
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CepError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// A source template must carry `{cep}` and form an http(s) URL once filled in.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains(CEP_PLACEHOLDER) {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("URL template must contain {}", CEP_PLACEHOLDER),
        });
    }

    validate_url(field_name, &template.replace(CEP_PLACEHOLDER, "00000-000"))
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
