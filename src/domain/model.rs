use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 來源 URL 模板中代表 CEP 的佔位符
pub const CEP_PLACEHOLDER: &str = "{cep}";

/// A postal code that already passed validation.
///
/// Only [`LookupKey::parse`] can build one, so holding a
/// `LookupKey` means the `00000-000` shape was checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One remote source that can answer a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    pub url_template: String,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    pub fn api_cep() -> Self {
        Self::new("ApiCep", "https://cdn.apicep.com/file/apicep/{cep}.json")
    }

    pub fn via_cep() -> Self {
        Self::new("ViaCep", "https://viacep.com.br/ws/{cep}/json/")
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::api_cep(), Self::via_cep()]
    }

    /// 以 CEP 填入模板，得到完整的端點
    pub fn endpoint(&self, key: &LookupKey) -> String {
        self.url_template.replace(CEP_PLACEHOLDER, key.as_str())
    }
}

/// Parsed body of the winning source. No schema is assumed beyond "JSON object".
pub type LookupResult = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone)]
pub struct RaceOutcome {
    pub winner: SourceDescriptor,
    pub result: LookupResult,
    pub elapsed: Duration,
}
