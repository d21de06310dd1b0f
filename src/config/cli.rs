use crate::config::{RaceSettings, TomlConfig};
use crate::core::race::FailurePolicy;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cep-race")]
#[command(about = "Look up a zip code on ApiCep and ViaCep at once and keep the fastest answer")]
pub struct CliConfig {
    /// Zip code in 00000-000 format; prompted on stdin when omitted
    pub cep: Option<String>,

    #[arg(long, help = "Deadline for the whole race in milliseconds [default: 1000]")]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "TOML file with [race] settings and [[sources]]")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "End the race as soon as any source fails")]
    pub fail_fast: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 命令列參數優先於 TOML，TOML 優先於預設值
    pub fn race_settings(&self) -> Result<RaceSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                RaceSettings::from_toml(&file_config)
            }
            None => RaceSettings::default(),
        };

        if let Some(timeout_ms) = self.timeout_ms {
            settings = settings.with_timeout_ms(timeout_ms);
        }
        if self.fail_fast {
            settings = settings.with_policy(FailurePolicy::AbortOnFailure);
        }

        settings.validate()?;
        Ok(settings)
    }
}
