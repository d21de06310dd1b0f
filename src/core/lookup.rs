use crate::config::RaceSettings;
use crate::core::race::RaceCoordinator;
use crate::domain::model::{LookupKey, RaceOutcome};
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;

/// Joins validation and the race: raw input in, winning document out.
pub struct CepLookup<F: Fetcher + 'static> {
    coordinator: RaceCoordinator<F>,
    settings: RaceSettings,
}

impl<F: Fetcher + 'static> CepLookup<F> {
    pub fn new(fetcher: F, settings: RaceSettings) -> Self {
        let coordinator = RaceCoordinator::new(fetcher).with_policy(settings.policy);
        Self {
            coordinator,
            settings,
        }
    }

    pub fn settings(&self) -> &RaceSettings {
        &self.settings
    }

    pub async fn run(&self, raw_input: &str) -> Result<RaceOutcome> {
        let key = LookupKey::parse(raw_input)?;
        tracing::debug!("Validated zip code {}", key);

        let outcome = self
            .coordinator
            .race(&key, &self.settings.sources, self.settings.timeout)
            .await?;

        Ok(outcome)
    }
}

/// 輸出格式: 勝出來源名稱加上排版後的 JSON
pub fn render_outcome(outcome: &RaceOutcome) -> Result<String> {
    let document = serde_json::to_string_pretty(&outcome.result)?;
    Ok(format!("{}: {}", outcome.winner.name, document))
}
