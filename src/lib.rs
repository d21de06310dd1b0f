pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{RaceSettings, TomlConfig};
pub use crate::core::{
    fetcher::HttpFetcher,
    lookup::{render_outcome, CepLookup},
    race::{FailurePolicy, RaceCoordinator},
};
pub use domain::model::{LookupKey, LookupResult, RaceOutcome, SourceDescriptor};
pub use domain::ports::Fetcher;
pub use utils::error::{CepError, FetchError, RaceError, Result};
pub use utils::validation::validate;
