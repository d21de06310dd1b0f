pub mod fetcher;
pub mod lookup;
pub mod race;

pub use crate::domain::model::{LookupKey, LookupResult, RaceOutcome, SourceDescriptor};
pub use crate::domain::ports::Fetcher;
pub use crate::utils::error::Result;
