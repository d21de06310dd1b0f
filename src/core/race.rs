//! First-success-wins race between equivalent lookup sources.
//!
//! Every source gets its own spawned task that reports through a dedicated oneshot
//! channel. The receivers are polled together in a [`FuturesUnordered`], which yields
//! in completion order, and the whole wait is bounded by one deadline armed when the
//! race starts; a timeout too large to represent as a deadline waits indefinitely.
//! Once a winner is known the remaining receivers are dropped: the losing tasks keep
//! running until their request finishes and their results are thrown away unread.
//!
//! When two sources finish at the same instant the one `FuturesUnordered` yields
//! first wins; the order between them is left to the executor.

use crate::domain::model::{LookupKey, RaceOutcome, SourceDescriptor};
use crate::domain::ports::Fetcher;
use crate::utils::error::{FetchError, RaceError};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// What a source failure means for the rest of the race.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The failing source drops out; the others keep racing until the deadline.
    #[default]
    SkipFailed,
    /// The first failure ends the race.
    AbortOnFailure,
}

pub struct RaceCoordinator<F: Fetcher + 'static> {
    fetcher: Arc<F>,
    policy: FailurePolicy,
}

impl<F: Fetcher + 'static> RaceCoordinator<F> {
    pub fn new(fetcher: F) -> Self {
        Self::from_shared(Arc::new(fetcher))
    }

    pub fn from_shared(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn race(
        &self,
        key: &LookupKey,
        sources: &[SourceDescriptor],
        timeout: Duration,
    ) -> Result<RaceOutcome, RaceError> {
        if sources.is_empty() {
            return Err(RaceError::NoSources);
        }

        let started = Instant::now();

        tracing::info!(
            "Racing {} sources for {} (timeout {}ms)",
            sources.len(),
            key,
            timeout.as_millis()
        );

        let mut pending = FuturesUnordered::new();
        for source in sources {
            let endpoint = source.endpoint(key);
            let (tx, rx) = oneshot::channel();

            let fetcher = Arc::clone(&self.fetcher);
            let task_endpoint = endpoint.clone();
            tokio::spawn(async move {
                let result = fetcher.fetch(&task_endpoint).await;
                // 比賽已結束時 receiver 已被丟棄，結果直接捨棄
                let _ = tx.send(result);
            });

            let source = source.clone();
            pending.push(async move {
                let result = rx.await.unwrap_or_else(|_| {
                    Err(FetchError::transport(
                        &endpoint,
                        "fetch task ended without reporting a result",
                    ))
                });
                (source, result)
            });
        }

        let policy = self.policy;
        let first_success = async {
            let mut failures = Vec::new();

            while let Some((source, result)) = pending.next().await {
                match result {
                    Ok(document) => return Ok((source, document)),
                    Err(error) => {
                        tracing::warn!("Source {} failed: {}", source.name, error);
                        match policy {
                            FailurePolicy::AbortOnFailure => {
                                return Err(RaceError::SourceFailed {
                                    source_name: source.name,
                                    error,
                                });
                            }
                            FailurePolicy::SkipFailed => failures.push((source.name, error)),
                        }
                    }
                }
            }

            Err(RaceError::AllSourcesFailed { failures })
        };

        let outcome = match tokio::time::timeout(timeout, first_success).await {
            Ok(Ok((winner, result))) => {
                let elapsed = started.elapsed();
                tracing::info!("{} won the race in {:?}", winner.name, elapsed);
                Ok(RaceOutcome {
                    winner,
                    result,
                    elapsed,
                })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::warn!("No source answered within {}ms", timeout.as_millis());
                Err(RaceError::Timeout { deadline: timeout })
            }
        };

        if !pending.is_empty() {
            tracing::debug!("Abandoning {} pending source(s)", pending.len());
        }

        outcome
    }
}
