//! # Storage Module
//!
//! Handles all data persistence for the injection tracker.
//!
//! Records live either on a remote spreadsheet document or in local CSV
//! files. The `RecordStore` facade hides which one answered: it tries the
//! configured sources in order, caches the winning dataset briefly, and
//! reports source failures as warnings instead of errors. The UI never sees
//! a hard storage failure on the read path; worst case it sees empty data
//! plus a notice.

pub mod cache;
pub mod config;
pub mod csv;
pub mod dates;
pub mod sheets;
pub mod traits;

pub use cache::{DatasetCache, CACHE_TTL};
pub use config::{RemoteConfig, ServiceCredentials, TrackerConfig};
pub use self::csv::CsvConnection;
pub use traits::{Dataset, RecordSource, StoreError};

use log::{error, info, warn};
use std::time::Duration;

use crate::domain::models::injection::Injection;
use crate::domain::models::side_effect::SideEffect;
use self::csv::LocalCsvSource;
use sheets::RemoteSheetSource;

/// Source name reported when every source failed and empty data was served.
pub const EMPTY_SOURCE: &str = "empty";

/// A loaded dataset plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    /// Name of the source that served the data
    pub source: &'static str,
    /// One human-readable notice per source that was tried and failed
    pub warnings: Vec<String>,
}

/// Front door for all record reads and writes.
///
/// Sources are tried in order on every load and the first one that answers
/// wins; appends go to the first source only, so reads and writes cannot
/// silently diverge across sources.
pub struct RecordStore {
    sources: Vec<Box<dyn RecordSource>>,
    cache: DatasetCache,
}

impl RecordStore {
    pub fn new(sources: Vec<Box<dyn RecordSource>>) -> Self {
        Self::with_ttl(sources, CACHE_TTL)
    }

    pub fn with_ttl(sources: Vec<Box<dyn RecordSource>>, ttl: Duration) -> Self {
        Self {
            sources,
            cache: DatasetCache::new(ttl),
        }
    }

    /// Build the source chain the configuration calls for: the remote
    /// spreadsheet first when one is configured, then the local CSV files.
    pub fn from_config(config: &TrackerConfig, connection: CsvConnection) -> Self {
        let mut sources: Vec<Box<dyn RecordSource>> = Vec::new();
        if let Some(remote) = config.remote_if_enabled() {
            info!("Remote spreadsheet configured at {}", remote.endpoint);
            sources.push(Box::new(RemoteSheetSource::new(remote)));
        } else {
            info!("No remote spreadsheet configured, using local CSV files only");
        }
        sources.push(Box::new(LocalCsvSource::new(connection)));
        Self::new(sources)
    }

    /// Load both record sets, serving the cached copy while it is fresh.
    pub async fn load(&self) -> LoadOutcome {
        if let Some(outcome) = self.cache.get() {
            return outcome;
        }
        let outcome = self.load_from_sources().await;
        self.cache.put(outcome.clone());
        outcome
    }

    /// Drop the cache and load fresh data.
    pub async fn reload(&self) -> LoadOutcome {
        self.cache.invalidate();
        self.load().await
    }

    async fn load_from_sources(&self) -> LoadOutcome {
        let mut warnings = Vec::new();
        for source in &self.sources {
            match source.load().await {
                Ok(dataset) => {
                    info!(
                        "Loaded {} injections and {} side effects from the {} source",
                        dataset.injections.len(),
                        dataset.side_effects.len(),
                        source.name()
                    );
                    return LoadOutcome {
                        dataset,
                        source: source.name(),
                        warnings,
                    };
                }
                Err(e) => {
                    warn!("The {} source failed to load: {}", source.name(), e);
                    warnings.push(format!("The {} source is unavailable: {}", source.name(), e));
                }
            }
        }
        LoadOutcome {
            dataset: Dataset::default(),
            source: EMPTY_SOURCE,
            warnings,
        }
    }

    /// Append an injection to the primary source. Returns whether the write landed.
    pub async fn append_injection(&self, injection: &Injection) -> bool {
        let Some(primary) = self.sources.first() else {
            return false;
        };
        match primary.append_injection(injection).await {
            Ok(()) => {
                self.cache.invalidate();
                true
            }
            Err(e) => {
                error!("Could not append injection to the {} source: {}", primary.name(), e);
                false
            }
        }
    }

    /// Append a side effect to the primary source. Returns whether the write landed.
    pub async fn append_side_effect(&self, side_effect: &SideEffect) -> bool {
        let Some(primary) = self.sources.first() else {
            return false;
        };
        match primary.append_side_effect(side_effect).await {
            Ok(()) => {
                self.cache.invalidate();
                true
            }
            Err(e) => {
                error!(
                    "Could not append side effect to the {} source: {}",
                    primary.name(),
                    e
                );
                false
            }
        }
    }
}
