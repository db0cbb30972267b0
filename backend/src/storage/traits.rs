//! # Storage Traits
//!
//! This module defines the storage abstraction that lets different record
//! sources (remote spreadsheet, local CSV files) be used interchangeably
//! by the record store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::injection::Injection;
use crate::domain::models::side_effect::SideEffect;

/// Everything the tracker persists, loaded in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub injections: Vec<Injection>,
    pub side_effects: Vec<SideEffect>,
}

/// Ways a record source can fail.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store rejected the credentials (HTTP {0})")]
    Auth(u16),

    #[error("worksheet '{0}' not found on the remote store")]
    MissingWorksheet(String),

    #[error("unexpected remote payload: {0}")]
    BadPayload(String),

    #[error("local file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One place records can be loaded from and appended to.
///
/// Implementations must treat "no data yet" (a missing file, an empty
/// worksheet) as an empty dataset rather than an error; errors are reserved
/// for a source that exists but cannot be read.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short name used in logs and load outcomes.
    fn name(&self) -> &'static str;

    /// Read both record sets.
    async fn load(&self) -> Result<Dataset, StoreError>;

    /// Append one injection row.
    async fn append_injection(&self, injection: &Injection) -> Result<(), StoreError>;

    /// Append one side-effect row.
    async fn append_side_effect(&self, side_effect: &SideEffect) -> Result<(), StoreError>;
}
