//! CSV-backed record source.
//!
//! Two flat files in the data directory, one per record type. This is the
//! fallback source and also the primary one when no remote is configured.

pub mod connection;
pub mod injection_repository;
pub mod side_effect_repository;

pub use connection::CsvConnection;

use async_trait::async_trait;

use crate::domain::models::injection::Injection;
use crate::domain::models::side_effect::SideEffect;
use crate::storage::traits::{Dataset, RecordSource, StoreError};
use injection_repository::InjectionRepository;
use side_effect_repository::SideEffectRepository;

/// Record source backed by CSV files in the local data directory.
#[derive(Clone)]
pub struct LocalCsvSource {
    injections: InjectionRepository,
    side_effects: SideEffectRepository,
}

impl LocalCsvSource {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            injections: InjectionRepository::new(connection.clone()),
            side_effects: SideEffectRepository::new(connection),
        }
    }
}

#[async_trait]
impl RecordSource for LocalCsvSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self) -> Result<Dataset, StoreError> {
        Ok(Dataset {
            injections: self.injections.read_all()?,
            side_effects: self.side_effects.read_all()?,
        })
    }

    async fn append_injection(&self, injection: &Injection) -> Result<(), StoreError> {
        self.injections.append(injection)
    }

    async fn append_side_effect(&self, side_effect: &SideEffect) -> Result<(), StoreError> {
        self.side_effects.append(side_effect)
    }
}
