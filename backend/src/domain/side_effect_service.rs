//! Business logic for logging and listing side effect notes.

use anyhow::{anyhow, Result};
use chrono::Local;
use log::info;
use std::sync::Arc;

use crate::domain::commands::side_effects::{
    LogSideEffectCommand, SideEffectListQuery, SideEffectListResult,
};
use crate::domain::injection_service::{
    compare_dates_desc, normalize_user, parse_form_date, DEFAULT_LIST_LIMIT, MAX_NOTES_LENGTH,
};
use crate::domain::models::side_effect::SideEffect;
use crate::storage::RecordStore;

#[derive(Clone)]
pub struct SideEffectService {
    store: Arc<RecordStore>,
}

impl SideEffectService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a side effect note. The note text is required;
    /// the date defaults to today when the form leaves it blank.
    pub async fn log_side_effect(&self, command: LogSideEffectCommand) -> Result<SideEffect> {
        let notes = command.notes.trim().to_string();
        if notes.is_empty() {
            return Err(anyhow!("Please enter a description of the side effects"));
        }
        if notes.len() > MAX_NOTES_LENGTH {
            return Err(anyhow!("Notes cannot exceed {} characters", MAX_NOTES_LENGTH));
        }
        let date = match command.date {
            Some(ref text) => parse_form_date(text)?,
            None => Local::now().date_naive(),
        };

        let side_effect = SideEffect {
            date: Some(date),
            notes,
            user: normalize_user(command.user),
        };

        if self.store.append_side_effect(&side_effect).await {
            info!("🤢 Logged side effects on {}", date);
            Ok(side_effect)
        } else {
            Err(anyhow!("Could not save the side effects to the record store"))
        }
    }

    /// Most recent side effect notes, newest first.
    pub async fn list_recent(&self, query: SideEffectListQuery) -> Result<SideEffectListResult> {
        let outcome = self.store.load().await;
        let mut side_effects: Vec<SideEffect> = outcome
            .dataset
            .side_effects
            .into_iter()
            .filter(|side_effect| side_effect.belongs_to(query.user.as_deref()))
            .collect();
        let total_count = side_effects.len();

        side_effects.sort_by(|a, b| compare_dates_desc(a.date, b.date));
        side_effects
            .truncate(query.limit.map(|limit| limit as usize).unwrap_or(DEFAULT_LIST_LIMIT));

        Ok(SideEffectListResult {
            side_effects,
            total_count,
            source: outcome.source,
            warnings: outcome.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::{CsvConnection, LocalCsvSource};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (SideEffectService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let store = Arc::new(RecordStore::new(vec![Box::new(LocalCsvSource::new(connection))]));
        (SideEffectService::new(store), temp_dir)
    }

    fn command(date: &str, notes: &str) -> LogSideEffectCommand {
        LogSideEffectCommand {
            date: Some(date.to_string()),
            notes: notes.to_string(),
            user: Some("James".to_string()),
        }
    }

    #[tokio::test]
    async fn test_log_side_effect_persists_and_lists() {
        let (service, _temp_dir) = setup();

        let logged = service
            .log_side_effect(command("2024-01-16", "Mild nausea in the evening"))
            .await
            .unwrap();
        assert_eq!(logged.date, NaiveDate::from_ymd_opt(2024, 1, 16));

        let result = service.list_recent(SideEffectListQuery::default()).await.unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.side_effects, vec![logged]);
        assert_eq!(result.source, "local");
    }

    #[tokio::test]
    async fn test_log_side_effect_requires_notes() {
        let (service, _temp_dir) = setup();

        let error = service.log_side_effect(command("2024-01-16", "   ")).await.unwrap_err();
        assert!(error.to_string().contains("description"));
    }

    #[tokio::test]
    async fn test_log_side_effect_defaults_date_to_today() {
        let (service, _temp_dir) = setup();
        let command = LogSideEffectCommand {
            date: None,
            notes: "Headache".to_string(),
            user: None,
        };

        let logged = service.log_side_effect(command).await.unwrap();
        assert_eq!(logged.date, Some(Local::now().date_naive()));
        assert_eq!(logged.user, None);
    }

    #[tokio::test]
    async fn test_log_side_effect_rejects_malformed_date() {
        let (service, _temp_dir) = setup();

        assert!(service.log_side_effect(command("Jan 16", "Nausea")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first() {
        let (service, _temp_dir) = setup();
        service.log_side_effect(command("2024-01-05", "first")).await.unwrap();
        service.log_side_effect(command("2024-01-20", "third")).await.unwrap();
        service.log_side_effect(command("2024-01-10", "second")).await.unwrap();

        let result = service.list_recent(SideEffectListQuery::default()).await.unwrap();
        let notes: Vec<&str> = result
            .side_effects
            .iter()
            .map(|side_effect| side_effect.notes.as_str())
            .collect();
        assert_eq!(notes, vec!["third", "second", "first"]);
    }
}
