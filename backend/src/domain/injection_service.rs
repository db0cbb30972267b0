//! Business logic for logging and listing injections.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use log::info;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::commands::injections::{
    InjectionListQuery, InjectionListResult, LogInjectionCommand,
};
use crate::domain::models::injection::{Injection, InjectionSite};
use crate::storage::RecordStore;

/// Longest accepted notes field.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// How many records a listing returns when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 10;

#[derive(Clone)]
pub struct InjectionService {
    store: Arc<RecordStore>,
}

impl InjectionService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new injection record.
    ///
    /// Date and time default to "now" when the form leaves them blank. A zero
    /// dose or weight is accepted and stored; it means "not recorded".
    pub async fn log_injection(&self, command: LogInjectionCommand) -> Result<Injection> {
        if command.dosage_mg < 0.0 {
            return Err(anyhow!("Dosage cannot be negative"));
        }
        if command.weight_lbs < 0.0 {
            return Err(anyhow!("Weight cannot be negative"));
        }
        let notes = command.notes.unwrap_or_default().trim().to_string();
        if notes.len() > MAX_NOTES_LENGTH {
            return Err(anyhow!("Notes cannot exceed {} characters", MAX_NOTES_LENGTH));
        }
        let site = InjectionSite::parse_strict(&command.site)
            .ok_or_else(|| anyhow!("Unknown injection site: {}", command.site))?;
        let date = match command.date {
            Some(ref text) => parse_form_date(text)?,
            None => Local::now().date_naive(),
        };
        let time = match command.time {
            Some(ref text) => parse_form_time(text)?,
            None => current_time(),
        };

        let injection = Injection {
            date: Some(date),
            time: Some(time),
            dosage_mg: Some(command.dosage_mg),
            weight_lbs: Some(command.weight_lbs),
            site,
            notes,
            user: normalize_user(command.user),
        };

        if self.store.append_injection(&injection).await {
            info!("💉 Logged injection on {} ({} mg)", date, command.dosage_mg);
            Ok(injection)
        } else {
            Err(anyhow!("Could not save the injection to the record store"))
        }
    }

    /// Most recent injections, newest first. Records without a readable date
    /// sort last so they stay visible instead of disappearing.
    pub async fn list_recent(&self, query: InjectionListQuery) -> Result<InjectionListResult> {
        let outcome = self.store.load().await;
        let mut injections: Vec<Injection> = outcome
            .dataset
            .injections
            .into_iter()
            .filter(|injection| injection.belongs_to(query.user.as_deref()))
            .collect();
        let total_count = injections.len();

        injections.sort_by(|a, b| compare_dates_desc(a.date, b.date));
        injections.truncate(query.limit.map(|limit| limit as usize).unwrap_or(DEFAULT_LIST_LIMIT));

        Ok(InjectionListResult {
            injections,
            total_count,
            source: outcome.source,
            warnings: outcome.warnings,
        })
    }
}

/// Newest first; records without a date sort after every dated record.
pub(crate) fn compare_dates_desc(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(first), Some(second)) => second.cmp(&first),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Strict date parse for submitted forms; stored data goes through the
/// lenient storage-side normalization instead.
pub(crate) fn parse_form_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format (expected YYYY-MM-DD): {}", text))
}

pub(crate) fn parse_form_time(text: &str) -> Result<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| anyhow!("Invalid time format (expected HH:MM or HH:MM:SS): {}", text))
}

pub(crate) fn normalize_user(user: Option<String>) -> Option<String> {
    user.and_then(|user| {
        let user = user.trim().to_string();
        (!user.is_empty()).then_some(user)
    })
}

/// The wall-clock time, truncated to whole seconds to match what storage keeps.
fn current_time() -> NaiveTime {
    let now = Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}
