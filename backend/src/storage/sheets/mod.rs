//! Remote spreadsheet record source.
//!
//! Rows live on a hosted spreadsheet document behind a values API. Cells come
//! back as raw JSON values, so dates can be serial numbers or strings and
//! every field gets normalized on the way in.

pub mod client;

pub use client::SheetClient;

use async_trait::async_trait;
use log::warn;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::models::injection::{Injection, InjectionSite};
use crate::domain::models::side_effect::SideEffect;
use crate::storage::config::RemoteConfig;
use crate::storage::dates;
use crate::storage::traits::{Dataset, RecordSource, StoreError};
use client::WorksheetValues;

/// Worksheet that holds injection rows.
pub const INJECTIONS_WORKSHEET: &str = "injections";

/// Worksheet that holds side-effect rows.
pub const SIDE_EFFECTS_WORKSHEET: &str = "side_effects";

/// Record source backed by the remote spreadsheet document.
pub struct RemoteSheetSource {
    client: SheetClient,
}

impl RemoteSheetSource {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: SheetClient::new(config),
        }
    }
}

#[async_trait]
impl RecordSource for RemoteSheetSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self) -> Result<Dataset, StoreError> {
        let injections = self.client.fetch_worksheet(INJECTIONS_WORKSHEET).await?;
        let side_effects = self.client.fetch_worksheet(SIDE_EFFECTS_WORKSHEET).await?;
        Ok(Dataset {
            injections: injections_from_values(&injections),
            side_effects: side_effects_from_values(&side_effects),
        })
    }

    async fn append_injection(&self, injection: &Injection) -> Result<(), StoreError> {
        self.client
            .append_row(INJECTIONS_WORKSHEET, &injection_row(injection))
            .await
    }

    async fn append_side_effect(&self, side_effect: &SideEffect) -> Result<(), StoreError> {
        self.client
            .append_row(SIDE_EFFECTS_WORKSHEET, &side_effect_row(side_effect))
            .await
    }
}

/// Map a worksheet header row to column positions, case-insensitively.
fn header_positions(header: &[Value]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| match cell {
            Value::String(name) => Some((name.trim().to_lowercase(), index)),
            _ => None,
        })
        .collect()
}

/// Cell at a named column; None when the header lacks the column or the row
/// is too short to reach it.
fn cell<'a>(columns: &HashMap<String, usize>, row: &'a [Value], name: &str) -> Option<&'a Value> {
    columns.get(name).and_then(|&index| row.get(index))
}

/// Text content of a cell; numbers and booleans are stringified.
fn text_cell(cell: Option<&Value>) -> String {
    match cell {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

/// Numeric content of a cell. Unreadable or negative values are dropped
/// rather than failing the row.
fn measurement_cell(cell: Option<&Value>) -> Option<f64> {
    let value = match cell {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        warn!("Discarding out-of-range measurement {}", value);
        None
    }
}

pub(crate) fn injections_from_values(values: &WorksheetValues) -> Vec<Injection> {
    let Some((header, rows)) = values.values.split_first() else {
        return Vec::new();
    };
    let columns = header_positions(header);

    rows.iter()
        .map(|row| {
            let user = text_cell(cell(&columns, row, "user"));
            Injection {
                date: cell(&columns, row, "date").and_then(dates::normalize_date_cell),
                time: dates::parse_time_text(&text_cell(cell(&columns, row, "time"))),
                dosage_mg: measurement_cell(cell(&columns, row, "dosage")),
                weight_lbs: measurement_cell(cell(&columns, row, "weight")),
                site: InjectionSite::from_label(&text_cell(cell(&columns, row, "site"))),
                notes: text_cell(cell(&columns, row, "notes")),
                user: (!user.is_empty()).then_some(user),
            }
        })
        .collect()
}

pub(crate) fn side_effects_from_values(values: &WorksheetValues) -> Vec<SideEffect> {
    let Some((header, rows)) = values.values.split_first() else {
        return Vec::new();
    };
    let columns = header_positions(header);

    rows.iter()
        .map(|row| {
            let user = text_cell(cell(&columns, row, "user"));
            SideEffect {
                date: cell(&columns, row, "date").and_then(dates::normalize_date_cell),
                notes: text_cell(cell(&columns, row, "notes")),
                user: (!user.is_empty()).then_some(user),
            }
        })
        .collect()
}

/// Serialize an injection the same way the CSV files do, one string per cell.
pub(crate) fn injection_row(injection: &Injection) -> Vec<String> {
    vec![
        injection
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        injection
            .time
            .map(|time| time.format("%H:%M:%S").to_string())
            .unwrap_or_default(),
        injection.dosage_mg.map(|value| value.to_string()).unwrap_or_default(),
        injection.weight_lbs.map(|value| value.to_string()).unwrap_or_default(),
        injection.site.as_str().to_string(),
        injection.notes.clone(),
        injection.user.clone().unwrap_or_default(),
    ]
}

pub(crate) fn side_effect_row(side_effect: &SideEffect) -> Vec<String> {
    vec![
        side_effect
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        side_effect.notes.clone(),
        side_effect.user.clone().unwrap_or_default(),
    ]
}
