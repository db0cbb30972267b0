//! Derived analytics over the stored records.
//!
//! Everything here is computed from whatever `RecordStore::load` returns;
//! nothing is persisted. Measurements recorded as zero mean "not recorded"
//! and are excluded from the chart series, but the rows still count toward
//! the summary totals.

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::commands::analytics::{
    AnalyticsQuery, AnalyticsReport, AnalyticsSummary, SeriesPoint, TimelineMarker,
    WeightTrendReport,
};
use crate::domain::metrics::{self, ROLLING_WINDOW};
use crate::domain::models::injection::Injection;
use crate::domain::models::side_effect::SideEffect;
use crate::storage::RecordStore;

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<RecordStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Compute the full analytics report in one pass over the dataset.
    pub async fn build_report(&self, query: AnalyticsQuery) -> Result<AnalyticsReport> {
        let outcome = self.store.load().await;
        let injections: Vec<Injection> = outcome
            .dataset
            .injections
            .into_iter()
            .filter(|injection| injection.belongs_to(query.user.as_deref()))
            .collect();
        let side_effects: Vec<SideEffect> = outcome
            .dataset
            .side_effects
            .into_iter()
            .filter(|side_effect| side_effect.belongs_to(query.user.as_deref()))
            .collect();

        let weight_points =
            dated_series(injections.iter().map(|injection| (injection.date, injection.weight_lbs)));
        let dosage =
            dated_series(injections.iter().map(|injection| (injection.date, injection.dosage_mg)));

        let weight_values: Vec<f64> = weight_points.iter().map(|point| point.value).collect();
        let summary = AnalyticsSummary {
            total_injections: injections.len(),
            weight_change_lbs: metrics::delta(&weight_values),
            total_side_effects: side_effects.len(),
        };

        Ok(AnalyticsReport {
            weight: weight_trend(weight_points),
            dosage,
            injection_markers: injection_markers(&injections),
            side_effect_markers: side_effect_markers(&side_effects),
            summary,
            source: outcome.source,
            warnings: outcome.warnings,
        })
    }
}

/// Keep only dated, positive measurements and put them in date order.
fn dated_series<I>(records: I) -> Vec<SeriesPoint>
where
    I: Iterator<Item = (Option<NaiveDate>, Option<f64>)>,
{
    let mut points: Vec<SeriesPoint> = records
        .filter_map(|(date, value)| match (date, value) {
            (Some(date), Some(value)) if value > 0.0 => Some(SeriesPoint { date, value }),
            _ => None,
        })
        .collect();
    points.sort_by_key(|point| point.date);
    points
}

fn weight_trend(points: Vec<SeriesPoint>) -> Option<WeightTrendReport> {
    if points.is_empty() {
        return None;
    }
    let values: Vec<f64> = points.iter().map(|point| point.value).collect();
    Some(WeightTrendReport {
        rolling_average: metrics::rolling_average(&values, ROLLING_WINDOW),
        trend_line: metrics::linear_trend(&values),
        points,
    })
}

fn injection_markers(injections: &[Injection]) -> Vec<TimelineMarker> {
    let mut markers: Vec<TimelineMarker> = injections
        .iter()
        .filter_map(|injection| {
            let date = injection.date?;
            let label = match injection.dosage_mg {
                Some(dosage) if dosage > 0.0 => format!("{} mg", dosage),
                _ => String::new(),
            };
            Some(TimelineMarker { date, label })
        })
        .collect();
    markers.sort_by_key(|marker| marker.date);
    markers
}

fn side_effect_markers(side_effects: &[SideEffect]) -> Vec<TimelineMarker> {
    let mut markers: Vec<TimelineMarker> = side_effects
        .iter()
        .filter_map(|side_effect| {
            Some(TimelineMarker {
                date: side_effect.date?,
                label: side_effect.notes.clone(),
            })
        })
        .collect();
    markers.sort_by_key(|marker| marker.date);
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::injection::InjectionSite;
    use crate::storage::csv::{CsvConnection, LocalCsvSource};
    use chrono::NaiveTime;
    use tempfile::TempDir;

    fn setup() -> (AnalyticsService, Arc<RecordStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let store = Arc::new(RecordStore::new(vec![Box::new(LocalCsvSource::new(connection))]));
        (AnalyticsService::new(store.clone()), store, temp_dir)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn injection(day: u32, dosage_mg: f64, weight_lbs: f64) -> Injection {
        Injection {
            date: Some(date(day)),
            time: NaiveTime::from_hms_opt(8, 0, 0),
            dosage_mg: Some(dosage_mg),
            weight_lbs: Some(weight_lbs),
            site: InjectionSite::Abdomen,
            notes: String::new(),
            user: None,
        }
    }

    fn side_effect(day: u32, notes: &str) -> SideEffect {
        SideEffect {
            date: Some(date(day)),
            notes: notes.to_string(),
            user: None,
        }
    }

    #[tokio::test]
    async fn test_report_on_empty_store() {
        let (service, _store, _temp_dir) = setup();

        let report = service.build_report(AnalyticsQuery::default()).await.unwrap();
        assert!(report.weight.is_none());
        assert!(report.dosage.is_empty());
        assert!(report.injection_markers.is_empty());
        assert!(report.side_effect_markers.is_empty());
        assert_eq!(report.summary.total_injections, 0);
        assert_eq!(report.summary.weight_change_lbs, None);
        assert_eq!(report.summary.total_side_effects, 0);
        assert_eq!(report.source, "local");
    }

    #[tokio::test]
    async fn test_weight_series_is_sorted_and_fitted() {
        let (service, store, _temp_dir) = setup();
        // Appended out of date order on purpose
        for record in [
            injection(10, 2.5, 198.0),
            injection(5, 2.5, 200.0),
            injection(15, 2.5, 196.0),
        ] {
            assert!(store.append_injection(&record).await);
        }

        let report = service.build_report(AnalyticsQuery::default()).await.unwrap();
        let weight = report.weight.unwrap();

        let dates: Vec<NaiveDate> = weight.points.iter().map(|point| point.date).collect();
        assert_eq!(dates, vec![date(5), date(10), date(15)]);
        let values: Vec<f64> = weight.points.iter().map(|point| point.value).collect();
        assert_eq!(values, vec![200.0, 198.0, 196.0]);

        // Window is wider than the series, so each average covers the prefix
        assert_eq!(weight.rolling_average, vec![200.0, 199.0, 198.0]);
        // The points fall on an exact line, so the fit reproduces them
        assert_eq!(weight.trend_line, Some(vec![200.0, 198.0, 196.0]));
        assert_eq!(report.summary.weight_change_lbs, Some(-4.0));
    }

    #[tokio::test]
    async fn test_zero_measurements_are_counted_but_not_charted() {
        let (service, store, _temp_dir) = setup();
        assert!(store.append_injection(&injection(5, 2.5, 200.0)).await);
        assert!(store.append_injection(&injection(6, 0.0, 0.0)).await);

        let report = service.build_report(AnalyticsQuery::default()).await.unwrap();
        assert_eq!(report.summary.total_injections, 2);
        assert_eq!(report.dosage.len(), 1);
        let weight = report.weight.unwrap();
        assert_eq!(weight.points.len(), 1);
        // A single recorded weight gives no delta and no fitted line
        assert_eq!(report.summary.weight_change_lbs, None);
        assert_eq!(weight.trend_line, None);
        assert_eq!(weight.rolling_average, vec![200.0]);
        // Both injections still appear on the timeline
        assert_eq!(report.injection_markers.len(), 2);
    }

    #[tokio::test]
    async fn test_flat_weight_series_has_no_trend_line() {
        let (service, store, _temp_dir) = setup();
        assert!(store.append_injection(&injection(5, 2.5, 200.0)).await);
        assert!(store.append_injection(&injection(12, 2.5, 200.0)).await);

        let report = service.build_report(AnalyticsQuery::default()).await.unwrap();
        let weight = report.weight.unwrap();
        assert_eq!(weight.trend_line, None);
        assert_eq!(report.summary.weight_change_lbs, Some(0.0));
    }

    #[tokio::test]
    async fn test_marker_labels() {
        let (service, store, _temp_dir) = setup();
        assert!(store.append_injection(&injection(5, 2.5, 200.0)).await);
        assert!(store.append_injection(&injection(6, 0.0, 0.0)).await);
        assert!(store.append_side_effect(&side_effect(7, "Mild nausea")).await);

        let report = service.build_report(AnalyticsQuery::default()).await.unwrap();
        assert_eq!(
            report.injection_markers,
            vec![
                TimelineMarker {
                    date: date(5),
                    label: "2.5 mg".to_string()
                },
                TimelineMarker {
                    date: date(6),
                    label: String::new()
                },
            ]
        );
        assert_eq!(
            report.side_effect_markers,
            vec![TimelineMarker {
                date: date(7),
                label: "Mild nausea".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_user_filter_keeps_shared_records() {
        let (service, store, _temp_dir) = setup();
        let mut mine = injection(5, 2.5, 200.0);
        mine.user = Some("James".to_string());
        let mut theirs = injection(6, 5.0, 180.0);
        theirs.user = Some("Shannon".to_string());
        let shared = injection(7, 2.5, 199.0);
        for record in [&mine, &theirs, &shared] {
            assert!(store.append_injection(record).await);
        }

        let report = service
            .build_report(AnalyticsQuery {
                user: Some("James".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(report.summary.total_injections, 2);
        let weight = report.weight.unwrap();
        let values: Vec<f64> = weight.points.iter().map(|point| point.value).collect();
        assert_eq!(values, vec![200.0, 199.0]);
    }
}
