// backend/src/domain/commands.rs

//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod injections {
    use super::super::models::injection::Injection as DomainInjection;

    /// Input for logging a new injection.
    #[derive(Debug, Clone)]
    pub struct LogInjectionCommand {
        /// Date override ("YYYY-MM-DD"); today when absent
        pub date: Option<String>,
        /// Time override ("HH:MM" or "HH:MM:SS"); the current time when absent
        pub time: Option<String>,
        pub dosage_mg: f64,
        pub weight_lbs: f64,
        /// Site label, validated against the known sites
        pub site: String,
        pub notes: Option<String>,
        pub user: Option<String>,
    }

    /// Query parameters for listing recent injections.
    #[derive(Debug, Clone, Default)]
    pub struct InjectionListQuery {
        pub user: Option<String>,
        pub limit: Option<u32>,
    }

    /// Result of listing injections.
    #[derive(Debug, Clone)]
    pub struct InjectionListResult {
        pub injections: Vec<DomainInjection>,
        /// Count before the limit was applied
        pub total_count: usize,
        pub source: &'static str,
        pub warnings: Vec<String>,
    }
}

pub mod side_effects {
    use super::super::models::side_effect::SideEffect as DomainSideEffect;

    /// Input for logging a new side-effect observation.
    #[derive(Debug, Clone)]
    pub struct LogSideEffectCommand {
        /// Date override ("YYYY-MM-DD"); today when absent
        pub date: Option<String>,
        pub notes: String,
        pub user: Option<String>,
    }

    /// Query parameters for listing recent side effects.
    #[derive(Debug, Clone, Default)]
    pub struct SideEffectListQuery {
        pub user: Option<String>,
        pub limit: Option<u32>,
    }

    /// Result of listing side effects.
    #[derive(Debug, Clone)]
    pub struct SideEffectListResult {
        pub side_effects: Vec<DomainSideEffect>,
        /// Count before the limit was applied
        pub total_count: usize,
        pub source: &'static str,
        pub warnings: Vec<String>,
    }
}

pub mod analytics {
    use chrono::NaiveDate;

    /// Input for building the analytics report.
    #[derive(Debug, Clone, Default)]
    pub struct AnalyticsQuery {
        pub user: Option<String>,
    }

    /// One dated value on a chart series.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SeriesPoint {
        pub date: NaiveDate,
        pub value: f64,
    }

    /// Weight chart data: raw points plus the smoothed and fitted overlays.
    #[derive(Debug, Clone, PartialEq)]
    pub struct WeightTrendReport {
        /// Recorded weights in date order
        pub points: Vec<SeriesPoint>,
        /// Rolling average aligned with `points`
        pub rolling_average: Vec<f64>,
        /// Fitted straight line aligned with `points`; None when the series is too short or flat
        pub trend_line: Option<Vec<f64>>,
    }

    /// A dated event marker on the timeline.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TimelineMarker {
        pub date: NaiveDate,
        pub label: String,
    }

    /// Headline numbers shown above the charts.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AnalyticsSummary {
        pub total_injections: usize,
        /// Last recorded weight minus first; None with fewer than two recorded weights
        pub weight_change_lbs: Option<f64>,
        pub total_side_effects: usize,
    }

    /// Everything the analytics view needs, computed in one pass.
    #[derive(Debug, Clone)]
    pub struct AnalyticsReport {
        /// None when no dated weight measurements exist
        pub weight: Option<WeightTrendReport>,
        /// Recorded doses in date order
        pub dosage: Vec<SeriesPoint>,
        pub injection_markers: Vec<TimelineMarker>,
        pub side_effect_markers: Vec<TimelineMarker>,
        pub summary: AnalyticsSummary,
        pub source: &'static str,
        pub warnings: Vec<String>,
    }
}
