use serde::{Deserialize, Serialize};

/// Injection-pen dial units per milligram of medication.
pub const UNITS_PER_MG: f64 = 8.0;

/// Body site an injection was administered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionSite {
    /// No site was recorded
    #[serde(rename = "")]
    Unspecified,
    Abdomen,
    Thigh,
    #[serde(rename = "Upper Arm")]
    UpperArm,
    Other,
}

impl InjectionSite {
    /// Label as it appears in stored rows and the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectionSite::Unspecified => "",
            InjectionSite::Abdomen => "Abdomen",
            InjectionSite::Thigh => "Thigh",
            InjectionSite::UpperArm => "Upper Arm",
            InjectionSite::Other => "Other",
        }
    }
}

/// A logged injection as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injection {
    /// Calendar date ("YYYY-MM-DD"); None when the stored value could not be read as a date
    pub date: Option<String>,
    /// Time of day ("HH:MM:SS"); None when not recorded
    pub time: Option<String>,
    /// Dose in milligrams; None when not recorded
    pub dosage_mg: Option<f64>,
    /// Dose expressed in pen dial units (1 mg = 8 units)
    pub dose_units: Option<f64>,
    /// Body weight in pounds at injection time; None when not recorded
    pub weight_lbs: Option<f64>,
    pub site: InjectionSite,
    pub notes: String,
    /// Person the record belongs to; None means the record predates per-person tracking
    pub user: Option<String>,
}

/// A logged side-effect observation as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffect {
    /// Calendar date ("YYYY-MM-DD"); None when the stored value could not be read as a date
    pub date: Option<String>,
    pub notes: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogInjectionRequest {
    /// Optional date override ("YYYY-MM-DD") - uses today if not provided
    pub date: Option<String>,
    /// Optional time override ("HH:MM:SS") - uses the current time if not provided
    pub time: Option<String>,
    /// Dose in milligrams (0 means the dose was not recorded)
    pub dosage_mg: f64,
    /// Body weight in pounds (0 means the weight was not recorded)
    pub weight_lbs: f64,
    /// Site label; must be one of the known site labels
    pub site: String,
    pub notes: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogInjectionResponse {
    pub injection: Injection,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSideEffectRequest {
    /// Optional date override ("YYYY-MM-DD") - uses today if not provided
    pub date: Option<String>,
    pub notes: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSideEffectResponse {
    pub side_effect: SideEffect,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionListResponse {
    /// Most recent injections, newest first
    pub injections: Vec<Injection>,
    /// Count before the limit was applied
    pub total_count: usize,
    /// Which source served the data ("remote", "local" or "empty")
    pub source: String,
    /// Human-readable notices about sources that could not be reached
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffectListResponse {
    /// Most recent side-effect entries, newest first
    pub side_effects: Vec<SideEffect>,
    /// Count before the limit was applied
    pub total_count: usize,
    pub source: String,
    pub warnings: Vec<String>,
}

/// One dated value on an analytics chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar date ("YYYY-MM-DD")
    pub date: String,
    pub value: f64,
}

/// Weight chart data: raw points plus the smoothed and fitted overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    /// Recorded weights in date order
    pub points: Vec<SeriesPoint>,
    /// Rolling average aligned with `points`
    pub rolling_average: Vec<f64>,
    /// Fitted straight line aligned with `points`; None when the series is too short or flat
    pub trend_line: Option<Vec<f64>>,
}

/// A dated event marker rendered on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    /// Calendar date ("YYYY-MM-DD")
    pub date: String,
    /// Short label shown next to the marker
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_injections: usize,
    /// Last recorded weight minus first; None with fewer than two recorded weights
    pub weight_change_lbs: Option<f64>,
    pub total_side_effects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    /// None when no dated weight measurements exist
    pub weight: Option<WeightTrend>,
    /// Recorded doses in date order
    pub dosage: Vec<SeriesPoint>,
    pub injection_markers: Vec<TimelineMarker>,
    pub side_effect_markers: Vec<TimelineMarker>,
    pub summary: AnalyticsSummary,
    pub source: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshDataResponse {
    /// Which source served the freshly loaded data
    pub source: String,
    pub injection_count: usize,
    pub side_effect_count: usize,
    pub warnings: Vec<String>,
    pub success_message: String,
}
