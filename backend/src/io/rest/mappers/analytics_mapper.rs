use crate::domain::commands::analytics::{
    AnalyticsReport, SeriesPoint as DomainSeriesPoint, TimelineMarker as DomainTimelineMarker,
    WeightTrendReport,
};
use shared::{AnalyticsResponse, AnalyticsSummary, SeriesPoint, TimelineMarker, WeightTrend};

pub struct AnalyticsMapper;

impl AnalyticsMapper {
    pub fn to_dto(report: AnalyticsReport) -> AnalyticsResponse {
        AnalyticsResponse {
            weight: report.weight.map(Self::to_dto_trend),
            dosage: report.dosage.into_iter().map(Self::to_dto_point).collect(),
            injection_markers: report
                .injection_markers
                .into_iter()
                .map(Self::to_dto_marker)
                .collect(),
            side_effect_markers: report
                .side_effect_markers
                .into_iter()
                .map(Self::to_dto_marker)
                .collect(),
            summary: AnalyticsSummary {
                total_injections: report.summary.total_injections,
                weight_change_lbs: report.summary.weight_change_lbs,
                total_side_effects: report.summary.total_side_effects,
            },
            source: report.source.to_string(),
            warnings: report.warnings,
        }
    }

    fn to_dto_trend(trend: WeightTrendReport) -> WeightTrend {
        WeightTrend {
            points: trend.points.into_iter().map(Self::to_dto_point).collect(),
            rolling_average: trend.rolling_average,
            trend_line: trend.trend_line,
        }
    }

    fn to_dto_point(point: DomainSeriesPoint) -> SeriesPoint {
        SeriesPoint {
            date: point.date.format("%Y-%m-%d").to_string(),
            value: point.value,
        }
    }

    fn to_dto_marker(marker: DomainTimelineMarker) -> TimelineMarker {
        TimelineMarker {
            date: marker.date.format("%Y-%m-%d").to_string(),
            label: marker.label,
        }
    }
}
