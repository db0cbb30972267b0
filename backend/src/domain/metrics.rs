//! Pure numeric routines behind the analytics charts.

/// Number of points the weight smoothing window covers.
pub const ROLLING_WINDOW: usize = 15;

/// Rolling average over the trailing `window` values.
///
/// Positions before a full window average whatever is available, so the
/// output always has the same length as the input and starts at the first
/// value itself.
pub fn rolling_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut averages = Vec::with_capacity(values.len());
    for index in 0..values.len() {
        let start = (index + 1).saturating_sub(window);
        let slice = &values[start..=index];
        averages.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    averages
}

/// Least-squares straight line through the values, evaluated at each position.
///
/// Returns None for fewer than two points and for a flat series, where a
/// fitted line would add nothing to the chart.
pub fn linear_trend(values: &[f64]) -> Option<Vec<f64>> {
    if values.len() < 2 {
        return None;
    }
    let first = values[0];
    if values.iter().all(|value| *value == first) {
        return None;
    }

    let count = values.len() as f64;
    let mean_x = (values.len() - 1) as f64 / 2.0;
    let mean_y = values.iter().sum::<f64>() / count;

    let mut xx = 0.0;
    let mut xy = 0.0;
    for (index, value) in values.iter().enumerate() {
        let dx = index as f64 - mean_x;
        xx += dx * dx;
        xy += dx * (value - mean_y);
    }

    let slope = xy / xx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    Some(
        (0..values.len())
            .map(|index| intercept + slope * index as f64)
            .collect(),
    )
}

/// Change from the first value to the last. None with fewer than two values.
pub fn delta(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values[values.len() - 1] - values[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_average_starts_from_single_value() {
        let values: Vec<f64> = (1..=20).map(|n| n as f64).collect();
        let averages = rolling_average(&values, ROLLING_WINDOW);

        assert_eq!(averages.len(), 20);
        assert_eq!(averages[0], 1.0);
        assert_eq!(averages[2], 2.0); // mean of 1, 2, 3
        assert_eq!(averages[14], 8.0); // first full window: mean of 1..=15
        assert_eq!(averages[15], 9.0); // window slides: mean of 2..=16
        assert_eq!(averages[19], 13.0); // mean of 6..=20
    }

    #[test]
    fn test_rolling_average_window_of_one_is_identity() {
        let values = [3.0, 7.0, 11.0];
        assert_eq!(rolling_average(&values, 1), values.to_vec());
    }

    #[test]
    fn test_rolling_average_of_empty_series_is_empty() {
        assert!(rolling_average(&[], ROLLING_WINDOW).is_empty());
    }

    #[test]
    fn test_linear_trend_recovers_exact_line() {
        // y = 2x + 1
        let values = [1.0, 3.0, 5.0, 7.0, 9.0];
        let trend = linear_trend(&values).unwrap();
        assert_eq!(trend, values.to_vec());
    }

    #[test]
    fn test_linear_trend_through_two_points() {
        let trend = linear_trend(&[1.0, 4.0]).unwrap();
        assert_eq!(trend, vec![1.0, 4.0]);
    }

    #[test]
    fn test_linear_trend_slope_direction() {
        let falling = linear_trend(&[200.0, 198.0, 199.0, 196.0, 195.0]).unwrap();
        assert!(falling[0] > falling[4]);
    }

    #[test]
    fn test_linear_trend_skips_short_series() {
        assert_eq!(linear_trend(&[]), None);
        assert_eq!(linear_trend(&[200.0]), None);
    }

    #[test]
    fn test_linear_trend_skips_flat_series() {
        assert_eq!(linear_trend(&[200.0, 200.0, 200.0]), None);
    }

    #[test]
    fn test_delta_is_last_minus_first() {
        assert_eq!(delta(&[200.0, 195.0]), Some(-5.0));
        assert_eq!(delta(&[200.0, 195.0, 190.0]), Some(-10.0));
        assert_eq!(delta(&[190.0, 195.0]), Some(5.0));
    }

    #[test]
    fn test_delta_needs_two_values() {
        assert_eq!(delta(&[]), None);
        assert_eq!(delta(&[200.0]), None);
    }
}
