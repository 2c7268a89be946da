//! Descriptive statistics over monthly spending series
//!
//! Every function here tolerates series of length 0, 1, or 2 and returns a
//! well-defined zero instead of dividing by zero.

/// Arithmetic mean, 0.0 for an empty series
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n, not n - 1)
pub fn std_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary-least-squares slope of the series against indices 1..n
///
/// Closed-form slope formula. Returns 0.0 when n < 2; a single point
/// carries no trend.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, v) in values.iter().enumerate() {
        let x = (i + 1) as f64;
        sum_x += x;
        sum_y += v;
        sum_xy += x * v;
        sum_x2 += x * x;
    }

    (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x)
}

/// OLS slope normalized by the series mean, expressing the trend as a
/// fractional rate per month. 0.0 when the mean is not positive.
pub fn normalized_trend(values: &[f64]) -> f64 {
    let m = mean(values);
    if m > 0.0 {
        ols_slope(values) / m
    } else {
        0.0
    }
}

/// Coefficient of variation, 0.0 when the mean is not positive
pub fn volatility(values: &[f64]) -> f64 {
    let m = mean(values);
    if m > 0.0 {
        std_deviation(values) / m
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_empty_series_is_all_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_deviation(&[]), 0.0);
        assert_eq!(ols_slope(&[]), 0.0);
        assert_eq!(normalized_trend(&[]), 0.0);
        assert_eq!(volatility(&[]), 0.0);
    }

    #[test]
    fn test_single_point_has_no_trend() {
        assert_eq!(ols_slope(&[500.0]), 0.0);
        assert_eq!(normalized_trend(&[500.0]), 0.0);
        assert_eq!(std_deviation(&[500.0]), 0.0);
        assert_eq!(mean(&[500.0]), 500.0);
    }

    #[test]
    fn test_population_std_deviation() {
        // Dining scenario: [1000, 1200, 1500] -> mean 1233.33, std ~205.5
        let series = [1000.0, 1200.0, 1500.0];
        assert!(approx(mean(&series), 3700.0 / 3.0));
        assert!((std_deviation(&series) - 205.5).abs() < 0.1);
    }

    #[test]
    fn test_slope_of_linear_series() {
        // Perfectly linear: slope is the common difference
        let series = [100.0, 200.0, 300.0, 400.0];
        assert!(approx(ols_slope(&series), 100.0));
    }

    #[test]
    fn test_monotonic_increase_has_positive_normalized_trend() {
        let series = [1000.0, 1200.0, 1500.0];
        let trend = normalized_trend(&series);
        assert!(trend > 0.0);
        assert!(trend > 0.15);
    }

    #[test]
    fn test_decreasing_series_has_negative_trend() {
        let series = [1500.0, 1200.0, 1000.0];
        assert!(normalized_trend(&series) < -0.15);
    }

    #[test]
    fn test_zero_mean_guards_division() {
        let series = [0.0, 0.0, 0.0];
        assert_eq!(normalized_trend(&series), 0.0);
        assert_eq!(volatility(&series), 0.0);
    }

    #[test]
    fn test_constant_series_is_stable_and_flat() {
        let series = [800.0, 800.0, 800.0];
        assert_eq!(std_deviation(&series), 0.0);
        assert!(approx(normalized_trend(&series), 0.0));
        assert_eq!(volatility(&series), 0.0);
    }
}
