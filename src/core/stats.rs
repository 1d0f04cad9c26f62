//! # Statistics
//!
//! Summary figures and chart series derived from the record collection.
//! Nothing here is stored; callers recompute after every change.
//!
//! Month bucketing compares the literal `YYYY-MM` prefix of each record's
//! date string against the injected "today". A date written in another
//! timezone's calendar can land in the neighbouring month.

use chrono::NaiveDate;

use crate::backend::FuelLogRecord;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSnapshot {
    pub average_cost_per_liter: f64,
    pub monthly_spend: f64,
    pub total_liters: f64,
    pub total_cost: f64,
}

/// Aggregates `records` as of `today`.
///
/// Totals sum the stored `total_cost`; it is not recomputed from
/// `liters * price_per_liter`. A NaN field propagates into its sum, but the
/// average is defined as 0 whenever it would be NaN or divide by zero.
pub fn compute_stats(records: &[FuelLogRecord], today: NaiveDate) -> StatsSnapshot {
    if records.is_empty() {
        return StatsSnapshot::default();
    }

    let total_liters: f64 = records.iter().map(|r| r.liters).sum();
    let total_cost: f64 = records.iter().map(|r| r.total_cost).sum();

    let average = total_cost / total_liters;
    let average_cost_per_liter = if total_liters == 0.0 || average.is_nan() {
        0.0
    } else {
        average
    };

    let month_prefix = today.format("%Y-%m").to_string();
    let monthly_spend = records
        .iter()
        .filter(|r| r.date.starts_with(&month_prefix))
        .map(|r| r.total_cost)
        .sum();

    StatsSnapshot {
        average_cost_per_liter,
        monthly_spend,
        total_liters,
        total_cost,
    }
}

/// One point of the cost trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Short label such as `Apr 18`.
    pub label: String,
    pub price_per_liter: f64,
    pub total_cost: f64,
    pub liters: f64,
}

/// Chart series in reverse collection order (the collection is newest
/// first, so the chart reads oldest to newest).
pub fn trend_points(records: &[FuelLogRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .rev()
        .map(|r| TrendPoint {
            label: short_date_label(&r.date),
            price_per_liter: r.price_per_liter,
            total_cost: r.total_cost,
            liters: r.liters,
        })
        .collect()
}

fn short_date_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_two_record_scenario() {
        let records = vec![
            record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
            record("2", "2025-04-10", 40.0, 1.40, 56.00, "Sedan"),
        ];
        let stats = compute_stats(&records, april(20));
        assert!(approx(stats.total_liters, 85.0));
        assert!(approx(stats.total_cost, 116.75));
        assert!(approx(stats.average_cost_per_liter, 1.3735));
        assert!(approx(stats.monthly_spend, 116.75));
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        assert_eq!(compute_stats(&[], april(1)), StatsSnapshot::default());
    }

    #[test]
    fn test_zero_liters_average_is_zero() {
        let records = vec![record("1", "2025-04-18", 0.0, 1.35, 0.0, "Van")];
        let stats = compute_stats(&records, april(18));
        assert_eq!(stats.average_cost_per_liter, 0.0);
        assert_eq!(stats.total_liters, 0.0);
    }

    #[test]
    fn test_totals_trust_stored_cost() {
        // Stored cost deliberately disagrees with liters * price.
        let records = vec![record("1", "2025-04-18", 10.0, 1.0, 99.0, "Van")];
        let stats = compute_stats(&records, april(18));
        assert_eq!(stats.total_cost, 99.0);
        assert!(approx(stats.average_cost_per_liter, 9.9));
    }

    #[test]
    fn test_monthly_spend_uses_injected_month() {
        let records = vec![
            record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
            record("2", "2025-03-31", 40.0, 1.40, 56.00, "Sedan"),
            record("3", "2024-04-02", 10.0, 1.00, 10.00, "Sedan"),
        ];
        let stats = compute_stats(&records, april(1));
        assert!(approx(stats.monthly_spend, 60.75));

        let march = compute_stats(&records, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert!(approx(march.monthly_spend, 56.00));
    }

    #[test]
    fn test_nan_propagates_into_sums_but_not_average() {
        let records = vec![record("1", "2025-04-18", f64::NAN, 1.0, 10.0, "Van")];
        let stats = compute_stats(&records, april(18));
        assert!(stats.total_liters.is_nan());
        assert_eq!(stats.average_cost_per_liter, 0.0);
    }

    #[test]
    fn test_duplicates_sum_in() {
        let r = record("1", "2025-04-18", 10.0, 2.0, 20.0, "Van");
        let stats = compute_stats(&[r.clone(), r], april(18));
        assert_eq!(stats.total_cost, 40.0);
    }

    #[test]
    fn test_trend_points_are_reversed_and_labelled() {
        let records = vec![
            record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
            record("2", "2025-04-01", 40.0, 1.40, 56.00, "Sedan"),
            record("3", "not-a-date", 1.0, 1.0, 1.0, "Sedan"),
        ];
        let points = trend_points(&records);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].label, "not-a-date");
        assert_eq!(points[1].label, "Apr 1");
        assert_eq!(points[2].label, "Apr 18");
        assert_eq!(points[2].price_per_liter, 1.35);
    }
}
