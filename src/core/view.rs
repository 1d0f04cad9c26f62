//! # View Filter/Sort
//!
//! Derives the displayed subset of records from a search term and a sort
//! direction. Recomputed in full on every change; fine for one user's logs.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::backend::FuelLogRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "oldest first",
            SortOrder::Desc => "newest first",
        }
    }
}

/// True if `record` matches `search_term`.
///
/// Vehicle type and notes match case-insensitively; the date matches the
/// raw term literally. An empty term matches everything.
pub fn matches(record: &FuelLogRecord, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    record.vehicle_type.to_lowercase().contains(&needle)
        || record
            .notes
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&needle))
        || record.date.contains(search_term)
}

/// Filters by `search_term`, then sorts by parsed date in `order`.
///
/// Unparseable dates sort before every valid date when ascending. The sort
/// is stable, so equal dates keep their collection order.
pub fn filter_and_sort(
    records: &[FuelLogRecord],
    search_term: &str,
    order: SortOrder,
) -> Vec<FuelLogRecord> {
    let mut visible: Vec<FuelLogRecord> = records
        .iter()
        .filter(|r| matches(r, search_term))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare_dates(&a.date, &b.date);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    visible
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    parse_date(a).cmp(&parse_date(b))
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn ids(records: &[FuelLogRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn fleet() -> Vec<FuelLogRecord> {
        let mut truck = record("2", "2025-04-10", 80.0, 1.50, 120.0, "Truck");
        truck.notes = Some("Highway trip".to_string());
        vec![
            record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
            truck,
            record("3", "2025-03-01", 50.0, 1.32, 66.0, "SUV"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_on_vehicle_type() {
        let visible = filter_and_sort(&fleet(), "sedan", SortOrder::Desc);
        assert_eq!(ids(&visible), vec!["1"]);
    }

    #[test]
    fn test_search_matches_notes() {
        let visible = filter_and_sort(&fleet(), "HIGHWAY", SortOrder::Desc);
        assert_eq!(ids(&visible), vec!["2"]);
    }

    #[test]
    fn test_search_matches_raw_date() {
        let visible = filter_and_sort(&fleet(), "2025-04", SortOrder::Asc);
        assert_eq!(ids(&visible), vec!["2", "1"]);
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        assert_eq!(filter_and_sort(&fleet(), "", SortOrder::Desc).len(), 3);
    }

    #[test]
    fn test_missing_notes_do_not_match() {
        let mut r = record("9", "2025-01-01", 1.0, 1.0, 1.0, "Van");
        r.notes = None;
        assert!(!matches(&r, "trip"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_and_sort(&fleet(), "s", SortOrder::Desc);
        let twice = filter_and_sort(&once, "s", SortOrder::Desc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_directions() {
        let desc = filter_and_sort(&fleet(), "", SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["1", "2", "3"]);

        let asc = filter_and_sort(&fleet(), "", SortOrder::Asc);
        let mut reversed = ids(&desc);
        reversed.reverse();
        assert_eq!(ids(&asc), reversed);

        assert_eq!(filter_and_sort(&desc, "", SortOrder::Desc), desc);
    }

    #[test]
    fn test_unparseable_dates_sort_first_ascending() {
        let records = vec![
            record("1", "2025-04-18", 1.0, 1.0, 1.0, "Van"),
            record("2", "someday", 1.0, 1.0, 1.0, "Van"),
        ];
        let asc = filter_and_sort(&records, "", SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["2", "1"]);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(SortOrder::Desc.toggle(), SortOrder::Asc);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}
