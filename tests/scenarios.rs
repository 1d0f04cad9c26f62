//! End-to-end flows over the mock backend, through the public API only.

use chrono::NaiveDate;
use fuelog::backend::{FuelBackend, FuelLogForm, FuelLogRecord, MockBackend};
use fuelog::core::export::{CSV_HEADERS, export_csv, write_export};
use fuelog::core::log_store::LogStore;
use fuelog::core::stats::compute_stats;
use fuelog::core::validation::{FuelLogDraft, validate};
use fuelog::core::view::{SortOrder, filter_and_sort};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
}

fn record(id: &str, date: &str, liters: f64, price: f64, total: f64, vehicle: &str) -> FuelLogRecord {
    FuelLogRecord {
        id: id.to_string(),
        user_id: "1".to_string(),
        date: date.to_string(),
        liters,
        price_per_liter: price,
        total_cost: total,
        vehicle_type: vehicle.to_string(),
        notes: None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-4
}

#[tokio::test]
async fn test_two_record_dashboard() {
    let backend = MockBackend::with_records(
        0,
        vec![
            record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
            record("2", "2025-04-10", 40.0, 1.40, 56.00, "Sedan"),
        ],
    );
    let mut store = LogStore::new();
    store.fetch(&backend).await.unwrap();

    let stats = compute_stats(store.records(), today());
    assert!(approx(stats.total_liters, 85.0));
    assert!(approx(stats.total_cost, 116.75));
    assert!(approx(stats.monthly_spend, 116.75));
    assert!(approx(stats.average_cost_per_liter, 1.3735));
}

#[tokio::test]
async fn test_empty_collection_is_all_zeros() {
    let backend = MockBackend::with_records(0, Vec::new());
    let mut store = LogStore::new();
    store.fetch(&backend).await.unwrap();

    let stats = compute_stats(store.records(), today());
    assert_eq!(stats.total_liters, 0.0);
    assert_eq!(stats.total_cost, 0.0);
    assert_eq!(stats.monthly_spend, 0.0);
    assert_eq!(stats.average_cost_per_liter, 0.0);
    assert!(!stats.average_cost_per_liter.is_nan());
}

#[test]
fn test_search_keeps_only_matching_vehicle() {
    let records = vec![
        record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
        record("2", "2025-04-10", 40.0, 1.40, 56.00, "Truck"),
    ];
    let visible = filter_and_sort(&records, "sedan", SortOrder::Desc);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "1");
}

#[tokio::test]
async fn test_failed_create_changes_nothing() {
    let backend = MockBackend::new(0);
    let mut store = LogStore::new();
    store.fetch(&backend).await.unwrap();
    let before = store.records().to_vec();
    let stats_before = compute_stats(store.records(), today());

    backend.fail_next(1);
    let form = FuelLogForm {
        date: "2025-04-19".to_string(),
        liters: 10.0,
        price_per_liter: 2.0,
        vehicle_type: "Van".to_string(),
        notes: None,
    };
    assert!(store.create(&backend, &form).await.is_err());

    assert_eq!(store.records(), before.as_slice());
    assert_eq!(compute_stats(store.records(), today()), stats_before);
}

#[tokio::test]
async fn test_add_edit_delete_round_trip_survives_refetch() {
    let backend = MockBackend::new(0);
    let mut store = LogStore::new();
    store.fetch(&backend).await.unwrap();

    let draft = FuelLogDraft {
        date: "2025-04-19".to_string(),
        vehicle_type: "Motorcycle".to_string(),
        liters: "8".to_string(),
        price_per_liter: "1.5".to_string(),
        notes: String::new(),
    };
    let form = validate(&draft, today()).unwrap();
    let created = store.create(&backend, &form).await.unwrap().clone();
    assert_eq!(created.total_cost, 12.0);
    assert_eq!(store.records()[0].id, created.id);

    let mut edited = form.clone();
    edited.liters = 10.0;
    store.update(&backend, &created.id, &edited).await.unwrap();
    assert_eq!(store.get(&created.id).unwrap().total_cost, 15.0);

    // A fresh fetch sees what the mock backend kept.
    let mut refetched = LogStore::new();
    refetched.fetch(&backend).await.unwrap();
    assert_eq!(refetched.len(), 4);
    assert_eq!(refetched.get(&created.id).unwrap().liters, 10.0);

    store.delete(&backend, &created.id).await.unwrap();
    assert!(store.get(&created.id).is_none());
    assert_eq!(backend.fetch_records().await.unwrap().len(), 3);
}

#[test]
fn test_export_writes_header_and_rows() {
    let records = vec![
        record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
        record("2", "2025-04-10", 40.0, 1.40, 56.00, "Truck"),
    ];
    let csv = export_csv(&records).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(CSV_HEADERS.join(",").as_str()));
    assert_eq!(lines.count(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), &records, today()).unwrap();
    assert_eq!(path.file_name().unwrap(), "fuel-logs-2025-04-20.csv");
    assert_eq!(std::fs::read_to_string(path).unwrap(), csv);
}
