//! # Form Validation
//!
//! Turns the raw text of the record form into a `FuelLogForm`, or reports
//! a message per failing field. Nothing invalid ever reaches a backend.

use std::fmt;

use chrono::NaiveDate;

use crate::backend::{FuelLogForm, FuelLogRecord};

pub const VEHICLE_TYPES: [&str; 6] = ["Sedan", "SUV", "Truck", "Van", "Motorcycle", "Other"];

pub const POSITIVE_NUMBER: &str = "Must be a positive number";
pub const MISSING_VEHICLE: &str = "Please select a vehicle type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    VehicleType,
    Liters,
    PricePerLiter,
    Notes,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Date,
        Field::VehicleType,
        Field::Liters,
        Field::PricePerLiter,
        Field::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::VehicleType => "Vehicle Type",
            Field::Liters => "Liters",
            Field::PricePerLiter => "Price per Liter",
            Field::Notes => "Notes",
        }
    }
}

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelLogDraft {
    pub date: String,
    pub vehicle_type: String,
    pub liters: String,
    pub price_per_liter: String,
    pub notes: String,
}

impl FuelLogDraft {
    /// Empty draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    /// Draft pre-filled from an existing record.
    pub fn from_record(record: &FuelLogRecord) -> Self {
        Self {
            date: record.date.clone(),
            vehicle_type: record.vehicle_type.clone(),
            liters: record.liters.to_string(),
            price_per_liter: record.price_per_liter.to_string(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::VehicleType => &self.vehicle_type,
            Field::Liters => &self.liters,
            Field::PricePerLiter => &self.price_per_liter,
            Field::Notes => &self.notes,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Date => &mut self.date,
            Field::VehicleType => &mut self.vehicle_type,
            Field::Liters => &mut self.liters,
            Field::PricePerLiter => &mut self.price_per_liter,
            Field::Notes => &mut self.notes,
        }
    }
}

/// Per-field validation messages, in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub errors: Vec<(Field, String)>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.label(), msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Validates `draft` against `today`.
pub fn validate(draft: &FuelLogDraft, today: NaiveDate) -> Result<FuelLogForm, FormErrors> {
    let mut errors = FormErrors::default();

    let date = match NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d") {
        Ok(d) if d > today => {
            errors.push(Field::Date, "Date cannot be in the future");
            None
        }
        Ok(d) if d < earliest_date() => {
            errors.push(Field::Date, "Date must be on or after 2000-01-01");
            None
        }
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(Field::Date, "Use the format YYYY-MM-DD");
            None
        }
    };

    let vehicle_type = draft.vehicle_type.trim();
    if vehicle_type.is_empty() {
        errors.push(Field::VehicleType, MISSING_VEHICLE);
    }

    let liters = positive_number(&draft.liters);
    if liters.is_none() {
        errors.push(Field::Liters, POSITIVE_NUMBER);
    }
    let price_per_liter = positive_number(&draft.price_per_liter);
    if price_per_liter.is_none() {
        errors.push(Field::PricePerLiter, POSITIVE_NUMBER);
    }

    match (date, liters, price_per_liter) {
        (Some(date), Some(liters), Some(price_per_liter)) if errors.is_empty() => {
            let notes = draft.notes.trim();
            Ok(FuelLogForm {
                date: date.format("%Y-%m-%d").to_string(),
                liters,
                price_per_liter,
                vehicle_type: vehicle_type.to_string(),
                notes: (!notes.is_empty()).then(|| notes.to_string()),
            })
        }
        _ => Err(errors),
    }
}

fn positive_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
