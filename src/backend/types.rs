use serde::{Deserialize, Serialize};

/// One refuelling event as the backend stores it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelLogRecord {
    pub id: String,
    pub user_id: String,
    /// ISO 8601 calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub liters: f64,
    pub price_per_liter: f64,
    pub total_cost: f64,
    pub vehicle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FuelLogRecord {
    /// Builds a record from submitted form fields. `total_cost` is always
    /// derived from the form here; nothing else computes it.
    pub fn from_form(id: String, user_id: String, form: &FuelLogForm) -> Self {
        Self {
            id,
            user_id,
            date: form.date.clone(),
            liters: form.liters,
            price_per_liter: form.price_per_liter,
            total_cost: form.total_cost(),
            vehicle_type: form.vehicle_type.clone(),
            notes: form.notes.clone(),
        }
    }

    /// The editable fields of this record, for pre-filling an edit form.
    pub fn to_form(&self) -> FuelLogForm {
        FuelLogForm {
            date: self.date.clone(),
            liters: self.liters,
            price_per_liter: self.price_per_liter,
            vehicle_type: self.vehicle_type.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// The fields a user submits when creating or editing a record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelLogForm {
    pub date: String,
    pub liters: f64,
    pub price_per_liter: f64,
    pub vehicle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FuelLogForm {
    pub fn total_cost(&self) -> f64 {
        self.liters * self.price_per_liter
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Returned by login and register.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
