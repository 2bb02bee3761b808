use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

pub const COLLECTION: &str = "availability";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Low,
    High,
}

/// A weekly window in which the tenant accepts bookings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRule {
    pub id: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    #[serde(default)]
    pub price_type: Option<PriceType>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAvailabilityRule {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub price_type: Option<PriceType>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPatch {
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<u32>,
    pub price_type: Option<PriceType>,
    pub is_active: Option<bool>,
}

impl AvailabilityRule {
    pub fn new(data: NewAvailabilityRule) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            day_of_week: data.day_of_week,
            start_time: data.start_time,
            end_time: data.end_time,
            duration: data.duration,
            price_type: data.price_type,
            is_active: data.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: AvailabilityPatch) {
        if let Some(day) = patch.day_of_week { self.day_of_week = day; }
        if let Some(start) = patch.start_time { self.start_time = start; }
        if let Some(end) = patch.end_time { self.end_time = end; }
        if let Some(duration) = patch.duration { self.duration = duration; }
        if patch.price_type.is_some() { self.price_type = patch.price_type; }
        if let Some(active) = patch.is_active { self.is_active = active; }
        self.updated_at = Utc::now();
    }
}
