use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};

pub const COLLECTION: &str = "appointments";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Cancelled and no-show appointments no longer hold their slot.
    pub fn is_active(self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }

        match self {
            Pending => matches!(next, Scheduled | Confirmed | Cancelled),
            Scheduled => matches!(next, Confirmed | Cancelled | Completed | NoShow),
            Confirmed => matches!(next, Completed | Cancelled | NoShow),
            Completed | Cancelled | NoShow => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub instructor_id: Option<String>,
    pub sport_type: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub recurring_group_id: Option<String>,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
    #[serde(default)]
    pub academy_id: Option<String>,
    #[serde(default)]
    pub court_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller supplies to book a single appointment.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    pub instructor_id: Option<String>,
    pub sport_type: String,
    pub date: String,
    pub start_time: String,
    pub duration: u32,
    pub notes: Option<String>,
    pub recurring_group_id: Option<String>,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
    pub academy_id: Option<String>,
    pub court_id: Option<String>,
}

/// A weekly booking for one client, expanded into a recurring group.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringSeries {
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    pub instructor_id: Option<String>,
    pub sport_type: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub duration: u32,
    pub start_date: String,
    pub end_date: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub instructor_id: Option<String>,
    pub sport_type: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<u32>,
    pub status: Option<AppointmentStatus>,
    pub is_paid: Option<bool>,
    pub notes: Option<String>,
    pub exercise_ids: Option<Vec<String>>,
    pub court_id: Option<String>,
}

impl AppointmentPatch {
    /// True when the patch can move the appointment onto another slot or resource.
    pub fn touches_slot(&self) -> bool {
        self.date.is_some()
            || self.start_time.is_some()
            || self.duration.is_some()
            || self.instructor_id.is_some()
            || self.court_id.is_some()
    }
}

/// Optional equality filters for listing a tenant's appointments.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub client_id: Option<String>,
    pub academy_id: Option<String>,
    pub recurring_group_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl Appointment {
    /// Builds a scheduled appointment. `end_time` must already be derived from
    /// `start_time` and `duration`.
    pub fn scheduled(draft: AppointmentDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_id: draft.client_id,
            client_name: draft.client_name,
            instructor_id: draft.instructor_id,
            sport_type: draft.sport_type,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            duration: draft.duration,
            status: AppointmentStatus::Scheduled,
            is_paid: false,
            notes: draft.notes,
            recurring_group_id: draft.recurring_group_id,
            exercise_ids: draft.exercise_ids,
            academy_id: draft.academy_id,
            court_id: draft.court_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_exercise(&mut self, exercise_id: &str) {
        if !self.exercise_ids.iter().any(|id| id == exercise_id) {
            self.exercise_ids.push(exercise_id.to_string());
        }
    }

    pub fn remove_exercise(&mut self, exercise_id: &str) {
        self.exercise_ids.retain(|id| id != exercise_id);
    }
}

/// A fully resolved appointment waiting to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub client_id: String,
    pub client_name: String,
    pub instructor_id: Option<String>,
    pub sport_type: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub notes: String,
    pub recurring_group_id: Option<String>,
    pub exercise_ids: Vec<String>,
    pub academy_id: Option<String>,
    pub court_id: Option<String>,
}
