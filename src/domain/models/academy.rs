use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

pub const COLLECTION: &str = "academies";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AcademyStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

/// One rostered client. Keeping id and display name together replaces the
/// parallel id/name arrays of the stored documents.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourtClient {
    pub client_id: String,
    pub client_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    #[serde(default)]
    pub id: String,
    pub court_number: u32,
    #[serde(default)]
    pub assigned_coach_id: String,
    #[serde(default)]
    pub assigned_coach_name: String,
    #[serde(default)]
    pub clients: Vec<CourtClient>,
}

impl Court {
    pub fn client_ids(&self) -> impl Iterator<Item = &str> {
        self.clients.iter().map(|c| c.client_id.as_str())
    }

    pub fn has_client(&self, client_id: &str) -> bool {
        self.client_ids().any(|id| id == client_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcademySchedule {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    /// Minutes per session. Zero means "derive from start and end".
    #[serde(default)]
    pub duration: u32,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Academy {
    pub id: String,
    pub name: String,
    pub sport_type: String,
    #[serde(default)]
    pub description: String,
    pub number_of_courts: u32,
    #[serde(default)]
    pub court_price: f64,
    #[serde(default)]
    pub price_per_student: f64,
    #[serde(default)]
    pub head_coach_id: Option<String>,
    #[serde(default)]
    pub head_coach_name: Option<String>,
    #[serde(default)]
    pub courts: Vec<Court>,
    #[serde(default)]
    pub schedules: Vec<AcademySchedule>,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
    #[serde(default)]
    pub status: AcademyStatus,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAcademy {
    pub name: String,
    pub sport_type: String,
    #[serde(default)]
    pub description: String,
    pub number_of_courts: Option<u32>,
    #[serde(default)]
    pub court_price: f64,
    #[serde(default)]
    pub price_per_student: f64,
    pub head_coach_id: Option<String>,
    pub head_coach_name: Option<String>,
    #[serde(default)]
    pub courts: Vec<Court>,
    #[serde(default)]
    pub schedules: Vec<AcademySchedule>,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AcademyPatch {
    pub name: Option<String>,
    pub sport_type: Option<String>,
    pub description: Option<String>,
    pub number_of_courts: Option<u32>,
    pub court_price: Option<f64>,
    pub price_per_student: Option<f64>,
    pub head_coach_id: Option<String>,
    pub head_coach_name: Option<String>,
    pub courts: Option<Vec<Court>>,
    pub schedules: Option<Vec<AcademySchedule>>,
    pub exercise_ids: Option<Vec<String>>,
    pub status: Option<AcademyStatus>,
}

impl Academy {
    pub fn new(data: NewAcademy) -> Self {
        let now = Utc::now();
        let number_of_courts = data.number_of_courts.unwrap_or(data.courts.len().max(1) as u32);

        let mut academy = Self {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            sport_type: data.sport_type,
            description: data.description,
            number_of_courts,
            court_price: data.court_price,
            price_per_student: data.price_per_student,
            head_coach_id: data.head_coach_id.filter(|s| !s.is_empty()),
            head_coach_name: data.head_coach_name.filter(|s| !s.is_empty()),
            courts: data.courts,
            schedules: data.schedules,
            exercise_ids: data.exercise_ids,
            status: AcademyStatus::Active,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        academy.assign_court_ids();
        academy
    }

    /// Gives every court without an id a fresh one; existing ids are kept.
    pub fn assign_court_ids(&mut self) {
        for court in &mut self.courts {
            if court.id.is_empty() {
                court.id = format!("court_{}", Uuid::new_v4().simple());
            }
        }
    }

    pub fn total_clients(&self) -> usize {
        self.courts.iter().map(|c| c.clients.len()).sum()
    }

    pub fn has_coach(&self, coach_id: &str) -> bool {
        self.head_coach_id.as_deref() == Some(coach_id)
            || self.courts.iter().any(|c| c.assigned_coach_id == coach_id)
    }

    pub fn court_mut(&mut self, court_id: &str) -> Option<&mut Court> {
        self.courts.iter_mut().find(|c| c.id == court_id)
    }
}
