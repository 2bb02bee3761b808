use crate::domain::models::academy::AcademyStatus;
use crate::domain::models::appointment::{AppointmentFilter, AppointmentStatus};
use crate::domain::services::time_window::parse_date;
use crate::error::AppError;
use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsQuery {
    pub date: Option<String>,
    pub client_id: Option<String>,
    pub academy_id: Option<String>,
    pub recurring_group_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl ListAppointmentsQuery {
    pub fn into_filter(self) -> Result<AppointmentFilter, AppError> {
        Ok(AppointmentFilter {
            date: self.date.as_deref().map(parse_date).transpose()?,
            client_id: self.client_id,
            academy_id: self.academy_id,
            recurring_group_id: self.recurring_group_id,
            status: self.status,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPaidRequest {
    pub is_paid: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignExercisesRequest {
    pub exercise_ids: Vec<String>,
}

#[derive(Deserialize, Default)]
pub struct CancelSeriesQuery {
    pub from: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListAcademiesQuery {
    pub status: Option<AcademyStatus>,
    pub coach_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct DeleteAcademyQuery {
    pub cascade: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsQuery {
    pub date: String,
    pub instructor_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotCheckQuery {
    pub day: u8,
    pub start: String,
    pub end: String,
}
