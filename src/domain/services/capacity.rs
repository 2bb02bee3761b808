use std::collections::HashSet;
use chrono::NaiveDate;
use crate::domain::models::academy::Court;
use crate::domain::models::appointment::Appointment;
use crate::domain::services::time_window::{overlaps, to_minutes};
use crate::error::AppError;

pub const PADEL_MAX_CLIENTS_PER_COURT: usize = 4;
pub const DEFAULT_MAX_CLIENTS_PER_COURT: usize = 6;

pub fn max_clients_per_court(sport_type: &str) -> usize {
    if sport_type.trim().eq_ignore_ascii_case("padel") {
        PADEL_MAX_CLIENTS_PER_COURT
    } else {
        DEFAULT_MAX_CLIENTS_PER_COURT
    }
}

/// Fails on the first court whose roster is over the sport's limit.
pub fn validate_courts(sport_type: &str, courts: &[Court]) -> Result<(), AppError> {
    let limit = max_clients_per_court(sport_type);
    match courts.iter().find(|c| c.clients.len() > limit) {
        Some(court) => Err(AppError::CapacityExceeded { court_number: court.court_number, limit }),
        None => Ok(()),
    }
}

/// Guards adding one more client to `court`.
pub fn ensure_room_for_client(sport_type: &str, court: &Court) -> Result<(), AppError> {
    let limit = max_clients_per_court(sport_type);
    if court.clients.len() >= limit {
        return Err(AppError::CapacityExceeded { court_number: court.court_number, limit });
    }
    Ok(())
}

/// Something an appointment occupies. Court bookings share the court up to
/// its roster limit; instructor and tenant-wide bookings are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Court(String),
    Instructor(String),
    Tenant,
}

impl Resource {
    /// An appointment holds its court and its instructor at the same time.
    /// Only bookings naming neither fall back to the tenant-wide calendar.
    pub fn occupied(instructor_id: Option<&str>, court_id: Option<&str>) -> Vec<Resource> {
        let mut resources = Vec::with_capacity(2);
        if let Some(court) = court_id.filter(|c| !c.is_empty()) {
            resources.push(Resource::Court(court.to_string()));
        }
        if let Some(instructor) = instructor_id.filter(|i| !i.is_empty()) {
            resources.push(Resource::Instructor(instructor.to_string()));
        }
        if resources.is_empty() {
            resources.push(Resource::Tenant);
        }
        resources
    }

    pub fn of(appointment: &Appointment) -> Vec<Resource> {
        Self::occupied(appointment.instructor_id.as_deref(), appointment.court_id.as_deref())
    }

    pub fn capacity(&self, sport_type: &str) -> usize {
        match self {
            Resource::Court(_) => max_clients_per_court(sport_type),
            Resource::Instructor(_) | Resource::Tenant => 1,
        }
    }
}

/// A time range someone wants to occupy.
#[derive(Debug, Clone)]
pub struct SlotClaim<'a> {
    pub date: NaiveDate,
    pub start_time: &'a str,
    pub duration: u32,
    pub instructor_id: Option<&'a str>,
    pub court_id: Option<&'a str>,
    pub academy_id: Option<&'a str>,
    pub sport_type: &'a str,
    /// Appointment being edited; never conflicts with itself.
    pub exclude_id: Option<&'a str>,
}

impl SlotClaim<'_> {
    fn session(&self) -> Option<(&str, &str, &str)> {
        match (self.academy_id, self.court_id) {
            (Some(academy), Some(court)) => Some((academy, court, self.start_time)),
            _ => None,
        }
    }
}

/// Academy appointments of one court at one start time are a single session
/// for the coach, however many clients are rostered.
fn session_of(appointment: &Appointment) -> Option<(&str, &str, &str)> {
    match (appointment.academy_id.as_deref(), appointment.court_id.as_deref()) {
        (Some(academy), Some(court)) => Some((academy, court, appointment.start_time.as_str())),
        _ => None,
    }
}

/// Highest number of `[start, end)` ranges running at the same minute.
pub fn peak_concurrency(ranges: &[(u32, u32)]) -> usize {
    let mut events: Vec<(u32, i32)> = ranges
        .iter()
        .flat_map(|&(start, end)| [(start, 1), (end, -1)])
        .collect();
    // Ends sort before starts at the same minute.
    events.sort_unstable();

    let (mut running, mut peak) = (0i32, 0i32);
    for (_, delta) in events {
        running += delta;
        peak = peak.max(running);
    }
    peak.max(0) as usize
}

/// Rejects the claim when, for any resource it needs, the active appointments
/// running at once somewhere inside the claimed window already fill that
/// resource's capacity.
pub fn check_conflicts(claim: &SlotClaim<'_>, existing: &[Appointment]) -> Result<(), AppError> {
    let start = to_minutes(claim.start_time)?;
    let end = start.saturating_add(claim.duration);
    let own_session = claim.session();

    for resource in Resource::occupied(claim.instructor_id, claim.court_id) {
        let mut ranges = Vec::new();
        let mut sessions = HashSet::new();

        for other in existing {
            if Some(other.id.as_str()) == claim.exclude_id
                || other.date != claim.date
                || !other.status.is_active()
                || !Resource::of(other).contains(&resource)
            {
                continue;
            }

            if let Resource::Instructor(_) = resource
                && let Some(session) = session_of(other)
                && (Some(session) == own_session || !sessions.insert(session))
            {
                continue;
            }

            let other_start = to_minutes(&other.start_time)?;
            let other_end = other_start.saturating_add(other.duration);
            if overlaps(start, end, other_start, other_end) {
                ranges.push((other_start.max(start), other_end.min(end)));
            }
        }

        if peak_concurrency(&ranges) >= resource.capacity(claim.sport_type) {
            return Err(AppError::Conflict(format!(
                "Time slot {} on {} is already booked",
                claim.start_time, claim.date
            )));
        }
    }
    Ok(())
}
