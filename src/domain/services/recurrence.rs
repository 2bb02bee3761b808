//! Expansion of weekly recurrence rules into concrete appointment drafts.

use chrono::{Duration, NaiveDate};
use crate::domain::models::academy::{Academy, AcademySchedule};
use crate::domain::models::appointment::{AppointmentDraft, NewRecurringSeries};
use crate::domain::services::time_window::{add_minutes, day_of_week, parse_date};
use crate::error::AppError;

/// Every date on `weekday` from `start` through `end` inclusive, one week apart.
/// Expansion begins on the first matching date on or after `start`. Without an
/// `end` the series covers `horizon_weeks` weeks starting at `start`.
pub fn expand_dates(weekday: u8, start: NaiveDate, end: Option<NaiveDate>, horizon_weeks: u32) -> Vec<NaiveDate> {
    if weekday > 6 {
        return Vec::new();
    }

    let offset = (i64::from(weekday) - i64::from(day_of_week(start))).rem_euclid(7);
    let first = start + Duration::days(offset);
    let last = end.unwrap_or_else(|| start + Duration::weeks(i64::from(horizon_weeks)) - Duration::days(1));

    let mut dates = Vec::new();
    let mut current = first;
    while current <= last {
        dates.push(current);
        current += Duration::weeks(1);
    }
    dates
}

/// Rejects inverted windows and explicit end dates beyond `max_weeks`.
pub fn validate_series_window(start: NaiveDate, end: Option<NaiveDate>, max_weeks: u32) -> Result<(), AppError> {
    let Some(end) = end else {
        return Ok(());
    };

    if end < start {
        return Err(AppError::Validation(format!("Series end date {} is before start date {}", end, start)));
    }
    if end > start + Duration::weeks(i64::from(max_weeks)) {
        return Err(AppError::Validation(format!(
            "Series may span at most {} weeks (from {} to {})",
            max_weeks, start, end
        )));
    }
    Ok(())
}

pub fn schedule_dates(schedule: &AcademySchedule, horizon_weeks: u32) -> Result<Vec<NaiveDate>, AppError> {
    let start = parse_date(&schedule.start_date)?;
    let end = schedule.end_date.as_deref().filter(|s| !s.is_empty()).map(parse_date).transpose()?;
    Ok(expand_dates(schedule.day_of_week, start, end, horizon_weeks))
}

/// One draft per schedule occurrence, court and rostered client.
pub fn plan_academy_appointments(academy: &Academy, horizon_weeks: u32) -> Result<Vec<AppointmentDraft>, AppError> {
    let mut drafts = Vec::new();

    for schedule in &academy.schedules {
        let end_time = add_minutes(&schedule.start_time, schedule.duration)?;

        for date in schedule_dates(schedule, horizon_weeks)? {
            for court in &academy.courts {
                let coach = Some(court.assigned_coach_id.clone()).filter(|c| !c.is_empty());

                for client in &court.clients {
                    drafts.push(AppointmentDraft {
                        client_id: client.client_id.clone(),
                        client_name: client.client_name.clone(),
                        instructor_id: coach.clone(),
                        sport_type: academy.sport_type.clone(),
                        date,
                        start_time: schedule.start_time.clone(),
                        end_time: end_time.clone(),
                        duration: schedule.duration,
                        notes: String::new(),
                        recurring_group_id: None,
                        exercise_ids: academy.exercise_ids.clone(),
                        academy_id: Some(academy.id.clone()),
                        court_id: Some(court.id.clone()),
                    });
                }
            }
        }
    }

    Ok(drafts)
}

pub fn plan_recurring_series(
    request: &NewRecurringSeries,
    group_id: &str,
    horizon_weeks: u32,
) -> Result<Vec<AppointmentDraft>, AppError> {
    let start = parse_date(&request.start_date)?;
    let end = request.end_date.as_deref().filter(|s| !s.is_empty()).map(parse_date).transpose()?;
    let end_time = add_minutes(&request.start_time, request.duration)?;

    Ok(expand_dates(request.day_of_week, start, end, horizon_weeks)
        .into_iter()
        .map(|date| AppointmentDraft {
            client_id: request.client_id.clone(),
            client_name: request.client_name.clone(),
            instructor_id: request.instructor_id.clone(),
            sport_type: request.sport_type.clone(),
            date,
            start_time: request.start_time.clone(),
            end_time: end_time.clone(),
            duration: request.duration,
            notes: request.notes.clone().unwrap_or_default(),
            recurring_group_id: Some(group_id.to_string()),
            exercise_ids: request.exercise_ids.clone(),
            academy_id: None,
            court_id: None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::academy::{Court, CourtClient, NewAcademy};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn academy(courts: Vec<Court>, schedules: Vec<AcademySchedule>) -> Academy {
        Academy::new(NewAcademy {
            name: "Evening Group".into(),
            sport_type: "padel".into(),
            courts,
            schedules,
            exercise_ids: vec!["ex1".into()],
            ..Default::default()
        })
    }

    fn court(number: u32, clients: &[&str]) -> Court {
        Court {
            id: String::new(),
            court_number: number,
            assigned_coach_id: format!("coach{}", number),
            assigned_coach_name: String::new(),
            clients: clients.iter().map(|c| CourtClient {
                client_id: c.to_string(),
                client_name: c.to_string(),
            }).collect(),
        }
    }

    fn monday_schedule() -> AcademySchedule {
        AcademySchedule {
            day_of_week: 1,
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            duration: 60,
            start_date: "2024-01-01".into(),
            end_date: Some("2024-01-22".into()),
        }
    }

    #[test]
    fn test_weekly_expansion_is_inclusive() {
        let a = academy(vec![court(1, &["ana"])], vec![monday_schedule()]);
        let drafts = plan_academy_appointments(&a, 26).unwrap();

        let dates: Vec<String> = drafts.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22"]);
        assert!(drafts.iter().all(|d| d.end_time == "10:00" && d.duration == 60));
        assert!(drafts.iter().all(|d| d.academy_id.as_deref() == Some(a.id.as_str())));
        assert!(drafts.iter().all(|d| d.court_id.as_deref() == Some(a.courts[0].id.as_str())));
        assert!(drafts.iter().all(|d| d.instructor_id.as_deref() == Some("coach1")));
    }

    #[test]
    fn test_one_draft_per_court_client_and_date() {
        let mut thursday = monday_schedule();
        thursday.day_of_week = 4;
        thursday.start_date = "2024-01-04".into();
        thursday.end_date = Some("2024-01-11".into());

        let a = academy(
            vec![court(1, &["ana", "ben"]), court(2, &["cai"]), court(3, &[])],
            vec![monday_schedule(), thursday],
        );

        // (4 mondays + 2 thursdays) * 3 rostered clients
        assert_eq!(plan_academy_appointments(&a, 26).unwrap().len(), 18);
    }

    #[test]
    fn test_start_date_off_weekday_moves_forward() {
        // 2024-01-03 is a Wednesday; the first Monday after it is the 8th.
        let dates = expand_dates(1, date("2024-01-03"), Some(date("2024-01-22")), 26);
        assert_eq!(dates, vec![date("2024-01-08"), date("2024-01-15"), date("2024-01-22")]);
    }

    #[test]
    fn test_open_ended_series_uses_horizon() {
        let dates = expand_dates(1, date("2024-01-01"), None, 4);
        assert_eq!(dates.len(), 4);
        assert_eq!(dates.last(), Some(&date("2024-01-22")));
    }

    #[test]
    fn test_invalid_weekday_expands_to_nothing() {
        assert!(expand_dates(7, date("2024-01-01"), Some(date("2024-02-01")), 4).is_empty());
    }

    #[test]
    fn test_series_window_validation() {
        assert!(validate_series_window(date("2024-01-01"), None, 104).is_ok());
        assert!(validate_series_window(date("2024-01-01"), Some(date("2024-12-30")), 104).is_ok());
        assert!(matches!(
            validate_series_window(date("2024-02-01"), Some(date("2024-01-01")), 104),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_series_window(date("2024-01-01"), Some(date("2026-06-01")), 104),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_recurring_series_shares_group() {
        let request = NewRecurringSeries {
            client_id: "c1".into(),
            client_name: "Client".into(),
            sport_type: "yoga".into(),
            day_of_week: 2,
            start_time: "18:30".into(),
            duration: 45,
            start_date: "2024-01-02".into(),
            end_date: Some("2024-01-30".into()),
            ..Default::default()
        };

        let drafts = plan_recurring_series(&request, "group-1", 26).unwrap();
        assert_eq!(drafts.len(), 5);
        assert!(drafts.iter().all(|d| d.recurring_group_id.as_deref() == Some("group-1")));
        assert!(drafts.iter().all(|d| d.end_time == "19:15"));
    }
}
