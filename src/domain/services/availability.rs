use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::models::availability::{AvailabilityRule, PriceType};
use crate::domain::services::time_window::{self, contains, day_of_week, overlaps, to_minutes, MINUTES_PER_DAY};
use crate::error::AppError;

/// A concrete bookable window produced from one availability rule.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub price_type: Option<PriceType>,
}

pub fn rules_for_day(rules: &[AvailabilityRule], day: u8) -> Vec<&AvailabilityRule> {
    rules.iter().filter(|r| r.is_active && r.day_of_week == day).collect()
}

pub fn rules_for_date(rules: &[AvailabilityRule], date: NaiveDate) -> Vec<&AvailabilityRule> {
    rules_for_day(rules, day_of_week(date))
}

/// True iff one single active rule for `day` contains `[start, end)`.
/// Adjacent rules are never merged, so a slot spanning two of them is rejected.
pub fn is_time_slot_available(rules: &[AvailabilityRule], day: u8, start: &str, end: &str) -> Result<bool, AppError> {
    let (s, e) = (to_minutes(start)?, to_minutes(end)?);
    window_fits(rules, day, s, e)
}

/// Same check for an appointment given by start and duration. A booking that
/// runs past midnight never fits a single-day rule.
pub fn is_appointment_within_availability(
    rules: &[AvailabilityRule],
    date: NaiveDate,
    start: &str,
    duration: u32,
) -> Result<bool, AppError> {
    let s = to_minutes(start)?;
    let e = s.saturating_add(duration);
    if e > MINUTES_PER_DAY {
        return Ok(false);
    }
    window_fits(rules, day_of_week(date), s, e)
}

fn window_fits(rules: &[AvailabilityRule], day: u8, start: u32, end: u32) -> Result<bool, AppError> {
    for rule in rules_for_day(rules, day) {
        let (ws, we) = (to_minutes(&rule.start_time)?, to_minutes(&rule.end_time)?);
        if contains(ws, we, start, end) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Steps through every matching rule in `rule.duration` increments and keeps
/// the slots that do not overlap an occupied `[start, end)` minute range.
pub fn bookable_slots(
    rules: &[AvailabilityRule],
    date: NaiveDate,
    occupied: &[(u32, u32)],
) -> Result<Vec<Slot>, AppError> {
    let mut slots = Vec::new();

    for rule in rules_for_date(rules, date) {
        if rule.duration == 0 {
            continue;
        }

        let win_start = to_minutes(&rule.start_time)?;
        let win_end = to_minutes(&rule.end_time)?;

        let mut cursor = win_start;
        while cursor.saturating_add(rule.duration) <= win_end {
            let slot_end = cursor + rule.duration;
            let is_free = occupied.iter().all(|&(os, oe)| !overlaps(cursor, slot_end, os, oe));

            if is_free {
                slots.push(Slot {
                    start_time: time_window::from_minutes(cursor)?,
                    end_time: time_window::from_minutes(slot_end % MINUTES_PER_DAY)?,
                    duration: rule.duration,
                    price_type: rule.price_type,
                });
            }
            cursor += rule.duration;
        }
    }

    slots.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.duration.cmp(&b.duration)));
    slots.dedup_by(|a, b| a.start_time == b.start_time && a.duration == b.duration);
    Ok(slots)
}
