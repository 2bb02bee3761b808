use std::sync::Arc;
use chrono::{NaiveDate, Timelike, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SchedulingPolicy;
use crate::domain::models::academy::{Academy, AcademyPatch, AcademySchedule, AcademyStatus, CourtClient, NewAcademy};
use crate::domain::models::appointment::{
    Appointment, AppointmentDraft, AppointmentFilter, AppointmentPatch, NewAppointment, NewRecurringSeries,
};
use crate::domain::models::availability::{AvailabilityPatch, AvailabilityRule, NewAvailabilityRule};
use crate::domain::ports::{
    AcademyRepository, AppointmentRepository, AvailabilityRepository, SnapshotCallback, Subscription,
};
use crate::domain::services::availability::{self, Slot};
use crate::domain::services::capacity::{self, check_conflicts, Resource, SlotClaim};
use crate::domain::services::recurrence::{self, validate_series_window};
use crate::domain::services::time_window::{
    add_minutes, crosses_midnight, day_of_week, duration_between, parse_date, to_minutes, MINUTES_PER_DAY,
};
use crate::error::AppError;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedOccurrence {
    pub date: NaiveDate,
    pub reason: String,
}

/// Result of materializing a recurrence. Failed occurrences are reported,
/// never rolled back.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub created: Vec<String>,
    pub skipped: Vec<SkippedOccurrence>,
}

impl GenerationOutcome {
    pub fn generated(&self) -> usize {
        self.created.len()
    }

    pub fn failed(&self) -> usize {
        self.skipped.len()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCreated {
    pub recurring_group_id: String,
    #[serde(flatten)]
    pub outcome: GenerationOutcome,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcademyCreated {
    pub academy: Academy,
    pub generated: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Entry point for every scheduling mutation. Validation runs before any
/// write; multi-document steps after the first write are best-effort.
pub struct SchedulingService {
    appointments: Arc<dyn AppointmentRepository>,
    academies: Arc<dyn AcademyRepository>,
    availability: Arc<dyn AvailabilityRepository>,
    policy: SchedulingPolicy,
}

impl SchedulingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        academies: Arc<dyn AcademyRepository>,
        availability: Arc<dyn AvailabilityRepository>,
        policy: SchedulingPolicy,
    ) -> Self {
        Self { appointments, academies, availability, policy }
    }

    /// Current date in the configured business timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.policy.timezone).date_naive()
    }

    fn minutes_now(&self) -> u32 {
        let now = Utc::now().with_timezone(&self.policy.timezone);
        now.hour() * 60 + now.minute()
    }

    // ---- Appointments ----

    pub async fn create_appointment(&self, tenant_id: &str, data: NewAppointment) -> Result<Appointment, AppError> {
        require(&data.client_id, "clientId")?;
        require(&data.sport_type, "sportType")?;
        require_duration(data.duration)?;

        let date = parse_date(&data.date)?;
        if date < self.today() {
            return Err(AppError::Validation("Cannot book in the past".into()));
        }

        let end_time = self.end_time_for(&data.start_time, data.duration)?;

        let draft = AppointmentDraft {
            client_id: data.client_id,
            client_name: data.client_name,
            instructor_id: data.instructor_id.filter(|s| !s.is_empty()),
            sport_type: data.sport_type,
            date,
            start_time: data.start_time,
            end_time,
            duration: data.duration,
            notes: data.notes.unwrap_or_default(),
            recurring_group_id: data.recurring_group_id.filter(|s| !s.is_empty()),
            exercise_ids: data.exercise_ids,
            academy_id: data.academy_id.filter(|s| !s.is_empty()),
            court_id: data.court_id.filter(|s| !s.is_empty()),
        };

        self.ensure_references(tenant_id, draft.academy_id.as_deref(), draft.court_id.as_deref()).await?;
        self.ensure_bookable(tenant_id, &draft, None).await?;

        let created = self.appointments.create(tenant_id, &Appointment::scheduled(draft)).await?;
        info!("Appointment {} booked for {} {} (tenant {})", created.id, created.date, created.start_time, tenant_id);
        Ok(created)
    }

    pub async fn get_appointment(&self, tenant_id: &str, id: &str) -> Result<Appointment, AppError> {
        self.appointments.find_by_id(tenant_id, id).await?
            .ok_or(AppError::NotFound("Appointment not found".into()))
    }

    pub async fn list_appointments(&self, tenant_id: &str, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        self.appointments.list(tenant_id, filter).await
    }

    pub async fn update_appointment(&self, tenant_id: &str, id: &str, patch: AppointmentPatch) -> Result<Appointment, AppError> {
        let mut appointment = self.get_appointment(tenant_id, id).await?;
        let moves_slot = patch.touches_slot();
        let court_changed = patch.court_id.is_some();

        if let Some(next) = patch.status
            && !appointment.status.can_transition_to(next) {
            return Err(AppError::Validation(format!(
                "Cannot change appointment status from {} to {}",
                appointment.status.as_str(),
                next.as_str()
            )));
        }

        if let Some(client_id) = patch.client_id {
            require(&client_id, "clientId")?;
            appointment.client_id = client_id;
        }
        if let Some(name) = patch.client_name { appointment.client_name = name; }
        if let Some(instructor) = patch.instructor_id { appointment.instructor_id = Some(instructor).filter(|s| !s.is_empty()); }
        if let Some(sport) = patch.sport_type {
            require(&sport, "sportType")?;
            appointment.sport_type = sport;
        }
        if let Some(date) = patch.date {
            let date = parse_date(&date)?;
            if date != appointment.date && date < self.today() {
                return Err(AppError::Validation("Cannot move an appointment into the past".into()));
            }
            appointment.date = date;
        }
        if let Some(start) = patch.start_time { appointment.start_time = start; }
        if let Some(duration) = patch.duration {
            require_duration(duration)?;
            appointment.duration = duration;
        }
        if let Some(status) = patch.status { appointment.status = status; }
        if let Some(paid) = patch.is_paid { appointment.is_paid = paid; }
        if let Some(notes) = patch.notes { appointment.notes = notes; }
        if let Some(exercises) = patch.exercise_ids { appointment.exercise_ids = exercises; }
        if let Some(court) = patch.court_id { appointment.court_id = Some(court).filter(|s| !s.is_empty()); }

        appointment.end_time = self.end_time_for(&appointment.start_time, appointment.duration)?;

        if court_changed {
            self.ensure_references(tenant_id, appointment.academy_id.as_deref(), appointment.court_id.as_deref()).await?;
        }

        if moves_slot && appointment.status.is_active() {
            let draft = draft_of(&appointment);
            self.ensure_bookable(tenant_id, &draft, Some(&appointment.id)).await?;
        }

        appointment.updated_at = Utc::now();
        let updated = self.appointments.update(tenant_id, &appointment).await?;
        info!("Appointment {} updated (tenant {})", updated.id, tenant_id);
        Ok(updated)
    }

    pub async fn set_paid(&self, tenant_id: &str, id: &str, is_paid: bool) -> Result<Appointment, AppError> {
        self.update_appointment(tenant_id, id, AppointmentPatch { is_paid: Some(is_paid), ..Default::default() }).await
    }

    pub async fn assign_exercises(&self, tenant_id: &str, id: &str, exercise_ids: Vec<String>) -> Result<Appointment, AppError> {
        self.update_appointment(tenant_id, id, AppointmentPatch { exercise_ids: Some(exercise_ids), ..Default::default() }).await
    }

    pub async fn add_exercise(&self, tenant_id: &str, id: &str, exercise_id: &str) -> Result<Appointment, AppError> {
        let mut appointment = self.get_appointment(tenant_id, id).await?;
        appointment.add_exercise(exercise_id);
        appointment.updated_at = Utc::now();
        self.appointments.update(tenant_id, &appointment).await
    }

    pub async fn remove_exercise(&self, tenant_id: &str, id: &str, exercise_id: &str) -> Result<Appointment, AppError> {
        let mut appointment = self.get_appointment(tenant_id, id).await?;
        appointment.remove_exercise(exercise_id);
        appointment.updated_at = Utc::now();
        self.appointments.update(tenant_id, &appointment).await
    }

    pub async fn delete_appointment(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        self.appointments.delete(tenant_id, id).await?;
        info!("Appointment {} deleted (tenant {})", id, tenant_id);
        Ok(())
    }

    pub fn watch_appointments(
        &self,
        tenant_id: &str,
        filter: &AppointmentFilter,
        callback: SnapshotCallback<Appointment>,
    ) -> Subscription {
        self.appointments.watch(tenant_id, filter, callback)
    }

    // ---- Recurring series ----

    pub async fn create_recurring_series(&self, tenant_id: &str, request: NewRecurringSeries) -> Result<SeriesCreated, AppError> {
        require(&request.client_id, "clientId")?;
        require(&request.sport_type, "sportType")?;
        require_duration(request.duration)?;
        require_weekday(request.day_of_week)?;
        self.end_time_for(&request.start_time, request.duration)?;

        let start = parse_date(&request.start_date)?;
        if start < self.today() {
            return Err(AppError::Validation("Series start date must be today or later".into()));
        }
        let end = request.end_date.as_deref().filter(|s| !s.is_empty()).map(parse_date).transpose()?;
        validate_series_window(start, end, self.policy.max_series_weeks)?;

        let group_id = Uuid::new_v4().to_string();
        let drafts = recurrence::plan_recurring_series(&request, &group_id, self.policy.series_horizon_weeks)?;

        let mut outcome = GenerationOutcome::default();
        for draft in drafts {
            let date = draft.date;

            if let Err(e) = self.ensure_bookable(tenant_id, &draft, None).await {
                warn!("Skipping series {} occurrence on {}: {}", group_id, date, e);
                outcome.skipped.push(SkippedOccurrence { date, reason: e.to_string() });
                continue;
            }

            match self.appointments.create(tenant_id, &Appointment::scheduled(draft)).await {
                Ok(created) => outcome.created.push(created.id),
                Err(e) => {
                    warn!("Failed to store series {} occurrence on {}: {}", group_id, date, e);
                    outcome.skipped.push(SkippedOccurrence { date, reason: e.to_string() });
                }
            }
        }

        info!(
            "Recurring series {} created with {} appointments ({} skipped, tenant {})",
            group_id, outcome.generated(), outcome.failed(), tenant_id
        );
        Ok(SeriesCreated { recurring_group_id: group_id, outcome })
    }

    /// Deletes the members of a series dated on or after `from` (default today).
    pub async fn cancel_recurring_series(
        &self,
        tenant_id: &str,
        group_id: &str,
        from: Option<NaiveDate>,
    ) -> Result<CascadeReport, AppError> {
        let from = from.unwrap_or_else(|| self.today());
        let members = self.appointments.list_by_group_from(tenant_id, group_id, from).await?;
        let report = self.delete_best_effort(tenant_id, &members).await;
        info!("Series {} cancelled from {}: {} deleted, {} failed", group_id, from, report.deleted, report.failed);
        Ok(report)
    }

    // ---- Academies ----

    pub async fn create_academy(&self, tenant_id: &str, mut data: NewAcademy) -> Result<AcademyCreated, AppError> {
        require(&data.name, "name")?;
        require(&data.sport_type, "sportType")?;
        if data.court_price < 0.0 || data.price_per_student < 0.0 {
            return Err(AppError::Validation("Prices cannot be negative".into()));
        }
        if data.schedules.is_empty() {
            return Err(AppError::Validation("An academy needs at least one schedule".into()));
        }

        let today = self.today();
        for schedule in &mut data.schedules {
            self.normalize_schedule(schedule)?;
            if parse_date(&schedule.start_date)? < today {
                return Err(AppError::Validation("Schedule start date must be today or later".into()));
            }
        }
        capacity::validate_courts(&data.sport_type, &data.courts)?;

        let academy = self.academies.create(tenant_id, &Academy::new(data)).await?;
        info!(
            "Academy {} created with {} courts and {} clients (tenant {})",
            academy.id, academy.courts.len(), academy.total_clients(), tenant_id
        );

        let outcome = match self.generate_appointments_from_academy(tenant_id, &academy).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Appointment generation for academy {} failed: {}", academy.id, e);
                GenerationOutcome::default()
            }
        };
        info!("Generated {} appointments for academy {}", outcome.generated(), academy.id);

        Ok(AcademyCreated {
            generated: outcome.generated(),
            failed: outcome.failed(),
            academy,
        })
    }

    /// Writes one appointment per schedule occurrence, court and client.
    /// Calling this twice produces two independent sets; nothing is
    /// de-duplicated and court capacity is not re-checked against existing
    /// appointments.
    pub async fn generate_appointments_from_academy(&self, tenant_id: &str, academy: &Academy) -> Result<GenerationOutcome, AppError> {
        let drafts = recurrence::plan_academy_appointments(academy, self.policy.series_horizon_weeks)?;

        let mut outcome = GenerationOutcome::default();
        for draft in drafts {
            let date = draft.date;
            match self.appointments.create(tenant_id, &Appointment::scheduled(draft)).await {
                Ok(created) => outcome.created.push(created.id),
                Err(e) => {
                    warn!("Failed to generate appointment for academy {} on {}: {}", academy.id, date, e);
                    outcome.skipped.push(SkippedOccurrence { date, reason: e.to_string() });
                }
            }
        }
        Ok(outcome)
    }

    pub async fn get_academy(&self, tenant_id: &str, id: &str) -> Result<Academy, AppError> {
        self.academies.find_by_id(tenant_id, id).await?
            .ok_or(AppError::NotFound("Academy not found".into()))
    }

    pub async fn list_academies(&self, tenant_id: &str, status: Option<AcademyStatus>) -> Result<Vec<Academy>, AppError> {
        self.academies.list(tenant_id, status).await
    }

    pub async fn academies_for_coach(&self, tenant_id: &str, coach_id: &str) -> Result<Vec<Academy>, AppError> {
        let academies = self.academies.list(tenant_id, None).await?;
        Ok(academies.into_iter().filter(|a| a.has_coach(coach_id)).collect())
    }

    /// Partial update. Existing appointments are left as generated.
    pub async fn update_academy(&self, tenant_id: &str, id: &str, patch: AcademyPatch) -> Result<Academy, AppError> {
        let mut academy = self.get_academy(tenant_id, id).await?;

        if let Some(name) = patch.name {
            require(&name, "name")?;
            academy.name = name;
        }
        if let Some(sport) = patch.sport_type {
            require(&sport, "sportType")?;
            academy.sport_type = sport;
        }
        if let Some(description) = patch.description { academy.description = description; }
        if let Some(n) = patch.number_of_courts { academy.number_of_courts = n; }
        if let Some(price) = patch.court_price { academy.court_price = price; }
        if let Some(price) = patch.price_per_student { academy.price_per_student = price; }
        if let Some(coach) = patch.head_coach_id { academy.head_coach_id = Some(coach).filter(|s| !s.is_empty()); }
        if let Some(name) = patch.head_coach_name { academy.head_coach_name = Some(name).filter(|s| !s.is_empty()); }
        if let Some(courts) = patch.courts { academy.courts = courts; }
        if let Some(mut schedules) = patch.schedules {
            for schedule in &mut schedules {
                self.normalize_schedule(schedule)?;
            }
            academy.schedules = schedules;
        }
        if let Some(exercises) = patch.exercise_ids { academy.exercise_ids = exercises; }
        if let Some(status) = patch.status { academy.status = status; }

        if academy.court_price < 0.0 || academy.price_per_student < 0.0 {
            return Err(AppError::Validation("Prices cannot be negative".into()));
        }
        capacity::validate_courts(&academy.sport_type, &academy.courts)?;
        academy.assign_court_ids();
        academy.updated_at = Utc::now();

        let updated = self.academies.update(tenant_id, &academy).await?;
        info!("Academy {} updated (tenant {})", updated.id, tenant_id);
        Ok(updated)
    }

    pub async fn add_client_to_court(
        &self,
        tenant_id: &str,
        academy_id: &str,
        court_id: &str,
        client: CourtClient,
    ) -> Result<Academy, AppError> {
        require(&client.client_id, "clientId")?;
        let mut academy = self.get_academy(tenant_id, academy_id).await?;
        let sport = academy.sport_type.clone();

        let court = academy.court_mut(court_id).ok_or(AppError::NotFound("Court not found".into()))?;
        if court.has_client(&client.client_id) {
            return Ok(academy);
        }
        capacity::ensure_room_for_client(&sport, court)?;
        court.clients.push(client);

        academy.updated_at = Utc::now();
        self.academies.update(tenant_id, &academy).await
    }

    pub async fn remove_client_from_court(
        &self,
        tenant_id: &str,
        academy_id: &str,
        court_id: &str,
        client_id: &str,
    ) -> Result<Academy, AppError> {
        let mut academy = self.get_academy(tenant_id, academy_id).await?;

        let court = academy.court_mut(court_id).ok_or(AppError::NotFound("Court not found".into()))?;
        court.clients.retain(|c| c.client_id != client_id);

        academy.updated_at = Utc::now();
        self.academies.update(tenant_id, &academy).await
    }

    /// Removes an academy. With `cascade_future_appointments` the academy is
    /// first marked inactive, then its appointments dated today or later are
    /// deleted one by one, and only then the academy document itself. Past
    /// appointments are kept as history.
    pub async fn delete_academy(
        &self,
        tenant_id: &str,
        id: &str,
        cascade_future_appointments: bool,
    ) -> Result<CascadeReport, AppError> {
        let mut academy = self.get_academy(tenant_id, id).await?;
        let mut report = CascadeReport::default();

        if cascade_future_appointments {
            if academy.status != AcademyStatus::Inactive {
                academy.status = AcademyStatus::Inactive;
                academy.updated_at = Utc::now();
                self.academies.update(tenant_id, &academy).await?;
            }

            let future = self.appointments.list_by_academy_from(tenant_id, id, self.today()).await?;
            report = self.delete_best_effort(tenant_id, &future).await;
            info!("Deleted {} future appointments of academy {} ({} failed)", report.deleted, id, report.failed);
        }

        self.academies.delete(tenant_id, id).await?;
        info!("Academy {} deleted (tenant {})", id, tenant_id);
        Ok(report)
    }

    pub fn watch_academies(&self, tenant_id: &str, callback: SnapshotCallback<Academy>) -> Subscription {
        self.academies.watch(tenant_id, callback)
    }

    // ---- Availability ----

    pub async fn add_availability(&self, tenant_id: &str, data: NewAvailabilityRule) -> Result<AvailabilityRule, AppError> {
        let rule = AvailabilityRule::new(data);
        validate_rule(&rule)?;

        let created = self.availability.create(tenant_id, &rule).await?;
        info!("Availability {} added for day {} (tenant {})", created.id, created.day_of_week, tenant_id);
        Ok(created)
    }

    pub async fn update_availability(&self, tenant_id: &str, id: &str, patch: AvailabilityPatch) -> Result<AvailabilityRule, AppError> {
        let mut rule = self.availability.find_by_id(tenant_id, id).await?
            .ok_or(AppError::NotFound("Availability not found".into()))?;

        rule.apply(patch);
        validate_rule(&rule)?;

        self.availability.update(tenant_id, &rule).await
    }

    pub async fn deactivate_availability(&self, tenant_id: &str, id: &str) -> Result<AvailabilityRule, AppError> {
        self.update_availability(tenant_id, id, AvailabilityPatch { is_active: Some(false), ..Default::default() }).await
    }

    pub async fn delete_availability(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        self.availability.delete(tenant_id, id).await?;
        info!("Availability {} deleted (tenant {})", id, tenant_id);
        Ok(())
    }

    pub async fn list_availability(&self, tenant_id: &str) -> Result<Vec<AvailabilityRule>, AppError> {
        self.availability.list(tenant_id).await
    }

    pub async fn availability_for_day(&self, tenant_id: &str, day: u8) -> Result<Vec<AvailabilityRule>, AppError> {
        require_weekday(day)?;
        self.availability.list_active_for_day(tenant_id, day).await
    }

    pub async fn is_time_slot_available(&self, tenant_id: &str, day: u8, start: &str, end: &str) -> Result<bool, AppError> {
        let rules = self.availability_for_day(tenant_id, day).await?;
        availability::is_time_slot_available(&rules, day, start, end)
    }

    /// Free slots on `date` for a tenant-wide booking, or for one instructor.
    /// Past dates, and slots of today that already started, are omitted.
    pub async fn bookable_slots(&self, tenant_id: &str, date: NaiveDate, instructor_id: Option<&str>) -> Result<Vec<Slot>, AppError> {
        let today = self.today();
        if date < today {
            return Ok(Vec::new());
        }

        let rules = self.availability.list_active_for_day(tenant_id, day_of_week(date)).await?;
        let booked = self.appointments.list_by_date(tenant_id, date).await?;
        let resource = match instructor_id.filter(|i| !i.is_empty()) {
            Some(instructor) => Resource::Instructor(instructor.to_string()),
            None => Resource::Tenant,
        };

        let mut occupied = Vec::new();
        for a in booked.iter().filter(|a| a.status.is_active() && Resource::of(a).contains(&resource)) {
            let start = to_minutes(&a.start_time)?;
            occupied.push((start, start.saturating_add(a.duration)));
        }

        let mut slots = availability::bookable_slots(&rules, date, &occupied)?;
        if date == today {
            let now = self.minutes_now();
            slots.retain(|s| to_minutes(&s.start_time).is_ok_and(|m| m > now));
        }
        Ok(slots)
    }

    pub fn watch_availability(&self, tenant_id: &str, callback: SnapshotCallback<AvailabilityRule>) -> Subscription {
        self.availability.watch(tenant_id, callback)
    }

    // ---- helpers ----

    fn end_time_for(&self, start: &str, duration: u32) -> Result<String, AppError> {
        if self.policy.reject_midnight_rollover && crosses_midnight(start, duration)? {
            return Err(AppError::Validation(format!(
                "Appointment starting at {} for {} minutes runs past midnight",
                start, duration
            )));
        }
        add_minutes(start, duration)
    }

    /// An academy reference must exist, and a court must belong to it.
    async fn ensure_references(&self, tenant_id: &str, academy_id: Option<&str>, court_id: Option<&str>) -> Result<(), AppError> {
        let Some(academy_id) = academy_id else {
            if court_id.is_some() {
                return Err(AppError::Validation("courtId requires academyId".into()));
            }
            return Ok(());
        };

        let academy = self.get_academy(tenant_id, academy_id).await?;
        if let Some(court_id) = court_id
            && !academy.courts.iter().any(|c| c.id == court_id) {
            return Err(AppError::NotFound("Court not found".into()));
        }
        Ok(())
    }

    /// Availability (individual bookings only) and double-booking checks.
    async fn ensure_bookable(&self, tenant_id: &str, draft: &AppointmentDraft, exclude_id: Option<&str>) -> Result<(), AppError> {
        if self.policy.enforce_availability && draft.academy_id.is_none() {
            let rules = self.availability.list_active_for_day(tenant_id, day_of_week(draft.date)).await?;
            if !availability::is_appointment_within_availability(&rules, draft.date, &draft.start_time, draft.duration)? {
                warn!("Rejected {} {}: outside availability (tenant {})", draft.date, draft.start_time, tenant_id);
                return Err(AppError::Conflict("Selected time is outside the available hours".into()));
            }
        }

        let existing = self.appointments.list_by_date(tenant_id, draft.date).await?;
        let claim = SlotClaim {
            date: draft.date,
            start_time: &draft.start_time,
            duration: draft.duration,
            instructor_id: draft.instructor_id.as_deref(),
            court_id: draft.court_id.as_deref(),
            academy_id: draft.academy_id.as_deref(),
            sport_type: &draft.sport_type,
            exclude_id,
        };
        check_conflicts(&claim, &existing).inspect_err(|_| {
            warn!("Rejected {} {}: slot already taken (tenant {})", draft.date, draft.start_time, tenant_id);
        })
    }

    async fn delete_best_effort(&self, tenant_id: &str, appointments: &[Appointment]) -> CascadeReport {
        let mut report = CascadeReport::default();
        for appointment in appointments {
            match self.appointments.delete(tenant_id, &appointment.id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!("Failed to delete appointment {}: {}", appointment.id, e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn normalize_schedule(&self, schedule: &mut AcademySchedule) -> Result<(), AppError> {
        require_weekday(schedule.day_of_week)?;
        let span = duration_between(&schedule.start_time, &schedule.end_time)?;
        if schedule.duration == 0 {
            schedule.duration = span;
        }
        require_duration(schedule.duration)?;

        let start = parse_date(&schedule.start_date)?;
        let end = schedule.end_date.as_deref().filter(|s| !s.is_empty()).map(parse_date).transpose()?;
        validate_series_window(start, end, self.policy.max_series_weeks)
    }
}

fn draft_of(a: &Appointment) -> AppointmentDraft {
    AppointmentDraft {
        client_id: a.client_id.clone(),
        client_name: a.client_name.clone(),
        instructor_id: a.instructor_id.clone(),
        sport_type: a.sport_type.clone(),
        date: a.date,
        start_time: a.start_time.clone(),
        end_time: a.end_time.clone(),
        duration: a.duration,
        notes: a.notes.clone(),
        recurring_group_id: a.recurring_group_id.clone(),
        exercise_ids: a.exercise_ids.clone(),
        academy_id: a.academy_id.clone(),
        court_id: a.court_id.clone(),
    }
}

fn validate_rule(rule: &AvailabilityRule) -> Result<(), AppError> {
    require_weekday(rule.day_of_week)?;
    require_duration(rule.duration)?;
    duration_between(&rule.start_time, &rule.end_time)?;
    Ok(())
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Durations are minutes within a single day.
fn require_duration(value: u32) -> Result<(), AppError> {
    if value == 0 || value > MINUTES_PER_DAY {
        return Err(AppError::Validation(format!(
            "duration must be between 1 and {} minutes, got {}",
            MINUTES_PER_DAY, value
        )));
    }
    Ok(())
}

fn require_weekday(day: u8) -> Result<(), AppError> {
    if day > 6 {
        return Err(AppError::Validation(format!("dayOfWeek must be between 0 and 6, got {}", day)));
    }
    Ok(())
}
