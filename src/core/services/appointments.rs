use chrono::{Duration, NaiveDate, Utc};
use futures::future::try_join_all;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::core::errors::SalonError;
use crate::core::models::{
    appointment::{Appointment, AppointmentStatus, AppointmentView, DEFAULT_DURATION_MINUTES, TimeOfDay},
    filters::AppointmentFilter,
    input::{AppointmentInput, AppointmentUpdate},
    page::{Page, PageRequest},
    service::ServiceSummary,
    stats::{AppointmentStats, average},
    user::User,
};
use crate::core::services::{SalonService, ensure_admin, ensure_owner_or_admin};
use crate::core::validation::Validator;
use crate::infrastructure::storage::{SlotCheck, Storage};

pub const DEFAULT_APPOINTMENT_PAGE_SIZE: u32 = 10;
const WEEK_WINDOW_DAYS: i64 = 7;

const SERVICE_MESSAGE: &str = "Service name must be between 2 and 100 characters";
const DATE_MESSAGE: &str = "Please enter a valid date";
const TIME_MESSAGE: &str = "Please enter a valid time in HH:MM format";
const NOTES_MESSAGE: &str = "Notes cannot be more than 500 characters";
const MAX_NOTES_LENGTH: usize = 500;

/// A booking date is interpreted as 00:00 UTC, so only days after today are in the future.
fn ensure_future(date: NaiveDate) -> Result<(), SalonError> {
    if date > Utc::now().date_naive() {
        Ok(())
    } else {
        Err(SalonError::PastAppointmentDate)
    }
}

fn notes(v: &mut Validator, raw: Option<&str>) -> Option<String> {
    let notes = raw.map(str::trim).filter(|n| !n.is_empty())?;
    v.check(notes.chars().count() <= MAX_NOTES_LENGTH, "notes", NOTES_MESSAGE);
    Some(notes.to_string())
}

fn by_schedule(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));
}

impl<S: Storage> SalonService<S> {
    /// Whole book, admin only, in calendar order.
    pub async fn list_appointments(
        &self,
        actor: &User,
        filter: &AppointmentFilter,
        page: PageRequest,
    ) -> Result<Page<AppointmentView>, SalonError> {
        ensure_admin(actor)?;
        self.appointment_page(filter, page).await
    }

    pub async fn user_appointments(
        &self,
        actor: &User,
        user_id: Uuid,
        filter: AppointmentFilter,
        page: PageRequest,
    ) -> Result<Page<AppointmentView>, SalonError> {
        ensure_owner_or_admin(actor, user_id, "access these appointments")?;
        let filter = AppointmentFilter {
            user_id: Some(user_id),
            ..filter
        };
        self.appointment_page(&filter, page).await
    }

    pub async fn get_appointment(&self, actor: &User, appointment_id: Uuid) -> Result<AppointmentView, SalonError> {
        let appointment = self.load_appointment(appointment_id).await?;
        ensure_owner_or_admin(actor, appointment.user_id, "access this appointment")?;
        self.view(appointment).await
    }

    /// Books a slot for `actor`. When a service id is given, duration and price come from that
    /// service and the slot must be free.
    #[instrument(skip(self, actor, input), fields(user_id = %actor.id, date = %input.date, time = %input.time))]
    pub async fn create_appointment(&self, actor: &User, input: AppointmentInput) -> Result<AppointmentView, SalonError> {
        let mut v = Validator::new();
        let service_name = v.text("service", &input.service, 2, 100, SERVICE_MESSAGE);
        let service_id = input
            .service_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .and_then(|id| v.parse::<Uuid>("serviceId", id, "Invalid service ID"));
        let date = v.date("date", &input.date, DATE_MESSAGE);
        let time = v.parse::<TimeOfDay>("time", &input.time, TIME_MESSAGE);
        let notes = notes(&mut v, input.notes.as_deref());
        v.finish()?;
        let (Some(date), Some(time)) = (date, time) else {
            return Err(SalonError::invalid("date", DATE_MESSAGE));
        };

        ensure_future(date)?;

        let service = match service_id {
            Some(id) => Some(
                self.storage
                    .get_service(id)
                    .await?
                    .ok_or(SalonError::UnknownService(id))?,
            ),
            None => None,
        };

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: actor.id,
            user_name: actor.name.clone(),
            user_phone: actor.phone.clone(),
            service: service_name,
            service_id,
            date,
            time,
            status: AppointmentStatus::Pending,
            notes,
            duration: service.as_ref().map_or(DEFAULT_DURATION_MINUTES, |s| s.duration),
            price: service.as_ref().map_or(0.0, |s| s.price),
            created_at: now,
            updated_at: now,
        };
        let check = if service_id.is_some() {
            SlotCheck::RejectOverlap
        } else {
            SlotCheck::Skip
        };

        let appointment = self.storage.save_appointment(appointment, check).await?;
        info!(appointment_id = %appointment.id, "appointment booked");
        Ok(AppointmentView::new(appointment, service.as_ref().map(ServiceSummary::from)))
    }

    /// Owners may reschedule or edit notes; only admins may move the status.
    #[instrument(skip(self, actor, changes), fields(actor_id = %actor.id))]
    pub async fn update_appointment(
        &self,
        actor: &User,
        appointment_id: Uuid,
        changes: AppointmentUpdate,
    ) -> Result<AppointmentView, SalonError> {
        let mut appointment = self.load_appointment(appointment_id).await?;
        ensure_owner_or_admin(actor, appointment.user_id, "update this appointment")?;
        if changes.status.is_some() && !actor.is_admin() {
            return Err(SalonError::StatusChangeForbidden);
        }

        let mut v = Validator::new();
        let service_name = changes
            .service
            .as_deref()
            .map(|s| v.text("service", s, 2, 100, SERVICE_MESSAGE));
        let date = changes.date.as_deref().and_then(|d| v.date("date", d, DATE_MESSAGE));
        let time = changes
            .time
            .as_deref()
            .and_then(|t| v.parse::<TimeOfDay>("time", t, TIME_MESSAGE));
        let status = changes
            .status
            .as_deref()
            .and_then(|s| v.parse::<AppointmentStatus>("status", s, "Invalid status"));
        let notes = changes.notes.as_deref().map(|n| notes(&mut v, Some(n)));
        v.finish()?;

        if let Some(date) = date {
            ensure_future(date)?;
        }

        let reschedules = date.is_some_and(|d| d != appointment.date)
            || time.is_some_and(|t| t != appointment.time)
            || status.is_some_and(|s| appointment.is_cancelled() && s != AppointmentStatus::Cancelled);

        if let Some(service_name) = service_name {
            appointment.service = service_name;
        }
        if let Some(date) = date {
            appointment.date = date;
        }
        if let Some(time) = time {
            appointment.time = time;
        }
        if let Some(status) = status {
            appointment.status = status;
        }
        if let Some(notes) = notes {
            appointment.notes = notes;
        }
        appointment.updated_at = Utc::now();

        let check = if reschedules && appointment.service_id.is_some() && !appointment.is_cancelled() {
            SlotCheck::RejectOverlap
        } else {
            SlotCheck::Skip
        };
        let appointment = self.storage.save_appointment(appointment, check).await?;
        info!(appointment_id = %appointment.id, status = ?appointment.status, "appointment updated");
        self.view(appointment).await
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_appointment(&self, actor: &User, appointment_id: Uuid) -> Result<(), SalonError> {
        let appointment = self.load_appointment(appointment_id).await?;
        ensure_owner_or_admin(actor, appointment.user_id, "delete this appointment")?;
        if !self.storage.delete_appointment(appointment.id).await? {
            return Err(SalonError::AppointmentNotFound(appointment.id));
        }
        info!(%appointment_id, "appointment deleted");
        Ok(())
    }

    /// Revenue figures only count completed appointments.
    pub async fn appointment_stats(&self, actor: &User) -> Result<AppointmentStats, SalonError> {
        ensure_admin(actor)?;
        let appointments = self.storage.list_appointments(&AppointmentFilter::default()).await?;
        let today = Utc::now().date_naive();
        let week_start = today - Duration::days(WEEK_WINDOW_DAYS);
        let count = |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();
        let completed: Vec<f64> = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .map(|a| a.price)
            .collect();

        Ok(AppointmentStats {
            total_appointments: appointments.len(),
            pending_appointments: count(AppointmentStatus::Pending),
            confirmed_appointments: count(AppointmentStatus::Confirmed),
            completed_appointments: count(AppointmentStatus::Completed),
            cancelled_appointments: count(AppointmentStatus::Cancelled),
            today_appointments: appointments.iter().filter(|a| a.date == today).count(),
            weekly_appointments: appointments.iter().filter(|a| a.date >= week_start).count(),
            total_revenue: completed.iter().sum(),
            avg_appointment_value: average(completed.iter().copied()),
        })
    }

    async fn appointment_page(
        &self,
        filter: &AppointmentFilter,
        page: PageRequest,
    ) -> Result<Page<AppointmentView>, SalonError> {
        let mut appointments = self.storage.list_appointments(filter).await?;
        by_schedule(&mut appointments);
        let Page { items, pagination } = Page::from_sorted(appointments, page);
        let items = try_join_all(items.into_iter().map(|a| self.view(a))).await?;
        Ok(Page { items, pagination })
    }

    /// Attaches the end time and, when the service still exists, its summary.
    async fn view(&self, appointment: Appointment) -> Result<AppointmentView, SalonError> {
        let service = match appointment.service_id {
            Some(id) => self.storage.get_service(id).await?,
            None => None,
        };
        Ok(AppointmentView::new(appointment, service.as_ref().map(ServiceSummary::from)))
    }

    async fn load_appointment(&self, appointment_id: Uuid) -> Result<Appointment, SalonError> {
        self.storage
            .get_appointment(appointment_id)
            .await?
            .ok_or(SalonError::AppointmentNotFound(appointment_id))
    }
}
