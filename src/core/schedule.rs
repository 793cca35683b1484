//! Slot arithmetic for appointment bookings.
//!
//! Every appointment occupies the half-open interval `[start, start + duration)` in minutes from
//! midnight of its date. Two appointments conflict when they share a date, neither is cancelled,
//! and their intervals intersect. Equal starts conflict; back-to-back bookings do not.

use crate::core::models::appointment::Appointment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub start: u32,
    pub end: u32,
}

impl Slot {
    pub fn of(appointment: &Appointment) -> Self {
        let start = appointment.time.minute_of_day();
        Slot {
            start,
            end: start + appointment.duration,
        }
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Returns the first live appointment that would clash with `candidate`.
///
/// The candidate itself (matched by id) is skipped so that updates can be checked against the
/// rest of the book.
pub fn find_conflict<'a, I>(candidate: &Appointment, existing: I) -> Option<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    if candidate.is_cancelled() {
        return None;
    }
    let wanted = Slot::of(candidate);
    existing.into_iter().find(|other| {
        other.id != candidate.id
            && other.date == candidate.date
            && !other.is_cancelled()
            && Slot::of(other).overlaps(&wanted)
    })
}
