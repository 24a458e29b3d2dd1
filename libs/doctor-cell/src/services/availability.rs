// libs/doctor-cell/src/services/availability.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shared_models::time::SLOT_MINUTES;
use shared_models::{RecordId, TimeOfDay};

/// Anything that can occupy a doctor's slot on a given day.
///
/// Implemented by the appointment record; kept as a trait so the resolver does
/// not depend on the appointment store.
pub trait SlotBooking {
    fn doctor_id(&self) -> RecordId;
    fn date(&self) -> NaiveDate;
    fn start_time(&self) -> TimeOfDay;
    /// Cancelled bookings free their slot.
    fn holds_slot(&self) -> bool;
}

/// A day's bookable start times, built from consecutive sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    slots: Vec<TimeOfDay>,
}

impl SlotTemplate {
    /// Builds half-hour slots for each `[start, end)` session, in session order.
    pub fn from_sessions(sessions: &[(TimeOfDay, TimeOfDay)]) -> Self {
        let mut slots = Vec::new();
        for &(start, end) in sessions {
            let mut cursor = start;
            while cursor < end {
                slots.push(cursor);
                match cursor.add_minutes(SLOT_MINUTES) {
                    Ok(next) => cursor = next,
                    Err(_) => break,
                }
            }
        }
        Self { slots }
    }

    /// The clinic day: 09:00-13:00 and 14:00-18:00, sixteen slots with a lunch
    /// gap after 12:30.
    pub fn clinic_day() -> Self {
        let hm = |hour, minute| TimeOfDay::new(hour, minute).expect("clinic hours are valid times");
        Self::from_sessions(&[(hm(9, 0), hm(13, 0)), (hm(14, 0), hm(18, 0))])
    }

    pub fn slots(&self) -> &[TimeOfDay] {
        &self.slots
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.slots.contains(&time)
    }
}

impl Default for SlotTemplate {
    fn default() -> Self {
        Self::clinic_day()
    }
}

/// One template slot as a time picker would present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotState {
    pub time: TimeOfDay,
    pub available: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityService {
    template: SlotTemplate,
}

impl AvailabilityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: SlotTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &SlotTemplate {
        &self.template
    }

    /// Template slots the doctor has free on `date`, in template order.
    ///
    /// Pure in its inputs: the same doctor, date and booking set always give the
    /// same list.
    pub fn compute_available_slots<B: SlotBooking>(
        &self,
        doctor_id: RecordId,
        date: NaiveDate,
        bookings: &[B],
    ) -> Vec<TimeOfDay> {
        let booked: Vec<TimeOfDay> = bookings
            .iter()
            .filter(|b| b.doctor_id() == doctor_id && b.date() == date && b.holds_slot())
            .map(|b| b.start_time())
            .collect();

        let available: Vec<TimeOfDay> = self
            .template
            .slots()
            .iter()
            .copied()
            .filter(|slot| !booked.contains(slot))
            .collect();

        debug!(
            "Doctor {} on {}: {} booked, {} available",
            doctor_id,
            date,
            booked.len(),
            available.len()
        );
        available
    }

    /// Slots to offer while a booking form is being filled in. Until both a
    /// doctor and a date are chosen nothing constrains the choice, so the whole
    /// template is offered.
    pub fn slots_for_selection<B: SlotBooking>(
        &self,
        doctor_id: Option<RecordId>,
        date: Option<NaiveDate>,
        bookings: &[B],
    ) -> Vec<TimeOfDay> {
        match (doctor_id, date) {
            (Some(doctor_id), Some(date)) => self.compute_available_slots(doctor_id, date, bookings),
            _ => self.template.slots().to_vec(),
        }
    }

    /// Every template slot flagged against an available list.
    pub fn slot_states(&self, available: &[TimeOfDay]) -> Vec<SlotState> {
        self.template
            .slots()
            .iter()
            .map(|&time| SlotState {
                time,
                available: available.contains(&time),
            })
            .collect()
    }

    /// True once a selected doctor/date has no free slot left.
    pub fn is_fully_booked<B: SlotBooking>(
        &self,
        doctor_id: RecordId,
        date: NaiveDate,
        bookings: &[B],
    ) -> bool {
        self.compute_available_slots(doctor_id, date, bookings).is_empty()
    }
}

/// [`AvailabilityService::compute_available_slots`] over the clinic day template.
pub fn compute_available_slots<B: SlotBooking>(
    doctor_id: RecordId,
    date: NaiveDate,
    bookings: &[B],
) -> Vec<TimeOfDay> {
    AvailabilityService::new().compute_available_slots(doctor_id, date, bookings)
}
