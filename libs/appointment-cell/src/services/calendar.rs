// libs/appointment-cell/src/services/calendar.rs
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use doctor_cell::{Doctor, DEFAULT_DOCTOR_COLOR};
use patient_cell::Patient;
use shared_models::{RecordId, TimeOfDay};
use shared_utils::Clock;

use crate::models::{Appointment, AppointmentStatus};
use crate::services::query::Directory;

/// Entries rendered inside one day cell before collapsing into "+N more".
pub const MAX_VISIBLE_ENTRIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub appointment_id: RecordId,
    pub start_time: TimeOfDay,
    pub status: AppointmentStatus,
    pub patient_name: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub entries: Vec<CalendarEntry>,
    /// Appointments on this day beyond the visible entries.
    pub overflow: usize,
}

impl CalendarDay {
    pub fn total_appointments(&self) -> usize {
        self.entries.len() + self.overflow
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    /// First day of the displayed month.
    pub month: NaiveDate,
    /// Whole Sunday-to-Saturday weeks covering the month.
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }
}

pub struct CalendarService {
    clock: Arc<dyn Clock>,
}

impl CalendarService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// The month containing today.
    pub fn current_month(&self) -> NaiveDate {
        first_of_month(self.clock.today())
    }

    pub fn month_view(
        &self,
        anchor: NaiveDate,
        appointments: &[Appointment],
        patients: &[Patient],
        doctors: &[Doctor],
    ) -> CalendarMonth {
        let today = self.clock.today();
        let month = first_of_month(anchor);
        let last = last_of_month(month);

        let grid_start = month - Days::new(u64::from(month.weekday().num_days_from_sunday()));
        let grid_end = last + Days::new(u64::from(6 - last.weekday().num_days_from_sunday()));

        let mut by_day: HashMap<NaiveDate, Vec<&Appointment>> = HashMap::new();
        for appointment in appointments
            .iter()
            .filter(|a| a.date >= grid_start && a.date <= grid_end)
        {
            by_day.entry(appointment.date).or_default().push(appointment);
        }

        let directory = Directory::new(patients, doctors);
        let days: Vec<CalendarDay> = grid_start
            .iter_days()
            .take_while(|d| *d <= grid_end)
            .map(|date| {
                let on_day = by_day.get(&date).map(Vec::as_slice).unwrap_or_default();
                let entries = on_day
                    .iter()
                    .take(MAX_VISIBLE_ENTRIES)
                    .map(|a| CalendarEntry {
                        appointment_id: a.id,
                        start_time: a.start_time,
                        status: a.status,
                        patient_name: directory.patient(a.patient_id).map(|p| p.name.clone()),
                        color: directory
                            .doctor(a.doctor_id)
                            .map(|d| d.color.clone())
                            .unwrap_or_else(|| DEFAULT_DOCTOR_COLOR.to_string()),
                    })
                    .collect();

                CalendarDay {
                    date,
                    in_current_month: date.month() == month.month() && date.year() == month.year(),
                    is_today: date == today,
                    entries,
                    overflow: on_day.len().saturating_sub(MAX_VISIBLE_ENTRIES),
                }
            })
            .collect();

        debug!("Built calendar for {} with {} cells", month.format("%B %Y"), days.len());
        CalendarMonth { month, days }
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next - Days::new(1),
        None => NaiveDate::MAX,
    }
}

/// First of the month before `date`'s month.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

/// First of the month after `date`'s month.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn month_bounds_handle_leap_years() {
        assert_eq!(first_of_month(d("2024-02-17")), d("2024-02-01"));
        assert_eq!(last_of_month(d("2024-02-17")), d("2024-02-29"));
        assert_eq!(last_of_month(d("2023-02-01")), d("2023-02-28"));
        assert_eq!(last_of_month(d("2024-12-31")), d("2024-12-31"));
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        assert_eq!(previous_month(d("2024-01-15")), d("2023-12-01"));
        assert_eq!(next_month(d("2024-12-03")), d("2025-01-01"));
        assert_eq!(next_month(d("2024-01-31")), d("2024-02-01"));
    }
}
