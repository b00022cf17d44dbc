//! Dashboard view-model
//!
//! Tracks the selected day and displayed month, holds the snapshots fetched for
//! them, and derives what the dashboard shows: the agenda, the next
//! appointment, and which calendar days can be picked. Snapshots are replaced
//! wholesale on every fetch.

use crate::api::ApiClient;
use crate::config::ViewerTimezone;
use crate::error::AppResult;
use crate::models::{Appointment, MonthAvailabilityItem, YearMonth};
use crate::schedule::{self, Agenda};
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use log::{debug, info};
use std::collections::BTreeSet;

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

fn weekday_pt_br(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    today: NaiveDate,
    selected_date: NaiveDate,
    current_month: YearMonth,
    appointments: Vec<Appointment>,
    month_availability: Vec<MonthAvailabilityItem>,
}

impl Dashboard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected_date: today,
            current_month: YearMonth::of(today),
            appointments: Vec::new(),
            month_availability: Vec::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn is_today_selected(&self) -> bool {
        self.selected_date == self.today
    }

    /// Moves the selection to `date` unless the calendar would refuse it.
    ///
    /// Selecting a day outside the displayed month also switches the month.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.is_day_disabled(date) {
            debug!("Refusing to select disabled day {}", date);
            return false;
        }
        if date == self.selected_date {
            return true;
        }

        self.selected_date = date;
        self.appointments.clear();
        if !self.current_month.contains(date) {
            self.change_month(YearMonth::of(date));
        }
        true
    }

    pub fn change_month(&mut self, month: YearMonth) {
        if month != self.current_month {
            self.current_month = month;
            self.month_availability.clear();
        }
    }

    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
    }

    pub fn set_month_availability(&mut self, items: Vec<MonthAvailabilityItem>) {
        self.month_availability = items;
    }

    pub fn unavailable_dates(&self) -> BTreeSet<NaiveDate> {
        schedule::unavailable_dates(&self.month_availability, self.current_month)
    }

    pub fn is_day_disabled(&self, date: NaiveDate) -> bool {
        schedule::is_day_disabled(date, self.today, &self.unavailable_dates())
    }

    pub fn agenda(&self, now: DateTime<Utc>) -> Agenda {
        Agenda::build(self.appointments.clone(), now, self.selected_date, self.today)
    }

    /// e.g. `Dia 05 de março`
    pub fn selected_date_caption(&self) -> String {
        let month = MONTHS_PT_BR[self.selected_date.month0() as usize];
        format!("Dia {:02} de {}", self.selected_date.day(), month)
    }

    pub fn selected_weekday(&self) -> &'static str {
        weekday_pt_br(self.selected_date.weekday())
    }

    /// Fetches the displayed month's availability and the selected day's
    /// appointments, replacing both snapshots.
    pub async fn refresh(
        &mut self,
        api: &ApiClient,
        provider_id: &str,
        viewer_tz: ViewerTimezone,
    ) -> AppResult<()> {
        let month = self.current_month;
        let date = self.selected_date;

        let (availability, appointments) = tokio::try_join!(
            api.month_availability(provider_id, month),
            api.appointments_for_day(date, viewer_tz),
        )?;

        self.set_month_availability(availability);
        self.set_appointments(appointments);
        info!(
            "Dashboard refreshed for {} ({} appointments)",
            date,
            self.appointments.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentUser;
    use chrono::{FixedOffset, TimeZone};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn appointment(id: &str, day: u32, hour: u32) -> Appointment {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
            .unwrap();
        Appointment::new(
            id,
            date,
            AppointmentUser {
                name: id.to_string(),
                avatar: None,
            },
        )
    }

    #[test]
    fn test_new_dashboard_selects_today() {
        let dashboard = Dashboard::new(ymd(2024, 3, 5));
        assert!(dashboard.is_today_selected());
        assert_eq!(dashboard.current_month(), YearMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn test_captions() {
        let dashboard = Dashboard::new(ymd(2024, 3, 5));
        assert_eq!(dashboard.selected_date_caption(), "Dia 05 de março");
        assert_eq!(dashboard.selected_weekday(), "Terça-feira");
    }

    #[test]
    fn test_select_refuses_weekend_past_and_unavailable() {
        let mut dashboard = Dashboard::new(ymd(2024, 3, 5));
        dashboard.set_month_availability(vec![MonthAvailabilityItem::new(7, false)]);

        assert!(!dashboard.select_date(ymd(2024, 3, 9))); // saturday
        assert!(!dashboard.select_date(ymd(2024, 3, 4))); // yesterday
        assert!(!dashboard.select_date(ymd(2024, 3, 7))); // unavailable
        assert_eq!(dashboard.selected_date(), ymd(2024, 3, 5));

        assert!(dashboard.select_date(ymd(2024, 3, 6)));
        assert!(!dashboard.is_today_selected());
    }

    #[test]
    fn test_select_clears_day_snapshot() {
        let mut dashboard = Dashboard::new(ymd(2024, 3, 5));
        dashboard.set_appointments(vec![appointment("a", 5, 9)]);

        assert!(dashboard.select_date(ymd(2024, 3, 6)));
        assert!(dashboard.appointments().is_empty());
    }

    #[test]
    fn test_select_in_other_month_switches_month() {
        let mut dashboard = Dashboard::new(ymd(2024, 3, 29));
        dashboard.set_month_availability(vec![MonthAvailabilityItem::new(29, false)]);

        assert!(dashboard.select_date(ymd(2024, 4, 1)));
        assert_eq!(dashboard.current_month(), YearMonth::new(2024, 4).unwrap());
        assert!(dashboard.unavailable_dates().is_empty());
    }

    #[test]
    fn test_change_month_replaces_availability() {
        let mut dashboard = Dashboard::new(ymd(2024, 3, 5));
        dashboard.set_month_availability(vec![MonthAvailabilityItem::new(20, false)]);
        assert_eq!(dashboard.unavailable_dates().len(), 1);

        dashboard.change_month(dashboard.current_month().next());
        assert!(dashboard.unavailable_dates().is_empty());
    }

    #[test]
    fn test_agenda_next_only_today() {
        let mut dashboard = Dashboard::new(ymd(2024, 3, 5));
        dashboard.set_appointments(vec![appointment("b", 5, 15), appointment("a", 5, 9)]);
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();

        let agenda = dashboard.agenda(now);
        assert_eq!(agenda.next.map(|a| a.id), Some("a".to_string()));

        dashboard.select_date(ymd(2024, 3, 6));
        dashboard.set_appointments(vec![appointment("c", 6, 10)]);
        let agenda = dashboard.agenda(now);
        assert!(agenda.next.is_none());
        assert_eq!(agenda.morning.len(), 1);
    }
}
