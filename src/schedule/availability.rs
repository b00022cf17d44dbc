use crate::models::{MonthAvailabilityItem, YearMonth};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::{debug, warn};
use std::collections::BTreeSet;

/// Concrete dates on which the provider does not take bookings.
///
/// Available days are left out; a date missing from the result is the
/// positive signal. Day numbers are not checked against the month length and
/// roll over the way calendar arithmetic does: day 31 of a 30-day month lands
/// on the 1st of the next month and day 0 on the last day of the previous one.
pub fn unavailable_dates(items: &[MonthAvailabilityItem], month: YearMonth) -> BTreeSet<NaiveDate> {
    let first_day = month.first_day();

    let dates: BTreeSet<NaiveDate> = items
        .iter()
        .filter(|item| !item.available)
        .filter_map(|item| {
            let offset = Duration::days(i64::from(item.day) - 1);
            let date = first_day.checked_add_signed(offset);
            match date {
                Some(date) if !month.contains(date) => {
                    warn!(
                        "Day {} is outside {}, using rolled over date {}",
                        item.day, month, date
                    );
                }
                None => warn!("Day {} of {} is not a representable date", item.day, month),
                _ => {}
            }
            date
        })
        .collect();

    debug!(
        "{} of {} days unavailable in {}",
        dates.len(),
        items.len(),
        month
    );
    dates
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether the calendar should refuse selection of `date`.
///
/// Days before `today`, weekends, and provider-unavailable days are all
/// disabled.
pub fn is_day_disabled(date: NaiveDate, today: NaiveDate, unavailable: &BTreeSet<NaiveDate>) -> bool {
    date < today || is_weekend(date) || unavailable.contains(&date)
}
