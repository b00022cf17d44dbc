use crate::models::Appointment;
use log::trace;

/// Orders appointments by their `HH:mm` hour string.
///
/// The hour format is fixed width and zero padded, so lexicographic order is
/// chronological within a day. The sort is stable: appointments sharing an
/// hour keep their input order.
pub fn sort_by_hour(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by(|a, b| a.hour.cmp(&b.hour));
    trace!("Sorted {} appointments by hour", appointments.len());
    appointments
}
