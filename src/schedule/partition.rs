use crate::models::Appointment;

const NOON: u32 = 12;

/// Appointments whose local hour is before noon, in input order.
pub fn morning<'a, I>(appointments: I) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments
        .into_iter()
        .filter(|appointment| appointment.local_hour() < NOON)
        .collect()
}

/// Appointments whose local hour is after noon, in input order.
///
/// Appointments in the 12:00 hour belong to neither [`morning`] nor this
/// bucket.
pub fn afternoon<'a, I>(appointments: I) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments
        .into_iter()
        .filter(|appointment| appointment.local_hour() > NOON)
        .collect()
}
