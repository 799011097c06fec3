//! CSV import of booking requests and export of stored bookings.

pub mod booking_reader;
pub mod booking_writer;
