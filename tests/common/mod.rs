#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use studio_booking::application::desk::BookingDesk;
use studio_booking::application::wizard::BookingWizard;
use studio_booking::domain::booking::Field;
use studio_booking::domain::service::studio_catalog;
use studio_booking::infrastructure::in_memory::{InMemoryBookingRepository, InMemoryCatalog};
use studio_booking::infrastructure::simulated_gateway::{SimulatedGateway, SimulatedOutcome};
use tempfile::NamedTempFile;

pub const IMPORT_HEADER: &str = "service,package,name,email,phone,date,time,notes,method";

pub fn desk() -> BookingDesk {
    BookingDesk::new(
        Arc::new(InMemoryCatalog::new(studio_catalog())),
        Arc::new(InMemoryBookingRepository::new()),
    )
}

pub fn wizard(desk: &BookingDesk, outcome: SimulatedOutcome) -> BookingWizard {
    BookingWizard::new(
        desk.clone(),
        Arc::new(SimulatedGateway::new(Duration::from_millis(10), outcome)),
    )
}

pub fn fill_valid_details(wizard: &mut BookingWizard) {
    wizard.set_field(Field::Name, "Chikondi Banda").unwrap();
    wizard.set_field(Field::Email, "chikondi@example.com").unwrap();
    wizard.set_field(Field::Phone, "+265 999 123 456").unwrap();
    wizard.set_field(Field::Date, "2099-06-20").unwrap();
    wizard.set_field(Field::Time, "10:00").unwrap();
}

/// Writes an import file with the standard header followed by `rows`.
pub fn import_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", IMPORT_HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}
