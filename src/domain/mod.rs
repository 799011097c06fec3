//! Domain model: catalog entries, booking drafts and records, payment
//! values, pricing rules and the ports the application layer depends on.

pub mod booking;
pub mod payment;
pub mod ports;
pub mod pricing;
pub mod service;
pub mod step;
pub mod validation;
