//! Application layer: the booking wizard that walks a client from service
//! selection to a paid booking, and the desk that stores and administers
//! the resulting records.

pub mod desk;
pub mod wizard;
