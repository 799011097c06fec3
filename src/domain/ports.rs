use super::booking::{BookingRecord, BookingRequest, BookingStatus};
use super::payment::{Charge, PaymentFailure, PaymentReceipt};
use super::service::ServiceItem;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn services(&self) -> Result<Vec<ServiceItem>>;
    async fn get(&self, service_id: &str) -> Result<Option<ServiceItem>>;
}

/// Durable storage for bookings. `insert` assigns the id, the initial
/// status and the creation time.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, request: BookingRequest) -> Result<BookingRecord>;
    async fn get(&self, id: u32) -> Result<Option<BookingRecord>>;
    async fn get_all(&self) -> Result<Vec<BookingRecord>>;
    async fn update_status(&self, id: u32, status: BookingStatus)
    -> Result<Option<BookingRecord>>;
    async fn delete(&self, id: u32) -> Result<bool>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, charge: &Charge) -> std::result::Result<PaymentReceipt, PaymentFailure>;
}

pub type ServiceCatalogRef = Arc<dyn ServiceCatalog>;
pub type BookingRepositoryRef = Arc<dyn BookingRepository>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
