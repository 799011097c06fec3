use crate::domain::booking::{BookingRecord, BookingRequest, BookingStatus};
use crate::domain::ports::{BookingRepository, ServiceCatalog};
use crate::domain::service::ServiceItem;
use crate::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A read-only catalog held in memory.
///
/// Services keep the order they were supplied in.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    services: Arc<Vec<ServiceItem>>,
}

impl InMemoryCatalog {
    pub fn new(services: Vec<ServiceItem>) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    async fn services(&self) -> Result<Vec<ServiceItem>> {
        Ok(self.services.as_ref().clone())
    }

    async fn get(&self, service_id: &str) -> Result<Option<ServiceItem>> {
        Ok(self.services.iter().find(|s| s.id == service_id).cloned())
    }
}

#[derive(Default)]
struct BookingTable {
    next_id: u32,
    rows: BTreeMap<u32, BookingRecord>,
}

/// A thread-safe in-memory booking repository.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Default, Clone)]
pub struct InMemoryBookingRepository {
    table: Arc<RwLock<BookingTable>>,
}

impl InMemoryBookingRepository {
    /// Creates a new, empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, request: BookingRequest) -> Result<BookingRecord> {
        let mut table = self.table.write().await;
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| BookingError::StorageError("booking ids exhausted".to_string()))?;
        let record = BookingRecord::from_request(table.next_id, request, Utc::now());
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: u32) -> Result<Option<BookingRecord>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<BookingRecord>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn update_status(
        &self,
        id: u32,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|record| {
            record.status = status;
            record.clone()
        }))
    }

    async fn delete(&self, id: u32) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
