use crate::domain::booking::{BookingRecord, BookingRequest, BookingStatus};
use crate::domain::ports::{BookingRepositoryRef, ServiceCatalogRef};
use crate::domain::pricing::Money;
use crate::domain::service::ServiceItem;
use crate::error::{BookingError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Back-office view of the booking book.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct BookingSummary {
    pub total: usize,
    pub by_status: BTreeMap<BookingStatus, usize>,
    /// Deposits on every booking that has not been cancelled.
    pub deposits_collected: Money,
}

/// Accepts completed bookings and serves the admin operations on them.
///
/// The desk is the only place a deposit is trusted: it recomputes the amount
/// from the catalog entry instead of taking the figure the client sent.
#[derive(Clone)]
pub struct BookingDesk {
    catalog: ServiceCatalogRef,
    repository: BookingRepositoryRef,
}

impl BookingDesk {
    pub fn new(catalog: ServiceCatalogRef, repository: BookingRepositoryRef) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    /// Every service the catalog offers, in catalog order.
    pub async fn services(&self) -> Result<Vec<ServiceItem>> {
        self.catalog.services().await
    }

    pub async fn service(&self, service_id: &str) -> Result<ServiceItem> {
        self.catalog
            .get(service_id)
            .await?
            .ok_or_else(|| BookingError::ServiceNotFound(service_id.to_string()))
    }

    /// Authoritative deposit for a service, optionally narrowed to one package.
    pub async fn quote(&self, service_id: &str, package: Option<&str>) -> Result<Money> {
        let service = self.service(service_id).await?;
        if let Some(name) = package
            && service.package(name).is_none()
        {
            return Err(BookingError::PackageNotFound {
                service: service.id,
                package: name.to_string(),
            });
        }
        Ok(service.deposit_for(package))
    }

    pub async fn place(&self, request: BookingRequest) -> Result<BookingRecord> {
        let expected = self
            .quote(&request.service_id, request.package.as_deref())
            .await?;
        if expected != request.amount {
            tracing::warn!(
                service = %request.service_id,
                %expected,
                received = %request.amount,
                "rejecting booking with mismatched deposit"
            );
            return Err(BookingError::AmountMismatch {
                expected,
                received: request.amount,
            });
        }

        let record = self.repository.insert(request).await?;
        tracing::info!(
            id = record.id,
            reference = %record.reference,
            service = %record.service_id,
            "booking stored"
        );
        Ok(record)
    }

    pub async fn bookings(&self) -> Result<Vec<BookingRecord>> {
        self.repository.get_all().await
    }

    pub async fn booking(&self, id: u32) -> Result<BookingRecord> {
        self.repository
            .get(id)
            .await?
            .ok_or(BookingError::BookingNotFound(id))
    }

    pub async fn set_status(&self, id: u32, status: BookingStatus) -> Result<BookingRecord> {
        let record = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or(BookingError::BookingNotFound(id))?;
        tracing::info!(id, %status, "booking status changed");
        Ok(record)
    }

    pub async fn remove(&self, id: u32) -> Result<()> {
        if self.repository.delete(id).await? {
            tracing::info!(id, "booking removed");
            Ok(())
        } else {
            Err(BookingError::BookingNotFound(id))
        }
    }

    pub async fn summary(&self) -> Result<BookingSummary> {
        let mut summary = BookingSummary::default();
        for record in self.repository.get_all().await? {
            summary.total += 1;
            *summary.by_status.entry(record.status).or_default() += 1;
            if record.status != BookingStatus::Cancelled {
                summary.deposits_collected += record.amount;
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;
    use crate::domain::service::studio_catalog;
    use crate::infrastructure::in_memory::{InMemoryBookingRepository, InMemoryCatalog};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn desk() -> BookingDesk {
        BookingDesk::new(
            Arc::new(InMemoryCatalog::new(studio_catalog())),
            Arc::new(InMemoryBookingRepository::new()),
        )
    }

    fn request(package: Option<&str>, amount: Money) -> BookingRequest {
        BookingRequest {
            client_name: "Thoko".to_string(),
            email: "thoko@example.com".to_string(),
            phone: "0888123456".to_string(),
            service_id: "s1".to_string(),
            package: package.map(str::to_string),
            date: NaiveDate::from_ymd_opt(2099, 8, 1).unwrap(),
            time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            notes: String::new(),
            payment_method: PaymentMethod::Card,
            amount,
            reference: "XYZ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_services_come_from_injected_catalog() {
        let mut only_design = studio_catalog();
        only_design.retain(|s| s.id == "s5");
        let desk = BookingDesk::new(
            Arc::new(InMemoryCatalog::new(only_design)),
            Arc::new(InMemoryBookingRepository::new()),
        );

        let services = desk.services().await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, "s5");
        assert_eq!(self::desk().services().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_place_accepts_matching_deposit() {
        let desk = desk();
        let record = desk
            .place(request(Some("Gold Package"), Money::new(dec!(125000))))
            .await
            .unwrap();
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(desk.booking(record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_place_rejects_tampered_deposit() {
        let desk = desk();
        let result = desk.place(request(None, Money::new(dec!(1)))).await;
        assert!(matches!(
            result,
            Err(BookingError::AmountMismatch { expected, .. }) if expected == Money::new(dec!(75000))
        ));
        assert!(desk.bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quote_rejects_unknown_service_and_package() {
        let desk = desk();
        assert!(matches!(
            desk.quote("s99", None).await,
            Err(BookingError::ServiceNotFound(_))
        ));
        assert!(matches!(
            desk.quote("s1", Some("Bronze Package")).await,
            Err(BookingError::PackageNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_admin_operations_and_summary() {
        let desk = desk();
        let first = desk
            .place(request(None, Money::new(dec!(75000))))
            .await
            .unwrap();
        let second = desk
            .place(request(Some("Platinum Package"), Money::new(dec!(200000))))
            .await
            .unwrap();
        desk.place(request(None, Money::new(dec!(75000))))
            .await
            .unwrap();

        desk.set_status(first.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        desk.set_status(second.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        let summary = desk.summary().await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_status[&BookingStatus::Confirmed], 1);
        assert_eq!(summary.by_status[&BookingStatus::Cancelled], 1);
        assert_eq!(summary.by_status[&BookingStatus::Pending], 1);
        assert_eq!(summary.deposits_collected, Money::new(dec!(150000)));

        desk.remove(second.id).await.unwrap();
        assert!(matches!(
            desk.remove(second.id).await,
            Err(BookingError::BookingNotFound(_))
        ));
        assert!(matches!(
            desk.set_status(42, BookingStatus::Completed).await,
            Err(BookingError::BookingNotFound(42))
        ));
    }
}
