use crate::domain::payment::PaymentMethod;
use crate::domain::pricing::Money;
use crate::domain::service::ServiceItem;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form fields the client fills in during the details step.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Date,
    Time,
    Notes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Date => "date",
            Field::Time => "time",
            Field::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// Booking in progress, owned by a single wizard session.
///
/// Date and time are kept as the raw strings the client typed so that the
/// validator can report format problems against the field that has them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingDraft {
    pub service: Option<ServiceItem>,
    pub package: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub payment_method: Option<PaymentMethod>,
}

impl BookingDraft {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::Notes => &self.notes,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Date => self.date = value,
            Field::Time => self.time = value,
            Field::Notes => self.notes = value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

/// Payload handed to the booking desk once the deposit has been collected.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub service_id: String,
    pub package: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub amount: Money,
    pub reference: String,
}

/// A persisted booking.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BookingRecord {
    pub id: u32,
    pub reference: String,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub service_id: String,
    pub package: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub amount: Money,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Builds the record for a freshly accepted request.
    pub fn from_request(id: u32, request: BookingRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            reference: request.reference,
            client_name: request.client_name,
            email: request.email,
            phone: request.phone,
            service_id: request.service_id,
            package: request.package,
            date: request.date,
            time: request.time,
            notes: request.notes,
            payment_method: request.payment_method,
            amount: request.amount,
            status: BookingStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("Confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert_eq!("canceled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_draft_field_access() {
        let mut draft = BookingDraft::default();
        draft.set_field(Field::Email, "ada@example.com".to_string());
        assert_eq!(draft.field(Field::Email), "ada@example.com");
        assert_eq!(draft.field(Field::Name), "");
    }

    #[test]
    fn test_request_uses_camel_case_keys() {
        let request = BookingRequest {
            client_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0999123456".to_string(),
            service_id: "s1".to_string(),
            package: None,
            date: NaiveDate::from_ymd_opt(2099, 6, 20).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            notes: String::new(),
            payment_method: PaymentMethod::AirtelMoney,
            amount: Money::ZERO,
            reference: "ABC123XYZ".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["clientName"], "Ada");
        assert_eq!(json["serviceId"], "s1");
        assert_eq!(json["paymentMethod"], "airtel-money");
    }
}
