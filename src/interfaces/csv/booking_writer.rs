use crate::domain::booking::{BookingRecord, BookingStatus};
use crate::domain::payment::PaymentMethod;
use crate::domain::pricing::Money;
use crate::error::Result;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct BookingLine<'a> {
    id: u32,
    reference: &'a str,
    client: &'a str,
    service: &'a str,
    package: Option<&'a str>,
    date: NaiveDate,
    #[serde(serialize_with = "hours_minutes")]
    time: NaiveTime,
    method: PaymentMethod,
    amount: Money,
    status: BookingStatus,
}

fn hours_minutes<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&time.format("%H:%M"))
}

/// Writes bookings as CSV, one line per record.
pub struct BookingWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BookingWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_bookings<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a BookingRecord>,
    ) -> Result<()> {
        for record in records {
            self.writer.serialize(BookingLine {
                id: record.id,
                reference: &record.reference,
                client: &record.client_name,
                service: &record.service_id,
                package: record.package.as_deref(),
                date: record.date,
                time: record.time,
                method: record.payment_method,
                amount: record.amount,
                status: record.status,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn record(id: u32, package: Option<&str>) -> BookingRecord {
        BookingRecord {
            id,
            reference: "K7Q2ZP0XA".to_string(),
            client_name: "Banda, Chikondi".to_string(),
            email: "chikondi@example.com".to_string(),
            phone: "0999123456".to_string(),
            service_id: "s1".to_string(),
            package: package.map(str::to_string),
            date: NaiveDate::from_ymd_opt(2099, 6, 20).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            notes: String::new(),
            payment_method: PaymentMethod::TnmMpamba,
            amount: Money::new(dec!(75000)),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_writer_output() {
        let mut out = Vec::new();
        BookingWriter::new(&mut out)
            .write_bookings(&[record(1, None), record(2, Some("Gold Package"))])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "id,reference,client,service,package,date,time,method,amount,status"
        );
        assert_eq!(
            lines[1],
            "1,K7Q2ZP0XA,\"Banda, Chikondi\",s1,,2099-06-20,10:00,tnm-mpamba,75000,pending"
        );
        assert!(lines[2].contains(",Gold Package,"));
    }

    #[test]
    fn test_writer_empty_input_writes_nothing() {
        let mut out = Vec::new();
        BookingWriter::new(&mut out)
            .write_bookings(&Vec::<BookingRecord>::new())
            .unwrap();
        assert!(out.is_empty());
    }
}
