use crate::domain::payment::PaymentMethod;
use crate::error::{BookingError, Result};
use serde::Deserialize;
use std::io::Read;

/// One booking request as it appears in an import file.
///
/// Header: `service,package,name,email,phone,date,time,notes,method`.
/// Contact and schedule fields are kept as text; the wizard validates them.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct BookingRow {
    pub service: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub package: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: String,
    pub method: PaymentMethod,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Reads booking requests from a CSV source.
pub struct BookingReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BookingReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows; a malformed row yields an error without
    /// ending the stream.
    pub fn rows(self) -> impl Iterator<Item = Result<BookingRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BookingError::from))
    }
}
