use crate::domain::payment::PaymentFailure;
use crate::domain::pricing::Money;
use crate::domain::step::WizardStep;
use crate::domain::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Unknown service: {0}")]
    ServiceNotFound(String),
    #[error("Package '{package}' is not offered by service {service}")]
    PackageNotFound { service: String, package: String },
    #[error("Booking {0} not found")]
    BookingNotFound(u32),
    #[error("Cannot {action} during the {step} step")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },
    #[error("Invalid booking details: {0}")]
    ValidationError(ValidationErrors),
    #[error("No payment method selected")]
    MissingPaymentMethod,
    #[error("Payment failed: {0}")]
    PaymentError(#[from] PaymentFailure),
    #[error("Deposit mismatch: expected {expected}, received {received}")]
    AmountMismatch { expected: Money, received: Money },
}

pub type Result<T> = std::result::Result<T, BookingError>;
