use crate::domain::pricing::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[serde(alias = "airtel")]
    AirtelMoney,
    #[serde(alias = "mpamba")]
    TnmMpamba,
    Card,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::AirtelMoney => "Airtel Money",
            PaymentMethod::TnmMpamba => "TNM Mpamba",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "airtel-money" | "airtel" => Ok(PaymentMethod::AirtelMoney),
            "tnm-mpamba" | "mpamba" => Ok(PaymentMethod::TnmMpamba),
            "card" => Ok(PaymentMethod::Card),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

/// What the gateway is asked to collect.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub method: PaymentMethod,
    pub amount: Money,
    pub payer: String,
}

/// Proof of a completed charge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub reference: String,
    pub method: PaymentMethod,
    pub amount: Money,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentFailure {
    #[error("payment declined: {reason}")]
    Declined { reason: String },
    #[error("payment timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing_accepts_short_names() {
        assert_eq!("airtel".parse::<PaymentMethod>(), Ok(PaymentMethod::AirtelMoney));
        assert_eq!("TNM-Mpamba".parse::<PaymentMethod>(), Ok(PaymentMethod::TnmMpamba));
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_method_deserializes_short_names() {
        let methods: Vec<PaymentMethod> =
            serde_json::from_str(r#"["airtel", "mpamba", "airtel-money", "card"]"#).unwrap();
        assert_eq!(
            methods,
            vec![
                PaymentMethod::AirtelMoney,
                PaymentMethod::TnmMpamba,
                PaymentMethod::AirtelMoney,
                PaymentMethod::Card,
            ]
        );
    }

    #[test]
    fn test_failure_messages() {
        let failure = PaymentFailure::Timeout { after_ms: 500 };
        assert_eq!(failure.to_string(), "payment timed out after 500 ms");
    }
}
