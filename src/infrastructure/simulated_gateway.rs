use crate::domain::payment::{Charge, PaymentFailure, PaymentReceipt};
use crate::domain::ports::PaymentGateway;
use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REFERENCE_LEN: usize = 9;

/// How the simulator answers once its delay has elapsed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedOutcome {
    #[default]
    Approve,
    Decline,
    Timeout,
}

/// Stand-in for a mobile money / card gateway.
///
/// Every charge waits `delay` and then resolves with the configured outcome.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedGateway {
    pub fn new(delay: Duration, outcome: SimulatedOutcome) -> Self {
        Self { delay, outcome }
    }

    pub fn approving(delay: Duration) -> Self {
        Self::new(delay, SimulatedOutcome::Approve)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, charge: &Charge) -> Result<PaymentReceipt, PaymentFailure> {
        tracing::debug!(
            method = %charge.method,
            amount = %charge.amount,
            payer = %charge.payer,
            "simulating charge"
        );
        tokio::time::sleep(self.delay).await;

        match self.outcome {
            SimulatedOutcome::Approve => Ok(PaymentReceipt {
                reference: generate_reference(),
                method: charge.method,
                amount: charge.amount,
            }),
            SimulatedOutcome::Decline => Err(PaymentFailure::Declined {
                reason: format!(
                    "{} declined the transaction for {}",
                    charge.method, charge.payer
                ),
            }),
            SimulatedOutcome::Timeout => Err(PaymentFailure::Timeout {
                after_ms: self.delay.as_millis() as u64,
            }),
        }
    }
}

/// Nine uppercase alphanumeric characters, e.g. `K7Q2ZP0XA`.
pub fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;
    use crate::domain::pricing::Money;
    use rust_decimal_macros::dec;

    fn charge() -> Charge {
        Charge {
            method: PaymentMethod::TnmMpamba,
            amount: Money::new(dec!(75000)),
            payer: "Ada".to_string(),
        }
    }

    #[test]
    fn test_reference_shape() {
        let reference = generate_reference();
        assert_eq!(reference.len(), REFERENCE_LEN);
        assert!(
            reference
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[tokio::test]
    async fn test_approve_returns_receipt() {
        let gateway = SimulatedGateway::approving(Duration::from_millis(5));
        let receipt = gateway.charge(&charge()).await.unwrap();
        assert_eq!(receipt.method, PaymentMethod::TnmMpamba);
        assert_eq!(receipt.amount, Money::new(dec!(75000)));
    }

    #[tokio::test]
    async fn test_decline_and_timeout_outcomes() {
        let declining = SimulatedGateway::new(Duration::ZERO, SimulatedOutcome::Decline);
        assert_eq!(
            declining.charge(&charge()).await,
            Err(PaymentFailure::Declined {
                reason: "TNM Mpamba declined the transaction for Ada".to_string()
            })
        );

        let stalling = SimulatedGateway::new(Duration::from_millis(3), SimulatedOutcome::Timeout);
        assert_eq!(
            stalling.charge(&charge()).await,
            Err(PaymentFailure::Timeout { after_ms: 3 })
        );
    }
}
