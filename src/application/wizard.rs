use crate::application::desk::BookingDesk;
use crate::domain::booking::{BookingDraft, BookingRecord, BookingRequest, Field};
use crate::domain::payment::{Charge, PaymentFailure, PaymentMethod};
use crate::domain::ports::PaymentGatewayRef;
use crate::domain::pricing::Money;
pub use crate::domain::step::WizardStep;
use crate::domain::validation::{self, ValidationErrors};
use crate::error::{BookingError, Result};
use std::time::Duration;

pub const DEFAULT_PAYMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Signal handed back to the navigation layer when the client walks away.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WizardCancelled;

/// Holds the processing flag up for as long as a charge is outstanding.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// One client's pass through the booking flow.
///
/// The wizard owns its draft exclusively. Every transition checks the current
/// step first and returns [`BookingError::InvalidTransition`] without touching
/// state when called out of order. A booking record only exists once the
/// details validated and the deposit was charged.
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    errors: ValidationErrors,
    payment_error: Option<PaymentFailure>,
    processing: bool,
    confirmation: Option<BookingRecord>,
    desk: BookingDesk,
    gateway: PaymentGatewayRef,
    payment_timeout: Duration,
}

impl BookingWizard {
    pub fn new(desk: BookingDesk, gateway: PaymentGatewayRef) -> Self {
        Self {
            step: WizardStep::SelectService,
            draft: BookingDraft::default(),
            errors: ValidationErrors::default(),
            payment_error: None,
            processing: false,
            confirmation: None,
            desk,
            gateway,
            payment_timeout: DEFAULT_PAYMENT_TIMEOUT,
        }
    }

    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout = timeout;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn payment_error(&self) -> Option<&PaymentFailure> {
        self.payment_error.as_ref()
    }

    /// True while a charge is in flight; navigation is refused meanwhile.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn confirmation(&self) -> Option<&BookingRecord> {
        self.confirmation.as_ref()
    }

    /// Deposit due for the current selection, zero before a service is chosen.
    pub fn deposit(&self) -> Money {
        self.draft
            .service
            .as_ref()
            .map(|s| s.deposit_for(self.draft.package.as_deref()))
            .unwrap_or(Money::ZERO)
    }

    fn require(&self, step: WizardStep, action: &'static str) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(BookingError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    /// Pre-fills the draft with a service chosen elsewhere (e.g. a catalog
    /// tile) without leaving the first screen.
    pub async fn preselect(&mut self, service_id: &str) -> Result<()> {
        self.require(WizardStep::SelectService, "pre-select a service")?;
        let service = self.desk.service(service_id).await?;
        self.draft.service = Some(service);
        Ok(())
    }

    /// Attaches the service and moves straight on to the details form.
    pub async fn select_service(&mut self, service_id: &str) -> Result<WizardStep> {
        self.require(WizardStep::SelectService, "select a service")?;
        let service = self.desk.service(service_id).await?;

        let package_still_offered = self
            .draft
            .package
            .as_deref()
            .is_some_and(|name| service.package(name).is_some());
        if !package_still_offered {
            self.draft.package = None;
        }

        tracing::debug!(service = %service.id, "service selected");
        self.draft.service = Some(service);
        self.step = WizardStep::Details;
        Ok(self.step)
    }

    pub fn select_package(&mut self, name: &str) -> Result<()> {
        self.require(WizardStep::Details, "choose a package")?;
        let service = self
            .draft
            .service
            .as_ref()
            .ok_or(BookingError::InvalidTransition {
                step: self.step,
                action: "choose a package",
            })?;
        if service.package(name).is_none() {
            return Err(BookingError::PackageNotFound {
                service: service.id.clone(),
                package: name.to_string(),
            });
        }
        self.draft.package = Some(name.to_string());
        Ok(())
    }

    /// Updates one form field and clears whatever error it was showing.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        self.require(WizardStep::Details, "edit booking details")?;
        self.draft.set_field(field, value.into());
        self.errors.clear(field);
        Ok(())
    }

    /// Validates the details form; moves to payment only when nothing failed.
    pub fn submit_details(&mut self) -> Result<WizardStep> {
        self.require(WizardStep::Details, "submit booking details")?;
        self.errors = validation::validate(&self.draft);
        if self.errors.is_empty() {
            self.step = WizardStep::Payment;
        } else {
            tracing::debug!(errors = self.errors.len(), "booking details rejected");
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<WizardStep> {
        match self.step {
            WizardStep::Details => self.step = WizardStep::SelectService,
            WizardStep::Payment if !self.processing => {
                self.payment_error = None;
                self.step = WizardStep::Details;
            }
            step => {
                return Err(BookingError::InvalidTransition {
                    step,
                    action: "go back",
                });
            }
        }
        Ok(self.step)
    }

    pub fn choose_payment_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.require(WizardStep::Payment, "choose a payment method")?;
        self.draft.payment_method = Some(method);
        self.payment_error = None;
        Ok(())
    }

    /// Charges the deposit and hands the booking to the desk.
    ///
    /// A declined or timed-out charge leaves the wizard on the payment step
    /// with the failure recorded in [`payment_error`](Self::payment_error).
    /// Dropping the returned future mid-charge releases the processing flag.
    pub async fn pay(&mut self) -> Result<&BookingRecord> {
        self.require(WizardStep::Payment, "pay")?;
        let method = self
            .draft
            .payment_method
            .ok_or(BookingError::MissingPaymentMethod)?;

        // The slot may have slipped into the past while the client lingered here.
        let errors = validation::validate(&self.draft);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(BookingError::ValidationError(errors));
        }

        let mut request = self.build_request(method)?;
        let charge = Charge {
            method,
            amount: request.amount,
            payer: request.client_name.clone(),
        };

        self.payment_error = None;
        let in_flight = InFlight::start(&mut self.processing);
        let outcome = match tokio::time::timeout(self.payment_timeout, self.gateway.charge(&charge))
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(PaymentFailure::Timeout {
                after_ms: self.payment_timeout.as_millis() as u64,
            }),
        };

        let receipt = match outcome {
            Ok(receipt) => receipt,
            Err(failure) => {
                drop(in_flight);
                tracing::warn!(%method, error = %failure, "deposit charge failed");
                self.payment_error = Some(failure.clone());
                return Err(failure.into());
            }
        };

        request.reference = receipt.reference.clone();
        request.amount = receipt.amount;
        let placed = self.desk.place(request).await;
        drop(in_flight);

        let record = match placed {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(reference = %receipt.reference, error = %e, "charged booking was not stored");
                return Err(e);
            }
        };

        self.step = WizardStep::Confirmation;
        let record: &BookingRecord = self.confirmation.insert(record);
        Ok(record)
    }

    /// Request for the current draft. The reference is filled in from the
    /// gateway receipt once the charge succeeds.
    fn build_request(&self, payment_method: PaymentMethod) -> Result<BookingRequest> {
        let service = self
            .draft
            .service
            .as_ref()
            .ok_or(BookingError::InvalidTransition {
                step: self.step,
                action: "pay",
            })?;
        let date = validation::parse_date(&self.draft.date)
            .ok_or_else(|| BookingError::ValidationError(self.errors.clone()))?;
        let time = validation::parse_time(&self.draft.time)
            .ok_or_else(|| BookingError::ValidationError(self.errors.clone()))?;

        Ok(BookingRequest {
            client_name: self.draft.name.trim().to_string(),
            email: self.draft.email.trim().to_string(),
            phone: self.draft.phone.trim().to_string(),
            service_id: service.id.clone(),
            package: self.draft.package.clone(),
            date,
            time,
            notes: self.draft.notes.trim().to_string(),
            payment_method,
            amount: self.deposit(),
            reference: String::new(),
        })
    }

    /// Abandons the booking. The draft is dropped with the wizard.
    pub fn cancel(self) -> WizardCancelled {
        tracing::debug!(step = %self.step, "booking wizard cancelled");
        WizardCancelled
    }
}
