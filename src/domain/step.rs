use serde::Serialize;
use std::fmt;

/// The four screens of the booking flow, in order.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    SelectService,
    Details,
    Payment,
    Confirmation,
}

impl WizardStep {
    /// Position shown in the progress indicator, 1 through 4.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::SelectService => 1,
            WizardStep::Details => 2,
            WizardStep::Payment => 3,
            WizardStep::Confirmation => 4,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::SelectService => "service selection",
            WizardStep::Details => "details",
            WizardStep::Payment => "payment",
            WizardStep::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}
