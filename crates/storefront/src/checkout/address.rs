//! Address capture flow: a 4-step sequential wizard.
//!
//! Governorate, then city/district, then street, then optional details.
//! Every step except the final optional one requires an answer of at least
//! 3 characters. Completion produces an [`Address`] for the profile-update
//! call; the wizard itself never talks to the network.

use thiserror::Error;

use tahadu_core::Address;

/// Minimum answer length for the required steps, in characters.
const MIN_ANSWER_CHARS: usize = 3;

/// Validation failures of the wizard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The answer for a required step is too short.
    #[error("برجاء إدخال بيانات صحيحة")]
    AnswerTooShort,
}

/// The wizard's current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Governorate,
    City,
    Street,
    Details,
}

impl Step {
    /// Arabic prompt shown for this step.
    #[must_use]
    pub const fn prompt_ar(self) -> &'static str {
        match self {
            Self::Governorate => "في أي محافظة؟",
            Self::City => "المدينة أو الحي",
            Self::Street => "اسم الشارع",
            Self::Details => "تفاصيل إضافية",
        }
    }

    /// Whether an answer is required for this step.
    #[must_use]
    pub const fn required(self) -> bool {
        !matches!(self, Self::Details)
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Governorate => Some(Self::City),
            Self::City => Some(Self::Street),
            Self::Street => Some(Self::Details),
            Self::Details => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::Governorate => None,
            Self::City => Some(Self::Governorate),
            Self::Street => Some(Self::City),
            Self::Details => Some(Self::Street),
        }
    }
}

/// Outcome of answering a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Answer accepted; the wizard moved to the next step.
    Advanced(Step),
    /// Final step answered; here is the composed address.
    Completed(Address),
}

/// State of the address capture wizard.
#[derive(Debug, Clone)]
pub struct AddressWizard {
    step: Step,
    governorate: String,
    city: String,
    street: String,
    details: String,
}

impl Default for AddressWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressWizard {
    /// Start the wizard at the first step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: Step::Governorate,
            governorate: String::new(),
            city: String::new(),
            street: String::new(),
            details: String::new(),
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Answer the current step.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::AnswerTooShort`] when a required step gets
    /// fewer than 3 characters; the wizard stays on the same step.
    pub fn answer(&mut self, input: &str) -> Result<StepOutcome, AddressError> {
        let input = input.trim();
        if self.step.required() && input.chars().count() < MIN_ANSWER_CHARS {
            return Err(AddressError::AnswerTooShort);
        }

        match self.step {
            Step::Governorate => self.governorate = input.to_owned(),
            Step::City => self.city = input.to_owned(),
            Step::Street => self.street = input.to_owned(),
            Step::Details => self.details = input.to_owned(),
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(StepOutcome::Advanced(next))
            }
            None => Ok(StepOutcome::Completed(Address {
                governorate: self.governorate.clone(),
                city: self.city.clone(),
                street: self.street.clone(),
                details: if self.details.is_empty() {
                    None
                } else {
                    Some(self.details.clone())
                },
            })),
        }
    }

    /// Step back, keeping the answers typed so far.
    ///
    /// Returns the step now shown; `None` when already at the first step.
    pub fn back(&mut self) -> Option<Step> {
        let previous = self.step.previous()?;
        self.step = previous;
        Some(previous)
    }
}
