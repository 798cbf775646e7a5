//! Phone capture flow.
//!
//! A single-field sheet: collects a candidate phone number, validates it
//! client-side and only then lets the submit action reach the login
//! endpoint. A rejected number never causes a remote call.

use tahadu_core::{PhoneError, PhoneNumber};

/// State of the phone capture sheet.
#[derive(Debug, Clone, Default)]
pub struct PhoneCapture {
    input: String,
    saved: Option<PhoneNumber>,
}

impl PhoneCapture {
    /// Open the sheet, pre-filled with the saved number if there is one.
    #[must_use]
    pub fn new(saved: Option<&PhoneNumber>) -> Self {
        Self {
            input: saved.map(|phone| phone.as_str().to_owned()).unwrap_or_default(),
            saved: saved.cloned(),
        }
    }

    /// The current input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Live validity indicator for the input field.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        PhoneNumber::parse(&self.input).is_ok()
    }

    /// Validate the input for submission.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; nothing was sent anywhere.
    pub fn submit(&self) -> Result<PhoneNumber, PhoneError> {
        PhoneNumber::parse(&self.input)
    }

    /// Reset the input back to the saved number, as when the sheet closes
    /// without submitting.
    pub fn reset(&mut self) {
        self.input = self
            .saved
            .as_ref()
            .map(|phone| phone.as_str().to_owned())
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefills_saved_number() {
        let saved = PhoneNumber::parse("01098765432").unwrap();
        let capture = PhoneCapture::new(Some(&saved));
        assert_eq!(capture.input(), "01098765432");
        assert!(capture.is_valid());
    }

    #[test]
    fn invalid_input_never_submits() {
        let mut capture = PhoneCapture::new(None);
        capture.set_input("0109123456"); // 10 digits
        assert!(!capture.is_valid());
        assert!(capture.submit().is_err());
    }

    #[test]
    fn reset_restores_saved_number() {
        let saved = PhoneNumber::parse("01198765432").unwrap();
        let mut capture = PhoneCapture::new(Some(&saved));
        capture.set_input("garbage");
        capture.reset();
        assert_eq!(capture.input(), "01198765432");
    }
}
