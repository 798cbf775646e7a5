//! User identity and delivery address types.

use serde::{Deserialize, Serialize};

use super::phone::PhoneNumber;

/// The current shopper's identity as known to the remote service.
///
/// The phone number is the sole service-side key. Address fields arrive
/// piecemeal: a freshly logged-in user has none of them, and the checkout
/// gate treats a missing `city` as "address incomplete".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// The service-side identity key.
    pub phone_number: PhoneNumber,
    /// Governorate (`القاهرة`, `الجيزة`, ...). Wire name fixed by the service.
    #[serde(rename = "gov_name", default, skip_serializing_if = "Option::is_none")]
    pub governorate: Option<String>,
    /// City or district within the governorate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Street name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Free-form delivery hints (landmark, floor, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl UserProfile {
    /// Create a profile holding only the identity key.
    #[must_use]
    pub const fn new(phone_number: PhoneNumber) -> Self {
        Self {
            phone_number,
            governorate: None,
            city: None,
            street: None,
            details: None,
        }
    }

    /// Whether the delivery address is complete enough to ship to.
    ///
    /// A missing city means "address incomplete" regardless of the other
    /// fields.
    #[must_use]
    pub const fn has_address(&self) -> bool {
        self.city.is_some()
    }

    /// Replace the address fields, keeping the identity key.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.governorate = Some(address.governorate);
        self.city = Some(address.city);
        self.street = Some(address.street);
        self.details = address.details;
        self
    }
}

/// A complete delivery address as produced by the address capture flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub governorate: String,
    pub city: String,
    pub street: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("01098765432").unwrap()
    }

    #[test]
    fn fresh_profile_has_no_address() {
        assert!(!UserProfile::new(phone()).has_address());
    }

    #[test]
    fn with_address_completes_profile() {
        let profile = UserProfile::new(phone()).with_address(Address {
            governorate: "القاهرة".to_owned(),
            city: "مدينة نصر".to_owned(),
            street: "شارع عباس العقاد".to_owned(),
            details: None,
        });
        assert!(profile.has_address());
        assert_eq!(profile.governorate.as_deref(), Some("القاهرة"));
    }

    #[test]
    fn governorate_uses_service_wire_name() {
        let json = r#"{"phone_number":"01098765432","gov_name":"الجيزة","city":"الدقي"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.governorate.as_deref(), Some("الجيزة"));
        assert!(profile.has_address());

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["gov_name"], "الجيزة");
    }
}
