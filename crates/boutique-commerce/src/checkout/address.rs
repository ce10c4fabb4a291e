//! Shipping address types.

use serde::{Deserialize, Serialize};

/// A postal address as entered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address.
    pub street: String,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal/ZIP code.
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// Phone number.
    pub phone: String,
}

impl Address {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.clone()];
        if let Some(ref apartment) = self.apartment {
            parts.push(apartment.clone());
        }
        parts.push(self.city.clone());
        parts.push(format!("{} {}", self.state, self.zip_code));
        parts.push(self.country.clone());
        parts.join(", ")
    }

    /// First required field left blank, by its form name.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("country", &self.country),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// Check if every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }
}
