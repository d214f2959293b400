//! Shipping address type.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A shipping address, denormalized onto the order at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShippingAddress {
    /// Recipient full name.
    pub full_name: String,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Province or state.
    pub province: String,
    /// Contact phone number.
    pub phone: String,
    /// Country.
    pub country: String,
}

impl ShippingAddress {
    /// Check that every required field is filled.
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && !self.street.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.postal_code.trim().is_empty()
            && !self.phone.trim().is_empty()
            && !self.country.trim().is_empty()
    }

    /// Validate, naming the first missing field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        for (field, value) in [
            ("full_name", &self.full_name),
            ("street", &self.street),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("phone", &self.phone),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(CommerceError::ValidationError(format!(
                    "shipping address is missing {field}"
                )));
            }
        }
        Ok(())
    }
}
