//! Checkout form validation.
//!
//! The checkout is a mock: no payment is taken. Validation still mirrors the
//! form so the flow behaves like a real one. Card details are only checked
//! for presence and never kept beyond the last four digits.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::types::{Email, EmailError};

/// Raw checkout form as submitted by the client.
///
/// Card number, expiry, and CVV are held as [`SecretString`] and print as
/// `[REDACTED]`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default = "blank_secret")]
    pub card_number: SecretString,
    #[serde(default)]
    pub card_name: String,
    #[serde(default = "blank_secret")]
    pub expiry_date: SecretString,
    #[serde(default = "blank_secret")]
    pub cvv: SecretString,
}

fn blank_secret() -> SecretString {
    SecretString::from(String::new())
}

/// A form field, used to report which one failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    Name,
    Email,
    Phone,
    Address,
    City,
    ZipCode,
    CardNumber,
    CardName,
    ExpiryDate,
    Cvv,
}

impl CheckoutField {
    /// Form field name as submitted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::ZipCode => "zipCode",
            Self::CardNumber => "cardNumber",
            Self::CardName => "cardName",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }
}

impl std::fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout form validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(CheckoutField),
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
}

/// The parts of a checkout form worth keeping after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    /// Last four digits of the card number, for the receipt.
    pub card_last_four: String,
}

impl CheckoutDetails {
    /// Check that every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first missing field in form order, or an email error.
    pub fn validate(&self) -> Result<ValidatedCheckout, ValidationError> {
        let fields = [
            (CheckoutField::Name, self.name.as_str()),
            (CheckoutField::Email, self.email.as_str()),
            (CheckoutField::Phone, self.phone.as_str()),
            (CheckoutField::Address, self.address.as_str()),
            (CheckoutField::City, self.city.as_str()),
            (CheckoutField::ZipCode, self.zip_code.as_str()),
            (CheckoutField::CardNumber, self.card_number.expose_secret()),
            (CheckoutField::CardName, self.card_name.as_str()),
            (CheckoutField::ExpiryDate, self.expiry_date.expose_secret()),
            (CheckoutField::Cvv, self.cvv.expose_secret()),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::Missing(*field));
        }

        let email = Email::parse(&self.email)?;

        let digits: Vec<char> = self
            .card_number
            .expose_secret()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let card_last_four = digits
            .iter()
            .skip(digits.len().saturating_sub(4))
            .collect::<String>();

        Ok(ValidatedCheckout {
            name: self.name.trim().to_owned(),
            email,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            zip_code: self.zip_code.trim().to_owned(),
            card_last_four,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> CheckoutDetails {
        CheckoutDetails {
            name: "John Doe".to_owned(),
            email: "john@example.com".to_owned(),
            phone: "(123) 456-7890".to_owned(),
            address: "123 Main St".to_owned(),
            city: "New York".to_owned(),
            zip_code: "10001".to_owned(),
            card_number: SecretString::from("4242 4242 4242 4242"),
            card_name: "John Doe".to_owned(),
            expiry_date: SecretString::from("12/30"),
            cvv: SecretString::from("123"),
        }
    }

    #[test]
    fn test_valid_form() {
        let checkout = filled().validate().unwrap();
        assert_eq!(checkout.email.as_str(), "john@example.com");
        assert_eq!(checkout.card_last_four, "4242");
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let details = CheckoutDetails {
            city: "  ".to_owned(),
            cvv: SecretString::from(""),
            ..filled()
        };
        assert_eq!(
            details.validate(),
            Err(ValidationError::Missing(CheckoutField::City))
        );
    }

    #[test]
    fn test_bad_email() {
        let details = CheckoutDetails {
            email: "john.example.com".to_owned(),
            ..filled()
        };
        assert_eq!(
            details.validate(),
            Err(ValidationError::Email(EmailError::InvalidAtSymbol))
        );
    }

    #[test]
    fn test_short_card_number_keeps_what_it_has() {
        let details = CheckoutDetails {
            card_number: SecretString::from("42"),
            ..filled()
        };
        assert_eq!(details.validate().unwrap().card_last_four, "42");
    }

    #[test]
    fn test_debug_redacts_card_data() {
        let output = format!("{:?}", filled());
        assert!(output.contains("John Doe"));
        assert!(!output.contains("4242"));
        assert!(!output.contains("12/30"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn test_blank_card_secret_is_missing() {
        let details = CheckoutDetails {
            expiry_date: SecretString::from(" "),
            ..filled()
        };
        assert_eq!(
            details.validate(),
            Err(ValidationError::Missing(CheckoutField::ExpiryDate))
        );
    }

    #[test]
    fn test_deserializes_camel_case_form() {
        let details: CheckoutDetails =
            serde_json::from_str(r#"{"name":"A","zipCode":"10001","cardNumber":"1"}"#).unwrap();
        assert_eq!(details.zip_code, "10001");
        assert_eq!(details.card_number.expose_secret(), "1");
        assert!(details.cvv.expose_secret().is_empty());
        assert!(details.email.is_empty());
    }
}
