//! Contact form validation. Submissions are only checked locally; nothing is
//! stored or sent anywhere.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::Countdown;

/// How long the confirmation stays up after a successful submission
pub const SUCCESS_NOTICE_SECONDS: f32 = 5.0;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9\-+() ]{10,}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Please fill out all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

/// Raw field contents as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

/// A submission that passed every check, with whitespace trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Presence first, then email format, then phone format
    pub fn validate(&self) -> Result<ValidContact, ContactError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if [name, phone, email, message].iter().any(|field| field.is_empty()) {
            return Err(ContactError::MissingFields);
        }
        if !EMAIL.is_match(email) {
            return Err(ContactError::InvalidEmail);
        }
        if !PHONE.is_match(phone) {
            return Err(ContactError::InvalidPhone);
        }

        Ok(ValidContact {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    /// Validates; on success clears the form and raises the notice.
    /// A rejected form keeps its contents.
    pub fn submit(&mut self, notice: &mut SuccessNotice) -> Result<ValidContact, ContactError> {
        let contact = self.validate()?;
        *self = Self::default();
        notice.show();
        log::info!("contact form accepted for {}", contact.email);
        Ok(contact)
    }
}

/// Confirmation banner that hides itself after a fixed delay
#[derive(Debug, Clone, Copy)]
pub struct SuccessNotice {
    countdown: Countdown,
}

impl SuccessNotice {
    pub fn new() -> Self {
        Self {
            countdown: Countdown::new(SUCCESS_NOTICE_SECONDS),
        }
    }

    pub fn show(&mut self) {
        self.countdown.start();
    }

    /// Advances by `delta` seconds; returns true when the notice just hid
    pub fn tick(&mut self, delta: f32) -> bool {
        self.countdown.tick(delta)
    }

    pub fn is_visible(&self) -> bool {
        self.countdown.is_active()
    }
}

impl Default for SuccessNotice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, phone: &str) -> ContactForm {
        ContactForm::new("Dana", phone, email, "Need a quote")
    }

    #[test]
    fn email_needs_a_dot_after_the_at() {
        assert!(form("a@b.com", "123-456-7890").validate().is_ok());
        assert_eq!(form("a@b", "123-456-7890").validate(), Err(ContactError::InvalidEmail));
        assert_eq!(form("a b@c.com", "123-456-7890").validate(), Err(ContactError::InvalidEmail));
        assert_eq!(form("a@@b.com", "123-456-7890").validate(), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn phone_needs_ten_allowed_characters() {
        assert!(form("a@b.com", "(555) 123-4567").validate().is_ok());
        assert!(form("a@b.com", "+1 555 123 4567").validate().is_ok());
        assert_eq!(form("a@b.com", "12345").validate(), Err(ContactError::InvalidPhone));
        assert_eq!(form("a@b.com", "555-CALL-NOW").validate(), Err(ContactError::InvalidPhone));
    }

    #[test]
    fn error_messages_match_page_copy() {
        assert_eq!(ContactError::MissingFields.to_string(), "Please fill out all fields.");
        assert_eq!(ContactError::InvalidEmail.to_string(), "Please enter a valid email address.");
        assert_eq!(ContactError::InvalidPhone.to_string(), "Please enter a valid phone number.");
    }

    #[test]
    fn notice_hides_after_five_seconds() {
        let mut notice = SuccessNotice::new();
        assert!(!notice.is_visible());

        notice.show();
        assert!(notice.is_visible());
        assert!(!notice.tick(4.0));
        assert!(notice.is_visible());
        assert!(notice.tick(1.0));
        assert!(!notice.is_visible());
    }
}
