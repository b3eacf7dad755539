// ── Simulated contact form ──
//
// Editing -> Submitting -> Submitted -> (reset) -> Editing.
// Nothing is sent anywhere: submission waits a fixed delay and succeeds.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::info;

use crate::error::CoreError;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

pub const PHONE: &str = "970-777-7777";
pub const EMAIL: &str = "rides@sunshinerides.co";

pub const SERVICE_AREAS: [&str; 6] = [
    "Grand Junction",
    "Montrose",
    "Telluride",
    "Vail",
    "Denver",
    "Aspen",
];

/// `(days, hours)` pairs.
pub const BUSINESS_HOURS: [(&str, &str); 4] = [
    ("Monday - Friday", "6:00 AM - 10:00 PM"),
    ("Saturday", "7:00 AM - 9:00 PM"),
    ("Sunday", "8:00 AM - 8:00 PM"),
    ("Medical Transport", "24/7 Available"),
];

pub fn phone_link() -> String {
    format!("tel:{PHONE}")
}

pub fn email_link() -> String {
    format!("mailto:{EMAIL}")
}

// ── Service types ───────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ServiceType {
    Local,
    Medical,
    Airport,
    LongDistance,
    Wheelchair,
    Medicaid,
    Other,
}

impl ServiceType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local Rides",
            Self::Medical => "Medical Transport",
            Self::Airport => "Airport Shuttle",
            Self::LongDistance => "Long-Distance Travel",
            Self::Wheelchair => "Wheelchair Accessible",
            Self::Medicaid => "Medicaid Transport",
            Self::Other => "Other / General Inquiry",
        }
    }
}

// ── Request ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: Option<ServiceType>,
    pub message: String,
}

impl ContactRequest {
    /// Name, phone, email and message are required. Email must look like
    /// `local@domain`. Service is optional.
    pub fn validate(&self) -> Result<(), CoreError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if !missing.is_empty() {
            return Err(CoreError::validation(format!(
                "required field(s) missing: {}",
                missing.join(", ")
            )));
        }

        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(CoreError::validation(format!(
                "'{}' is not an email address",
                self.email.trim()
            ))),
        }
    }
}

// ── Form state machine ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub request: ContactRequest,
    phase: FormPhase,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            request: ContactRequest::default(),
            phase: FormPhase::Editing,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Validate and move to `Submitting`. Only valid while editing.
    pub fn begin_submit(&mut self) -> Result<(), CoreError> {
        if self.phase != FormPhase::Editing {
            return Err(CoreError::validation(format!(
                "cannot submit while {}",
                self.phase
            )));
        }
        self.request.validate()?;
        self.phase = FormPhase::Submitting;
        Ok(())
    }

    /// Finish a submission started with [`begin_submit`](Self::begin_submit).
    pub fn complete_submit(&mut self) {
        if self.phase == FormPhase::Submitting {
            info!(
                name = %self.request.name,
                service = ?self.request.service,
                "contact request submitted"
            );
            self.phase = FormPhase::Submitted;
        }
    }

    /// Validate, wait `delay`, then land in `Submitted`. Never fails once
    /// validation passes.
    pub async fn submit(&mut self, delay: Duration) -> Result<(), CoreError> {
        self.begin_submit()?;
        tokio::time::sleep(delay).await;
        self.complete_submit();
        Ok(())
    }

    /// "Send another message": back to an empty form.
    pub fn reset(&mut self) {
        self.request = ContactRequest::default();
        self.phase = FormPhase::Editing;
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.request = ContactRequest {
            name: "John Doe".into(),
            phone: "(970) 555-0123".into(),
            email: "john@example.com".into(),
            service: Some(ServiceType::Medical),
            message: "Need a ride to my appointment".into(),
        };
        form
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut form = ContactForm::new();
        form.request.name = "Jane".into();
        let err = form.begin_submit().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("phone"));
        assert!(msg.contains("email"));
        assert!(msg.contains("message"));
        assert!(!msg.contains("name"));
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn blank_is_missing() {
        let mut form = filled();
        form.request.message = "   ".into();
        assert!(form.request.validate().is_err());
    }

    #[test]
    fn service_is_optional() {
        let mut form = filled();
        form.request.service = None;
        assert!(form.request.validate().is_ok());
    }

    #[test]
    fn email_needs_an_at_sign() {
        let mut form = filled();
        form.request.email = "john.example.com".into();
        assert!(form.request.validate().is_err());
        form.request.email = "@example.com".into();
        assert!(form.request.validate().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_waits_then_lands_in_submitted() {
        let mut form = filled();
        let started = tokio::time::Instant::now();
        form.submit(DEFAULT_SUBMIT_DELAY).await.unwrap();
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert!(started.elapsed() >= DEFAULT_SUBMIT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_clears_fields() {
        let mut form = filled();
        form.submit(DEFAULT_SUBMIT_DELAY).await.unwrap();
        form.reset();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.request, ContactRequest::default());
    }

    #[test]
    fn split_submission_and_double_submit() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert!(form.begin_submit().is_err());
        form.complete_submit();
        assert_eq!(form.phase(), FormPhase::Submitted);
    }

    #[test]
    fn links_and_labels() {
        assert_eq!(phone_link(), "tel:970-777-7777");
        assert_eq!(email_link(), "mailto:rides@sunshinerides.co");
        assert_eq!(ServiceType::LongDistance.to_string(), "long-distance");
        assert_eq!(ServiceType::Wheelchair.label(), "Wheelchair Accessible");
    }
}
