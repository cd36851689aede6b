//! The contact submission contract.
//!
//! The backend that receives submissions stays outside this crate; what
//! lives here is the contract a host must speak to it. [`ContactRequest`]
//! is the wire shape (camelCase JSON), [`ContactOutcome`] the four-way
//! response contract, and [`ContactForm`] the drafting state machine that
//! validates locally before anything leaves the page and reacts to each
//! outcome.
//!
//! Transport is injected through [`ContactTransport`], so the crate itself
//! carries no HTTP client. A host's transport typically maps its response
//! pair through [`ContactOutcome::from_status`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field length bounds enforced before a request leaves the page.
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;
pub const MIN_MESSAGE_LEN: usize = 10;
pub const MAX_MESSAGE_LEN: usize = 2000;
pub const MAX_EMAIL_LEN: usize = 254;

/// A contact submission as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    pub captcha_token: String,
}

impl ContactRequest {
    /// Check the request against the local field rules.
    ///
    /// All failures are collected, one [`FieldError`] per offending field,
    /// so a host can render them inline in a single pass.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.trim().chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name_len) {
            errors.push(FieldError::new(
                "name",
                format!("must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"),
            ));
        }

        let email = self.email.trim();
        if email.chars().count() > MAX_EMAIL_LEN || !email_shape_ok(email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }

        let message_len = self.message.trim().chars().count();
        if !(MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&message_len) {
            errors.push(FieldError::new(
                "message",
                format!("must be between {MIN_MESSAGE_LEN} and {MAX_MESSAGE_LEN} characters"),
            ));
        }

        if self.captcha_token.trim().is_empty() {
            errors.push(FieldError::new("captchaToken", "captcha verification required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Accepts `local@domain.tld` shapes. Not an RFC parser; the backend has
/// the final say.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// A validation failure scoped to one field.
///
/// `field` uses the wire casing so server-side 400 details and local
/// failures point at the same names.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The body of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Human-readable confirmation from the backend.
    pub message: String,
    /// Server-side receipt timestamp, RFC 3339.
    pub received_at: String,
}

/// The four-way response contract: accepted, rejected per field, captcha
/// verification failed, or a backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Accepted(SubmissionReceipt),
    Invalid { details: Vec<FieldError> },
    CaptchaRejected,
    Failed { status: u16 },
}

#[derive(Deserialize)]
struct InvalidBody {
    #[serde(default)]
    details: Vec<FieldError>,
}

impl ContactOutcome {
    /// Map an HTTP status and response body onto the contract.
    ///
    /// `200` parses the body as a [`SubmissionReceipt`], `400` as field
    /// details, `403` means the captcha token was rejected, and anything
    /// else is a backend failure. A `200` with an unreadable body is
    /// treated as a failure rather than a blind success.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            200 => match serde_json::from_str(body) {
                Ok(receipt) => Self::Accepted(receipt),
                Err(error) => {
                    tracing::warn!(
                        target: "sightline::contact",
                        %error,
                        "unreadable acceptance body"
                    );
                    Self::Failed { status }
                }
            },
            400 => {
                let details = serde_json::from_str::<InvalidBody>(body)
                    .map(|body| body.details)
                    .unwrap_or_default();
                Self::Invalid { details }
            }
            403 => Self::CaptchaRejected,
            status => Self::Failed { status },
        }
    }

    /// Convert into a `Result` for hosts that prefer `?` over matching.
    pub fn into_result(self) -> Result<SubmissionReceipt, ContactError> {
        match self {
            Self::Accepted(receipt) => Ok(receipt),
            Self::Invalid { details } => Err(ContactError::Validation { details }),
            Self::CaptchaRejected => Err(ContactError::CaptchaRejected),
            Self::Failed { status } => Err(ContactError::Failed { status }),
        }
    }
}

/// Failure side of [`ContactOutcome::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("validation failed on {} field(s)", details.len())]
    Validation { details: Vec<FieldError> },
    #[error("captcha verification failed")]
    CaptchaRejected,
    #[error("submission failed with status {status}")]
    Failed { status: u16 },
}

/// Delivers a validated request to the backend.
pub trait ContactTransport {
    fn submit(&self, request: &ContactRequest) -> ContactOutcome;
}

/// Drafting state for the contact form.
///
/// Holds the three text fields plus the captcha token handed over by the
/// host's captcha widget. [`submit`](Self::submit) validates locally
/// first; nothing reaches the transport until the draft passes. Outcomes
/// feed back into the draft: acceptance clears it, a rejected captcha
/// drops only the token so the host re-verifies before the next attempt.
/// No outcome triggers an automatic retry.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    captcha_token: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token produced by the host's captcha verification.
    pub fn set_captcha_token(&mut self, token: impl Into<String>) {
        self.captcha_token = Some(token.into());
    }

    /// The currently held captcha token, if any.
    pub fn captcha_token(&self) -> Option<&str> {
        self.captcha_token.as_deref()
    }

    /// Clear all fields and the held token.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.captcha_token = None;
    }

    fn request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            captcha_token: self.captcha_token.clone().unwrap_or_default(),
        }
    }

    /// Validate the draft and, if it passes, hand it to the transport.
    ///
    /// Local failures short-circuit with `Invalid` and never touch the
    /// transport.
    #[tracing::instrument(skip_all, target = "sightline::contact", level = "debug")]
    pub fn submit(&mut self, transport: &impl ContactTransport) -> ContactOutcome {
        let request = self.request();
        if let Err(details) = request.validate() {
            tracing::debug!(
                target: "sightline::contact",
                fields = details.len(),
                "draft failed local validation"
            );
            return ContactOutcome::Invalid { details };
        }

        let outcome = transport.submit(&request);
        match &outcome {
            ContactOutcome::Accepted(receipt) => {
                tracing::info!(
                    target: "sightline::contact",
                    received_at = %receipt.received_at,
                    "submission accepted"
                );
                self.reset();
            }
            ContactOutcome::Invalid { details } => {
                tracing::debug!(
                    target: "sightline::contact",
                    fields = details.len(),
                    "submission rejected by backend"
                );
            }
            ContactOutcome::CaptchaRejected => {
                tracing::warn!(target: "sightline::contact", "captcha token rejected");
                self.captcha_token = None;
            }
            ContactOutcome::Failed { status } => {
                tracing::warn!(target: "sightline::contact", status, "submission failed");
            }
        }
        outcome
    }
}
