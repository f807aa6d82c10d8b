//! Two-step registration: send a verification code, then verify and register.
//!
//! The flow is an explicit state machine. The verify-and-register request can
//! only be built from a [`VerifiedDraft`], and a `VerifiedDraft` can only be
//! obtained from a flow that has sent a code to the draft's email and whose
//! draft has accepted the terms.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a registration step is refused before any request is made.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// No email entered.
    #[error("Please enter your email first.")]
    MissingEmail,
    /// No name entered.
    #[error("Please enter your name first.")]
    MissingName,
    /// Terms and conditions not accepted; the terms modal opens instead.
    #[error("Please accept the Terms and Conditions.")]
    TermsNotAccepted,
    /// No verification code has been sent to the draft's email.
    #[error("Please send a verification code first.")]
    CodeNotSent,
}

/// Registration form contents, built up field by field.
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub verification_code: String,
    pub accepted_terms: bool,
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            verification_code: String::new(),
            accepted_terms: false,
        }
    }
}

/// A validated send-code request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

/// A draft cleared for the verify-and-register call.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedDraft<'a> {
    draft: &'a RegistrationDraft,
}

impl<'a> VerifiedDraft<'a> {
    /// The draft being submitted.
    #[must_use]
    pub const fn draft(&self) -> &'a RegistrationDraft {
        self.draft
    }
}

/// Where a registration stands.
///
/// ```text
/// Unverified --code sent--> CodeSent --registered--> Registered
///                  ^            |
///                  +--resend----+
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegistrationFlow {
    /// No code has been sent yet.
    #[default]
    Unverified,
    /// A code was sent to `email`.
    CodeSent { email: String },
    /// Registration completed; the draft has been discarded.
    Registered,
}

impl RegistrationFlow {
    /// Validate a send-code request.
    ///
    /// Email is checked before name. Repeated sends are allowed and are not
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingEmail`] or [`DraftError::MissingName`].
    pub fn request_code(draft: &RegistrationDraft) -> Result<CodeRequest<'_>, DraftError> {
        if draft.email.is_empty() {
            return Err(DraftError::MissingEmail);
        }
        if draft.name.is_empty() {
            return Err(DraftError::MissingName);
        }
        Ok(CodeRequest {
            email: &draft.email,
            name: &draft.name,
        })
    }

    /// Transition after the marketplace accepted a send-code request.
    #[must_use]
    pub fn code_sent(self, email: impl Into<String>) -> Self {
        Self::CodeSent {
            email: email.into(),
        }
    }

    /// Check that `draft` may be submitted for verification.
    ///
    /// Terms are checked first so the terms modal always wins.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::TermsNotAccepted`] when the terms are not
    /// accepted, and [`DraftError::CodeNotSent`] when no code went to the
    /// draft's email.
    pub fn verify<'a>(&self, draft: &'a RegistrationDraft) -> Result<VerifiedDraft<'a>, DraftError> {
        if !draft.accepted_terms {
            return Err(DraftError::TermsNotAccepted);
        }
        match self {
            Self::CodeSent { email } if *email == draft.email => Ok(VerifiedDraft { draft }),
            _ => Err(DraftError::CodeNotSent),
        }
    }

    /// Transition after the marketplace completed the registration.
    #[must_use]
    pub fn registered(self) -> Self {
        Self::Registered
    }

    /// Returns `true` once a code has been sent.
    #[must_use]
    pub const fn is_code_sent(&self) -> bool {
        matches!(self, Self::CodeSent { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn draft() -> RegistrationDraft {
        RegistrationDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: SecretString::from("Abc12345!xyz"),
            verification_code: "123456".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn test_request_code_requires_email_first() {
        let empty = RegistrationDraft::default();
        assert_eq!(
            RegistrationFlow::request_code(&empty),
            Err(DraftError::MissingEmail)
        );
    }

    #[test]
    fn test_request_code_requires_name() {
        let mut d = draft();
        d.name.clear();
        assert_eq!(
            RegistrationFlow::request_code(&d),
            Err(DraftError::MissingName)
        );
    }

    #[test]
    fn test_request_code_ok() {
        let d = draft();
        let request = RegistrationFlow::request_code(&d).unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.name, "Ada");
    }

    #[test]
    fn test_verify_requires_terms_before_code() {
        let mut d = draft();
        d.accepted_terms = false;
        let flow = RegistrationFlow::Unverified;
        assert_eq!(
            flow.verify(&d).unwrap_err(),
            DraftError::TermsNotAccepted
        );
    }

    #[test]
    fn test_verify_requires_code_sent() {
        let d = draft();
        assert_eq!(
            RegistrationFlow::Unverified.verify(&d).unwrap_err(),
            DraftError::CodeNotSent
        );
    }

    #[test]
    fn test_verify_requires_matching_email() {
        let d = draft();
        let flow = RegistrationFlow::Unverified.code_sent("other@example.com");
        assert_eq!(flow.verify(&d).unwrap_err(), DraftError::CodeNotSent);
    }

    #[test]
    fn test_full_flow() {
        let d = draft();
        let flow = RegistrationFlow::default();
        assert!(!flow.is_code_sent());

        let request = RegistrationFlow::request_code(&d).unwrap();
        let flow = flow.code_sent(request.email);
        assert!(flow.is_code_sent());

        let verified = flow.verify(&d).unwrap();
        assert_eq!(verified.draft().password.expose_secret(), "Abc12345!xyz");

        let flow = flow.registered();
        assert_eq!(flow, RegistrationFlow::Registered);
        assert_eq!(flow.verify(&d).unwrap_err(), DraftError::CodeNotSent);
    }

    #[test]
    fn test_resend_updates_email() {
        let flow = RegistrationFlow::Unverified
            .code_sent("old@example.com")
            .code_sent("ada@example.com");
        assert!(flow.verify(&draft()).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DraftError::MissingEmail.to_string(),
            "Please enter your email first."
        );
        assert_eq!(
            DraftError::MissingName.to_string(),
            "Please enter your name first."
        );
    }

    #[test]
    fn test_flow_serde_roundtrip() {
        let flow = RegistrationFlow::CodeSent {
            email: "ada@example.com".to_string(),
        };
        let json = serde_json::to_string(&flow).unwrap();
        assert_eq!(json, r#"{"state":"code_sent","email":"ada@example.com"}"#);
        let parsed: RegistrationFlow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, flow);
    }
}
