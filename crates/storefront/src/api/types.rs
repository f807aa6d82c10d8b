//! Request and response bodies for the marketplace REST API.

use serde::{Deserialize, Serialize};

/// `POST /api/login-user/`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /api/send-verification-email/`
#[derive(Debug, Serialize)]
pub struct SendVerificationRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

/// `POST /api/verify-code-and-register/`
#[derive(Debug, Serialize)]
pub struct VerifyAndRegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub code: &'a str,
    #[serde(rename = "acceptedTerms")]
    pub accepted_terms: bool,
    pub timezone: &'a str,
}

/// `POST /api/create_store/`
#[derive(Debug, Serialize)]
pub struct CreateStoreRequest<'a> {
    pub store_name: &'a str,
}

/// `GET /api/check_store/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreStatus {
    #[serde(default)]
    pub has_store: bool,
    #[serde(default)]
    pub store_name: Option<String>,
}

/// Body of a non-2xx response.
///
/// Anything that does not carry a string `error` field counts as no message.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract the `error` message from a raw response body.
    pub(crate) fn message(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_field_names() {
        let request = VerifyAndRegisterRequest {
            name: "Ada",
            email: "ada@example.com",
            password: "pw",
            code: "123456",
            accepted_terms: true,
            timezone: "Europe/London",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["acceptedTerms"], serde_json::Value::Bool(true));
        assert_eq!(json["code"], "123456");
        assert_eq!(json["timezone"], "Europe/London");
        assert!(json.get("accepted_terms").is_none());
    }

    #[test]
    fn test_store_status_defaults() {
        let status: StoreStatus = serde_json::from_str("{}").unwrap();
        assert!(!status.has_store);
        assert!(status.store_name.is_none());

        let status: StoreStatus =
            serde_json::from_str(r#"{"has_store":true,"store_name":"Acme"}"#).unwrap();
        assert!(status.has_store);
        assert_eq!(status.store_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message(r#"{"error":"Invalid code"}"#).as_deref(),
            Some("Invalid code")
        );
        assert_eq!(ErrorBody::message(r#"{"detail":"nope"}"#), None);
        assert_eq!(ErrorBody::message(r#"{"error":{"code":1}}"#), None);
        assert_eq!(ErrorBody::message(r#"{"error":""}"#), None);
        assert_eq!(ErrorBody::message("<html>502</html>"), None);
    }
}
