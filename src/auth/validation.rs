//! Request validation for signup and signin bodies.
//!
//! Runs before the credential service is invoked and reports every failing
//! field at once.

use serde::Serialize;
use thiserror::Error;

use crate::auth::models::{AuthRequest, Credentials};

/// Maximum length of an email address (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Upper bound on password size, in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

/// All field errors for one request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request validation failed")]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a raw auth body and turn it into [`Credentials`].
///
/// The returned email is normalized; the password is passed through as-is.
pub fn validate_credentials(request: AuthRequest) -> Result<Credentials, ValidationErrors> {
    let mut fields = Vec::new();

    let email = match request.email {
        None => {
            fields.push(FieldError::new("email", "missing_field", "email is required"));
            None
        }
        Some(raw) => match check_email(raw.trim()) {
            Ok(()) => Some(normalize_email(&raw)),
            Err(err) => {
                fields.push(err);
                None
            }
        },
    };

    let password = match request.password {
        None => {
            fields.push(FieldError::new(
                "password",
                "missing_field",
                "password is required",
            ));
            None
        }
        Some(raw) => match check_password(&raw) {
            Ok(()) => Some(raw),
            Err(err) => {
                fields.push(err);
                None
            }
        },
    };

    match (email, password) {
        (Some(email), Some(password)) if fields.is_empty() => Ok(Credentials { email, password }),
        _ => Err(ValidationErrors { fields }),
    }
}

fn check_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::new("email", "empty", "email should not be empty"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(FieldError::new(
            "email",
            "too_long",
            format!("email must be at most {MAX_EMAIL_LENGTH} characters"),
        ));
    }

    let invalid = || FieldError::new("email", "invalid_email", "email must be an email");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    // Require a dotted domain with no empty labels
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(())
}

fn check_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::new(
            "password",
            "empty",
            "password should not be empty",
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(FieldError::new(
            "password",
            "too_long",
            format!("password must be at most {MAX_PASSWORD_LENGTH} bytes"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: Option<&str>, password: Option<&str>) -> AuthRequest {
        AuthRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn codes(err: &ValidationErrors) -> Vec<(&'static str, &'static str)> {
        err.fields.iter().map(|f| (f.field, f.code)).collect()
    }

    #[test]
    fn test_valid_credentials_pass() {
        let creds = validate_credentials(request(Some("test@dev.com"), Some("testpass"))).unwrap();
        assert_eq!(creds.email, "test@dev.com");
        assert_eq!(creds.password, "testpass");
    }

    #[test]
    fn test_email_is_normalized() {
        let creds =
            validate_credentials(request(Some("  Test@Dev.COM "), Some("testpass"))).unwrap();
        assert_eq!(creds.email, "test@dev.com");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let err = validate_credentials(request(None, None)).unwrap_err();
        assert_eq!(
            codes(&err),
            vec![("email", "missing_field"), ("password", "missing_field")]
        );
    }

    #[test]
    fn test_missing_email() {
        let err = validate_credentials(request(None, Some("testpass"))).unwrap_err();
        assert_eq!(codes(&err), vec![("email", "missing_field")]);
    }

    #[test]
    fn test_empty_password() {
        let err = validate_credentials(request(Some("test@dev.com"), Some(""))).unwrap_err();
        assert_eq!(codes(&err), vec![("password", "empty")]);
    }

    #[test]
    fn test_whitespace_only_email_is_empty() {
        let err = validate_credentials(request(Some("   "), Some("testpass"))).unwrap_err();
        assert_eq!(codes(&err), vec![("email", "empty")]);
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for bad in [
            "plainaddress",
            "@dev.com",
            "test@",
            "test@dev",
            "test@@dev.com",
            "te st@dev.com",
            "test@dev..com",
        ] {
            let err = validate_credentials(request(Some(bad), Some("testpass"))).unwrap_err();
            assert_eq!(codes(&err), vec![("email", "invalid_email")], "{bad}");
        }
    }

    #[test]
    fn test_overlong_inputs_rejected() {
        let long_email = format!("{}@dev.com", "a".repeat(MAX_EMAIL_LENGTH));
        let long_password = "p".repeat(MAX_PASSWORD_LENGTH + 1);

        let err = validate_credentials(request(Some(&long_email), Some(&long_password)))
            .unwrap_err();
        assert_eq!(
            codes(&err),
            vec![("email", "too_long"), ("password", "too_long")]
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" A@B.io\n"), "a@b.io");
    }
}
