//! Authentication Models
//! Accounts, credential inputs, token claims and the response shapes built from them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric account identifier assigned by the store
pub type AccountId = i64;

/// Persisted account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string - never serialize
    pub created_at: String,
    pub updated_at: String,
}

/// Raw signup/signin body. Fields are optional so that a missing field is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Validated email + plaintext password, alive only for one signup or signin call
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: AccountId,
    pub email: String,
    pub iat: usize, // issued-at timestamp
    pub exp: usize, // expiration timestamp
}

/// Freshly minted bearer token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: usize, // seconds until expiration
}

/// Signin response
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub access_token: String,
}

impl From<AccessToken> for SigninResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.token,
        }
    }
}

/// Account response (sanitized)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: AccountId,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AccountResponse {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            created_at: account.created_at.clone(),
            updated_at: account.updated_at.clone(),
        }
    }
}

/// Identity asserted by a verified bearer token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user_id: AccountId,
    pub email: String,
    pub exp: usize,
}

impl CurrentUserResponse {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
            exp: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account() -> Account {
        Account {
            id: 7,
            email: "test@dev.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            updated_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_account_serialization_omits_hash() {
        let json = serde_json::to_value(create_test_account()).unwrap();
        assert_eq!(json["email"], "test@dev.com");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_account_response_from_account() {
        let response = AccountResponse::from_account(&create_test_account());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00+00:00");
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_claims_use_camel_case() {
        let claims = Claims {
            user_id: 3,
            email: "a@b.io".to_string(),
            iat: 100,
            exp: 1000,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 3);
        assert_eq!(json["exp"], 1000);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("test@dev.com", "testpass");
        let printed = format!("{creds:?}");
        assert!(printed.contains("test@dev.com"));
        assert!(!printed.contains("testpass"));
    }

    #[test]
    fn test_auth_request_tolerates_missing_and_unknown_fields() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"password":"testpass","role":"admin"}"#).unwrap();
        assert!(req.email.is_none());
        assert_eq!(req.password.as_deref(), Some("testpass"));
    }
}
