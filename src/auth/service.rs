//! Credential Service
//! Mission: Register accounts, check signin attempts and mint access tokens

use crate::auth::{
    error::AuthError,
    jwt::JwtHandler,
    models::{AccessToken, Account, AccountId, Credentials},
    password,
    user_store::AccountStore,
    validation::normalize_email,
};
use crate::config::AuthConfig;
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

/// Signup, signin and token issuance over an [`AccountStore`].
///
/// Cheap to clone; hashing and storage calls run on the blocking pool.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn AccountStore>,
    jwt_handler: Arc<JwtHandler>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn AccountStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            jwt_handler: Arc::new(JwtHandler::new(config)),
        }
    }

    /// Token handler shared with the bearer guard
    pub fn jwt_handler(&self) -> Arc<JwtHandler> {
        Arc::clone(&self.jwt_handler)
    }

    /// Hash the password and persist a new account.
    ///
    /// Fails with [`AuthError::AlreadyExists`] when the email is taken; other
    /// storage failures come back as [`AuthError::Internal`].
    pub async fn register(&self, credentials: Credentials) -> Result<Account, AuthError> {
        let store = Arc::clone(&self.store);
        let email = normalize_email(&credentials.email);

        let result = tokio::task::spawn_blocking(move || -> Result<Account, AuthError> {
            let password_hash = password::hash_password(&credentials.password)?;
            Ok(store.create_account(&email, &password_hash)?)
        })
        .await
        .context("Signup worker failed")?;

        match &result {
            Ok(account) => info!(account_id = account.id, "✅ Account registered"),
            Err(AuthError::AlreadyExists) => warn!("❌ Signup rejected: email already registered"),
            Err(_) => {}
        }

        result
    }

    /// Check an email/password pair and issue a token for the account.
    ///
    /// Unknown email and wrong password both fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let store = Arc::clone(&self.store);
        let email = normalize_email(&credentials.email);

        let account = tokio::task::spawn_blocking(move || -> Result<Account, AuthError> {
            let Some(account) = store.find_by_email(&email)? else {
                password::burn_verification(&credentials.password);
                return Err(AuthError::InvalidCredentials);
            };

            if !password::verify_password(&credentials.password, &account.password_hash)? {
                return Err(AuthError::InvalidCredentials);
            }

            Ok(account)
        })
        .await
        .context("Signin worker failed")?;

        let account = match account {
            Ok(account) => account,
            Err(AuthError::InvalidCredentials) => {
                warn!("❌ Failed signin attempt");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        self.issue_token(account.id, &account.email)
    }

    /// Sign a 15-minute access token for an account
    pub fn issue_token(&self, account_id: AccountId, email: &str) -> Result<AccessToken, AuthError> {
        let token = self.jwt_handler.generate_token(account_id, email)?;
        info!(account_id, "🔐 Access token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user_store::{SqliteAccountStore, StoreError};

    const SECRET: &str = "test-secret-key-with-enough-length-123";

    fn create_test_service() -> (CredentialService, Arc<SqliteAccountStore>) {
        let store = Arc::new(SqliteAccountStore::in_memory().unwrap());
        let config = AuthConfig::new(SECRET).unwrap();
        let service = CredentialService::new(store.clone(), &config);
        (service, store)
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password)
    }

    /// Store whose every call fails with a backend error
    struct BrokenStore;

    impl AccountStore for BrokenStore {
        fn create_account(&self, _: &str, _: &str) -> Result<Account, StoreError> {
            Err(StoreError::Backend(anyhow::anyhow!("database is locked")))
        }

        fn find_by_email(&self, _: &str) -> Result<Option<Account>, StoreError> {
            Err(StoreError::Backend(anyhow::anyhow!("database is locked")))
        }
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let (service, _store) = create_test_service();

        let account = service
            .register(creds("test@dev.com", "testpass"))
            .await
            .unwrap();
        assert!(account.id > 0);
        assert_eq!(account.email, "test@dev.com");

        let token = service
            .authenticate(creds("test@dev.com", "testpass"))
            .await
            .unwrap();
        assert!(!token.token.is_empty());

        let claims = service.jwt_handler().validate_token(&token.token).unwrap();
        assert_eq!(claims.user_id, account.id);
        assert_eq!(claims.email, account.email);
    }

    #[tokio::test]
    async fn test_stored_hash_is_salted_and_not_plaintext() {
        let (service, _store) = create_test_service();

        let first = service
            .register(creds("one@dev.com", "samepass"))
            .await
            .unwrap();
        let second = service
            .register(creds("two@dev.com", "samepass"))
            .await
            .unwrap();

        assert_ne!(first.password_hash, "samepass");
        assert_ne!(first.password_hash, second.password_hash);
    }

    #[tokio::test]
    async fn test_duplicate_register_rejected() {
        let (service, store) = create_test_service();

        service
            .register(creds("test@dev.com", "testpass"))
            .await
            .unwrap();
        let result = service.register(creds("test@dev.com", "other")).await;

        assert!(matches!(result, Err(AuthError::AlreadyExists)));
        assert_eq!(store.account_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_detection_ignores_email_case() {
        let (service, store) = create_test_service();

        service
            .register(creds("test@dev.com", "testpass"))
            .await
            .unwrap();
        let result = service.register(creds("TEST@DEV.COM", "testpass")).await;

        assert!(matches!(result, Err(AuthError::AlreadyExists)));
        assert_eq!(store.account_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let (service, _store) = create_test_service();

        let result = service.authenticate(creds("nobody@dev.com", "testpass")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let (service, _store) = create_test_service();

        service
            .register(creds("test@dev.com", "testpass"))
            .await
            .unwrap();
        let result = service.authenticate(creds("test@dev.com", "wrong")).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_not_swallowed() {
        let config = AuthConfig::new(SECRET).unwrap();
        let service = CredentialService::new(Arc::new(BrokenStore), &config);

        let signup = service.register(creds("test@dev.com", "testpass")).await;
        assert!(matches!(signup, Err(AuthError::Internal(_))));

        let signin = service.authenticate(creds("test@dev.com", "testpass")).await;
        assert!(matches!(signin, Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_issue_token_embeds_identity() {
        let (service, _store) = create_test_service();

        let token = service.issue_token(9, "nine@dev.com").unwrap();
        let claims = service.jwt_handler().validate_token(&token.token).unwrap();

        assert_eq!(claims.user_id, 9);
        assert_eq!(claims.email, "nine@dev.com");
        assert_eq!(token.expires_in, 900);
    }
}
