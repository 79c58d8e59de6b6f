//! Authentication Module
//! Mission: Account signup, credential checks and short-lived bearer tokens

pub mod api;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod user_store;
pub mod validation;

pub use api::AuthState;
pub use error::AuthError;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use service::CredentialService;
pub use user_store::{AccountStore, SqliteAccountStore, StoreError};
