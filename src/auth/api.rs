//! Authentication API Endpoints
//! Mission: Provide signup, signin and current-user endpoints

use crate::auth::{
    error::AuthError,
    middleware::extract_claims,
    models::{AccountResponse, AuthRequest, CurrentUserResponse, SigninResponse},
    service::CredentialService,
    validation::{validate_credentials, FieldError, ValidationErrors},
};
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub credentials: CredentialService,
}

impl AuthState {
    pub fn new(credentials: CredentialService) -> Self {
        Self { credentials }
    }
}

/// Signup endpoint - POST /auth/signup
pub async fn signup(
    State(state): State<AuthState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), AuthApiError> {
    let Json(payload) = payload?;
    let credentials = validate_credentials(payload)?;

    info!("🔐 Signup attempt");

    let account = state.credentials.register(credentials).await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::from_account(&account)),
    ))
}

/// Signin endpoint - POST /auth/signin
pub async fn signin(
    State(state): State<AuthState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SigninResponse>), AuthApiError> {
    let Json(payload) = payload?;
    let credentials = validate_credentials(payload)?;

    let token = state.credentials.authenticate(credentials).await?;

    Ok((StatusCode::CREATED, Json(SigninResponse::from(token))))
}

/// Get current user info - GET /users/me
/// Built from the verified token claims (no database lookup needed)
pub async fn get_current_user(req: Request) -> Result<Json<CurrentUserResponse>, AuthApiError> {
    let claims = extract_claims(&req).ok_or(AuthApiError::Unauthorized)?;
    Ok(Json(CurrentUserResponse::from_claims(claims)))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    MalformedBody(String),
    Validation(Vec<FieldError>),
    AlreadyExists,
    InvalidCredentials,
    Unauthorized,
    InternalError,
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AlreadyExists => AuthApiError::AlreadyExists,
            AuthError::InvalidCredentials => AuthApiError::InvalidCredentials,
            AuthError::Internal(e) => {
                error!(error = ?e, "Credential operation failed");
                AuthApiError::InternalError
            }
        }
    }
}

impl From<ValidationErrors> for AuthApiError {
    fn from(err: ValidationErrors) -> Self {
        AuthApiError::Validation(err.fields)
    }
}

impl From<JsonRejection> for AuthApiError {
    fn from(rejection: JsonRejection) -> Self {
        AuthApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            AuthApiError::MalformedBody(detail) => (StatusCode::BAD_REQUEST, detail, Vec::new()),
            AuthApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "Request validation failed".to_string(),
                fields,
            ),
            AuthApiError::AlreadyExists => (
                StatusCode::FORBIDDEN,
                "Account already exists".to_string(),
                Vec::new(),
            ),
            AuthApiError::InvalidCredentials => (
                StatusCode::FORBIDDEN,
                "Incorrect credentials".to_string(),
                Vec::new(),
            ),
            AuthApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
                Vec::new(),
            ),
            AuthApiError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Vec::new(),
            ),
        };

        let mut body = json!({
            "statusCode": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        });
        if !fields.is_empty() {
            body["fields"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}
