use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, LoginResponse, MessageResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Pulls (email, password) out of a request body, normalizing the email
/// to its lowercased, trimmed login-key form. Signup and login share
/// this so the same account always resolves to the same key.
fn validate_credentials(req: CredentialsRequest) -> Result<(String, String), ApiError> {
    let email = req
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    let password = req.password.filter(|p| !p.is_empty());
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ApiError::Validation(
            "Email and password are required".into(),
        )),
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(payload) = payload.map_err(reject_body)?;
    let (email, password) = validate_credentials(payload)?;

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal
    })?;

    let user = match User::create(&state.db, &email, &hash).await {
        Ok(u) => u,
        // Unique index backstop for the lookup/insert race.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email already registered (unique index)");
            return Err(ApiError::DuplicateEmail);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "New user created successfully. Please log in.".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload.map_err(reject_body)?;
    let (email, password) = validate_credentials(payload)?;

    // Unknown email and wrong password fall through to the same error so
    // the response never reveals whether the account exists.
    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(user.id, &user.email).map_err(|e| {
        error!(error = %e, "token issue failed");
        ApiError::Internal
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        email: user.email,
    }))
}

// Body rejections from the JSON layer are folded into the taxonomy so
// every failure carries the same `{"error": ...}` shape.
fn reject_body(e: JsonRejection) -> ApiError {
    warn!(error = %e, "rejected request body");
    ApiError::Validation("Email and password are required".into())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map(|c| c == "23505")
        .unwrap_or(false)
}
