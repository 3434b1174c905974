use serde::{Deserialize, Serialize};

/// Request body for signup and login. Fields are optional so that a
/// missing field maps to a 400 validation error rather than a body
/// rejection from the JSON layer.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
