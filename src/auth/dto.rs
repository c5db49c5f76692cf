use serde::{Deserialize, Serialize};

use crate::users::repo::Role;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
