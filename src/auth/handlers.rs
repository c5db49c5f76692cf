use axum::{
    extract::{FromRef, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, LoginResponse},
    extractors::SESSION_COOKIE,
    jwt::JwtKeys,
    password::verify_password,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::Unauthorized("Invalid credentials".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(&user)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user logged in");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".into(),
            name: user.name,
            email: user.email,
            role: user.role,
        }),
    ))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        Json(json!({ "message": "Logged out" })),
    )
}
