use axum::{extract::State, http::StatusCode, Json};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::auth::extractors::{AdminUser, CurrentUser};
use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{EmailAction, RegisterRequest, UserListItem};
use crate::users::policy;
use crate::users::repo::{Role, User};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Registration is admin-gated once any admin exists; the very first admin
/// signs up unauthenticated (bootstrap).
#[instrument(skip(state, caller, payload))]
pub async fn register(
    State(state): State<AppState>,
    caller: Option<CurrentUser>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidInput("Invalid email".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("Name required".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::InvalidInput("Password too short".into()));
    }

    let role = payload.role.unwrap_or(Role::Employee);
    let have_admin = User::admin_exists(&state.db).await?;
    policy::check_registration(role, have_admin, caller.map(|c| c.role))?;

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, payload.name.trim(), &payload.email, &hash, role).await?;

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserListItem>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    let items = users
        .into_iter()
        .map(|u| UserListItem {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, admin, payload))]
pub async fn promote(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<EmailAction>,
) -> Result<Json<Value>, ApiError> {
    let email = normalized_target(&payload)?;
    let target = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    policy::check_promote(target.role, email == admin.email)?;

    User::set_role(&state.db, &email, Role::Admin).await?;
    info!(target = %email, by = %admin.email, "user promoted to admin");
    Ok(Json(json!({ "message": "User promoted to admin" })))
}

#[instrument(skip(state, admin, payload))]
pub async fn demote(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<EmailAction>,
) -> Result<Json<Value>, ApiError> {
    let email = normalized_target(&payload)?;
    let target = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    let admin_count = User::admin_count(&state.db).await?;
    policy::check_demote(target.role, admin_count, email == admin.email)?;

    User::set_role(&state.db, &email, Role::Employee).await?;
    info!(target = %email, by = %admin.email, "admin demoted to employee");
    Ok(Json(json!({ "message": "Admin demoted successfully" })))
}

#[instrument(skip(state, admin, payload))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<EmailAction>,
) -> Result<Json<Value>, ApiError> {
    let email = normalized_target(&payload)?;
    let target = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    policy::check_delete(target.role, email == admin.email)?;

    User::delete_by_email(&state.db, &email).await?;
    info!(target = %email, by = %admin.email, "user deleted");
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// Bootstrap probe: lets the signup page decide whether the first-admin flow
/// is still open.
#[instrument(skip(state))]
pub async fn admin_exists(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let exists = User::admin_exists(&state.db).await?;
    Ok(Json(json!({ "exists": exists })))
}

fn normalized_target(payload: &EmailAction) -> Result<String, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::InvalidInput("Email required".into()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ops@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn target_email_is_normalized() {
        let action = EmailAction {
            email: "  Staff@Example.COM ".into(),
        };
        assert_eq!(normalized_target(&action).unwrap(), "staff@example.com");
    }

    #[test]
    fn empty_target_is_invalid_input() {
        let action = EmailAction { email: "  ".into() };
        let err = normalized_target(&action).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
