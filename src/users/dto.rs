use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo::Role;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct UserListItem {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Body for promote / demote / delete-user.
#[derive(Debug, Deserialize)]
pub struct EmailAction {
    pub email: String,
}
