use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const NATIONAL_ID_LEN: usize = 11;

/// A stored user. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub password_hash: String,
    pub email: String,
    pub national_id: String,
    pub address: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub national_id: String,
    pub address: String,
}

impl NewUser {
    /// Presence checks only; uniqueness needs the store and is checked by
    /// the service before the format rules below.
    pub fn check_required(&self) -> Result<(), DomainError> {
        let required = [
            (&self.username, "Username is required"),
            (&self.password, "Password is required"),
            (&self.email, "Email address is required"),
            (&self.national_id, "National id is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidInput(message.to_string()));
            }
        }
        Ok(())
    }

    pub fn check_format(&self) -> Result<(), DomainError> {
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.national_id.len() != NATIONAL_ID_LEN
            || !self.national_id.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(DomainError::InvalidInput(format!(
                "National id must be {NATIONAL_ID_LEN} digits"
            )));
        }
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(DomainError::InvalidInput(
                "A valid email address is required".to_string(),
            ));
        }
        Ok(())
    }
}
