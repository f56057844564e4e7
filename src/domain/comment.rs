use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub product_id: String,
    pub user_id: String,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewComment {
    pub product_id: String,
    pub user_id: String,
    pub username: String,
    pub text: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("Product id is required".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("User id is required".to_string()));
        }
        if self.text.trim().is_empty() {
            return Err(DomainError::InvalidInput("Comment text is required".to_string()));
        }
        Ok(())
    }
}
