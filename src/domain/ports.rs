use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::comment::{Comment, NewComment};
use super::errors::DomainError;
use super::order::{Order, OrderDocument, OrderNumber, OrderStatus, TimelineEntry};
use super::product::{Product, ProductDraft};
use super::user::User;

/// Document-style access to the `orders` collection. Every read except
/// `exists_by_number` skips soft-deleted orders.
pub trait OrderRepository: Send + Sync + 'static {
    /// Assigns a fresh id and stores the document. A clash on the order
    /// number surfaces as `DomainError::DuplicateOrderNumber`.
    fn insert(&self, document: &OrderDocument) -> Result<Order, DomainError>;
    fn exists_by_number(&self, number: &OrderNumber) -> Result<bool, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn find_by_number(&self, number: &str) -> Result<Option<Order>, DomainError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    /// Newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, DomainError>;
    /// Sets the status and `updatedAt` and appends `entry` to the timeline
    /// in one atomic write. Returns whether a live order matched.
    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        entry: &TimelineEntry,
    ) -> Result<bool, DomainError>;
    fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn insert(&self, draft: &ProductDraft) -> Result<Product, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<bool, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// Fields of a user about to be stored.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub national_id: String,
    pub address: String,
    pub is_admin: bool,
}

pub trait UserRepository: Send + Sync + 'static {
    fn insert(&self, record: &UserRecord) -> Result<User, DomainError>;
    fn list(&self) -> Result<Vec<User>, DomainError>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}

pub trait CommentRepository: Send + Sync + 'static {
    fn insert(&self, comment: &NewComment, at: DateTime<Utc>) -> Result<Comment, DomainError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<Comment>, DomainError>;
    /// Newest first.
    fn list_by_product(&self, product_id: &str) -> Result<Vec<Comment>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
