//! In-process repositories with the same semantics as the Postgres ones,
//! used to exercise services and handlers without a database.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDocument, OrderNumber, OrderStatus, TimelineEntry};
use crate::domain::ports::{
    CommentRepository, OrderRepository, ProductRepository, UserRecord, UserRepository,
};
use crate::domain::product::{Product, ProductDraft};
use crate::domain::user::User;

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DomainError> {
    lock.read()
        .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DomainError> {
    lock.write()
        .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
}

/// Newest first; equal timestamps keep the later insert first.
fn newest_first<T: Clone>(
    items: &[T],
    keep: impl Fn(&T) -> bool,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().filter(|i| keep(i)).cloned().collect();
    out.sort_by_key(|i| std::cmp::Reverse(created_at(i)));
    out
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl OrderRepository for MemoryOrderRepository {
    fn insert(&self, document: &OrderDocument) -> Result<Order, DomainError> {
        let mut orders = write(&self.orders)?;
        if orders
            .iter()
            .any(|o| o.document.order_number == document.order_number)
        {
            return Err(DomainError::DuplicateOrderNumber(
                document.order_number.to_string(),
            ));
        }
        let order = Order {
            id: Uuid::new_v4(),
            document: document.clone(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    fn exists_by_number(&self, number: &OrderNumber) -> Result<bool, DomainError> {
        Ok(read(&self.orders)?
            .iter()
            .any(|o| &o.document.order_number == number))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(read(&self.orders)?
            .iter()
            .find(|o| o.id == id && !o.document.is_deleted)
            .cloned())
    }

    fn find_by_number(&self, number: &str) -> Result<Option<Order>, DomainError> {
        Ok(read(&self.orders)?
            .iter()
            .find(|o| o.document.order_number.as_str() == number && !o.document.is_deleted)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let orders = read(&self.orders)?;
        Ok(newest_first(
            orders.as_slice(),
            |o| !o.document.is_deleted,
            |o| o.document.created_at,
        ))
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, DomainError> {
        let orders = read(&self.orders)?;
        Ok(newest_first(
            orders.as_slice(),
            |o| !o.document.is_deleted && o.document.customer.user_id == user_id,
            |o| o.document.created_at,
        ))
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        entry: &TimelineEntry,
    ) -> Result<bool, DomainError> {
        let mut orders = write(&self.orders)?;
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.id == id && !o.document.is_deleted)
        else {
            return Ok(false);
        };
        order.document.order_status = status;
        order.document.updated_at = entry.date;
        order.document.timeline.push(entry.clone());
        Ok(true)
    }

    fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut orders = write(&self.orders)?;
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.id == id && !o.document.is_deleted)
        else {
            return Ok(false);
        };
        order.document.is_deleted = true;
        order.document.is_active = false;
        order.document.updated_at = at;
        Ok(true)
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl ProductRepository for MemoryProductRepository {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(read(&self.products)?.clone())
    }

    fn insert(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let product = Product {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            image: draft.image.clone(),
            price: draft.price.clone(),
            discount_percentage: draft.discount_percentage.clone(),
            discounted_price: draft.discounted_price.clone(),
        };
        write(&self.products)?.push(product.clone());
        Ok(product)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(read(&self.products)?.iter().find(|p| p.id == id).cloned())
    }

    fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<bool, DomainError> {
        let mut products = write(&self.products)?;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        product.name = draft.name.clone();
        product.description = draft.description.clone();
        product.image = draft.image.clone();
        product.price = draft.price.clone();
        product.discount_percentage = draft.discount_percentage.clone();
        product.discounted_price = draft.discounted_price.clone();
        Ok(true)
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut products = write(&self.products)?;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() != before)
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl UserRepository for MemoryUserRepository {
    fn insert(&self, record: &UserRecord) -> Result<User, DomainError> {
        let mut users = write(&self.users)?;
        if users
            .iter()
            .any(|u| u.username == record.username || u.email == record.email)
        {
            return Err(DomainError::Conflict(
                "Username or email already in use".to_string(),
            ));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: record.username.clone(),
            password_hash: record.password_hash.clone(),
            email: record.email.clone(),
            national_id: record.national_id.clone(),
            address: record.address.clone(),
            is_admin: record.is_admin,
        };
        users.push(user.clone());
        Ok(user)
    }

    fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(read(&self.users)?.clone())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(read(&self.users)?
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(read(&self.users)?.iter().find(|u| u.email == email).cloned())
    }
}

// ── Comments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
}

impl CommentRepository for MemoryCommentRepository {
    fn insert(&self, comment: &NewComment, at: DateTime<Utc>) -> Result<Comment, DomainError> {
        let stored = Comment {
            id: Uuid::new_v4(),
            product_id: comment.product_id.clone(),
            user_id: comment.user_id.clone(),
            username: comment.username.clone(),
            text: comment.text.clone(),
            created_at: at,
        };
        write(&self.comments)?.push(stored.clone());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<Comment>, DomainError> {
        let comments = read(&self.comments)?;
        Ok(newest_first(comments.as_slice(), |_| true, |c| c.created_at))
    }

    fn list_by_product(&self, product_id: &str) -> Result<Vec<Comment>, DomainError> {
        let comments = read(&self.comments)?;
        Ok(newest_first(
            comments.as_slice(),
            |c| c.product_id == product_id,
            |c| c.created_at,
        ))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut comments = write(&self.comments)?;
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() != before)
    }
}
