use std::sync::Arc;

use chrono::Local;
use rand::Rng;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    Order, OrderDocument, OrderNumber, OrderStatus, OrderSubmission, TimelineEntry,
};
use crate::domain::order_number::{Claim, OrderNumberGenerator};
use crate::domain::ports::OrderRepository;
use crate::domain::validation::{validate_order, ValidatedOrder};

use super::{now, parse_id};

pub const ORDER_CREATED_NOTE: &str = "order created";

/// Owns order creation and the status lifecycle.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    numbers: OrderNumberGenerator,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, numbers: OrderNumberGenerator) -> Self {
        Self { repo, numbers }
    }

    /// Validates the submission and stores it as a new order.
    pub fn create_order(&self, submission: OrderSubmission) -> Result<Order, DomainError> {
        let validated = validate_order(submission)?;
        self.create_validated(validated, &mut rand::thread_rng())
    }

    /// Assigns a number, stamps the creation time and writes the first
    /// timeline entry. The number is pre-checked against the store, but
    /// the unique index decides: a duplicate on insert draws a new number
    /// and counts as a failed attempt.
    pub fn create_validated<R: Rng>(
        &self,
        validated: ValidatedOrder,
        rng: &mut R,
    ) -> Result<Order, DomainError> {
        let now = now();
        let today = Local::now().date_naive();
        let status = validated.order_status.unwrap_or(OrderStatus::Pending);

        let mut timeline = validated.timeline;
        timeline.push(TimelineEntry {
            status,
            date: now,
            note: ORDER_CREATED_NOTE.to_string(),
        });

        let build = |order_number: OrderNumber| OrderDocument {
            order_number,
            order_date: now,
            order_status: status,
            customer: validated.customer.clone(),
            addresses: validated.addresses.clone(),
            items: validated.items.clone(),
            pricing: validated.pricing.clone(),
            payment: validated.payment.clone(),
            shipping: validated.shipping.clone(),
            timeline: timeline.clone(),
            notes: validated.notes.clone(),
            created_at: now,
            updated_at: now,
            created_by: validated.created_by.clone(),
            is_active: true,
            is_deleted: false,
        };

        let order = self.numbers.allocate(rng, today, |number| {
            if self.repo.exists_by_number(&number)? {
                return Ok(Claim::Taken);
            }
            match self.repo.insert(&build(number)) {
                Ok(order) => Ok(Claim::Claimed(order)),
                Err(DomainError::DuplicateOrderNumber(_)) => Ok(Claim::Taken),
                Err(e) => Err(e),
            }
        })?;

        log::info!(
            "Created order {} ({}) for user {}",
            order.document.order_number,
            order.id,
            order.document.customer.user_id
        );
        Ok(order)
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list()
    }

    pub fn list_user_orders(&self, user_id: &str) -> Result<Vec<Order>, DomainError> {
        self.repo.list_by_user(user_id.trim())
    }

    pub fn get_order(&self, order_id: &str) -> Result<Option<Order>, DomainError> {
        match parse_id(order_id) {
            Some(id) => self.repo.find_by_id(id),
            None => Ok(None),
        }
    }

    pub fn get_order_by_number(&self, order_number: &str) -> Result<Option<Order>, DomainError> {
        self.repo.find_by_number(order_number.trim())
    }

    /// Moves a live order to `new_status`. Unknown statuses fail before
    /// anything is written; an unknown or soft-deleted order is
    /// `NotFound`. No transition graph is enforced.
    pub fn update_status(
        &self,
        order_id: &str,
        new_status: &str,
        note: Option<&str>,
    ) -> Result<OrderStatus, DomainError> {
        let status: OrderStatus = new_status.parse()?;
        let id = parse_id(order_id).ok_or(DomainError::NotFound("Order"))?;

        let note = match note.map(str::trim) {
            Some(note) if !note.is_empty() => note.to_string(),
            _ => format!("Order status updated to {status}"),
        };
        let entry = TimelineEntry {
            status,
            date: now(),
            note,
        };

        if !self.repo.update_status(id, status, &entry)? {
            return Err(DomainError::NotFound("Order"));
        }
        log::info!("Order {} moved to {}", id, status);
        Ok(status)
    }

    pub fn delete_order(&self, order_id: &str) -> Result<(), DomainError> {
        let id = parse_id(order_id).ok_or(DomainError::NotFound("Order"))?;
        if !self.repo.soft_delete(id, now())? {
            return Err(DomainError::NotFound("Order"));
        }
        log::info!("Order {} soft-deleted", id);
        Ok(())
    }
}
