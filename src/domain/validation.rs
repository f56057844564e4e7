use bigdecimal::{BigDecimal, Zero};
use thiserror::Error;

use super::order::{
    Addresses, Customer, Notes, OrderItem, OrderStatus, OrderSubmission, Payment, Pricing,
    Shipping, TimelineEntry,
};

pub const DEFAULT_CURRENCY: &str = "TRY";
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// Reasons an order submission is rejected. Each maps to a 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Customer information is required")]
    MissingCustomer,
    #[error("User id is required")]
    MissingUserId,
    #[error("Order items are required")]
    MissingItems,
    #[error("Delivery address is required")]
    MissingDeliveryAddress,
    #[error("Pricing information is required")]
    MissingPricing,
    #[error("Payment information is required")]
    MissingPayment,
    #[error("Product id is required")]
    MissingProductId,
    #[error("Product quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("Product price must be greater than zero")]
    NonPositiveUnitPrice,
    #[error("Subtotal calculation is incorrect")]
    SubtotalMismatch,
    #[error("Total price calculation is incorrect")]
    TotalMismatch,
    #[error("Invalid order status")]
    InvalidStatus,
}

/// An order that passed every check, with item totals recomputed and
/// defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub customer: Customer,
    pub addresses: Addresses,
    pub items: Vec<OrderItem>,
    pub pricing: Pricing,
    pub payment: Payment,
    pub shipping: Option<Shipping>,
    pub notes: Notes,
    pub order_status: Option<OrderStatus>,
    pub timeline: Vec<TimelineEntry>,
    pub created_by: Option<String>,
}

/// Absolute tolerance for price comparisons, 0.01 currency units.
fn tolerance() -> BigDecimal {
    BigDecimal::new(1.into(), 2)
}

fn within_tolerance(submitted: &BigDecimal, computed: &BigDecimal) -> bool {
    (submitted - computed).abs() <= tolerance()
}

pub fn validate_order(submission: OrderSubmission) -> Result<ValidatedOrder, ValidationError> {
    let customer = submission.customer.ok_or(ValidationError::MissingCustomer)?;
    if customer.user_id.trim().is_empty() {
        return Err(ValidationError::MissingUserId);
    }

    let mut items = match submission.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ValidationError::MissingItems),
    };

    let addresses = submission.addresses.unwrap_or_default();
    let delivery = addresses
        .delivery
        .ok_or(ValidationError::MissingDeliveryAddress)?;

    let mut pricing = submission.pricing.ok_or(ValidationError::MissingPricing)?;
    let mut payment = submission.payment.ok_or(ValidationError::MissingPayment)?;

    for item in &mut items {
        if item.product_id.trim().is_empty() {
            return Err(ValidationError::MissingProductId);
        }
        if item.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }
        if item.unit_price <= BigDecimal::zero() {
            return Err(ValidationError::NonPositiveUnitPrice);
        }
        item.total_price = &item.unit_price * &BigDecimal::from(item.quantity);
    }

    let computed_subtotal = items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + &item.total_price);
    if !within_tolerance(&pricing.subtotal, &computed_subtotal) {
        return Err(ValidationError::SubtotalMismatch);
    }

    let computed_total = &pricing.subtotal + &pricing.tax + &pricing.shipping - &pricing.discount;
    if !within_tolerance(&pricing.total, &computed_total) {
        return Err(ValidationError::TotalMismatch);
    }

    let order_status = submission
        .order_status
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<OrderStatus>())
        .transpose()
        .map_err(|_| ValidationError::InvalidStatus)?;

    if pricing.currency.trim().is_empty() {
        pricing.currency = DEFAULT_CURRENCY.to_string();
    }
    if payment.status.trim().is_empty() {
        payment.status = DEFAULT_PAYMENT_STATUS.to_string();
    }
    let notes = submission.notes.unwrap_or_default();

    Ok(ValidatedOrder {
        customer,
        addresses: Addresses {
            delivery,
            billing: addresses.billing,
        },
        items,
        pricing,
        payment,
        shipping: submission.shipping,
        notes,
        order_status,
        timeline: submission.timeline.unwrap_or_default(),
        created_by: submission.created_by,
    })
}
