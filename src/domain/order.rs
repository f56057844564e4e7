use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::money;

pub const ORDER_NUMBER_PREFIX: &str = "SP";

/// Closed set of order states. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

/// Human-readable order identifier, `SP-YYYYMMDD-NNNNNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "SP-20250101-123456")]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(date: NaiveDate, suffix: u32) -> Self {
        Self(format!(
            "{}-{}-{:06}",
            ORDER_NUMBER_PREFIX,
            date.format("%Y%m%d"),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Checks the `SP-YYYYMMDD-NNNNNN` shape, including that the date part
    /// is a real calendar date.
    pub fn is_well_formed(candidate: &str) -> bool {
        let mut parts = candidate.split('-');
        let (Some(prefix), Some(date), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        prefix == ORDER_NUMBER_PREFIX
            && date.len() == 8
            && NaiveDate::parse_from_str(date, "%Y%m%d").is_ok()
            && suffix.len() == 6
            && suffix.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Value objects ────────────────────────────────────────────────────────────

/// Snapshot of the ordering user taken at creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub full_address: String,
    pub city: String,
    pub district: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Addresses {
    pub delivery: Address,
    #[serde(default)]
    pub billing: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressesInput {
    #[serde(default)]
    pub delivery: Option<Address>,
    #[serde(default)]
    pub billing: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default, deserialize_with = "money::deserialize")]
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: BigDecimal,
    /// Always recomputed as `quantity * unit_price` on creation.
    #[serde(default, deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Pricing {
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub subtotal: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub tax: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub shipping: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub discount: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub total: BigDecimal,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    /// bank_transfer, credit_card, cash_on_delivery
    pub method: String,
    /// pending, completed, failed, refunded
    pub status: String,
    pub transaction_id: Option<String>,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub paid_amount: BigDecimal,
    pub payment_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Shipping {
    /// standard, express, same_day
    pub method: String,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub actual_delivery: Option<DateTime<Utc>>,
    pub carrier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntry {
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Notes {
    pub customer_note: Option<String>,
    pub admin_note: Option<String>,
    pub delivery_note: Option<String>,
}

// ── Aggregate ────────────────────────────────────────────────────────────────

/// Everything stored for an order except its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    pub order_number: OrderNumber,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub customer: Customer,
    pub addresses: Addresses,
    pub items: Vec<OrderItem>,
    pub pricing: Pricing,
    pub payment: Payment,
    pub shipping: Option<Shipping>,
    pub timeline: Vec<TimelineEntry>,
    pub notes: Notes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    #[serde(flatten)]
    pub document: OrderDocument,
}

/// Inbound order as submitted by a client, before validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderSubmission {
    pub customer: Option<Customer>,
    pub addresses: Option<AddressesInput>,
    pub items: Option<Vec<OrderItem>>,
    pub pricing: Option<Pricing>,
    pub payment: Option<Payment>,
    pub shipping: Option<Shipping>,
    pub notes: Option<Notes>,
    pub order_status: Option<String>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub created_by: Option<String>,
}
