use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDocument};
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::schema::{comments, orders, products, users};

fn to_json<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::Internal(e.to_string()))
}

fn from_json<T: DeserializeOwned>(field: &str, value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::Internal(format!("corrupt order field '{field}': {e}")))
}

// ── Orders ───────────────────────────────────────────────────────────────────

/// One order document. Nested value objects live in JSONB columns; fields
/// used for filtering and sorting are plain columns.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub order_status: String,
    pub customer_user_id: String,
    pub customer: Value,
    pub addresses: Value,
    pub items: Value,
    pub pricing: Value,
    pub payment: Value,
    pub shipping: Option<Value>,
    pub timeline: Value,
    pub notes: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub order_status: String,
    pub customer_user_id: String,
    pub customer: Value,
    pub addresses: Value,
    pub items: Value,
    pub pricing: Value,
    pub payment: Value,
    pub shipping: Option<Value>,
    pub timeline: Value,
    pub notes: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
}

impl NewOrderRow {
    pub fn from_document(id: Uuid, doc: &OrderDocument) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            order_number: doc.order_number.to_string(),
            order_date: doc.order_date,
            order_status: doc.order_status.to_string(),
            customer_user_id: doc.customer.user_id.clone(),
            customer: to_json(&doc.customer)?,
            addresses: to_json(&doc.addresses)?,
            items: to_json(&doc.items)?,
            pricing: to_json(&doc.pricing)?,
            payment: to_json(&doc.payment)?,
            shipping: doc.shipping.as_ref().map(to_json).transpose()?,
            timeline: to_json(&doc.timeline)?,
            notes: to_json(&doc.notes)?,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
            created_by: doc.created_by.clone(),
            is_active: doc.is_active,
            is_deleted: doc.is_deleted,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            document: OrderDocument {
                order_number: from_json("orderNumber", Value::String(row.order_number))?,
                order_date: row.order_date,
                order_status: row.order_status.parse()?,
                customer: from_json("customer", row.customer)?,
                addresses: from_json("addresses", row.addresses)?,
                items: from_json("items", row.items)?,
                pricing: from_json("pricing", row.pricing)?,
                payment: from_json("payment", row.payment)?,
                shipping: row
                    .shipping
                    .map(|value| from_json("shipping", value))
                    .transpose()?,
                timeline: from_json("timeline", row.timeline)?,
                notes: from_json("notes", row.notes)?,
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                is_active: row.is_active,
                is_deleted: row.is_deleted,
            },
        })
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: BigDecimal,
    pub discount_percentage: BigDecimal,
    pub discounted_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: BigDecimal,
    pub discount_percentage: BigDecimal,
    pub discounted_price: BigDecimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image,
            price: row.price,
            discount_percentage: row.discount_percentage,
            discounted_price: row.discounted_price,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub national_id: String,
    pub address: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub national_id: String,
    pub address: String,
    pub is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            national_id: row.national_id,
            address: row.address,
            is_admin: row.is_admin,
        }
    }
}

// ── Comments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: Uuid,
    pub product_id: String,
    pub user_id: String,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    pub id: Uuid,
    pub product_id: String,
    pub user_id: String,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            product_id: row.product_id,
            user_id: row.user_id,
            username: row.username,
            text: row.body,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::order::{OrderItem, OrderNumber, OrderStatus, TimelineEntry};
    use crate::domain::validation::tests::valid_submission;
    use crate::domain::validation::validate_order;

    fn document() -> OrderDocument {
        let v = validate_order(valid_submission()).unwrap();
        let now = Utc::now();
        OrderDocument {
            order_number: OrderNumber::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), 654_321),
            order_date: now,
            order_status: OrderStatus::Pending,
            customer: v.customer,
            addresses: v.addresses,
            items: v.items,
            pricing: v.pricing,
            payment: v.payment,
            shipping: None,
            timeline: vec![TimelineEntry {
                status: OrderStatus::Pending,
                date: now,
                note: "order created".to_string(),
            }],
            notes: v.notes,
            created_at: now,
            updated_at: now,
            created_by: None,
            is_active: true,
            is_deleted: false,
        }
    }

    #[test]
    fn document_survives_row_mapping() {
        let doc = document();
        let id = Uuid::new_v4();
        let new_row = NewOrderRow::from_document(id, &doc).unwrap();
        assert_eq!(new_row.customer_user_id, "user-1");
        assert_eq!(new_row.order_status, "pending");
        assert_eq!(new_row.timeline[0]["note"], "order created");

        let row = OrderRow {
            id: new_row.id,
            order_number: new_row.order_number,
            order_date: new_row.order_date,
            order_status: new_row.order_status,
            customer_user_id: new_row.customer_user_id,
            customer: new_row.customer,
            addresses: new_row.addresses,
            items: new_row.items,
            pricing: new_row.pricing,
            payment: new_row.payment,
            shipping: new_row.shipping,
            timeline: new_row.timeline,
            notes: new_row.notes,
            created_at: new_row.created_at,
            updated_at: new_row.updated_at,
            created_by: new_row.created_by,
            is_active: new_row.is_active,
            is_deleted: new_row.is_deleted,
        };

        let order = Order::try_from(row).unwrap();
        assert_eq!(order.id, id);
        assert_eq!(order.document, doc);
    }

    #[test]
    fn corrupt_json_is_an_internal_error() {
        let doc = document();
        let mut new_row = NewOrderRow::from_document(Uuid::new_v4(), &doc).unwrap();
        new_row.items = serde_json::json!({"not": "a list"});
        let err = from_json::<Vec<OrderItem>>("items", new_row.items).unwrap_err();
        assert!(matches!(err, DomainError::Internal(msg) if msg.contains("items")));
    }
}
