use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Jsonb, Timestamptz, Uuid as SqlUuid, Varchar};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDocument, OrderNumber, OrderStatus, TimelineEntry};
use crate::domain::ports::OrderRepository;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderRow};

/// Unique constraint backing order-number uniqueness.
pub const ORDER_NUMBER_CONSTRAINT: &str = "orders_order_number_key";

// Status, timestamp and timeline append go out as one statement so the
// append can never be lost to a concurrent writer.
const UPDATE_STATUS_SQL: &str = "UPDATE orders \
     SET order_status = $1, updated_at = $2, timeline = timeline || $3 \
     WHERE id = $4 AND is_deleted = FALSE";

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    rows.into_iter().map(Order::try_from).collect()
}

impl OrderRepository for DieselOrderRepository {
    fn insert(&self, document: &OrderDocument) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;
        let row = NewOrderRow::from_document(Uuid::new_v4(), document)?;

        let stored = diesel::insert_into(orders::table)
            .values(&row)
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                    if info.constraint_name() == Some(ORDER_NUMBER_CONSTRAINT) =>
                {
                    DomainError::DuplicateOrderNumber(row.order_number.clone())
                }
                other => other.into(),
            })?;

        Order::try_from(stored)
    }

    fn exists_by_number(&self, number: &OrderNumber) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let exists = diesel::select(diesel::dsl::exists(
            orders::table.filter(orders::order_number.eq(number.as_str())),
        ))
        .get_result(&mut conn)?;

        Ok(exists)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .filter(orders::id.eq(id))
            .filter(orders::is_deleted.eq(false))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn find_by_number(&self, number: &str) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .filter(orders::order_number.eq(number))
            .filter(orders::is_deleted.eq(false))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::is_deleted.eq(false))
            .order(orders::created_at.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        rows_to_orders(rows)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_user_id.eq(user_id))
            .filter(orders::is_deleted.eq(false))
            .order(orders::created_at.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        rows_to_orders(rows)
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        entry: &TimelineEntry,
    ) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let appended = serde_json::to_value([entry])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let updated = diesel::sql_query(UPDATE_STATUS_SQL)
            .bind::<Varchar, _>(status.as_str())
            .bind::<Timestamptz, _>(entry.date)
            .bind::<Jsonb, _>(appended)
            .bind::<SqlUuid, _>(id)
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(
            orders::table
                .filter(orders::id.eq(id))
                .filter(orders::is_deleted.eq(false)),
        )
        .set((
            orders::is_deleted.eq(true),
            orders::is_active.eq(false),
            orders::updated_at.eq(at),
        ))
        .execute(&mut conn)?;

        Ok(updated > 0)
    }
}
