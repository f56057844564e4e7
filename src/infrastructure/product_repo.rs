use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductDraft};
use crate::schema::products;

use super::models::{NewProductRow, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .order(products::created_at.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn insert(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: draft.name.clone(),
                description: draft.description.clone(),
                image: draft.image.clone(),
                price: draft.price.clone(),
                discount_percentage: draft.discount_percentage.clone(),
                discounted_price: draft.discounted_price.clone(),
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::id.eq(id))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(products::table.filter(products::id.eq(id)))
            .set((
                products::name.eq(&draft.name),
                products::description.eq(&draft.description),
                products::image.eq(&draft.image),
                products::price.eq(&draft.price),
                products::discount_percentage.eq(&draft.discount_percentage),
                products::discounted_price.eq(&draft.discounted_price),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted =
            diesel::delete(products::table.filter(products::id.eq(id))).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
