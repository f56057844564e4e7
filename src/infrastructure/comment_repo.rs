use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::errors::DomainError;
use crate::domain::ports::CommentRepository;
use crate::schema::comments;

use super::models::{CommentRow, NewCommentRow};

pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CommentRepository for DieselCommentRepository {
    fn insert(&self, comment: &NewComment, at: DateTime<Utc>) -> Result<Comment, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(comments::table)
            .values(&NewCommentRow {
                id: Uuid::new_v4(),
                product_id: comment.product_id.clone(),
                user_id: comment.user_id.clone(),
                username: comment.username.clone(),
                body: comment.text.clone(),
                created_at: at,
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list(&self) -> Result<Vec<Comment>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = comments::table
            .order(comments::created_at.desc())
            .select(CommentRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    fn list_by_product(&self, product_id: &str) -> Result<Vec<Comment>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = comments::table
            .filter(comments::product_id.eq(product_id))
            .order(comments::created_at.desc())
            .select(CommentRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted =
            diesel::delete(comments::table.filter(comments::id.eq(id))).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
