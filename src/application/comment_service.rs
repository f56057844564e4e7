use std::sync::Arc;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::errors::DomainError;
use crate::domain::ports::CommentRepository;

use super::{now, parse_id};

#[derive(Clone)]
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    pub fn list_comments(&self) -> Result<Vec<Comment>, DomainError> {
        self.repo.list()
    }

    pub fn list_product_comments(&self, product_id: &str) -> Result<Vec<Comment>, DomainError> {
        self.repo.list_by_product(product_id.trim())
    }

    pub fn create_comment(&self, comment: NewComment) -> Result<Comment, DomainError> {
        comment.validate()?;
        self.repo.insert(&comment, now())
    }

    pub fn delete_comment(&self, comment_id: &str) -> Result<(), DomainError> {
        let id = parse_id(comment_id).ok_or(DomainError::NotFound("Comment"))?;
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Comment"));
        }
        Ok(())
    }
}
