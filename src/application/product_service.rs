use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductInput};

use super::parse_id;

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list()
    }

    pub fn create_product(&self, input: ProductInput) -> Result<Product, DomainError> {
        let draft = input.into_draft()?;
        let product = self.repo.insert(&draft)?;
        log::info!("Created product {} ({})", product.name, product.id);
        Ok(product)
    }

    pub fn get_product(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
        match parse_id(product_id) {
            Some(id) => self.repo.find_by_id(id),
            None => Ok(None),
        }
    }

    pub fn update_product(&self, product_id: &str, input: ProductInput) -> Result<(), DomainError> {
        let draft = input.into_draft()?;
        let id = parse_id(product_id).ok_or(DomainError::NotFound("Product"))?;
        if !self.repo.update(id, &draft)? {
            return Err(DomainError::NotFound("Product"));
        }
        Ok(())
    }

    pub fn delete_product(&self, product_id: &str) -> Result<(), DomainError> {
        let id = parse_id(product_id).ok_or(DomainError::NotFound("Product"))?;
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Product"));
        }
        log::info!("Deleted product {}", id);
        Ok(())
    }
}
