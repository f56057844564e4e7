use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub discount_percentage: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub discounted_price: BigDecimal,
}

/// Create/update payload. The discounted price is always derived.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[serde(deserialize_with = "money::deserialize")]
    #[schema(value_type = String)]
    pub discount_percentage: BigDecimal,
}

/// Product fields ready to be written, with the discount clamped and the
/// discounted price computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: BigDecimal,
    pub discount_percentage: BigDecimal,
    pub discounted_price: BigDecimal,
}

impl ProductInput {
    pub fn into_draft(self) -> Result<ProductDraft, DomainError> {
        require(&self.name, "Product name is required")?;
        require(&self.description, "Product description is required")?;
        require(&self.image, "Product image is required")?;
        if self.price < BigDecimal::zero() {
            return Err(DomainError::InvalidInput(
                "Product price cannot be negative".to_string(),
            ));
        }

        let hundred = BigDecimal::from(100);
        let discount_percentage = if self.discount_percentage < BigDecimal::zero() {
            BigDecimal::zero()
        } else if self.discount_percentage > hundred {
            hundred.clone()
        } else {
            self.discount_percentage
        };
        let price = cents(&self.price);
        let discount_percentage = cents(&discount_percentage);
        let discount_amount = &(&price * &discount_percentage) / &hundred;
        let discounted_price = cents(&(&price - &discount_amount));

        Ok(ProductDraft {
            name: self.name,
            description: self.description,
            image: self.image,
            price,
            discount_percentage,
            discounted_price,
        })
    }
}

/// Matches the NUMERIC(12,2) / NUMERIC(5,2) columns, so both stores return
/// the same figures.
fn cents(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

fn require(value: &str, message: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(message.to_string()));
    }
    Ok(())
}
