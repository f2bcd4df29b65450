use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AvailabilityStatus, CategoryId, CategoryName, ImageUrl, ProductDescription, ProductId,
    ProductMessage, ProductName, ProductPrice, ProductQuantity,
};

/// A catalog product with its resolved category name and image URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: ProductDescription,
    pub message: Option<ProductMessage>,
    pub quantity: ProductQuantity,
    pub price: ProductPrice,
    pub status: AvailabilityStatus,
    pub category_id: CategoryId,
    pub category_name: CategoryName,
    pub images: Vec<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to insert a new [`Product`].
///
/// New products always start out [`AvailabilityStatus::Available`]; image
/// URLs are persisted alongside in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: ProductDescription,
    pub message: Option<ProductMessage>,
    pub quantity: ProductQuantity,
    pub price: ProductPrice,
    pub category_id: CategoryId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update applied to an existing product. `None` fields keep their
/// current value; image replacement is handled separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<ProductName>,
    pub description: Option<ProductDescription>,
    pub message: Option<ProductMessage>,
    pub quantity: Option<ProductQuantity>,
    pub price: Option<ProductPrice>,
    pub category_id: Option<CategoryId>,
    pub status: Option<AvailabilityStatus>,
}
