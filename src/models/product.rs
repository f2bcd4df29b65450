use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductMessage, ProductName, ProductPrice,
    ProductQuantity, TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub message: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Combine the row with its joined category name and image URLs into a
    /// domain [`DomainProduct`].
    pub fn into_domain(
        self,
        category_name: String,
        images: Vec<String>,
    ) -> Result<DomainProduct, TypeConstraintError> {
        Ok(DomainProduct {
            id: self.id.try_into()?,
            name: ProductName::new(self.name)?,
            description: ProductDescription::new(self.description)?,
            message: self.message.map(ProductMessage::new).transpose()?,
            quantity: ProductQuantity::new(self.quantity)?,
            price: ProductPrice::new(self.price)?,
            status: self.status.try_into()?,
            category_id: self.category_id.try_into()?,
            category_name: CategoryName::new(category_name)?,
            images: images
                .into_iter()
                .map(ImageUrl::new)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable form of [`Product`]. Status is fixed to `available` on insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub message: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            category_id: product.category_id.get(),
            name: product.name.into_inner(),
            description: product.description.into_inner(),
            message: product.message.map(ProductMessage::into_inner),
            quantity: product.quantity.get(),
            price: product.price.get(),
            status: crate::domain::types::AvailabilityStatus::Available.into(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Partial changeset for `products`; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChanges {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub updated_at: NaiveDateTime,
}
