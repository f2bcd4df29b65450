use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::Utc;
use thiserror::Error;

use crate::assets::UploadFile;
use crate::domain::product::{NewProduct, ProductUpdate};
use crate::domain::types::{
    AvailabilityStatus, CategoryId, ProductDescription, ProductMessage, ProductName, ProductPrice,
    ProductQuantity, TypeConstraintError,
};

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),
    #[error("error reading uploaded file")]
    FileRead(#[from] std::io::Error),
}

fn read_upload(file: &mut TempFile) -> Result<UploadFile, ProductFormError> {
    let mut bytes = Vec::new();
    file.file.read_to_end(&mut bytes)?;
    Ok(UploadFile {
        file_name: file.file_name.clone().unwrap_or_default(),
        content_type: file
            .content_type
            .as_ref()
            .map(|mime| mime.to_string())
            .unwrap_or_default(),
        bytes,
    })
}

/// Multipart form for creating a product with its images.
#[derive(MultipartForm)]
pub struct CreateProductForm {
    pub name: Text<String>,
    pub description: Text<String>,
    pub message: Option<Text<String>>,
    pub quantity: Text<i32>,
    pub price: Text<f64>,
    pub category_id: Text<i32>,
    #[multipart(limit = "1MB")]
    pub images: Vec<TempFile>,
}

/// Validated payload carrying a [`NewProduct`] and its raw image files.
pub struct CreateProductPayload {
    pub product: NewProduct,
    pub images: Vec<UploadFile>,
}

impl TryFrom<CreateProductForm> for CreateProductPayload {
    type Error = ProductFormError;

    fn try_from(mut form: CreateProductForm) -> Result<Self, Self::Error> {
        // Quantity and price constraints fail here, before any store work.
        let quantity = ProductQuantity::new(form.quantity.into_inner())?;
        let price = ProductPrice::new(form.price.into_inner())?;
        let name = ProductName::new(form.name.into_inner())?;
        let description = ProductDescription::new(form.description.into_inner())?;
        let message = form
            .message
            .map(Text::into_inner)
            .filter(|message| !message.trim().is_empty())
            .map(ProductMessage::new)
            .transpose()?;
        let category_id = CategoryId::new(form.category_id.into_inner())?;

        let images = form
            .images
            .iter_mut()
            .map(read_upload)
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now().naive_utc();
        Ok(Self {
            product: NewProduct {
                name,
                description,
                message,
                quantity,
                price,
                category_id,
                created_at: now,
                updated_at: now,
            },
            images,
        })
    }
}

/// Multipart form for partially updating a product. Absent fields keep
/// their stored value; supplying any image replaces the whole image set.
#[derive(MultipartForm)]
pub struct UpdateProductForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub message: Option<Text<String>>,
    pub quantity: Option<Text<i32>>,
    pub price: Option<Text<f64>>,
    pub category_id: Option<Text<i32>>,
    pub status: Option<Text<String>>,
    #[multipart(limit = "1MB")]
    pub images: Vec<TempFile>,
}

/// Validated payload carrying a [`ProductUpdate`] and an optional image
/// replacement set.
pub struct UpdateProductPayload {
    pub changes: ProductUpdate,
    pub images: Option<Vec<UploadFile>>,
}

impl TryFrom<UpdateProductForm> for UpdateProductPayload {
    type Error = ProductFormError;

    fn try_from(mut form: UpdateProductForm) -> Result<Self, Self::Error> {
        let changes = ProductUpdate {
            name: form
                .name
                .map(Text::into_inner)
                .map(ProductName::new)
                .transpose()?,
            description: form
                .description
                .map(Text::into_inner)
                .map(ProductDescription::new)
                .transpose()?,
            message: form
                .message
                .map(Text::into_inner)
                .filter(|message| !message.trim().is_empty())
                .map(ProductMessage::new)
                .transpose()?,
            quantity: form
                .quantity
                .map(Text::into_inner)
                .map(ProductQuantity::new)
                .transpose()?,
            price: form
                .price
                .map(Text::into_inner)
                .map(ProductPrice::new)
                .transpose()?,
            category_id: form
                .category_id
                .map(Text::into_inner)
                .map(CategoryId::new)
                .transpose()?,
            status: form
                .status
                .map(Text::into_inner)
                .map(AvailabilityStatus::try_from)
                .transpose()?,
        };

        let images = if form.images.is_empty() {
            None
        } else {
            Some(
                form.images
                    .iter_mut()
                    .map(read_upload)
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(Self { changes, images })
    }
}

/// Multipart form for a standalone description-image upload.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "1MB")]
    pub image: TempFile,
}

impl UploadImageForm {
    pub fn into_upload(mut self) -> Result<UploadFile, ProductFormError> {
        read_upload(&mut self.image)
    }
}
