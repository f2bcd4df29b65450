use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, TypeConstraintError};

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),
}

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

impl TryFrom<AddCategoryForm> for NewCategory {
    type Error = CategoryFormError;

    fn try_from(form: AddCategoryForm) -> Result<Self, Self::Error> {
        let now = Utc::now().naive_utc();
        Ok(Self {
            name: CategoryName::new(form.name)?,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

impl UpdateCategoryForm {
    pub fn into_name(self) -> Result<CategoryName, CategoryFormError> {
        Ok(CategoryName::new(self.name)?)
    }
}
