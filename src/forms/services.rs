use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::service::{NewService, ServiceUpdate};
use crate::domain::types::{
    ProductPrice, ServiceDuration, ServiceName, TypeConstraintError,
};

#[derive(Debug, Error)]
pub enum ServiceFormError {
    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),
}

#[derive(Deserialize, Validate)]
pub struct CreateServiceForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
}

impl TryFrom<CreateServiceForm> for NewService {
    type Error = ServiceFormError;

    fn try_from(form: CreateServiceForm) -> Result<Self, Self::Error> {
        let now = Utc::now().naive_utc();
        Ok(Self {
            name: ServiceName::new(form.name)?,
            description: form.description,
            price: ProductPrice::new(form.price)?,
            duration_minutes: ServiceDuration::new(form.duration_minutes)?,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateServiceForm {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
}

impl TryFrom<UpdateServiceForm> for ServiceUpdate {
    type Error = ServiceFormError;

    fn try_from(form: UpdateServiceForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.map(ServiceName::new).transpose()?,
            description: form.description,
            price: form.price.map(ProductPrice::new).transpose()?,
            duration_minutes: form.duration_minutes.map(ServiceDuration::new).transpose()?,
        })
    }
}
