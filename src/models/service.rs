use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::{NewService as DomainNewService, Service as DomainService};
use crate::domain::types::{
    AvailabilityStatus, ProductPrice, ServiceDuration, ServiceName, TypeConstraintError,
};

/// Diesel model representing the `services` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::services)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Service`]. Status is fixed to `available` on insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial changeset for `services`; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::services)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: service.id.try_into()?,
            name: ServiceName::new(service.name)?,
            description: service.description,
            price: ProductPrice::new(service.price)?,
            duration_minutes: ServiceDuration::new(service.duration_minutes)?,
            status: service.status.try_into()?,
            created_at: service.created_at,
            updated_at: service.updated_at,
        })
    }
}

impl From<DomainNewService> for NewService {
    fn from(service: DomainNewService) -> Self {
        Self {
            name: service.name.into_inner(),
            description: service.description,
            price: service.price.get(),
            duration_minutes: service.duration_minutes.get(),
            status: AvailabilityStatus::Available.into(),
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}
