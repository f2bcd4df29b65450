use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AvailabilityStatus, ProductPrice, ServiceDuration, ServiceId, ServiceName,
};

/// A bookable service offering (e.g. tank maintenance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: ServiceName,
    pub description: Option<String>,
    pub price: ProductPrice,
    pub duration_minutes: ServiceDuration,
    pub status: AvailabilityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A service as it enters the system; status is set on insert.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: ServiceName,
    pub description: Option<String>,
    pub price: ProductPrice,
    pub duration_minutes: ServiceDuration,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update to a service; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub name: Option<ServiceName>,
    pub description: Option<String>,
    pub price: Option<ProductPrice>,
    pub duration_minutes: Option<ServiceDuration>,
}
