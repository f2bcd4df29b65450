use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::booking::{BookingUpdate, NewBooking};
use crate::domain::types::{
    BookingContent, BookingStatus, ServiceId, TypeConstraintError, UserId,
};

#[derive(Debug, Error)]
pub enum BookingFormError {
    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),
}

#[derive(Deserialize, Validate)]
pub struct CreateBookingForm {
    pub user_id: i32,
    pub service_id: i32,
    pub booking_date: NaiveDate,
    #[validate(length(min = 1))]
    pub content: String,
}

impl TryFrom<CreateBookingForm> for NewBooking {
    type Error = BookingFormError;

    fn try_from(form: CreateBookingForm) -> Result<Self, Self::Error> {
        let now = Utc::now().naive_utc();
        Ok(Self {
            user_id: UserId::new(form.user_id)?,
            service_id: ServiceId::new(form.service_id)?,
            booking_date: form.booking_date,
            content: BookingContent::new(form.content)?,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateBookingForm {
    pub booking_date: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<UpdateBookingForm> for BookingUpdate {
    type Error = BookingFormError;

    fn try_from(form: UpdateBookingForm) -> Result<Self, Self::Error> {
        Ok(Self {
            booking_date: form.booking_date,
            content: form.content.map(BookingContent::new).transpose()?,
            status: form.status.map(BookingStatus::try_from).transpose()?,
        })
    }
}
