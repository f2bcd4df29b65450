use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::booking::{Booking as DomainBooking, NewBooking as DomainNewBooking};
use crate::domain::types::{BookingContent, BookingStatus, TypeConstraintError};

/// Diesel model representing the `bookings` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub service_id: i32,
    pub booking_date: NaiveDate,
    pub content: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Booking`]. Status is fixed to `confirmed` on insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub user_id: i32,
    pub service_id: i32,
    pub booking_date: NaiveDate,
    pub content: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial changeset for `bookings`; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::bookings)]
pub struct BookingChanges {
    pub booking_date: Option<NaiveDate>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Booking> for DomainBooking {
    type Error = TypeConstraintError;

    fn try_from(booking: Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: booking.id.try_into()?,
            user_id: booking.user_id.try_into()?,
            service_id: booking.service_id.try_into()?,
            booking_date: booking.booking_date,
            content: BookingContent::new(booking.content)?,
            status: booking.status.try_into()?,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        })
    }
}

impl From<DomainNewBooking> for NewBooking {
    fn from(booking: DomainNewBooking) -> Self {
        Self {
            user_id: booking.user_id.get(),
            service_id: booking.service_id.get(),
            booking_date: booking.booking_date,
            content: booking.content.into_inner(),
            status: BookingStatus::Confirmed.into(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
