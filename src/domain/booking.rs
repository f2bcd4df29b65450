use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BookingContent, BookingId, BookingStatus, ServiceId, UserId};

/// A service booking made by a user for a specific date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub booking_date: NaiveDate,
    pub content: BookingContent,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to insert a new [`Booking`].
///
/// Bookings always start out [`BookingStatus::Confirmed`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBooking {
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub booking_date: NaiveDate,
    pub content: BookingContent,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update applied to a confirmed booking. `None` fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingUpdate {
    pub booking_date: Option<NaiveDate>,
    pub content: Option<BookingContent>,
    pub status: Option<BookingStatus>,
}
