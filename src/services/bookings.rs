use crate::domain::booking::{Booking, BookingUpdate, NewBooking};
use crate::domain::types::{BookingId, BookingStatus};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    BookingListQuery, BookingReader, BookingWriter, RepositoryError, ServiceReader,
};

use super::{ServiceError, ServiceResult};

/// Create a booking for a service on a given date.
///
/// A user can hold at most one confirmed booking per date; the partial
/// unique index backs this pre-check against concurrent requests.
pub fn create_booking<R>(booking: NewBooking, repo: &R) -> ServiceResult<Booking>
where
    R: ServiceReader + BookingReader + BookingWriter,
{
    match repo.get_service_by_id(booking.service_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::Validation(format!(
                "service {} does not exist",
                booking.service_id
            )));
        }
        Err(e) => {
            log::error!("Failed to get service: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.confirmed_booking_exists(booking.user_id, booking.booking_date) {
        Ok(false) => {}
        Ok(true) => {
            return Err(ServiceError::Duplicate(format!(
                "a confirmed booking already exists for {}",
                booking.booking_date
            )));
        }
        Err(e) => {
            log::error!("Failed to check booking: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.create_booking(&booking) {
        Ok(booking) => Ok(booking),
        Err(RepositoryError::Conflict(msg)) => Err(ServiceError::Duplicate(msg)),
        Err(e) => {
            log::error!("Failed to create booking: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a confirmed booking by id; a cancelled booking is not found.
pub fn get_booking<R>(booking_id: i32, repo: &R) -> ServiceResult<Booking>
where
    R: BookingReader,
{
    match find_confirmed(booking_id, repo)? {
        Some(booking) => Ok(booking),
        None => Err(ServiceError::NotFound),
    }
}

/// List bookings of every status, newest first.
pub fn get_all_bookings<R>(
    page: usize,
    per_page: Option<usize>,
    repo: &R,
) -> ServiceResult<Paginated<Booking>>
where
    R: BookingReader,
{
    let page = page.max(1);
    let per_page = per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    match repo.list_bookings(BookingListQuery::default().paginate(page, per_page)) {
        Ok((total, bookings)) => Ok(Paginated::new(bookings, page, per_page, total)),
        Err(e) => {
            log::error!("Failed to list bookings: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List every booking carrying the given status, newest first.
pub fn get_bookings_by_status<R>(status: BookingStatus, repo: &R) -> ServiceResult<Vec<Booking>>
where
    R: BookingReader,
{
    match repo.list_bookings(BookingListQuery::default().status(status)) {
        Ok((_total, bookings)) => Ok(bookings),
        Err(e) => {
            log::error!("Failed to list bookings by status: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Apply a partial update to a confirmed booking.
///
/// Moving a booking to another date is subject to the same one-per-date
/// rule as creation. A cancelled booking cannot be updated.
pub fn update_booking<R>(
    booking_id: i32,
    changes: BookingUpdate,
    repo: &R,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter,
{
    let Some(existing) = find_confirmed(booking_id, repo)? else {
        return Err(ServiceError::NotFound);
    };

    if let Some(new_date) = changes.booking_date
        && new_date != existing.booking_date
    {
        match repo.confirmed_booking_exists(existing.user_id, new_date) {
            Ok(false) => {}
            Ok(true) => {
                return Err(ServiceError::Duplicate(format!(
                    "a confirmed booking already exists for {new_date}"
                )));
            }
            Err(e) => {
                log::error!("Failed to check booking: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    match repo.update_booking(existing.id, &changes) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(RepositoryError::Conflict(msg)) => return Err(ServiceError::Duplicate(msg)),
        Err(e) => {
            log::error!("Failed to update booking: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_booking_by_id(existing.id) {
        Ok(Some(booking)) => Ok(booking),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to reload booking: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Cancel a confirmed booking; anything else is not found. The row is kept
/// with its new status rather than removed.
pub fn delete_booking<R>(booking_id: i32, repo: &R) -> ServiceResult<()>
where
    R: BookingReader + BookingWriter,
{
    let booking_id = match BookingId::new(booking_id) {
        Ok(booking_id) => booking_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.set_booking_status(booking_id, BookingStatus::Confirmed, BookingStatus::Cancelled) {
        Ok(affected) if affected > 0 => Ok(()),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update booking status: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn find_confirmed<R>(booking_id: i32, repo: &R) -> ServiceResult<Option<Booking>>
where
    R: BookingReader,
{
    let booking_id = match BookingId::new(booking_id) {
        Ok(booking_id) => booking_id,
        Err(_) => return Ok(None),
    };

    match repo.get_booking_by_id(booking_id) {
        Ok(Some(booking)) if booking.status == BookingStatus::Confirmed => Ok(Some(booking)),
        Ok(_) => Ok(None),
        Err(e) => {
            log::error!("Failed to get booking: {e}");
            Err(ServiceError::Internal)
        }
    }
}
