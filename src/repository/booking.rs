use chrono::{NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::booking::{Booking, BookingUpdate, NewBooking};
use crate::domain::types::{BookingContent, BookingId, BookingStatus, UserId};
use crate::models::booking::{
    Booking as DbBooking, BookingChanges as DbBookingChanges, NewBooking as DbNewBooking,
};
use crate::repository::{
    BookingListQuery, BookingReader, BookingWriter, DieselRepository, RepositoryResult,
};

impl BookingReader for DieselRepository {
    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = bookings::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(status) = query.status {
                items = items.filter(bookings::status.eq(status.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((bookings::created_at.desc(), bookings::id.desc()))
            .load::<DbBooking>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Booking>, _>>()?;

        Ok((total, items))
    }

    fn get_booking_by_id(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let booking = bookings::table
            .filter(bookings::id.eq(id.get()))
            .first::<DbBooking>(&mut conn)
            .optional()?;

        let booking = booking.map(TryInto::try_into).transpose()?;
        Ok(booking)
    }

    fn confirmed_booking_exists(
        &self,
        user_id: UserId,
        booking_date: NaiveDate,
    ) -> RepositoryResult<bool> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let total = bookings::table
            .filter(bookings::user_id.eq(user_id.get()))
            .filter(bookings::booking_date.eq(booking_date))
            .filter(bookings::status.eq(BookingStatus::Confirmed.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total > 0)
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_booking: DbNewBooking = booking.clone().into();

        let created: DbBooking = diesel::insert_into(bookings::table)
            .values(db_booking)
            .get_result(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_booking(&self, id: BookingId, changes: &BookingUpdate) -> RepositoryResult<usize> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let db_changes = DbBookingChanges {
            booking_date: changes.booking_date,
            content: changes.content.clone().map(BookingContent::into_inner),
            status: changes.status.map(String::from),
            updated_at: Utc::now().naive_utc(),
        };

        let affected = diesel::update(bookings::table.find(id.get()))
            .set(&db_changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> RepositoryResult<usize> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id.get()))
                .filter(bookings::status.eq(from.as_str())),
        )
        .set((
            bookings::status.eq(to.as_str()),
            bookings::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
