use actix_web::{Responder, delete, get, post, put, web};
use serde::Deserialize;
use validator::Validate;

use crate::domain::booking::{BookingUpdate, NewBooking};
use crate::domain::types::BookingStatus;
use crate::forms::bookings::{CreateBookingForm, UpdateBookingForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error, ok, ok_message};
use crate::services::{self, ServiceError};

#[derive(Deserialize, Debug)]
struct PageQueryParams {
    page: Option<usize>,
    size: Option<usize>,
}

#[post("/booking")]
pub async fn create_booking(
    form: web::Json<CreateBookingForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return error(ServiceError::Validation(e.to_string()));
    }

    let booking = match NewBooking::try_from(form) {
        Ok(booking) => booking,
        Err(e) => return error(e.into()),
    };

    match services::bookings::create_booking(booking, repo.get_ref()) {
        Ok(booking) => created("booking created", booking),
        Err(e) => error(e),
    }
}

#[get("/booking")]
pub async fn list_bookings(
    params: web::Query<PageQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::bookings::get_all_bookings(
        params.page.unwrap_or(1),
        params.size,
        repo.get_ref(),
    ) {
        Ok(page) => ok("bookings listed", page),
        Err(e) => error(e),
    }
}

#[get("/booking/status/{status}")]
pub async fn list_bookings_by_status(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let status = match BookingStatus::try_from(path.into_inner().as_str()) {
        Ok(status) => status,
        Err(e) => return error(ServiceError::Validation(e.to_string())),
    };

    match services::bookings::get_bookings_by_status(status, repo.get_ref()) {
        Ok(bookings) => ok("bookings listed", bookings),
        Err(e) => error(e),
    }
}

#[get("/booking/{id}")]
pub async fn get_booking(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::bookings::get_booking(path.into_inner(), repo.get_ref()) {
        Ok(booking) => ok("booking found", booking),
        Err(e) => error(e),
    }
}

#[put("/booking/{id}")]
pub async fn update_booking(
    path: web::Path<i32>,
    form: web::Json<UpdateBookingForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return error(ServiceError::Validation(e.to_string()));
    }

    let changes = match BookingUpdate::try_from(form) {
        Ok(changes) => changes,
        Err(e) => return error(e.into()),
    };

    match services::bookings::update_booking(path.into_inner(), changes, repo.get_ref()) {
        Ok(booking) => ok("booking updated", booking),
        Err(e) => error(e),
    }
}

#[delete("/booking/{id}")]
pub async fn delete_booking(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::bookings::delete_booking(path.into_inner(), repo.get_ref()) {
        Ok(()) => ok_message("booking cancelled"),
        Err(e) => error(e),
    }
}
