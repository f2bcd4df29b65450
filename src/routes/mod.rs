//! HTTP surface: thin handlers delegating to the service layer.
//!
//! Every endpoint answers with the same JSON envelope `{message, data}`;
//! outcomes are carried by real HTTP status codes.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod bookings;
pub mod categories;
pub mod products;
pub mod services;

/// Uniform JSON envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
}

pub(crate) fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        message: message.to_string(),
        data: Some(data),
    })
}

pub(crate) fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse {
        message: message.to_string(),
        data: Some(data),
    })
}

pub(crate) fn ok_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()> {
        message: message.to_string(),
        data: None,
    })
}

pub(crate) fn error(e: ServiceError) -> HttpResponse {
    let body = ApiResponse::<()> {
        message: e.to_string(),
        data: None,
    };
    match e {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Validation(_) | ServiceError::Duplicate(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Upload(_) => HttpResponse::BadGateway().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// Register every endpoint; mounted under `/api/v1` by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products::list_products)
        .service(products::create_product)
        .service(products::upload_description_image)
        .service(products::get_product)
        .service(products::list_products_by_category)
        .service(products::update_product)
        .service(products::delete_product)
        .service(products::enable_product)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::get_category)
        .service(categories::update_category)
        .service(services::list_services)
        .service(services::create_service)
        .service(services::get_service)
        .service(services::update_service)
        .service(services::delete_service)
        .service(bookings::list_bookings)
        .service(bookings::create_booking)
        .service(bookings::list_bookings_by_status)
        .service(bookings::get_booking)
        .service(bookings::update_booking)
        .service(bookings::delete_booking);
}
