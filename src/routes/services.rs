use actix_web::{Responder, delete, get, post, put, web};
use serde::Deserialize;
use validator::Validate;

use crate::domain::service::{NewService, ServiceUpdate};
use crate::forms::services::{CreateServiceForm, UpdateServiceForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error, ok, ok_message};
use crate::services::{self, ServiceError};

#[derive(Deserialize, Debug)]
struct PageQueryParams {
    page: Option<usize>,
    size: Option<usize>,
}

#[post("/service")]
pub async fn create_service(
    form: web::Json<CreateServiceForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return error(ServiceError::Validation(e.to_string()));
    }

    let service = match NewService::try_from(form) {
        Ok(service) => service,
        Err(e) => return error(e.into()),
    };

    match services::services::create_service(service, repo.get_ref()) {
        Ok(service) => created("service created", service),
        Err(e) => error(e),
    }
}

#[get("/service")]
pub async fn list_services(
    params: web::Query<PageQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::services::list_services(params.page.unwrap_or(1), params.size, repo.get_ref())
    {
        Ok(page) => ok("services listed", page),
        Err(e) => error(e),
    }
}

#[get("/service/{id}")]
pub async fn get_service(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::services::get_service(path.into_inner(), repo.get_ref()) {
        Ok(service) => ok("service found", service),
        Err(e) => error(e),
    }
}

#[put("/service/{id}")]
pub async fn update_service(
    path: web::Path<i32>,
    form: web::Json<UpdateServiceForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return error(ServiceError::Validation(e.to_string()));
    }

    let changes = match ServiceUpdate::try_from(form) {
        Ok(changes) => changes,
        Err(e) => return error(e.into()),
    };

    match services::services::update_service(path.into_inner(), changes, repo.get_ref()) {
        Ok(service) => ok("service updated", service),
        Err(e) => error(e),
    }
}

#[delete("/service/{id}")]
pub async fn delete_service(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::services::delete_service(path.into_inner(), repo.get_ref()) {
        Ok(()) => ok_message("service deleted"),
        Err(e) => error(e),
    }
}
