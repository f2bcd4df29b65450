use actix_web::{Responder, get, post, put, web};
use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::forms::categories::{AddCategoryForm, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error, ok};
use crate::services::{self, ServiceError};

#[derive(Deserialize, Debug)]
struct PageQueryParams {
    page: Option<usize>,
    size: Option<usize>,
}

#[get("/category")]
pub async fn list_categories(
    params: web::Query<PageQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::categories::list_categories(
        params.page.unwrap_or(1),
        params.size,
        repo.get_ref(),
    ) {
        Ok(page) => ok("categories listed", page),
        Err(e) => error(e),
    }
}

#[post("/category")]
pub async fn create_category(
    form: web::Json<AddCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return error(ServiceError::Validation(e.to_string()));
    }

    let category = match NewCategory::try_from(form) {
        Ok(category) => category,
        Err(e) => return error(e.into()),
    };

    match services::categories::create_category(category, repo.get_ref()) {
        Ok(category) => created("category created", category),
        Err(e) => error(e),
    }
}

#[get("/category/{id}")]
pub async fn get_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::categories::get_category(path.into_inner(), repo.get_ref()) {
        Ok(category) => ok("category found", category),
        Err(e) => error(e),
    }
}

#[put("/category/{id}")]
pub async fn update_category(
    path: web::Path<i32>,
    form: web::Json<UpdateCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return error(ServiceError::Validation(e.to_string()));
    }

    let name = match form.into_name() {
        Ok(name) => name,
        Err(e) => return error(e.into()),
    };

    match services::categories::update_category(path.into_inner(), name, repo.get_ref()) {
        Ok(category) => ok("category updated", category),
        Err(e) => error(e),
    }
}
