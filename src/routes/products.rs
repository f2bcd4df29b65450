use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::assets::HttpAssetStore;
use crate::domain::types::AvailabilityStatus;
use crate::forms::products::{
    CreateProductForm, CreateProductPayload, UpdateProductForm, UpdateProductPayload,
    UploadImageForm,
};
use crate::repository::DieselRepository;
use crate::routes::{created, error, ok, ok_message};
use crate::services::products::ProductListRequest;
use crate::services::{self, ServiceError};

#[derive(Deserialize, Debug)]
struct ListProductsQueryParams {
    page: Option<usize>,
    size: Option<usize>,
    status: Option<String>,
    search: Option<String>,
    is_ascending: Option<bool>,
    category_name: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

#[get("/product")]
pub async fn list_products(
    params: web::Query<ListProductsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();

    let status = match params
        .status
        .as_deref()
        .map(AvailabilityStatus::try_from)
        .transpose()
    {
        Ok(status) => status,
        Err(e) => return error(ServiceError::Validation(e.to_string())),
    };

    let request = ProductListRequest {
        page: params.page.unwrap_or(1),
        per_page: params.size,
        status,
        search: params.search,
        category: params.category_name,
        min_price: params.min_price,
        max_price: params.max_price,
        price_ascending: params.is_ascending,
    };

    match services::products::list_products(request, repo.get_ref()) {
        Ok(page) => ok("products listed", page),
        Err(e) => error(e),
    }
}

#[post("/product")]
pub async fn create_product(
    MultipartForm(form): MultipartForm<CreateProductForm>,
    repo: web::Data<DieselRepository>,
    assets: web::Data<HttpAssetStore>,
) -> impl Responder {
    let payload = match CreateProductPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return error(e.into()),
    };

    match services::products::create_product(payload, repo.get_ref(), assets.get_ref()).await {
        Ok(product) => created("product created", product),
        Err(e) => error(e),
    }
}

#[get("/product/{id}")]
pub async fn get_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::products::get_product(path.into_inner(), repo.get_ref()) {
        Ok(product) => ok("product found", product),
        Err(e) => error(e),
    }
}

#[derive(Deserialize, Debug)]
struct PageQueryParams {
    page: Option<usize>,
    size: Option<usize>,
}

#[get("/product/{id}/category")]
pub async fn list_products_by_category(
    path: web::Path<i32>,
    params: web::Query<PageQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::products::list_products_by_category(
        path.into_inner(),
        params.page.unwrap_or(1),
        params.size,
        repo.get_ref(),
    ) {
        Ok(page) => ok("products listed", page),
        Err(e) => error(e),
    }
}

#[put("/product/{id}")]
pub async fn update_product(
    path: web::Path<i32>,
    MultipartForm(form): MultipartForm<UpdateProductForm>,
    repo: web::Data<DieselRepository>,
    assets: web::Data<HttpAssetStore>,
) -> impl Responder {
    let payload = match UpdateProductPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return error(e.into()),
    };

    match services::products::update_product(
        path.into_inner(),
        payload,
        repo.get_ref(),
        assets.get_ref(),
    )
    .await
    {
        Ok(product) => ok("product updated", product),
        Err(e) => error(e),
    }
}

#[delete("/product/{id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::products::delete_product(path.into_inner(), repo.get_ref()) {
        Ok(()) => ok_message("product deleted"),
        Err(e) => error(e),
    }
}

#[post("/product/{id}/enable")]
pub async fn enable_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::products::enable_product(path.into_inner(), repo.get_ref()) {
        Ok(()) => ok_message("product enabled"),
        Err(e) => error(e),
    }
}

#[post("/product/description-image")]
pub async fn upload_description_image(
    MultipartForm(form): MultipartForm<UploadImageForm>,
    assets: web::Data<HttpAssetStore>,
) -> impl Responder {
    let file = match form.into_upload() {
        Ok(file) => file,
        Err(e) => return error(e.into()),
    };

    match services::products::upload_description_image(file, assets.get_ref()).await {
        Ok(url) => ok("image uploaded", url),
        Err(e) => error(e),
    }
}
