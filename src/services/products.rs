use crate::assets::{AssetStore, UploadFile, validate_images};
use crate::domain::product::Product;
use crate::domain::types::{
    AvailabilityStatus, CategoryId, ImageUrl, ProductDescription, ProductId, ProductMessage,
};
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    CategoryReader, ProductListQuery, ProductReader, ProductSort, ProductWriter, RepositoryError,
};

use super::{ServiceError, ServiceResult};

/// Listing parameters as they arrive from the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ProductListRequest {
    pub page: usize,
    pub per_page: Option<usize>,
    /// Restrict to one status; absent means the listing is
    /// status-independent and includes soft-deleted products.
    pub status: Option<AvailabilityStatus>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// `Some(true)` sorts by price ascending, `Some(false)` descending,
    /// `None` keeps the newest-first default.
    pub price_ascending: Option<bool>,
}

fn map_repository_error(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::Conflict(msg) => ServiceError::Duplicate(msg),
        e => {
            log::error!("Repository error: {e}");
            ServiceError::Internal
        }
    }
}

/// Reject a batch of uploads when any file violates the image constraints,
/// reporting every offending file at once.
fn check_uploads(files: &[UploadFile]) -> ServiceResult<()> {
    let failures = validate_images(files);
    if failures.is_empty() {
        return Ok(());
    }
    let message = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(ServiceError::Validation(message))
}

/// Upload every file to the asset store, aggregating failures. Nothing is
/// persisted to the catalog when any upload fails.
async fn upload_images<A>(files: &[UploadFile], assets: &A) -> ServiceResult<Vec<ImageUrl>>
where
    A: AssetStore,
{
    let mut urls = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for file in files {
        match assets.upload(file).await {
            Ok(url) => urls.push(url),
            Err(e) => failures.push(format!("{}: {e}", file.file_name)),
        }
    }
    if failures.is_empty() {
        Ok(urls)
    } else {
        Err(ServiceError::Upload(failures.join("; ")))
    }
}

/// Core business logic for the catalog listing.
///
/// Filters compose conjunctively and only constrain when supplied: with no
/// status filter the listing covers available and unavailable products
/// alike. The returned page carries the filtered total, so a page past the
/// end is an empty page rather than an error.
pub fn list_products<R>(request: ProductListRequest, repo: &R) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader,
{
    let page = request.page.max(1);
    let per_page = request.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    let mut query = ProductListQuery::default().paginate(page, per_page);

    if let Some(status) = request.status {
        query = query.status(status);
    }
    if let Some(search) = request
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.search(search);
    }
    if let Some(category) = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.category_name_eq(category);
    }
    if let Some(min_price) = request.min_price {
        query = query.min_price(min_price);
    }
    if let Some(max_price) = request.max_price {
        query = query.max_price(max_price);
    }
    query = query.sort(match request.price_ascending {
        Some(true) => ProductSort::PriceAscending,
        Some(false) => ProductSort::PriceDescending,
        None => ProductSort::NewestFirst,
    });

    match repo.list_products(query) {
        Ok((total, products)) => Ok(Paginated::new(products, page, per_page, total)),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List the available products of one category.
pub fn list_products_by_category<R>(
    category_id: i32,
    page: usize,
    per_page: Option<usize>,
    repo: &R,
) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + CategoryReader,
{
    let category_id = match CategoryId::new(category_id) {
        Ok(category_id) => category_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let page = page.max(1);
    let per_page = per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    let query = ProductListQuery::default()
        .status(AvailabilityStatus::Available)
        .category(category_id)
        .paginate(page, per_page);

    match repo.list_products(query) {
        Ok((total, products)) => Ok(Paginated::new(products, page, per_page, total)),
        Err(e) => {
            log::error!("Failed to list products by category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a single product by id regardless of its availability.
pub fn get_product<R>(product_id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a product together with its images.
///
/// The category must exist and the name must be free before any image is
/// validated or uploaded; the storage-level unique index still backs the
/// name pre-check against concurrent creates.
pub async fn create_product<R, A>(
    payload: CreateProductPayload,
    repo: &R,
    assets: &A,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader,
    A: AssetStore,
{
    let mut product = payload.product;

    match repo.get_category_by_id(product.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::Validation(format!(
                "category {} does not exist",
                product.category_id
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.product_name_exists(&product.name, None) {
        Ok(false) => {}
        Ok(true) => {
            return Err(ServiceError::Duplicate(format!(
                "product '{}' already exists",
                product.name
            )));
        }
        Err(e) => {
            log::error!("Failed to check product name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    check_uploads(&payload.images)?;

    // Stored rich text is sanitized; stripping markup may leave nothing,
    // which the non-empty constraint turns into a validation error.
    product.description = ProductDescription::new(ammonia::clean(product.description.as_str()))?;
    product.message = product
        .message
        .map(|message| ProductMessage::new(ammonia::clean(message.as_str())))
        .transpose()?;

    let urls = upload_images(&payload.images, assets).await?;

    repo.create_product(&product, &urls)
        .map_err(map_repository_error)
}

/// Apply a partial update to a product, optionally replacing its images.
///
/// Replacement images are uploaded before the old rows are dropped, so a
/// failed upload leaves the stored product untouched.
pub async fn update_product<R, A>(
    product_id: i32,
    payload: UpdateProductPayload,
    repo: &R,
    assets: &A,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader,
    A: AssetStore,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_product_by_id(product_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let mut changes = payload.changes;

    if let Some(category_id) = changes.category_id {
        match repo.get_category_by_id(category_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(ServiceError::Validation(format!(
                    "category {category_id} does not exist"
                )));
            }
            Err(e) => {
                log::error!("Failed to get category: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    if let Some(name) = &changes.name {
        match repo.product_name_exists(name, Some(product_id)) {
            Ok(false) => {}
            Ok(true) => {
                return Err(ServiceError::Duplicate(format!(
                    "product '{name}' already exists"
                )));
            }
            Err(e) => {
                log::error!("Failed to check product name: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    changes.description = changes
        .description
        .map(|description| ProductDescription::new(ammonia::clean(description.as_str())))
        .transpose()?;
    changes.message = changes
        .message
        .map(|message| ProductMessage::new(ammonia::clean(message.as_str())))
        .transpose()?;

    let urls = match &payload.images {
        Some(files) => {
            check_uploads(files)?;
            Some(upload_images(files, assets).await?)
        }
        None => None,
    };

    match repo.update_product(product_id, &changes, urls.as_deref()) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => return Err(map_repository_error(e)),
    }

    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to reload product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Soft-delete a product by marking it unavailable.
///
/// Only an available product can be deleted; repeating the call reports
/// not-found instead of succeeding silently.
pub fn delete_product<R>(product_id: i32, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    transition_product(
        product_id,
        AvailabilityStatus::Available,
        AvailabilityStatus::Unavailable,
        repo,
    )
}

/// Bring a previously deleted product back into the catalog.
pub fn enable_product<R>(product_id: i32, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    transition_product(
        product_id,
        AvailabilityStatus::Unavailable,
        AvailabilityStatus::Available,
        repo,
    )
}

fn transition_product<R>(
    product_id: i32,
    from: AvailabilityStatus,
    to: AvailabilityStatus,
    repo: &R,
) -> ServiceResult<()>
where
    R: ProductWriter,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    // A product that is absent or not in the expected status looks the
    // same to the caller: nothing to transition.
    match repo.set_product_status(product_id, from, to) {
        Ok(affected) if affected > 0 => Ok(()),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update product status: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Upload a single rich-text description image and return its URL.
pub async fn upload_description_image<A>(file: UploadFile, assets: &A) -> ServiceResult<ImageUrl>
where
    A: AssetStore,
{
    check_uploads(std::slice::from_ref(&file))?;
    upload_images(std::slice::from_ref(&file), assets)
        .await
        .map(|mut urls| urls.remove(0))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::assets::test::TestAssetStore;
    use crate::domain::category::Category;
    use crate::domain::product::NewProduct;
    use crate::domain::types::{
        CategoryId, CategoryName, ProductName, ProductPrice, ProductQuantity,
    };
    use crate::repository::test::TestRepository;

    fn category(id: i32, name: &str) -> Category {
        let now = Utc::now().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn new_product(name: &str, price: f64, category_id: i32) -> NewProduct {
        let now = Utc::now().naive_utc();
        NewProduct {
            name: ProductName::new(name).unwrap(),
            description: ProductDescription::new("A fine specimen").unwrap(),
            message: None,
            quantity: ProductQuantity::new(3).unwrap(),
            price: ProductPrice::new(price).unwrap(),
            category_id: CategoryId::new(category_id).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn png(name: &str) -> UploadFile {
        UploadFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0u8; 64],
        }
    }

    fn payload(product: NewProduct, images: Vec<UploadFile>) -> CreateProductPayload {
        CreateProductPayload { product, images }
    }

    #[actix_web::test]
    async fn create_product_persists_uploaded_image_urls() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();

        let created = create_product(
            payload(new_product("Guppy", 4.5, 1), vec![png("guppy.png")]),
            &repo,
            &assets,
        )
        .await
        .unwrap();

        assert_eq!(created.images.len(), 1);
        assert_eq!(created.status, AvailabilityStatus::Available);
        assert_eq!(created.category_name, "Fish");
        assert_eq!(assets.upload_count(), 1);
    }

    #[actix_web::test]
    async fn create_product_rejects_unknown_category() {
        let repo = TestRepository::default();
        let assets = TestAssetStore::new();

        let err = create_product(payload(new_product("Guppy", 4.5, 9), vec![]), &repo, &assets)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(assets.upload_count(), 0);
    }

    #[actix_web::test]
    async fn create_product_rejects_duplicate_name() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();

        create_product(payload(new_product("Guppy", 4.5, 1), vec![]), &repo, &assets)
            .await
            .unwrap();
        let err = create_product(payload(new_product("Guppy", 9.0, 1), vec![]), &repo, &assets)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Duplicate(_)));
    }

    #[actix_web::test]
    async fn create_product_reports_all_invalid_images() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();

        let bad = UploadFile {
            file_name: "doc.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0u8; 10],
        };
        let empty = UploadFile {
            file_name: "empty.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![],
        };

        let err = create_product(
            payload(new_product("Guppy", 4.5, 1), vec![bad, empty]),
            &repo,
            &assets,
        )
        .await
        .unwrap_err();

        match err {
            ServiceError::Validation(message) => assert!(message.contains(';')),
            other => panic!("expected validation error, got {other:?}"),
        }
        // Nothing may reach the store when validation fails.
        assert_eq!(assets.upload_count(), 0);
    }

    #[actix_web::test]
    async fn create_product_surfaces_upload_failures() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::failing();

        let err = create_product(
            payload(new_product("Guppy", 4.5, 1), vec![png("guppy.png")]),
            &repo,
            &assets,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Upload(_)));
        let (total, _) = repo.list_products(ProductListQuery::default()).unwrap();
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn create_product_sanitizes_description_markup() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();

        let mut product = new_product("Guppy", 4.5, 1);
        product.description =
            ProductDescription::new("<script>alert(1)</script>hardy fish").unwrap();

        let created = create_product(payload(product, vec![]), &repo, &assets)
            .await
            .unwrap();

        assert!(!created.description.as_str().contains("script"));
        assert!(created.description.as_str().contains("hardy fish"));
    }

    #[actix_web::test]
    async fn unfiltered_listing_includes_unavailable_products() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();

        let kept = create_product(payload(new_product("Guppy", 4.5, 1), vec![]), &repo, &assets)
            .await
            .unwrap();
        let dropped =
            create_product(payload(new_product("Tetra", 3.0, 1), vec![]), &repo, &assets)
                .await
                .unwrap();
        delete_product(dropped.id.get(), &repo).unwrap();

        // No status filter: the soft-deleted product still shows up.
        let page = list_products(ProductListRequest::default(), &repo).unwrap();
        assert_eq!(page.total, 2);

        // An explicit status filter narrows the listing.
        let page = list_products(
            ProductListRequest {
                status: Some(AvailabilityStatus::Available),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, kept.id);
    }

    #[actix_web::test]
    async fn listing_filters_by_price_range_and_sorts() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();

        for (name, price) in [("Guppy", 4.5), ("Tetra", 3.0), ("Discus", 40.0)] {
            create_product(payload(new_product(name, price, 1), vec![]), &repo, &assets)
                .await
                .unwrap();
        }

        let page = list_products(
            ProductListRequest {
                min_price: Some(3.5),
                price_ascending: Some(true),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();

        assert_eq!(page.total, 2);
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Guppy", "Discus"]);
    }

    #[actix_web::test]
    async fn page_past_the_end_is_empty_not_an_error() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();
        create_product(payload(new_product("Guppy", 4.5, 1), vec![]), &repo, &assets)
            .await
            .unwrap();

        let page = list_products(
            ProductListRequest {
                page: 99,
                ..Default::default()
            },
            &repo,
        )
        .unwrap();

        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }

    #[actix_web::test]
    async fn category_listing_is_scoped_to_the_category() {
        let repo = TestRepository::new(
            vec![category(1, "Fish"), category(2, "Plants")],
            vec![],
            vec![],
            vec![],
        );
        let assets = TestAssetStore::new();
        create_product(payload(new_product("Guppy", 4.5, 1), vec![]), &repo, &assets)
            .await
            .unwrap();
        create_product(payload(new_product("Anubias", 7.0, 2), vec![]), &repo, &assets)
            .await
            .unwrap();

        let page = list_products_by_category(1, 1, None, &repo).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Guppy");

        assert_eq!(
            list_products_by_category(9, 1, None, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[actix_web::test]
    async fn update_replaces_images_and_fields() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();
        let created = create_product(
            payload(new_product("Guppy", 4.5, 1), vec![png("old.png")]),
            &repo,
            &assets,
        )
        .await
        .unwrap();

        let update = UpdateProductPayload {
            changes: crate::domain::product::ProductUpdate {
                price: Some(ProductPrice::new(5.5).unwrap()),
                ..Default::default()
            },
            images: Some(vec![png("new1.png"), png("new2.png")]),
        };
        let updated = update_product(created.id.get(), update, &repo, &assets)
            .await
            .unwrap();

        assert_eq!(updated.price, 5.5);
        assert_eq!(updated.images.len(), 2);
    }

    #[actix_web::test]
    async fn update_keeps_images_when_upload_fails() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let good_store = TestAssetStore::new();
        let created = create_product(
            payload(new_product("Guppy", 4.5, 1), vec![png("old.png")]),
            &repo,
            &good_store,
        )
        .await
        .unwrap();

        let update = UpdateProductPayload {
            changes: Default::default(),
            images: Some(vec![png("new.png")]),
        };
        let err = update_product(created.id.get(), update, &repo, &TestAssetStore::failing())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Upload(_)));
        let stored = get_product(created.id.get(), &repo).unwrap();
        assert_eq!(stored.images, created.images);
    }

    #[actix_web::test]
    async fn update_rejects_name_taken_by_another_product() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();
        create_product(payload(new_product("Guppy", 4.5, 1), vec![]), &repo, &assets)
            .await
            .unwrap();
        let other = create_product(payload(new_product("Tetra", 3.0, 1), vec![]), &repo, &assets)
            .await
            .unwrap();

        let update = UpdateProductPayload {
            changes: crate::domain::product::ProductUpdate {
                name: Some(ProductName::new("Guppy").unwrap()),
                ..Default::default()
            },
            images: None,
        };
        let err = update_product(other.id.get(), update, &repo, &assets)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate(_)));
    }

    #[actix_web::test]
    async fn delete_is_rejected_for_unavailable_product() {
        let repo = TestRepository::new(vec![category(1, "Fish")], vec![], vec![], vec![]);
        let assets = TestAssetStore::new();
        let created = create_product(payload(new_product("Guppy", 4.5, 1), vec![]), &repo, &assets)
            .await
            .unwrap();

        delete_product(created.id.get(), &repo).unwrap();
        assert_eq!(
            delete_product(created.id.get(), &repo).unwrap_err(),
            ServiceError::NotFound
        );

        enable_product(created.id.get(), &repo).unwrap();
        let restored = get_product(created.id.get(), &repo).unwrap();
        assert_eq!(restored.status, AvailabilityStatus::Available);
    }

    #[actix_web::test]
    async fn delete_missing_product_is_not_found() {
        let repo = TestRepository::default();
        assert_eq!(delete_product(42, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[actix_web::test]
    async fn description_image_upload_returns_url() {
        let assets = TestAssetStore::new();
        let url = upload_description_image(png("figure.png"), &assets)
            .await
            .unwrap();
        assert!(url.as_str().contains("figure.png"));
    }
}
