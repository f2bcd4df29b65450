use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool};
use crate::domain::booking::{Booking, BookingUpdate, NewBooking};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::{
    AvailabilityStatus, BookingId, BookingStatus, CategoryId, CategoryName, ImageUrl, ProductId,
    ProductName, ServiceId, UserId,
};
use crate::pagination::Pagination;

pub mod booking;
pub mod category;
pub mod errors;
pub mod product;
pub mod service;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// How a category-name filter matches against stored names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNameFilter {
    Exact(String),
    Contains(String),
}

/// Sort order applied to product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    /// Most recently inserted first; the default when no explicit price
    /// sort is requested, regardless of any search text.
    #[default]
    NewestFirst,
    PriceAscending,
    PriceDescending,
}

/// Filter/sort/paging specification used when listing products.
///
/// Every field composes conjunctively; absent fields do not constrain the
/// result. Totals are computed from the filtered count.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to products with this status.
    pub status: Option<AvailabilityStatus>,
    /// Case-insensitive substring match over name, description and message.
    pub search: Option<String>,
    /// Restrict to products of this category.
    pub category_id: Option<CategoryId>,
    /// Match against the joined category name.
    pub category_name: Option<CategoryNameFilter>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    pub sort: ProductSort,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn status(mut self, status: AvailabilityStatus) -> Self {
        self.status = Some(status);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn category_name_eq(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(CategoryNameFilter::Exact(name.into()));
        self
    }
    pub fn category_name_like(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(CategoryNameFilter::Contains(name.into()));
        self
    }
    pub fn min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }
    pub fn max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }
    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing bookable services.
#[derive(Debug, Clone, Default)]
pub struct ServiceListQuery {
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ServiceListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingListQuery {
    /// Restrict to bookings with this status.
    pub status: Option<BookingStatus>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl BookingListQuery {
    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query specification, returning
    /// the filtered total alongside the requested page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier, with category name and images.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Check for a product with exactly this name, optionally excluding one
    /// id (used when renaming). Matching is case-sensitive equality.
    fn product_name_exists(
        &self,
        name: &ProductName,
        exclude: Option<ProductId>,
    ) -> RepositoryResult<bool>;
}

/// Write operations for product entities and their images.
pub trait ProductWriter {
    /// Persist a new product together with its image URLs in one
    /// transaction, returning the created representation.
    fn create_product(&self, product: &NewProduct, images: &[ImageUrl])
    -> RepositoryResult<Product>;
    /// Apply a partial update; when `images` is supplied, the previous image
    /// rows are replaced wholesale inside the same transaction.
    fn update_product(
        &self,
        id: ProductId,
        changes: &ProductUpdate,
        images: Option<&[ImageUrl]>,
    ) -> RepositoryResult<usize>;
    /// Transition status from `from` to `to`; returns 0 when the product is
    /// absent or not currently in the `from` status.
    fn set_product_status(
        &self,
        id: ProductId,
        from: AvailabilityStatus,
        to: AvailabilityStatus,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Check for a category with exactly this name, optionally excluding one id.
    fn category_name_exists(
        &self,
        name: &CategoryName,
        exclude: Option<CategoryId>,
    ) -> RepositoryResult<bool>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category, returning the created representation.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename a category.
    fn update_category(&self, id: CategoryId, name: &CategoryName) -> RepositoryResult<usize>;
}

/// Read-only operations for bookable service entities.
pub trait ServiceReader {
    /// List services using the supplied query options, ordered by name.
    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<(usize, Vec<Service>)>;
    /// Retrieve a service by its identifier.
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
}

/// Write operations for bookable service entities.
pub trait ServiceWriter {
    /// Persist a new service, returning the created representation.
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service>;
    /// Apply a partial update to a service.
    fn update_service(&self, id: ServiceId, changes: &ServiceUpdate) -> RepositoryResult<usize>;
    /// Transition status from `from` to `to`; returns 0 when the service is
    /// absent or not currently in the `from` status.
    fn set_service_status(
        &self,
        id: ServiceId,
        from: AvailabilityStatus,
        to: AvailabilityStatus,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for booking entities.
pub trait BookingReader {
    /// List bookings matching the supplied query, newest first.
    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)>;
    /// Retrieve a booking by its identifier regardless of status.
    fn get_booking_by_id(&self, id: BookingId) -> RepositoryResult<Option<Booking>>;
    /// Check for a confirmed booking for this user on this date.
    fn confirmed_booking_exists(
        &self,
        user_id: UserId,
        booking_date: NaiveDate,
    ) -> RepositoryResult<bool>;
}

/// Write operations for booking entities.
pub trait BookingWriter {
    /// Persist a new booking, returning the created representation.
    fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking>;
    /// Apply a partial update to a booking.
    fn update_booking(&self, id: BookingId, changes: &BookingUpdate) -> RepositoryResult<usize>;
    /// Transition status from `from` to `to`; returns 0 when the booking is
    /// absent or not currently in the `from` status.
    fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> RepositoryResult<usize>;
}
