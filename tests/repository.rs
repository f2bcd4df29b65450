use chrono::{NaiveDate, Utc};

use aquastore::domain::booking::{BookingUpdate, NewBooking};
use aquastore::domain::category::NewCategory;
use aquastore::domain::product::{NewProduct, ProductUpdate};
use aquastore::domain::service::{NewService, ServiceUpdate};
use aquastore::domain::types::{
    AvailabilityStatus, BookingContent, BookingStatus, CategoryId, CategoryName, ImageUrl,
    ProductDescription, ProductName, ProductPrice, ProductQuantity, ServiceDuration, ServiceId,
    ServiceName, UserId,
};
use aquastore::repository::{
    BookingListQuery, BookingReader, BookingWriter, CategoryReader, CategoryWriter,
    DieselRepository, ProductListQuery, ProductReader, ProductSort, ProductWriter,
    RepositoryError, ServiceListQuery, ServiceReader, ServiceWriter,
};

mod common;

fn new_category(name: &str) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        created_at: now,
        updated_at: now,
    }
}

fn new_product(name: &str, price: f64, category_id: CategoryId) -> NewProduct {
    let now = Utc::now().naive_utc();
    NewProduct {
        name: ProductName::new(name).expect("valid product name"),
        description: ProductDescription::new(format!("{name} for the display tank"))
            .expect("valid description"),
        message: None,
        quantity: ProductQuantity::new(5).expect("valid quantity"),
        price: ProductPrice::new(price).expect("valid price"),
        category_id,
        created_at: now,
        updated_at: now,
    }
}

fn image(url: &str) -> ImageUrl {
    ImageUrl::new(url).expect("valid image url")
}

fn new_service(name: &str, price: f64) -> NewService {
    let now = Utc::now().naive_utc();
    NewService {
        name: ServiceName::new(name).expect("valid service name"),
        description: None,
        price: ProductPrice::new(price).expect("valid price"),
        duration_minutes: ServiceDuration::new(60).expect("valid duration"),
        created_at: now,
        updated_at: now,
    }
}

fn seed_service(repo: &DieselRepository) -> ServiceId {
    repo.create_service(&new_service("Tank maintenance", 50.0))
        .expect("should create service")
        .id
}

fn new_booking(user_id: i32, service_id: ServiceId, date: &str) -> NewBooking {
    let now = Utc::now().naive_utc();
    NewBooking {
        user_id: UserId::new(user_id).expect("valid user id"),
        service_id,
        booking_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date"),
        content: BookingContent::new("Two tanks, back room").expect("valid content"),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn product_round_trip_keeps_category_and_images() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Fish"))
        .expect("should create category");

    let created = repo
        .create_product(
            &new_product("Guppy", 4.5, category.id),
            &[
                image("https://assets.invalid/images/guppy-front.png"),
                image("https://assets.invalid/images/guppy-side.png"),
            ],
        )
        .expect("should create product");

    assert_eq!(created.status, AvailabilityStatus::Available);
    assert_eq!(created.category_name, "Fish");
    assert_eq!(created.images.len(), 2);

    let fetched = repo
        .get_product_by_id(created.id)
        .expect("should fetch product")
        .expect("product should exist");
    assert_eq!(fetched.name, "Guppy");
    assert_eq!(fetched.images.len(), 2);
}

#[test]
fn duplicate_product_name_hits_unique_index() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Fish"))
        .expect("should create category");
    repo.create_product(&new_product("Guppy", 4.5, category.id), &[])
        .expect("should create product");

    // Same name again, bypassing any application-level pre-check.
    let err = repo
        .create_product(&new_product("Guppy", 9.0, category.id), &[])
        .expect_err("unique index should reject the name");
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[test]
fn listing_filters_compose_and_totals_track_filters() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let fish = repo
        .create_category(&new_category("Freshwater Fish"))
        .expect("should create category");
    let plants = repo
        .create_category(&new_category("Plants"))
        .expect("should create category");

    for (name, price, cat) in [
        ("Guppy", 4.5, fish.id),
        ("Neon Tetra", 3.0, fish.id),
        ("Anubias", 7.0, plants.id),
    ] {
        repo.create_product(&new_product(name, price, cat), &[])
            .expect("should create product");
    }

    // Case-insensitive search over name/description.
    let (total, items) = repo
        .list_products(ProductListQuery::default().search("tetra"))
        .expect("should list products");
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Neon Tetra");

    // Exact category name match.
    let (total, _) = repo
        .list_products(ProductListQuery::default().category_name_eq("Plants"))
        .expect("should list products");
    assert_eq!(total, 1);

    // Substring category name match.
    let (total, _) = repo
        .list_products(ProductListQuery::default().category_name_like("Fish"))
        .expect("should list products");
    assert_eq!(total, 2);

    // Inclusive price bounds.
    let (total, items) = repo
        .list_products(ProductListQuery::default().min_price(3.0).max_price(4.5))
        .expect("should list products");
    assert_eq!(total, 2);
    assert!(items.iter().all(|p| p.price.get() >= 3.0 && p.price.get() <= 4.5));

    // Price sorts.
    let (_, items) = repo
        .list_products(ProductListQuery::default().sort(ProductSort::PriceAscending))
        .expect("should list products");
    let prices: Vec<f64> = items.iter().map(|p| p.price.get()).collect();
    assert_eq!(prices, vec![3.0, 4.5, 7.0]);

    let (_, items) = repo
        .list_products(ProductListQuery::default().sort(ProductSort::PriceDescending))
        .expect("should list products");
    assert_eq!(items[0].name, "Anubias");

    // Newest-first falls back to id for same-second inserts.
    let (_, items) = repo
        .list_products(ProductListQuery::default())
        .expect("should list products");
    assert_eq!(items[0].name, "Anubias");
    assert_eq!(items[2].name, "Guppy");
}

#[test]
fn pagination_totals_and_past_the_end_pages() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Fish"))
        .expect("should create category");
    for i in 0..5 {
        repo.create_product(&new_product(&format!("Fish {i}"), 1.0 + i as f64, category.id), &[])
            .expect("should create product");
    }

    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(2, 2))
        .expect("should list products");
    assert_eq!(total, 5);
    assert_eq!(items.len(), 2);

    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(9, 2))
        .expect("should list products");
    assert_eq!(total, 5);
    assert!(items.is_empty());
}

#[test]
fn update_product_replaces_image_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Fish"))
        .expect("should create category");
    let created = repo
        .create_product(
            &new_product("Guppy", 4.5, category.id),
            &[image("https://assets.invalid/images/old.png")],
        )
        .expect("should create product");

    let changes = ProductUpdate {
        price: Some(ProductPrice::new(5.5).expect("valid price")),
        ..Default::default()
    };
    let affected = repo
        .update_product(
            created.id,
            &changes,
            Some(&[
                image("https://assets.invalid/images/new-1.png"),
                image("https://assets.invalid/images/new-2.png"),
            ]),
        )
        .expect("should update product");
    assert_eq!(affected, 1);

    let updated = repo
        .get_product_by_id(created.id)
        .expect("should fetch product")
        .expect("product should exist");
    assert_eq!(updated.price, 5.5);
    assert_eq!(updated.images.len(), 2);
    assert!(updated.images.iter().all(|u| u.as_str().contains("new-")));
}

#[test]
fn status_transition_is_guarded_by_current_status() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Fish"))
        .expect("should create category");
    let created = repo
        .create_product(&new_product("Guppy", 4.5, category.id), &[])
        .expect("should create product");

    let affected = repo
        .set_product_status(
            created.id,
            AvailabilityStatus::Available,
            AvailabilityStatus::Unavailable,
        )
        .expect("should update status");
    assert_eq!(affected, 1);

    // Already unavailable: the guarded update touches nothing.
    let affected = repo
        .set_product_status(
            created.id,
            AvailabilityStatus::Available,
            AvailabilityStatus::Unavailable,
        )
        .expect("should run update");
    assert_eq!(affected, 0);
}

#[test]
fn duplicate_category_name_hits_unique_index() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_category(&new_category("Fish"))
        .expect("should create category");
    let err = repo
        .create_category(&new_category("Fish"))
        .expect_err("unique index should reject the name");
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[test]
fn category_rename_and_name_check() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let fish = repo
        .create_category(&new_category("Fish"))
        .expect("should create category");

    assert!(
        repo.category_name_exists(&CategoryName::new("Fish").unwrap(), None)
            .expect("should check name")
    );
    // Excluding the holder itself makes the name free again.
    assert!(
        !repo
            .category_name_exists(&CategoryName::new("Fish").unwrap(), Some(fish.id))
            .expect("should check name")
    );

    let affected = repo
        .update_category(fish.id, &CategoryName::new("Shrimp").unwrap())
        .expect("should rename category");
    assert_eq!(affected, 1);

    let renamed = repo
        .get_category_by_id(fish.id)
        .expect("should fetch category")
        .expect("category should exist");
    assert_eq!(renamed.name, "Shrimp");
}

#[test]
fn service_round_trip_update_and_guarded_transition() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_service(&new_service("Tank maintenance", 50.0))
        .expect("should create service");
    assert_eq!(created.status, AvailabilityStatus::Available);
    repo.create_service(&new_service("Aquascaping", 120.0))
        .expect("should create service");

    let (total, items) = repo
        .list_services(ServiceListQuery::default())
        .expect("should list services");
    assert_eq!(total, 2);
    assert_eq!(items[0].name, "Aquascaping");

    let changes = ServiceUpdate {
        price: Some(ProductPrice::new(65.0).expect("valid price")),
        description: Some("Includes filter cleaning".to_string()),
        ..Default::default()
    };
    let affected = repo
        .update_service(created.id, &changes)
        .expect("should update service");
    assert_eq!(affected, 1);

    let updated = repo
        .get_service_by_id(created.id)
        .expect("should fetch service")
        .expect("service should exist");
    assert_eq!(updated.price, 65.0);
    assert_eq!(updated.name, "Tank maintenance");

    let affected = repo
        .set_service_status(
            created.id,
            AvailabilityStatus::Available,
            AvailabilityStatus::Unavailable,
        )
        .expect("should update status");
    assert_eq!(affected, 1);

    // Already unavailable: the guarded update touches nothing.
    let affected = repo
        .set_service_status(
            created.id,
            AvailabilityStatus::Available,
            AvailabilityStatus::Unavailable,
        )
        .expect("should run update");
    assert_eq!(affected, 0);
}

#[test]
fn partial_unique_index_allows_rebooking_after_cancel() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let service_id = seed_service(&repo);

    let service = repo
        .get_service_by_id(service_id)
        .expect("should fetch service")
        .expect("service should exist");
    assert_eq!(service.duration_minutes, 60);

    let first = repo
        .create_booking(&new_booking(1, service_id, "2026-09-10"))
        .expect("should create booking");
    assert_eq!(first.status, BookingStatus::Confirmed);

    // Second confirmed booking for the same user and date is rejected by
    // the partial unique index.
    let err = repo
        .create_booking(&new_booking(1, service_id, "2026-09-10"))
        .expect_err("partial unique index should reject the duplicate");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // A different date or user is unaffected.
    repo.create_booking(&new_booking(1, service_id, "2026-09-11"))
        .expect("other date should be free");
    repo.create_booking(&new_booking(2, service_id, "2026-09-10"))
        .expect("other user should be free");

    // Cancelling frees the slot.
    let affected = repo
        .set_booking_status(first.id, BookingStatus::Confirmed, BookingStatus::Cancelled)
        .expect("should cancel booking");
    assert_eq!(affected, 1);

    assert!(
        !repo
            .confirmed_booking_exists(
                UserId::new(1).unwrap(),
                NaiveDate::parse_from_str("2026-09-10", "%Y-%m-%d").unwrap()
            )
            .expect("should check booking")
    );
    repo.create_booking(&new_booking(1, service_id, "2026-09-10"))
        .expect("cancelled slot should be bookable again");
}

#[test]
fn booking_listing_filters_by_status() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let service_id = seed_service(&repo);

    let first = repo
        .create_booking(&new_booking(1, service_id, "2026-09-10"))
        .expect("should create booking");
    repo.create_booking(&new_booking(1, service_id, "2026-09-11"))
        .expect("should create booking");
    repo.set_booking_status(first.id, BookingStatus::Confirmed, BookingStatus::Cancelled)
        .expect("should cancel booking");

    let (total, _) = repo
        .list_bookings(BookingListQuery::default())
        .expect("should list bookings");
    assert_eq!(total, 2);

    let (total, items) = repo
        .list_bookings(BookingListQuery::default().status(BookingStatus::Confirmed))
        .expect("should list bookings");
    assert_eq!(total, 1);
    assert_eq!(items[0].status, BookingStatus::Confirmed);
}

#[test]
fn booking_update_overwrites_supplied_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let service_id = seed_service(&repo);

    let booking = repo
        .create_booking(&new_booking(1, service_id, "2026-09-10"))
        .expect("should create booking");

    let changes = BookingUpdate {
        booking_date: Some(NaiveDate::parse_from_str("2026-09-12", "%Y-%m-%d").unwrap()),
        content: Some(BookingContent::new("Front window tank only").unwrap()),
        status: None,
    };
    let affected = repo
        .update_booking(booking.id, &changes)
        .expect("should update booking");
    assert_eq!(affected, 1);

    let updated = repo
        .get_booking_by_id(booking.id)
        .expect("should fetch booking")
        .expect("booking should exist");
    assert_eq!(updated.content, "Front window tank only");
    assert_eq!(
        updated.booking_date,
        NaiveDate::parse_from_str("2026-09-12", "%Y-%m-%d").unwrap()
    );
    assert_eq!(updated.status, BookingStatus::Confirmed);
}
