use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::{AvailabilityStatus, ServiceId};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ServiceListQuery, ServiceReader, ServiceWriter};

use super::{ServiceError, ServiceResult};

/// Register a new bookable service; it starts out available.
pub fn create_service<R>(service: NewService, repo: &R) -> ServiceResult<Service>
where
    R: ServiceWriter,
{
    match repo.create_service(&service) {
        Ok(service) => Ok(service),
        Err(e) => {
            log::error!("Failed to create service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List services ordered by name.
pub fn list_services<R>(
    page: usize,
    per_page: Option<usize>,
    repo: &R,
) -> ServiceResult<Paginated<Service>>
where
    R: ServiceReader,
{
    let page = page.max(1);
    let per_page = per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    match repo.list_services(ServiceListQuery::default().paginate(page, per_page)) {
        Ok((total, services)) => Ok(Paginated::new(services, page, per_page, total)),
        Err(e) => {
            log::error!("Failed to list services: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a single service by id regardless of its availability.
pub fn get_service<R>(service_id: i32, repo: &R) -> ServiceResult<Service>
where
    R: ServiceReader,
{
    let service_id = match ServiceId::new(service_id) {
        Ok(service_id) => service_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_service_by_id(service_id) {
        Ok(Some(service)) => Ok(service),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Apply a partial update to a service.
pub fn update_service<R>(
    service_id: i32,
    changes: ServiceUpdate,
    repo: &R,
) -> ServiceResult<Service>
where
    R: ServiceReader + ServiceWriter,
{
    let service_id = match ServiceId::new(service_id) {
        Ok(service_id) => service_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.update_service(service_id, &changes) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to update service: {e}");
            return Err(ServiceError::Internal);
        }
    }

    get_service(service_id.get(), repo)
}

/// Soft-delete a service by marking it unavailable.
///
/// Only an available service can be deleted; repeating the call reports
/// not-found. Existing bookings keep pointing at the row.
pub fn delete_service<R>(service_id: i32, repo: &R) -> ServiceResult<()>
where
    R: ServiceWriter,
{
    let service_id = match ServiceId::new(service_id) {
        Ok(service_id) => service_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.set_service_status(
        service_id,
        AvailabilityStatus::Available,
        AvailabilityStatus::Unavailable,
    ) {
        Ok(affected) if affected > 0 => Ok(()),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update service status: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{ProductPrice, ServiceDuration, ServiceName};
    use crate::repository::test::TestRepository;

    fn new_service(name: &str, price: f64) -> NewService {
        let now = Utc::now().naive_utc();
        NewService {
            name: ServiceName::new(name).unwrap(),
            description: None,
            price: ProductPrice::new(price).unwrap(),
            duration_minutes: ServiceDuration::new(60).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_and_list_services_sorted_by_name() {
        let repo = TestRepository::default();
        let created = create_service(new_service("Tank maintenance", 50.0), &repo).unwrap();
        create_service(new_service("Aquascaping", 120.0), &repo).unwrap();

        assert_eq!(created.status, AvailabilityStatus::Available);

        let page = list_services(1, None, &repo).unwrap();
        assert_eq!(page.total, 2);
        let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Aquascaping", "Tank maintenance"]);
    }

    #[test]
    fn update_overwrites_supplied_fields() {
        let repo = TestRepository::default();
        let created = create_service(new_service("Tank maintenance", 50.0), &repo).unwrap();

        let updated = update_service(
            created.id.get(),
            ServiceUpdate {
                price: Some(ProductPrice::new(65.0).unwrap()),
                description: Some("Includes filter cleaning".to_string()),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();

        assert_eq!(updated.price, 65.0);
        assert_eq!(
            updated.description.as_deref(),
            Some("Includes filter cleaning")
        );
        assert_eq!(updated.name, "Tank maintenance");
    }

    #[test]
    fn update_missing_service_is_not_found() {
        let repo = TestRepository::default();
        let err = update_service(9, ServiceUpdate::default(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn delete_is_rejected_for_unavailable_service() {
        let repo = TestRepository::default();
        let created = create_service(new_service("Tank maintenance", 50.0), &repo).unwrap();

        delete_service(created.id.get(), &repo).unwrap();
        assert_eq!(
            delete_service(created.id.get(), &repo).unwrap_err(),
            ServiceError::NotFound
        );

        // The row survives the soft delete.
        let stored = get_service(created.id.get(), &repo).unwrap();
        assert_eq!(stored.status, AvailabilityStatus::Unavailable);
    }
}
