use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// List categories ordered by name.
pub fn list_categories<R>(
    page: usize,
    per_page: Option<usize>,
    repo: &R,
) -> ServiceResult<Paginated<Category>>
where
    R: CategoryReader,
{
    let page = page.max(1);
    let per_page = per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    match repo.list_categories(CategoryListQuery::default().paginate(page, per_page)) {
        Ok((total, categories)) => Ok(Paginated::new(categories, page, per_page, total)),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a single category by id.
pub fn get_category<R>(category_id: i32, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let category_id = match CategoryId::new(category_id) {
        Ok(category_id) => category_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a category with a unique name.
pub fn create_category<R>(category: NewCategory, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.category_name_exists(&category.name, None) {
        Ok(false) => {}
        Ok(true) => {
            return Err(ServiceError::Duplicate(format!(
                "category '{}' already exists",
                category.name
            )));
        }
        Err(e) => {
            log::error!("Failed to check category name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.create_category(&category) {
        Ok(category) => Ok(category),
        Err(RepositoryError::Conflict(msg)) => Err(ServiceError::Duplicate(msg)),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Rename a category; the new name must be free.
pub fn update_category<R>(
    category_id: i32,
    name: CategoryName,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
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

    match repo.category_name_exists(&name, Some(category_id)) {
        Ok(false) => {}
        Ok(true) => {
            return Err(ServiceError::Duplicate(format!(
                "category '{name}' already exists"
            )));
        }
        Err(e) => {
            log::error!("Failed to check category name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_category(category_id, &name) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(RepositoryError::Conflict(msg)) => return Err(ServiceError::Duplicate(msg)),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    get_category(category_id.get(), repo)
}
