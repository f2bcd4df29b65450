//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here instead of next to the newtypes.

use crate::domain::types::TypeConstraintError;
use crate::forms::bookings::BookingFormError;
use crate::forms::categories::CategoryFormError;
use crate::forms::products::ProductFormError;
use crate::forms::services::ServiceFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(val: ProductFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<CategoryFormError> for ServiceError {
    fn from(val: CategoryFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<BookingFormError> for ServiceError {
    fn from(val: BookingFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<ServiceFormError> for ServiceError {
    fn from(val: ServiceFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}
