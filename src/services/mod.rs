pub mod bookings;
pub mod categories;
pub mod errors;
pub mod products;
pub mod services;

pub use errors::{ServiceError, ServiceResult};
