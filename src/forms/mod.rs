pub mod bookings;
pub mod categories;
pub mod products;
pub mod services;
