pub mod booking;
pub mod category;
pub mod product;
pub mod service;
pub mod types;
