pub mod booking;
pub mod category;
pub mod config;
pub mod image;
pub mod product;
pub mod service;
