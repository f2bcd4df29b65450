//! Core library exports for the Aquastore service.
//!
//! This crate exposes the domain types, Diesel models, repositories, asset
//! store adapter, forms, routes and service layers used by the Aquastore
//! REST backend.

pub mod assets;
pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
