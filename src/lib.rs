//! The `todoforge` library crate.
//!
//! This crate contains the domain models, authentication mechanisms, routing
//! configuration, and error handling for the todoforge API. It is used by the
//! main binary (`main.rs`) to construct and run the application.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
