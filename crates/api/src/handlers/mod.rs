//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod distributors;
pub mod films;
pub mod purchases;
pub mod uploads;
