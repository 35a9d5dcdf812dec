//! Typed HTTP client for the TechMart storefront REST API.

pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::{AdminApi, TechmartClient};
pub use error::ApiError;
pub use types::{AuthToken, CustomerProfile, ProductImage};
