//! HTTP API module for coefficient loading.
//!
//! This module provides read-only REST endpoints over the coefficient
//! loader.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CoefficientRequest;
pub use response::{
    ApiError, CoefficientResponse, ConfigurationResponse, FieldResponse, ProductEntry,
    ProductsResponse,
};
pub use state::AppState;
