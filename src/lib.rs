//! Retrieval coefficient loading for microwave radiometer processing.
//!
//! This crate resolves a measurement site, a retrieval product and an
//! instrument's frequency set into the neural-network coefficients of the
//! product's statistical retrieval.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod retrieval;

pub use retrieval::get_mvr_coeff;
