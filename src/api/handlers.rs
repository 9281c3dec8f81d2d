//! HTTP request handlers for the coefficient API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::CoeffResult;

use super::request::CoefficientRequest;
use super::response::{
    ApiError, ApiErrorResponse, CoefficientResponse, ConfigurationResponse, ProductEntry,
    ProductsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/coefficients", post(coefficients_handler))
        .route("/sites/:site/products", get(products_handler))
        .with_state(state)
}

/// Handler for POST /coefficients.
async fn coefficients_handler(
    State(state): State<AppState>,
    payload: Result<Json<CoefficientRequest>, JsonRejection>,
) -> Response {
    // Correlation id ties together every log line of this request
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing coefficient request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // body_text carries serde's message, including the field name
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // A missing field is a validation error, not malformed JSON
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let start_time = Instant::now();
    let loader = state.shared_loader();
    let include_values = request.include_values;
    let CoefficientRequest {
        site,
        product,
        frequencies,
        selection,
        ..
    } = request;

    // Coefficient files are read with blocking I/O
    let outcome = task::spawn_blocking(move || -> CoeffResult<CoefficientResponse> {
        let coefficients =
            loader.get_mvr_coeff(&site, &product, &frequencies, selection.as_ref())?;
        // A successful load always holds at least one configuration
        Ok(CoefficientResponse {
            site,
            product: coefficients[0].product,
            configurations: coefficients
                .iter()
                .map(|c| ConfigurationResponse::from_coefficients(c, include_values))
                .collect(),
        })
    })
    .await;

    match outcome {
        Ok(Ok(body)) => {
            info!(
                correlation_id = %correlation_id,
                site = %body.site,
                product = %body.product,
                configurations = body.configurations.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Coefficients loaded successfully"
            );
            json_response(StatusCode::OK, body)
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Coefficient loading failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Coefficient loading task failed"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal("Coefficient loading task failed"),
            )
        }
    }
}

/// Handler for GET /sites/{site}/products.
async fn products_handler(State(state): State<AppState>, Path(site): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, site = %site, "Listing site products");

    let loader = state.shared_loader();
    let outcome = task::spawn_blocking(move || -> CoeffResult<ProductsResponse> {
        let site_config = loader.source().site(&site)?;
        let products = site_config
            .products()
            .into_iter()
            .map(|product| -> CoeffResult<ProductEntry> {
                Ok(ProductEntry {
                    product,
                    configurations: site_config
                        .configurations(product)?
                        .iter()
                        .map(|entry| entry.name.clone())
                        .collect(),
                })
            })
            .collect::<CoeffResult<Vec<_>>>()?;
        Ok(ProductsResponse {
            site: site_config.site().to_string(),
            station: site_config.config().station.clone(),
            products,
        })
    })
    .await;

    match outcome {
        Ok(Ok(body)) => json_response(StatusCode::OK, body),
        Ok(Err(err)) => {
            warn!(correlation_id = %correlation_id, error = %err, "Site lookup failed");
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Site lookup task failed"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal("Site lookup task failed"),
            )
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
