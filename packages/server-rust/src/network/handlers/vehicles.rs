//! Vehicle endpoint handlers.
//!
//! Decodes requests into typed service inputs, invokes the catalog service,
//! and encodes results into the `{"message", "data"}` response envelope.
//! Status mapping: 200 for reads and partial updates, 201 for creates, 204
//! for delete; 400 for malformed input, 404 for empty lookups/filters, 409
//! for identifier collisions.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use motorpool_core::{Vehicle, VehiclePayload};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::service::{ServiceError, VehicleMap};

/// Transport-level error carrying the response status.
///
/// The body is a generic envelope built from the status text; service
/// error details never leak to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError(StatusCode);

impl ApiError {
    const BAD_REQUEST: Self = Self(StatusCode::BAD_REQUEST);
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.canonical_reason().unwrap_or("error");
        (self.0, Json(json!({ "message": message, "data": null }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => Self(StatusCode::NOT_FOUND),
            ServiceError::AlreadyExists => Self(StatusCode::CONFLICT),
        }
    }
}

// The axum extractor rejections default to 422/400 variants; the API
// contract maps every malformed input to a plain 400.
impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        Self::BAD_REQUEST
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::BAD_REQUEST
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        Self::BAD_REQUEST
    }
}

/// Wraps `data` in the success envelope.
fn success<T: serde::Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({ "message": "success", "data": data }))
}

/// Converts a service result mapping into its wire representation.
///
/// `serde_json` stringifies the integer keys, so the response is a JSON
/// object keyed by vehicle id.
fn to_payloads(vehicles: VehicleMap) -> HashMap<i32, VehiclePayload> {
    vehicles
        .into_iter()
        .map(|(id, v)| (id, VehiclePayload::from(v)))
        .collect()
}

/// GET /vehicles -- full catalog scan.
pub async fn get_all_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let vehicles = state.service.find_all().await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// POST /vehicles -- create a single vehicle.
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<VehiclePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    state.service.create(Vehicle::from(payload.clone())).await?;
    Ok((StatusCode::CREATED, success(payload)).into_response())
}

/// POST /vehicles/batch -- create several vehicles sequentially.
///
/// Not atomic: an identifier collision partway through returns 409 while
/// every vehicle inserted before the collision stays committed.
pub async fn create_batch_handler(
    State(state): State<AppState>,
    payloads: Result<Json<Vec<VehiclePayload>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payloads) = payloads?;
    let vehicles = payloads.iter().cloned().map(Vehicle::from).collect();
    state.service.create_batch(vehicles).await?;
    Ok((StatusCode::CREATED, success(payloads)).into_response())
}

/// GET /vehicles/color/{color}/year/{year}
///
/// The year stays a string all the way into the service, which parses it
/// leniently (unparseable years collapse to 0).
pub async fn get_by_color_year_handler(
    State(state): State<AppState>,
    Path((color, year)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let vehicles = state.service.by_color_year(&color, &year).await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// GET /vehicles/brand/{brand}/between/{start_year}/{end_year}
pub async fn get_by_brand_years_handler(
    State(state): State<AppState>,
    Path((brand, start_year, end_year)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let vehicles = state
        .service
        .by_brand_year_range(&brand, &start_year, &end_year)
        .await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// GET /vehicles/fuel_type/{type}
pub async fn get_by_fuel_type_handler(
    State(state): State<AppState>,
    Path(fuel_type): Path<String>,
) -> Result<Response, ApiError> {
    let vehicles = state.service.by_fuel_type(&fuel_type).await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// GET /vehicles/transmission/{type}
pub async fn get_by_transmission_handler(
    State(state): State<AppState>,
    Path(transmission): Path<String>,
) -> Result<Response, ApiError> {
    let vehicles = state.service.by_transmission(&transmission).await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// Query parameters for the weight range filter.
#[derive(Debug, Deserialize)]
pub struct WeightRangeQuery {
    min: f64,
    max: f64,
}

/// GET /vehicles/weight?min=&max=
pub async fn get_by_weight_handler(
    State(state): State<AppState>,
    query: Result<Query<WeightRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(range) = query?;
    let vehicles = state.service.by_weight_range(range.min, range.max).await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// Query parameters for the dimension range filter. Each bound pair is
/// encoded as a single `"min-max"` string.
#[derive(Debug, Deserialize)]
pub struct DimensionRangeQuery {
    length: String,
    width: String,
}

/// Splits a `"min-max"` range string on its first hyphen.
fn parse_range(range: &str) -> Result<(f64, f64), ApiError> {
    let (min, max) = range.split_once('-').ok_or(ApiError::BAD_REQUEST)?;
    let min = min.parse().map_err(|_| ApiError::BAD_REQUEST)?;
    let max = max.parse().map_err(|_| ApiError::BAD_REQUEST)?;
    Ok((min, max))
}

/// GET /vehicles/dimensions?length=min-max&width=min-max
pub async fn get_by_dimensions_handler(
    State(state): State<AppState>,
    query: Result<Query<DimensionRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(ranges) = query?;
    let (min_length, max_length) = parse_range(&ranges.length)?;
    let (min_width, max_width) = parse_range(&ranges.width)?;

    let vehicles = state
        .service
        .by_dimension_range(min_length, max_length, min_width, max_width)
        .await?;
    Ok(success(to_payloads(vehicles)).into_response())
}

/// GET /vehicles/average_speed/brand/{brand}
pub async fn get_average_speed_handler(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> Result<Response, ApiError> {
    let average = state.service.average_speed_by_brand(&brand).await?;
    Ok(success(average).into_response())
}

/// GET /vehicles/average_capacity/brand/{brand}
pub async fn get_average_capacity_handler(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> Result<Response, ApiError> {
    let average = state.service.average_capacity_by_brand(&brand).await?;
    Ok(success(average).into_response())
}

/// Body of a speed update request.
#[derive(Debug, Deserialize)]
pub struct SpeedUpdateBody {
    max_speed: f64,
}

/// PUT /vehicles/{id}/update_speed
pub async fn update_speed_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<SpeedUpdateBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    state.service.update_speed(id, body.max_speed).await?;
    Ok(success(()).into_response())
}

/// Body of a fuel type update request.
#[derive(Debug, Deserialize)]
pub struct FuelTypeUpdateBody {
    fuel_type: String,
}

/// PUT /vehicles/{id}/update_fuel
pub async fn update_fuel_type_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<FuelTypeUpdateBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    state.service.update_fuel_type(id, &body.fuel_type).await?;
    Ok(success(()).into_response())
}

/// DELETE /vehicles/{id} -- 204 with no body on success.
pub async fn delete_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
