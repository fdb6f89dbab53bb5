//! `/restaurants` handlers

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{ListFilter, ListQuery, Page};
use crate::gateway::state::CatalogState;
use crate::gateway::types::{ApiError, ApiJson, ApiPath, ApiQuery, ErrorBody, PageParams};
use crate::restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate};

type RestaurantState = State<Arc<CatalogState<Restaurant>>>;

/// One page of restaurants
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantList {
    pub restaurants: Vec<Restaurant>,
    /// Matches before pagination
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl RestaurantList {
    fn from_page(page: Page<Restaurant>, skip: u64, limit: u64) -> Self {
        Self {
            restaurants: page.items,
            total: page.total,
            skip,
            limit,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CuisineSearchParams {
    /// Case-insensitive substring of the cuisine type
    pub cuisine: String,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

async fn list_with(
    state: &CatalogState<Restaurant>,
    filter: ListFilter,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<RestaurantList>, ApiError> {
    let (skip, limit) = state.limits.resolve(skip, limit)?;
    let query = ListQuery::new(skip, limit).with_filter(filter);
    let page = state.catalog.list(&query).await?;
    Ok(Json(RestaurantList::from_page(page, skip, limit)))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    params(PageParams),
    responses(
        (status = 200, description = "Restaurants ordered by id", body = RestaurantList),
        (status = 422, description = "Invalid skip/limit", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn list_restaurants(
    State(state): RestaurantState,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<RestaurantList>, ApiError> {
    list_with(&state, ListFilter::default(), params.skip, params.limit).await
}

#[utoipa::path(
    get,
    path = "/restaurants/active",
    params(PageParams),
    responses(
        (status = 200, description = "Active restaurants only", body = RestaurantList),
        (status = 422, description = "Invalid skip/limit", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn list_active_restaurants(
    State(state): RestaurantState,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<RestaurantList>, ApiError> {
    list_with(&state, ListFilter::active(), params.skip, params.limit).await
}

#[utoipa::path(
    get,
    path = "/restaurants/search",
    params(CuisineSearchParams),
    responses(
        (status = 200, description = "Restaurants whose cuisine matches", body = RestaurantList),
        (status = 422, description = "Missing or empty cuisine", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn search_restaurants(
    State(state): RestaurantState,
    ApiQuery(params): ApiQuery<CuisineSearchParams>,
) -> Result<Json<RestaurantList>, ApiError> {
    if params.cuisine.trim().is_empty() {
        return Err(ApiError::invalid_parameter("cuisine must not be empty").with_field("cuisine"));
    }
    list_with(
        &state,
        ListFilter::search(params.cuisine),
        params.skip,
        params.limit,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant found", body = Restaurant),
        (status = 404, description = "No restaurant with this id", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn get_restaurant(
    State(state): RestaurantState,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Restaurant>, ApiError> {
    Ok(Json(state.catalog.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = RestaurantCreate,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 409, description = "Name or phone number already taken", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn create_restaurant(
    State(state): RestaurantState,
    ApiJson(body): ApiJson<RestaurantCreate>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    let restaurant = state.catalog.create(body).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

#[utoipa::path(
    put,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    request_body = RestaurantUpdate,
    responses(
        (status = 200, description = "Restaurant updated", body = Restaurant),
        (status = 404, description = "No restaurant with this id", body = ErrorBody),
        (status = 409, description = "Name or phone number already taken", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn update_restaurant(
    State(state): RestaurantState,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RestaurantUpdate>,
) -> Result<Json<Restaurant>, ApiError> {
    Ok(Json(state.catalog.update(id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 404, description = "No restaurant with this id", body = ErrorBody)
    ),
    tag = "Restaurants"
)]
pub async fn delete_restaurant(
    State(state): RestaurantState,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
