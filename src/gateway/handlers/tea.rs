//! `/teas` handlers

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{ListFilter, ListQuery};
use crate::gateway::state::CatalogState;
use crate::gateway::types::{ApiError, ApiJson, ApiPath, ApiQuery, ErrorBody, PageParams};
use crate::tea::{Tea, TeaCreate, TeaUpdate};

type TeaState = State<Arc<CatalogState<Tea>>>;

/// One page of teas
#[derive(Debug, Serialize, ToSchema)]
pub struct TeaList {
    pub teas: Vec<Tea>,
    /// Matches before pagination
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeaSearchParams {
    /// Case-insensitive substring of the category
    pub category: String,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/teas",
    params(PageParams),
    responses(
        (status = 200, description = "Teas ordered by id", body = TeaList),
        (status = 422, description = "Invalid skip/limit", body = ErrorBody)
    ),
    tag = "Teas"
)]
pub async fn list_teas(
    State(state): TeaState,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<TeaList>, ApiError> {
    let (skip, limit) = state.limits.resolve(params.skip, params.limit)?;
    let page = state.catalog.list(&ListQuery::new(skip, limit)).await?;
    Ok(Json(TeaList {
        teas: page.items,
        total: page.total,
        skip,
        limit,
    }))
}

#[utoipa::path(
    get,
    path = "/teas/search",
    params(TeaSearchParams),
    responses(
        (status = 200, description = "Teas whose category matches", body = TeaList),
        (status = 422, description = "Missing or empty category", body = ErrorBody)
    ),
    tag = "Teas"
)]
pub async fn search_teas(
    State(state): TeaState,
    ApiQuery(params): ApiQuery<TeaSearchParams>,
) -> Result<Json<TeaList>, ApiError> {
    if params.category.trim().is_empty() {
        return Err(ApiError::invalid_parameter("category must not be empty").with_field("category"));
    }
    let (skip, limit) = state.limits.resolve(params.skip, params.limit)?;
    let query = ListQuery::new(skip, limit).with_filter(ListFilter::search(params.category));
    let page = state.catalog.list(&query).await?;
    Ok(Json(TeaList {
        teas: page.items,
        total: page.total,
        skip,
        limit,
    }))
}

#[utoipa::path(
    get,
    path = "/teas/{id}",
    params(("id" = i64, Path, description = "Tea id")),
    responses(
        (status = 200, description = "Tea found", body = Tea),
        (status = 404, description = "No tea with this id", body = ErrorBody)
    ),
    tag = "Teas"
)]
pub async fn get_tea(State(state): TeaState, ApiPath(id): ApiPath<i64>) -> Result<Json<Tea>, ApiError> {
    Ok(Json(state.catalog.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/teas",
    request_body = TeaCreate,
    responses(
        (status = 201, description = "Tea created", body = Tea),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 409, description = "Name or id already taken", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody)
    ),
    tag = "Teas"
)]
pub async fn create_tea(
    State(state): TeaState,
    ApiJson(body): ApiJson<TeaCreate>,
) -> Result<(StatusCode, Json<Tea>), ApiError> {
    let tea = state.catalog.create(body).await?;
    Ok((StatusCode::CREATED, Json(tea)))
}

#[utoipa::path(
    put,
    path = "/teas/{id}",
    params(("id" = i64, Path, description = "Tea id")),
    request_body = TeaUpdate,
    responses(
        (status = 200, description = "Tea updated", body = Tea),
        (status = 404, description = "No tea with this id", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody)
    ),
    tag = "Teas"
)]
pub async fn update_tea(
    State(state): TeaState,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<TeaUpdate>,
) -> Result<Json<Tea>, ApiError> {
    Ok(Json(state.catalog.update(id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/teas/{id}",
    params(("id" = i64, Path, description = "Tea id")),
    responses(
        (status = 204, description = "Tea deleted"),
        (status = 404, description = "No tea with this id", body = ErrorBody)
    ),
    tag = "Teas"
)]
pub async fn delete_tea(
    State(state): TeaState,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
