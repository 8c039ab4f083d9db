//! User API Routes
//!
//! Current user, subscription changes and saved opportunities.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use yield_core::{SubscriptionLevel, User};

use crate::{ApiResponse, AppError, AppState, UserQuery};

/// Request to change plan
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubscriptionRequest {
    pub level: SubscriptionLevel,
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(get_current_user))
        .route("/api/users/me/subscription", post(update_subscription))
        .route(
            "/api/users/me/saved/:id",
            post(save_opportunity).delete(unsave_opportunity),
        )
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    params(UserQuery),
    responses(
        (status = 200, description = "The caller's user record", body = User),
        (status = 404, description = "Unknown user")
    ),
    tag = "Users"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.provider.get_user(state.user_id(&query)).await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/api/users/me/subscription",
    params(UserQuery),
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Updated user; premium runs for 30 days", body = User),
        (status = 400, description = "Missing or unknown level")
    ),
    tag = "Users"
)]
pub async fn update_subscription(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let Json(req) = body?;
    let user = state
        .provider
        .set_subscription(state.user_id(&query), req.level)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/api/users/me/saved/{id}",
    params(("id" = String, Path, description = "Opportunity id"), UserQuery),
    responses(
        (status = 200, description = "Updated user; saving twice is a no-op", body = User),
        (status = 404, description = "Unknown opportunity or user")
    ),
    tag = "Users"
)]
pub async fn save_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state
        .provider
        .save_opportunity(state.user_id(&query), &id)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/me/saved/{id}",
    params(("id" = String, Path, description = "Opportunity id"), UserQuery),
    responses((status = 200, description = "Updated user; removing an unsaved id is a no-op", body = User)),
    tag = "Users"
)]
pub async fn unsave_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state
        .provider
        .unsave_opportunity(state.user_id(&query), &id)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}
