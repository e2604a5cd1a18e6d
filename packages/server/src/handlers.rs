//! HTTP handlers for the user endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chatstream_api::db::UserStore;
use chatstream_api::{Identity, PublicUser};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::application::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

pub async fn register<S: UserStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<Identity>, ApiError> {
    let Json(req) = body?;
    let identity = state
        .service
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok(Json(identity))
}

pub async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Identity>, ApiError> {
    let Json(req) = body?;
    let identity = state
        .service
        .login(&session, &req.email, &req.password)
        .await?;
    Ok(Json(identity))
}

pub async fn logout<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
) -> Result<StatusCode, ApiError> {
    state.service.logout(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_authentication<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
) -> Result<Json<Identity>, ApiError> {
    Ok(Json(state.service.current_identity(&session).await?))
}

/// 200 with the user, or 204 if no user has this id.
pub async fn get_user<S: UserStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = path?;
    match state.service.user_by_id(id).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// `ids` may be comma-separated, repeated, or both: `?ids=a,b&ids=c`.
pub async fn get_users<S: UserStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let Query(params) = query?;
    let ids = parse_ids(&params)?;
    Ok(Json(state.service.users_by_ids(&ids).await?))
}

fn parse_ids(params: &[(String, String)]) -> Result<Vec<Uuid>, ApiError> {
    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "ids")
        .map(|(_, value)| value.as_str())
        .collect();
    if values.is_empty() {
        return Err(ApiError::InvalidRequest("Missing ids parameter".to_string()));
    }

    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s).map_err(|e| ApiError::InvalidRequest(format!("Invalid id {s}: {e}")))
        })
        .collect()
}
