//! Hive section handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use katla_core::types::{HiveId, HiveSectionId};
use katla_entity::hive_section::{HiveSection, HiveSectionListItem};

use crate::dto::request::HiveSectionBody;
use crate::dto::response::ApiResponse;
use crate::error::{ApiError, validate_body};
use crate::extractors::Actor;
use crate::state::AppState;

/// GET /api/sections
pub async fn list_sections(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<ApiResponse<Vec<HiveSectionListItem>>>, ApiError> {
    let sections = state
        .hive_section_service(&actor)
        .list_hive_sections()
        .await?;
    Ok(Json(ApiResponse::ok(sections)))
}

/// GET /api/hives/{hive_id}/sections
pub async fn list_hive_sections(
    State(state): State<AppState>,
    actor: Actor,
    Path(hive_id): Path<HiveId>,
) -> Result<Json<ApiResponse<Vec<HiveSectionListItem>>>, ApiError> {
    let sections = state
        .hive_section_service(&actor)
        .list_hive_sections_by_hive(hive_id)
        .await?;
    Ok(Json(ApiResponse::ok(sections)))
}

/// GET /api/sections/{id}
pub async fn get_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<HiveSectionId>,
) -> Result<Json<ApiResponse<HiveSection>>, ApiError> {
    let section = state
        .hive_section_service(&actor)
        .get_hive_section(id)
        .await?;
    Ok(Json(ApiResponse::ok(section)))
}

/// POST /api/sections
pub async fn create_section(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<HiveSectionBody>,
) -> Result<impl IntoResponse, ApiError> {
    validate_body(&body)?;

    let section = state
        .hive_section_service(&actor)
        .create_hive_section(body.into())
        .await?;

    let location = format!("/api/sections/{}", section.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::ok(section)),
    ))
}

/// PUT /api/sections/{id}
pub async fn update_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<HiveSectionId>,
    Json(body): Json<HiveSectionBody>,
) -> Result<Json<ApiResponse<HiveSection>>, ApiError> {
    validate_body(&body)?;

    let section = state
        .hive_section_service(&actor)
        .update_hive_section(id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(section)))
}

/// PUT /api/sections/{id}/status/{deleted_status}
pub async fn set_section_status(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, deleted_status)): Path<(HiveSectionId, bool)>,
) -> Result<StatusCode, ApiError> {
    state
        .hive_section_service(&actor)
        .set_status(id, deleted_status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/sections/{id}
pub async fn delete_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<HiveSectionId>,
) -> Result<StatusCode, ApiError> {
    state
        .hive_section_service(&actor)
        .delete_hive_section(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
