// src/handlers/grupos.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AdminActual, i18n::Locale},
    models::grupo::{ActualizarGrupoPayload, GrupoDetalle, GrupoResumen, OperacionOk},
};

// GET /api/grupos
#[utoipa::path(
    get,
    path = "/api/grupos",
    tag = "Grupos",
    responses(
        (status = 200, description = "Listado de grupos familiares", body = Vec<GrupoResumen>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_grupos(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let grupos = app_state
        .grupo_service
        .listar()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(grupos)))
}

// GET /api/grupos/{id}
#[utoipa::path(
    get,
    path = "/api/grupos/{id}",
    tag = "Grupos",
    params(("id" = Uuid, Path, description = "ID del grupo familiar")),
    responses(
        (status = 200, description = "Detalle del grupo para edición", body = GrupoDetalle),
        (status = 404, description = "Grupo no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn detalle_grupo(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detalle = app_state
        .grupo_service
        .detalle(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(detalle)))
}

// PUT /api/grupos/{id}
// Reconcilia el grupo entero contra el estado que manda el formulario.
#[utoipa::path(
    put,
    path = "/api/grupos/{id}",
    tag = "Grupos",
    params(("id" = Uuid, Path, description = "ID del grupo familiar")),
    request_body = ActualizarGrupoPayload,
    responses(
        (status = 200, description = "Grupo reconciliado", body = OperacionOk),
        (status = 400, description = "Datos inválidos"),
        (status = 404, description = "Grupo no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn actualizar_grupo(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarGrupoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    app_state
        .socio_service
        .actualizar_grupo(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((
        StatusCode::OK,
        Json(OperacionOk {
            success: true,
            message: "Grupo actualizado correctamente".to_string(),
        }),
    ))
}
