// src/handlers/tipos_cuota.rs

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
    models::cuota::{ActualizarTipoCuotaPayload, CrearTipoCuotaPayload, TipoCuota},
};

// GET /api/tipos-cuota
#[utoipa::path(
    get,
    path = "/api/tipos-cuota",
    tag = "Tipos de cuota",
    responses(
        (status = 200, description = "Listado de tipos de cuota", body = Vec<TipoCuota>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_tipos(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let tipos = app_state
        .cuota_service
        .listar_tipos()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(tipos)))
}

// POST /api/tipos-cuota
#[utoipa::path(
    post,
    path = "/api/tipos-cuota",
    tag = "Tipos de cuota",
    request_body = CrearTipoCuotaPayload,
    responses(
        (status = 201, description = "Tipo de cuota creado", body = TipoCuota),
        (status = 409, description = "El código ya existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_tipo(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Json(payload): Json<CrearTipoCuotaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let tipo = app_state
        .cuota_service
        .crear_tipo(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(tipo)))
}

// PUT /api/tipos-cuota/{id}
#[utoipa::path(
    put,
    path = "/api/tipos-cuota/{id}",
    tag = "Tipos de cuota",
    params(("id" = Uuid, Path, description = "ID del tipo de cuota")),
    request_body = ActualizarTipoCuotaPayload,
    responses(
        (status = 200, description = "Tipo de cuota actualizado", body = TipoCuota),
        (status = 404, description = "Tipo de cuota no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn actualizar_tipo(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarTipoCuotaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let tipo = app_state
        .cuota_service
        .actualizar_tipo(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(tipo)))
}
