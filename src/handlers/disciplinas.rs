// src/handlers/disciplinas.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AdminActual, i18n::Locale},
    models::disciplina::{ActualizarDisciplinaPayload, CrearDisciplinaPayload, Disciplina},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DisciplinaFiltro {
    // Por defecto se listan solo las activas
    pub incluir_inactivas: Option<bool>,
}

// GET /api/disciplinas
#[utoipa::path(
    get,
    path = "/api/disciplinas",
    tag = "Disciplinas",
    params(DisciplinaFiltro),
    responses(
        (status = 200, description = "Listado de disciplinas", body = Vec<Disciplina>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_disciplinas(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filtro): Query<DisciplinaFiltro>,
) -> Result<impl IntoResponse, ApiError> {
    let solo_activas = !filtro.incluir_inactivas.unwrap_or(false);

    let disciplinas = app_state
        .disciplina_service
        .listar(solo_activas)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(disciplinas)))
}

// POST /api/disciplinas
#[utoipa::path(
    post,
    path = "/api/disciplinas",
    tag = "Disciplinas",
    request_body = CrearDisciplinaPayload,
    responses(
        (status = 201, description = "Disciplina creada", body = Disciplina),
        (status = 400, description = "Datos inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_disciplina(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Json(payload): Json<CrearDisciplinaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let disciplina = app_state
        .disciplina_service
        .crear(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(disciplina)))
}

// PUT /api/disciplinas/{id}
#[utoipa::path(
    put,
    path = "/api/disciplinas/{id}",
    tag = "Disciplinas",
    params(("id" = Uuid, Path, description = "ID de la disciplina")),
    request_body = ActualizarDisciplinaPayload,
    responses(
        (status = 200, description = "Disciplina actualizada", body = Disciplina),
        (status = 404, description = "Disciplina no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn actualizar_disciplina(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarDisciplinaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let disciplina = app_state
        .disciplina_service
        .actualizar(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(disciplina)))
}
