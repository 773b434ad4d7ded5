// src/handlers/portal.rs
//
// Autogestión del socio: cada endpoint resuelve el grupo del usuario
// autenticado y solo muestra lo suyo.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::CambiarPasswordPayload,
        cuota::Cuota,
        grupo::{GrupoDetalle, OperacionOk},
        pago::Pago,
    },
};

// GET /api/portal/mi-grupo
#[utoipa::path(
    get,
    path = "/api/portal/mi-grupo",
    tag = "Portal",
    responses(
        (status = 200, description = "El grupo familiar del socio autenticado", body = GrupoDetalle),
        (status = 404, description = "El usuario no pertenece a ningún grupo")
    ),
    security(("api_jwt" = []))
)]
pub async fn mi_grupo(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let grupo_id = app_state
        .grupo_service
        .grupo_de_usuario(usuario.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let detalle = app_state
        .grupo_service
        .detalle(grupo_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(detalle)))
}

// GET /api/portal/mis-cuotas
#[utoipa::path(
    get,
    path = "/api/portal/mis-cuotas",
    tag = "Portal",
    responses(
        (status = 200, description = "Cuotas del grupo del socio", body = Vec<Cuota>)
    ),
    security(("api_jwt" = []))
)]
pub async fn mis_cuotas(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let grupo_id = app_state
        .grupo_service
        .grupo_de_usuario(usuario.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let cuotas = app_state
        .cuota_service
        .listar_por_grupo(grupo_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(cuotas)))
}

// GET /api/portal/mis-pagos
#[utoipa::path(
    get,
    path = "/api/portal/mis-pagos",
    tag = "Portal",
    responses(
        (status = 200, description = "Pagos del grupo del socio", body = Vec<Pago>)
    ),
    security(("api_jwt" = []))
)]
pub async fn mis_pagos(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let grupo_id = app_state
        .grupo_service
        .grupo_de_usuario(usuario.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let pagos = app_state
        .pago_service
        .listar(Some(grupo_id))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(pagos)))
}

// PUT /api/portal/password
#[utoipa::path(
    put,
    path = "/api/portal/password",
    tag = "Portal",
    request_body = CambiarPasswordPayload,
    responses(
        (status = 200, description = "Contraseña actualizada", body = OperacionOk),
        (status = 401, description = "La contraseña actual no coincide")
    ),
    security(("api_jwt" = []))
)]
pub async fn cambiar_password(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CambiarPasswordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    app_state
        .auth_service
        .cambiar_password(&usuario, &payload.password_actual, &payload.password_nueva)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((
        StatusCode::OK,
        Json(OperacionOk {
            success: true,
            message: "Contraseña actualizada".to_string(),
        }),
    ))
}
