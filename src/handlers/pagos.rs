// src/handlers/pagos.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AdminActual, i18n::Locale},
    models::pago::{Pago, PagoFiltro, RegistrarPagoPayload},
};

// GET /api/pagos
#[utoipa::path(
    get,
    path = "/api/pagos",
    tag = "Pagos",
    params(PagoFiltro),
    responses(
        (status = 200, description = "Libro de pagos", body = Vec<Pago>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_pagos(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filtro): Query<PagoFiltro>,
) -> Result<impl IntoResponse, ApiError> {
    let pagos = app_state
        .pago_service
        .listar(filtro.grupo_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(pagos)))
}

// POST /api/pagos
// Asiento manual en el libro (pagos sin cuota asociada).
#[utoipa::path(
    post,
    path = "/api/pagos",
    tag = "Pagos",
    request_body = RegistrarPagoPayload,
    responses(
        (status = 201, description = "Pago asentado", body = Pago),
        (status = 404, description = "Grupo no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn registrar_pago(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Json(payload): Json<RegistrarPagoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let pago = app_state
        .pago_service
        .registrar(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(pago)))
}
