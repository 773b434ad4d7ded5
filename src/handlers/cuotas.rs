// src/handlers/cuotas.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AdminActual, i18n::Locale},
    models::{
        cuota::{Cuota, CuotaFiltro, GenerarCuotasPayload, PagarCuotaPayload, ResumenGeneracion},
        pago::Pago,
    },
};

// POST /api/cuotas/generar
// Dispara la generación mensual: una cuota social por grupo y una
// deportiva por cada inscripción, sin duplicar el período.
#[utoipa::path(
    post,
    path = "/api/cuotas/generar",
    tag = "Cuotas",
    request_body = GenerarCuotasPayload,
    responses(
        (status = 200, description = "Resumen de la generación", body = ResumenGeneracion),
        (status = 400, description = "Mes o año inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn generar_cuotas(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Json(payload): Json<GenerarCuotasPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let resumen = app_state
        .cuota_service
        .generar_cuotas(payload.mes, payload.anio, payload.fecha_vencimiento)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(resumen)))
}

// GET /api/cuotas
#[utoipa::path(
    get,
    path = "/api/cuotas",
    tag = "Cuotas",
    params(CuotaFiltro),
    responses(
        (status = 200, description = "Listado de cuotas según filtros", body = Vec<Cuota>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_cuotas(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filtro): Query<CuotaFiltro>,
) -> Result<impl IntoResponse, ApiError> {
    let cuotas = app_state
        .cuota_service
        .listar(&filtro)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(cuotas)))
}

// POST /api/cuotas/{id}/pago
#[utoipa::path(
    post,
    path = "/api/cuotas/{id}/pago",
    tag = "Cuotas",
    params(("id" = Uuid, Path, description = "ID de la cuota")),
    request_body = PagarCuotaPayload,
    responses(
        (status = 201, description = "Cuota cobrada y pago asentado", body = Pago),
        (status = 404, description = "Cuota no encontrada"),
        (status = 409, description = "La cuota ya estaba pagada")
    ),
    security(("api_jwt" = []))
)]
pub async fn pagar_cuota(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminActual,
    Path(id): Path<Uuid>,
    Json(payload): Json<PagarCuotaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let pago = app_state
        .pago_service
        .pagar_cuota(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(pago)))
}
