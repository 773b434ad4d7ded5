// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{AuthResponse, LoginPayload, RegistroPayload, UsuarioActual},
};

// POST /api/auth/registro
#[utoipa::path(
    post,
    path = "/api/auth/registro",
    tag = "Auth",
    request_body = RegistroPayload,
    responses(
        (status = 201, description = "Titular registrado, devuelve el token", body = AuthResponse),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "El e-mail ya está en uso")
    )
)]
pub async fn registro(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegistroPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let token = app_state
        .auth_service
        .registrar(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login correcto, devuelve el token", body = AuthResponse),
        (status = 401, description = "Credenciales inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::Validacion(e).to_api_error(&locale))?;

    let token = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuario autenticado con su perfil", body = UsuarioActual)
    ),
    security(("api_jwt" = []))
)]
pub async fn me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let actual = app_state
        .auth_service
        .usuario_actual(&usuario)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(actual)))
}
