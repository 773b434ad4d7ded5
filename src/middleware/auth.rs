// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Rol, Usuario},
};

// El middleware en sí: valida el Bearer token y deja el usuario
// en las extensions de la request.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let user = app_state.auth_service.validar_token(token).await?;

            request.extensions_mut().insert(user);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::TokenInvalido)
}

// Personal del club: super admin o administrador de disciplina. Debe
// correr DESPUÉS de auth_guard (auth_guard va en la capa exterior).
pub async fn solo_staff_guard(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<Usuario>()
        .ok_or(AppError::TokenInvalido)?;

    match user.rol {
        Rol::SuperAdmin | Rol::AdminDisciplina => Ok(next.run(request).await),
        Rol::Socio => Err(AppError::AccesoDenegado),
    }
}

// Extractor para obtener el usuario autenticado directamente en los handlers
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::TokenInvalido)
    }
}

// El guardián de las operaciones de escritura: el extractor rechaza a
// cualquiera que no sea el super administrador.
pub struct AdminActual(pub Usuario);

impl<S> FromRequestParts<S> for AdminActual
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .ok_or(AppError::TokenInvalido)?;

        if user.rol != Rol::SuperAdmin {
            return Err(AppError::AccesoDenegado);
        }

        Ok(AdminActual(user))
    }
}
