// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("error de validación")]
    Validacion(#[from] validator::ValidationErrors),

    #[error("el e-mail ya existe")]
    EmailYaExiste,

    #[error("credenciales inválidas")]
    CredencialesInvalidas,

    #[error("token inválido")]
    TokenInvalido,

    #[error("acceso denegado")]
    AccesoDenegado,

    #[error("usuario no encontrado")]
    UsuarioNoEncontrado,

    #[error("grupo familiar no encontrado")]
    GrupoNoEncontrado,

    #[error("socio no encontrado")]
    SocioNoEncontrado,

    #[error("disciplina no encontrada")]
    DisciplinaNoEncontrada,

    #[error("tipo de cuota no encontrado")]
    TipoCuotaNoEncontrado,

    #[error("cuota no encontrada")]
    CuotaNoEncontrada,

    #[error("la cuota ya está pagada")]
    CuotaYaPagada,

    #[error("registro duplicado: {0}")]
    RegistroDuplicado(String),

    // Variante para errores de base de datos
    #[error("error de base de datos")]
    BaseDeDatos(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado.
    // `anyhow::Error` conserva el contexto del error.
    #[error("error interno del servidor")]
    Interno(#[from] anyhow::Error),

    #[error("error de bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("error de JWT: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

// Error ya listo para el cliente: status + mensaje en el idioma pedido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validacion(_) => StatusCode::BAD_REQUEST,
            AppError::EmailYaExiste | AppError::RegistroDuplicado(_) | AppError::CuotaYaPagada => {
                StatusCode::CONFLICT
            }
            AppError::CredencialesInvalidas | AppError::TokenInvalido => StatusCode::UNAUTHORIZED,
            AppError::AccesoDenegado => StatusCode::FORBIDDEN,
            AppError::UsuarioNoEncontrado
            | AppError::GrupoNoEncontrado
            | AppError::SocioNoEncontrado
            | AppError::DisciplinaNoEncontrada
            | AppError::TipoCuotaNoEncontrado
            | AppError::CuotaNoEncontrada => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Mensaje para el cliente según el idioma. El detalle técnico jamás
    // sale al exterior: queda en el log.
    fn mensaje(&self, en: bool) -> &'static str {
        match (self, en) {
            (AppError::Validacion(_), false) => "Uno o más campos son inválidos.",
            (AppError::Validacion(_), true) => "One or more fields are invalid.",
            (AppError::EmailYaExiste, false) => "Este e-mail ya está en uso.",
            (AppError::EmailYaExiste, true) => "This e-mail is already in use.",
            (AppError::CredencialesInvalidas, false) => "E-mail o contraseña inválidos.",
            (AppError::CredencialesInvalidas, true) => "Invalid e-mail or password.",
            (AppError::TokenInvalido, false) => "Token de autenticación inválido o ausente.",
            (AppError::TokenInvalido, true) => "Missing or invalid authentication token.",
            (AppError::AccesoDenegado, false) => "No tiene permisos para esta operación.",
            (AppError::AccesoDenegado, true) => "You are not allowed to perform this operation.",
            (AppError::UsuarioNoEncontrado, false) => "Usuario no encontrado.",
            (AppError::UsuarioNoEncontrado, true) => "User not found.",
            (AppError::GrupoNoEncontrado, false) => "Grupo familiar no encontrado.",
            (AppError::GrupoNoEncontrado, true) => "Family group not found.",
            (AppError::SocioNoEncontrado, false) => "Socio no encontrado.",
            (AppError::SocioNoEncontrado, true) => "Member not found.",
            (AppError::DisciplinaNoEncontrada, false) => "Disciplina no encontrada.",
            (AppError::DisciplinaNoEncontrada, true) => "Discipline not found.",
            (AppError::TipoCuotaNoEncontrado, false) => "Tipo de cuota no encontrado.",
            (AppError::TipoCuotaNoEncontrado, true) => "Fee type not found.",
            (AppError::CuotaNoEncontrada, false) => "Cuota no encontrada.",
            (AppError::CuotaNoEncontrada, true) => "Fee not found.",
            (AppError::CuotaYaPagada, false) => "La cuota ya figura como pagada.",
            (AppError::CuotaYaPagada, true) => "The fee is already marked as paid.",
            (AppError::RegistroDuplicado(_), false) => "El registro ya existe.",
            (AppError::RegistroDuplicado(_), true) => "The record already exists.",
            (_, false) => "Ocurrió un error inesperado.",
            (_, true) => "An unexpected error occurred.",
        }
    }

    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let en = locale.es_ingles();
        let status = self.status();

        // Los detalles de la validación sí viajan al cliente, campo por campo.
        let details = if let AppError::Validacion(ref errors) = self {
            let mut mapa = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                mapa.insert(field.to_string(), messages);
            }
            serde_json::to_value(mapa).ok()
        } else {
            None
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Error interno del servidor: {:?}", self);
        }

        ApiError {
            status,
            message: self.mensaje(en).to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.message, "details": details })),
            None => Json(json!({ "error": self.message })),
        };
        (self.status, body).into_response()
    }
}

// Los guards de middleware no tienen Locale a mano: responden en castellano.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::castellano()).into_response()
    }
}
