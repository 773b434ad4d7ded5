// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapea el CREATE TYPE rol_usuario de la base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rol_usuario", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rol {
    Socio,
    AdminDisciplina,
    SuperAdmin,
}

// Representa un usuario del subsistema de autenticación
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Usuario {
    pub id: Uuid,
    #[schema(example = "titular@club.com.ar")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE por seguridad
    #[schema(ignore)]
    pub password_hash: String,

    pub rol: Rol,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// El perfil del titular (1 a 1 con el usuario)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Perfil {
    pub id: Uuid,
    #[schema(example = "Juan Pérez")]
    pub nombre_completo: String,
    #[schema(example = "30123456")]
    pub dni: String,
    pub telefono: Option<String>,
    pub email: String,
}

// Datos para el alta de un nuevo socio titular
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegistroPayload {
    #[validate(email(message = "email_invalido"))]
    #[schema(example = "titular@club.com.ar")]
    pub email: String,
    #[validate(length(min = 6, message = "password_corta"))]
    pub password: String,
    #[validate(length(min = 2, message = "nombre_corto"))]
    #[schema(example = "Juan Pérez")]
    pub nombre_completo: String,
    #[validate(length(min = 6, message = "dni_invalido"))]
    #[schema(example = "30123456")]
    pub dni: String,
    pub telefono: Option<String>,
    // Si no viene, el grupo se llama como el titular
    pub nombre_grupo: Option<String>,
}

// Datos para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "email_invalido"))]
    pub email: String,
    #[validate(length(min = 6, message = "password_corta"))]
    pub password: String,
}

// Respuesta de autenticación con el token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Cambio de contraseña desde el portal
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CambiarPasswordPayload {
    #[validate(length(min = 6, message = "password_corta"))]
    pub password_actual: String,
    #[validate(length(min = 6, message = "password_corta"))]
    pub password_nueva: String,
}

// Estructura de datos ("claims") dentro del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID del usuario)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// Respuesta de GET /api/auth/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UsuarioActual {
    pub id: Uuid,
    pub email: String,
    pub rol: Rol,
    pub perfil: Option<Perfil>,
}
