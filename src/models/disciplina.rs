// src/models/disciplina.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Disciplina {
    pub id: Uuid,
    #[schema(example = "Fútbol infantil")]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[schema(example = "1500.00")]
    pub monto_cuota_deportiva: Decimal,
    pub activa: bool,
    // Cada disciplina tiene a lo sumo un administrador
    pub admin_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearDisciplinaPayload {
    #[validate(length(min = 2, message = "nombre_corto"))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[schema(example = "1500.00")]
    pub monto_cuota_deportiva: Decimal,
    pub admin_id: Option<Uuid>,
}

// Los campos ausentes se dejan como están
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarDisciplinaPayload {
    #[validate(length(min = 2, message = "nombre_corto"))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub monto_cuota_deportiva: Option<Decimal>,
    pub activa: Option<bool>,
    pub admin_id: Option<Uuid>,
}
