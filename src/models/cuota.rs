// src/models/cuota.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Mapea el CREATE TYPE tipo_cuota_enum de la base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_cuota_enum", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaseCuota {
    Social,
    Deportiva,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Cuota {
    pub id: Uuid,
    pub grupo_id: Uuid,
    // Solo las cuotas deportivas llevan disciplina
    pub disciplina_id: Option<Uuid>,
    pub tipo: ClaseCuota,
    #[schema(example = 3)]
    pub mes: i32,
    #[schema(example = 2025)]
    pub anio: i32,
    #[schema(example = "5000.00")]
    pub monto: Decimal,
    #[schema(value_type = String, format = Date)]
    pub fecha_vencimiento: NaiveDate,
    pub pagada: bool,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_pago: Option<NaiveDate>,
    pub medio_pago: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TipoCuota {
    pub id: Uuid,
    #[schema(example = "gf1")]
    pub codigo: String,
    #[schema(example = "Cuota social grupo familiar")]
    pub nombre: String,
    #[schema(example = "8000.00")]
    pub monto: Decimal,
    pub por_disciplina: bool,
    pub activo: bool,
}

// Una cuota pendiente de insertar, tal como la decide el planificador.
#[derive(Debug, Clone, PartialEq)]
pub struct CuotaNueva {
    pub grupo_id: Uuid,
    pub disciplina_id: Option<Uuid>,
    pub tipo: ClaseCuota,
    pub mes: i32,
    pub anio: i32,
    pub monto: Decimal,
    pub fecha_vencimiento: NaiveDate,
}

// --- PAYLOADS ---

// El contrato de este endpoint quedó en inglés (month/year/dueDate) y los
// clientes ya lo hablan así; adentro seguimos en castellano.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerarCuotasPayload {
    #[serde(rename = "month")]
    #[validate(range(min = 1, max = 12, message = "mes_invalido"))]
    #[schema(example = 3)]
    pub mes: u32,
    #[serde(rename = "year")]
    #[validate(range(min = 2000, max = 2100, message = "anio_invalido"))]
    #[schema(example = 2025)]
    pub anio: i32,
    #[serde(rename = "dueDate")]
    #[schema(value_type = Option<String>, format = Date, example = "2025-03-10")]
    pub fecha_vencimiento: Option<NaiveDate>,
}

// Resultado agregado de la generación. Los fallos por tupla se loguean
// y cuentan como omitidas, nunca abortan el lote.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResumenGeneracion {
    pub success: bool,
    #[serde(rename = "created")]
    #[schema(example = 42)]
    pub creadas: u32,
    #[serde(rename = "skipped")]
    #[schema(example = 3)]
    pub omitidas: u32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearTipoCuotaPayload {
    #[validate(length(min = 2, message = "codigo_corto"))]
    #[schema(example = "gf2")]
    pub codigo: String,
    #[validate(length(min = 2, message = "nombre_corto"))]
    pub nombre: String,
    #[schema(example = "9500.00")]
    pub monto: Decimal,
    #[serde(default)]
    pub por_disciplina: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarTipoCuotaPayload {
    #[validate(length(min = 2, message = "nombre_corto"))]
    pub nombre: Option<String>,
    pub monto: Option<Decimal>,
    pub por_disciplina: Option<bool>,
    pub activo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PagarCuotaPayload {
    #[validate(length(min = 2, message = "medio_invalido"))]
    #[schema(example = "efectivo")]
    pub medio_pago: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_pago: Option<NaiveDate>,
}

// Filtros del listado de cuotas
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CuotaFiltro {
    pub grupo_id: Option<Uuid>,
    pub disciplina_id: Option<Uuid>,
    pub mes: Option<i32>,
    pub anio: Option<i32>,
    pub pagada: Option<bool>,
}
