// src/models/pago.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Pago {
    pub id: Uuid,
    pub grupo_id: Uuid,
    #[schema(example = "5000.00")]
    pub monto: Decimal,
    #[schema(value_type = String, format = Date)]
    pub fecha_pago: NaiveDate,
    #[schema(example = "transferencia")]
    pub medio_pago: String,
    pub referencia: Option<String>,
    // Etiqueta del período facturado, ej. "3/2025"
    #[schema(example = "3/2025")]
    pub periodo: Option<String>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegistrarPagoPayload {
    pub grupo_id: Uuid,
    #[schema(example = "5000.00")]
    pub monto: Decimal,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_pago: Option<NaiveDate>,
    #[validate(length(min = 2, message = "medio_invalido"))]
    pub medio_pago: String,
    pub referencia: Option<String>,
    pub periodo: Option<String>,
    pub notas: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PagoFiltro {
    pub grupo_id: Option<Uuid>,
}
