// src/models/grupo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::Perfil;
use crate::models::socio::SocioConDisciplinas;

// --- FILAS ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GrupoFamiliar {
    pub id: Uuid,
    #[schema(example = "Familia Pérez")]
    pub nombre: String,
    pub titular_id: Uuid,
    #[schema(example = "5000.00")]
    pub monto_cuota_social: Decimal,
    pub tipo_cuota_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Fila del listado de administración (grupo + titular + conteos)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GrupoResumen {
    pub id: Uuid,
    pub nombre: String,
    pub titular_nombre: String,
    pub titular_dni: String,
    #[schema(example = 3)]
    pub cantidad_socios: i64,
    #[schema(example = 2)]
    pub cuotas_pendientes: i64,
}

// Detalle completo para la pantalla de edición del grupo
#[derive(Debug, Serialize, ToSchema)]
pub struct GrupoDetalle {
    pub grupo: GrupoFamiliar,
    pub titular: Perfil,
    pub socios: Vec<SocioConDisciplinas>,
    // Inscripciones propias del titular (ids de disciplina)
    pub titular_disciplinas: Vec<Uuid>,
}

// --- PAYLOADS ---

// Un integrante tal como lo manda el formulario de edición del grupo.
// Sin `id` significa "alta nueva"; con `id`, actualización.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MiembroPayload {
    pub id: Option<Uuid>,
    #[validate(length(min = 2, message = "nombre_corto"))]
    #[schema(example = "Ana Pérez")]
    pub nombre_completo: String,
    #[validate(length(min = 6, message = "dni_invalido"))]
    pub dni: String,
    #[schema(example = "Hijo")]
    pub relacion: String,
    #[schema(value_type = Option<String>, format = Date, example = "2012-08-15")]
    pub fecha_nacimiento: Option<NaiveDate>,
    // Disciplinas deseadas del integrante: el conjunto se reemplaza entero
    #[serde(default)]
    pub disciplinas: Vec<Uuid>,
}

// El estado deseado del grupo entero (PUT /api/grupos/{id})
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarGrupoPayload {
    #[validate(length(min = 2, message = "nombre_corto"))]
    #[schema(example = "Familia Pérez")]
    pub nombre_grupo: String,

    // Datos de perfil del titular
    #[validate(length(min = 2, message = "nombre_corto"))]
    pub nombre_completo: String,
    #[validate(length(min = 6, message = "dni_invalido"))]
    pub dni: String,
    pub telefono: Option<String>,
    #[validate(email(message = "email_invalido"))]
    pub email: String,

    pub tipo_cuota_id: Option<Uuid>,

    #[validate(nested)]
    #[serde(default)]
    pub miembros: Vec<MiembroPayload>,

    #[serde(default)]
    pub titular_disciplinas: Vec<Uuid>,
}

// Respuesta homogénea de operaciones de escritura
#[derive(Debug, Serialize, ToSchema)]
pub struct OperacionOk {
    pub success: bool,
    #[schema(example = "Grupo actualizado correctamente")]
    pub message: String,
}
