// src/models/socio.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Socio {
    pub id: Uuid,
    pub grupo_id: Uuid,
    pub usuario_id: Option<Uuid>,
    #[schema(example = "Ana Pérez")]
    pub nombre_completo: String,
    pub dni: String,
    #[schema(example = "Hijo")]
    pub relacion: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Inscripcion {
    pub id: Uuid,
    pub socio_id: Uuid,
    pub disciplina_id: Uuid,
    pub activa: bool,
    #[schema(value_type = String, format = Date)]
    pub fecha_inscripcion: NaiveDate,
}

// Socio con sus ids de disciplina, para el detalle del grupo
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SocioConDisciplinas {
    pub id: Uuid,
    pub usuario_id: Option<Uuid>,
    pub nombre_completo: String,
    pub dni: String,
    pub relacion: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub disciplinas: Vec<Uuid>,
}

// Fila del join inscripciones → socios → disciplinas que alimenta la
// generación de cuotas deportivas. Los joins internos descartan solos
// cualquier referencia colgante.
#[derive(Debug, Clone, FromRow)]
pub struct CandidatoDeportivo {
    pub grupo_id: Uuid,
    pub disciplina_id: Uuid,
    pub monto_disciplina: Decimal,
}

// Conteo de integrantes además del titular, por grupo
#[derive(Debug, Clone, FromRow)]
pub struct ConteoGrupo {
    pub grupo_id: Uuid,
    pub cantidad_extra: i64,
}
