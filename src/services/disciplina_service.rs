// src/services/disciplina_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DisciplinaRepository,
    models::disciplina::{ActualizarDisciplinaPayload, CrearDisciplinaPayload, Disciplina},
};

#[derive(Clone)]
pub struct DisciplinaService {
    pool: PgPool,
    repo: DisciplinaRepository,
}

impl DisciplinaService {
    pub fn new(pool: PgPool, repo: DisciplinaRepository) -> Self {
        Self { pool, repo }
    }

    pub async fn listar(&self, solo_activas: bool) -> Result<Vec<Disciplina>, AppError> {
        self.repo.listar(solo_activas).await
    }

    pub async fn crear(&self, payload: &CrearDisciplinaPayload) -> Result<Disciplina, AppError> {
        self.repo
            .crear(
                &self.pool,
                &payload.nombre,
                payload.descripcion.as_deref(),
                payload.monto_cuota_deportiva,
                payload.admin_id,
            )
            .await
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &ActualizarDisciplinaPayload,
    ) -> Result<Disciplina, AppError> {
        self.repo
            .actualizar(
                &self.pool,
                id,
                payload.nombre.as_deref(),
                payload.descripcion.as_deref(),
                payload.monto_cuota_deportiva,
                payload.activa,
                payload.admin_id,
            )
            .await
    }
}
