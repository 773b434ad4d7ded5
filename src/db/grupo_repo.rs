// src/db/grupo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::grupo::{GrupoFamiliar, GrupoResumen},
};

const GRUPO_SELECT: &str = "SELECT id, nombre, titular_id, monto_cuota_social, tipo_cuota_id, created_at, updated_at FROM grupos_familiares";

#[derive(Clone)]
pub struct GrupoRepository {
    pool: PgPool,
}

impl GrupoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        titular_id: Uuid,
    ) -> Result<GrupoFamiliar, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let grupo = sqlx::query_as::<_, GrupoFamiliar>(
            r#"
            INSERT INTO grupos_familiares (nombre, titular_id)
            VALUES ($1, $2)
            RETURNING id, nombre, titular_id, monto_cuota_social, tipo_cuota_id, created_at, updated_at
            "#,
        )
        .bind(nombre)
        .bind(titular_id)
        .fetch_one(executor)
        .await?;

        Ok(grupo)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<GrupoFamiliar>, AppError> {
        let sql = format!("{} WHERE id = $1", GRUPO_SELECT);
        let grupo = sqlx::query_as::<_, GrupoFamiliar>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(grupo)
    }

    pub async fn buscar_por_titular(
        &self,
        titular_id: Uuid,
    ) -> Result<Option<GrupoFamiliar>, AppError> {
        let sql = format!("{} WHERE titular_id = $1", GRUPO_SELECT);
        let grupo = sqlx::query_as::<_, GrupoFamiliar>(&sql)
            .bind(titular_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(grupo)
    }

    // Todos los grupos, tal cual, para el motor de generación de cuotas.
    pub async fn listar(&self) -> Result<Vec<GrupoFamiliar>, AppError> {
        let sql = format!("{} ORDER BY created_at ASC", GRUPO_SELECT);
        let grupos = sqlx::query_as::<_, GrupoFamiliar>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(grupos)
    }

    // Listado del panel: grupo + titular + conteos para la grilla.
    pub async fn listar_resumen(&self) -> Result<Vec<GrupoResumen>, AppError> {
        let resumen = sqlx::query_as::<_, GrupoResumen>(
            r#"
            SELECT
                g.id,
                g.nombre,
                p.nombre_completo AS titular_nombre,
                p.dni AS titular_dni,
                (SELECT COUNT(*) FROM socios s WHERE s.grupo_id = g.id) AS cantidad_socios,
                (SELECT COUNT(*) FROM cuotas c WHERE c.grupo_id = g.id AND NOT c.pagada) AS cuotas_pendientes
            FROM grupos_familiares g
            INNER JOIN perfiles p ON p.id = g.titular_id
            ORDER BY p.nombre_completo ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(resumen)
    }

    pub async fn actualizar_datos<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre: &str,
        tipo_cuota_id: Option<Uuid>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE grupos_familiares
            SET nombre = $1, tipo_cuota_id = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(nombre)
        .bind(tipo_cuota_id)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::GrupoNoEncontrado);
        }

        Ok(())
    }
}
