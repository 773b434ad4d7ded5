// src/db/disciplina_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::disciplina::Disciplina};

const DISCIPLINA_SELECT: &str = "SELECT id, nombre, descripcion, monto_cuota_deportiva, activa, admin_id, created_at FROM disciplinas";

#[derive(Clone)]
pub struct DisciplinaRepository {
    pool: PgPool,
}

impl DisciplinaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, solo_activas: bool) -> Result<Vec<Disciplina>, AppError> {
        let sql = if solo_activas {
            format!("{} WHERE activa ORDER BY nombre ASC", DISCIPLINA_SELECT)
        } else {
            format!("{} ORDER BY nombre ASC", DISCIPLINA_SELECT)
        };

        let disciplinas = sqlx::query_as::<_, Disciplina>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(disciplinas)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Disciplina>, AppError> {
        let sql = format!("{} WHERE id = $1", DISCIPLINA_SELECT);
        let disciplina = sqlx::query_as::<_, Disciplina>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(disciplina)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        descripcion: Option<&str>,
        monto_cuota_deportiva: Decimal,
        admin_id: Option<Uuid>,
    ) -> Result<Disciplina, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let disciplina = sqlx::query_as::<_, Disciplina>(
            r#"
            INSERT INTO disciplinas (nombre, descripcion, monto_cuota_deportiva, admin_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, descripcion, monto_cuota_deportiva, activa, admin_id, created_at
            "#,
        )
        .bind(nombre)
        .bind(descripcion)
        .bind(monto_cuota_deportiva)
        .bind(admin_id)
        .fetch_one(executor)
        .await?;

        Ok(disciplina)
    }

    // Actualización parcial: COALESCE deja como está lo que no vino.
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        monto_cuota_deportiva: Option<Decimal>,
        activa: Option<bool>,
        admin_id: Option<Uuid>,
    ) -> Result<Disciplina, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let disciplina = sqlx::query_as::<_, Disciplina>(
            r#"
            UPDATE disciplinas
            SET nombre = COALESCE($1, nombre),
                descripcion = COALESCE($2, descripcion),
                monto_cuota_deportiva = COALESCE($3, monto_cuota_deportiva),
                activa = COALESCE($4, activa),
                admin_id = COALESCE($5, admin_id)
            WHERE id = $6
            RETURNING id, nombre, descripcion, monto_cuota_deportiva, activa, admin_id, created_at
            "#,
        )
        .bind(nombre)
        .bind(descripcion)
        .bind(monto_cuota_deportiva)
        .bind(activa)
        .bind(admin_id)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::DisciplinaNoEncontrada)?;

        Ok(disciplina)
    }
}
