// src/db/perfil_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Perfil};

// Almacén de perfiles: los datos personales del titular viven acá,
// separados del registro de autenticación.
#[derive(Clone)]
pub struct PerfilRepository {
    pool: PgPool,
}

impl PerfilRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre_completo: &str,
        dni: &str,
        telefono: Option<&str>,
        email: &str,
    ) -> Result<Perfil, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let perfil = sqlx::query_as::<_, Perfil>(
            r#"
            INSERT INTO perfiles (id, nombre_completo, dni, telefono, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nombre_completo, dni, telefono, email
            "#,
        )
        .bind(id)
        .bind(nombre_completo)
        .bind(dni)
        .bind(telefono)
        .bind(email)
        .fetch_one(executor)
        .await?;

        Ok(perfil)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Perfil>, AppError> {
        let perfil = sqlx::query_as::<_, Perfil>(
            "SELECT id, nombre_completo, dni, telefono, email FROM perfiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(perfil)
    }

    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre_completo: &str,
        dni: &str,
        telefono: Option<&str>,
        email: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE perfiles
            SET nombre_completo = $1, dni = $2, telefono = $3, email = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(nombre_completo)
        .bind(dni)
        .bind(telefono)
        .bind(email)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UsuarioNoEncontrado);
        }

        Ok(())
    }
}
