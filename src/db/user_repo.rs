// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Rol, Usuario},
};

// Repositorio del subsistema de autenticación. El resto del sistema
// solo toca `usuarios` a través de estas operaciones.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
        rol: Rol,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (email, password_hash, rol)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, rol, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(rol)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Clave única sobre email: lo traducimos a un error de dominio
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailYaExiste;
                }
            }
            e.into()
        })?;

        Ok(usuario)
    }

    pub async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, email, password_hash, rol, created_at, updated_at FROM usuarios WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, email, password_hash, rol, created_at, updated_at FROM usuarios WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    // Operación `updateUserEmail` del colaborador de autenticación.
    pub async fn actualizar_email<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        email: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE usuarios SET email = $1, updated_at = NOW() WHERE id = $2")
            .bind(email)
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::EmailYaExiste;
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::UsuarioNoEncontrado);
        }

        Ok(())
    }

    // Operación `updateUserPassword` del colaborador de autenticación.
    pub async fn actualizar_password<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE usuarios SET password_hash = $1, updated_at = NOW() WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(executor)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UsuarioNoEncontrado);
        }

        Ok(())
    }
}
