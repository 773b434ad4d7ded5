// src/db/socio_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgConnection, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::socio::{CandidatoDeportivo, ConteoGrupo, Inscripcion, Socio},
};

const SOCIO_SELECT: &str = "SELECT id, grupo_id, usuario_id, nombre_completo, dni, relacion, fecha_nacimiento, created_at FROM socios";

#[derive(Clone)]
pub struct SocioRepository {
    pool: PgPool,
}

impl SocioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  SOCIOS
    // =========================================================================

    pub async fn listar_del_grupo(&self, grupo_id: Uuid) -> Result<Vec<Socio>, AppError> {
        let sql = format!("{} WHERE grupo_id = $1 ORDER BY created_at ASC", SOCIO_SELECT);
        let socios = sqlx::query_as::<_, Socio>(&sql)
            .bind(grupo_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(socios)
    }

    // Ids actuales del grupo SIN la fila del titular: el diff de la
    // reconciliación trabaja solo sobre los integrantes.
    pub async fn ids_del_grupo_sin_titular(
        &self,
        conn: &mut PgConnection,
        grupo_id: Uuid,
        titular_usuario_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM socios WHERE grupo_id = $1 AND usuario_id IS DISTINCT FROM $2",
        )
        .bind(grupo_id)
        .bind(titular_usuario_id)
        .fetch_all(conn)
        .await?;

        Ok(ids)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        grupo_id: Uuid,
        usuario_id: Option<Uuid>,
        nombre_completo: &str,
        dni: &str,
        relacion: &str,
        fecha_nacimiento: Option<NaiveDate>,
    ) -> Result<Socio, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let socio = sqlx::query_as::<_, Socio>(
            r#"
            INSERT INTO socios (grupo_id, usuario_id, nombre_completo, dni, relacion, fecha_nacimiento)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, grupo_id, usuario_id, nombre_completo, dni, relacion, fecha_nacimiento, created_at
            "#,
        )
        .bind(grupo_id)
        .bind(usuario_id)
        .bind(nombre_completo)
        .bind(dni)
        .bind(relacion)
        .bind(fecha_nacimiento)
        .fetch_one(executor)
        .await?;

        Ok(socio)
    }

    // El grupo_id en el WHERE evita actualizar socios ajenos al grupo.
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        grupo_id: Uuid,
        nombre_completo: &str,
        dni: &str,
        relacion: &str,
        fecha_nacimiento: Option<NaiveDate>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE socios
            SET nombre_completo = $1, dni = $2, relacion = $3, fecha_nacimiento = $4
            WHERE id = $5 AND grupo_id = $6
            "#,
        )
        .bind(nombre_completo)
        .bind(dni)
        .bind(relacion)
        .bind(fecha_nacimiento)
        .bind(id)
        .bind(grupo_id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::SocioNoEncontrado);
        }

        Ok(())
    }

    // Baja en bloque. Las inscripciones caen por el ON DELETE CASCADE.
    pub async fn eliminar_varios<'e, E>(&self, executor: E, ids: &[Uuid]) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if ids.is_empty() {
            return Ok(());
        }

        sqlx::query("DELETE FROM socios WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;

        Ok(())
    }

    // La fila del titular dentro del grupo, ubicada por su usuario vinculado.
    pub async fn buscar_titular(
        &self,
        conn: &mut PgConnection,
        grupo_id: Uuid,
        titular_usuario_id: Uuid,
    ) -> Result<Option<Socio>, AppError> {
        let sql = format!("{} WHERE grupo_id = $1 AND usuario_id = $2", SOCIO_SELECT);
        let socio = sqlx::query_as::<_, Socio>(&sql)
            .bind(grupo_id)
            .bind(titular_usuario_id)
            .fetch_optional(conn)
            .await?;

        Ok(socio)
    }

    // Shim de compatibilidad para grupos viejos sin usuario vinculado:
    // actualiza nombre y dni sobre la fila con relación "Titular", si existe.
    pub async fn actualizar_titular_por_relacion(
        &self,
        conn: &mut PgConnection,
        grupo_id: Uuid,
        nombre_completo: &str,
        dni: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE socios SET nombre_completo = $1, dni = $2 WHERE grupo_id = $3 AND relacion = 'Titular'",
        )
        .bind(nombre_completo)
        .bind(dni)
        .bind(grupo_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn buscar_grupo_de_usuario(&self, usuario_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let grupo = sqlx::query_scalar::<_, Uuid>(
            "SELECT grupo_id FROM socios WHERE usuario_id = $1 LIMIT 1",
        )
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grupo)
    }

    // =========================================================================
    //  INSCRIPCIONES
    // =========================================================================

    pub async fn inscripciones_del_grupo(
        &self,
        grupo_id: Uuid,
    ) -> Result<Vec<Inscripcion>, AppError> {
        let inscripciones = sqlx::query_as::<_, Inscripcion>(
            r#"
            SELECT i.id, i.socio_id, i.disciplina_id, i.activa, i.fecha_inscripcion
            FROM inscripciones i
            INNER JOIN socios s ON s.id = i.socio_id
            WHERE s.grupo_id = $1
            "#,
        )
        .bind(grupo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(inscripciones)
    }

    // Reemplazo al por mayor: borra todo el conjunto del socio y vuelve a
    // insertar la lista deseada en una sola sentencia con unnest.
    pub async fn reemplazar_inscripciones(
        &self,
        conn: &mut PgConnection,
        socio_id: Uuid,
        disciplinas: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM inscripciones WHERE socio_id = $1")
            .bind(socio_id)
            .execute(&mut *conn)
            .await?;

        if disciplinas.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO inscripciones (socio_id, disciplina_id)
            SELECT $1, disciplina_id FROM UNNEST($2::uuid[]) AS t(disciplina_id)
            "#,
        )
        .bind(socio_id)
        .bind(disciplinas)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    // =========================================================================
    //  CONSULTAS PARA LA GENERACIÓN DE CUOTAS
    // =========================================================================

    // Cuántos integrantes tiene cada grupo además del titular; decide el
    // subtipo de cuota social (individual vs. grupo familiar).
    pub async fn conteo_extra_por_grupo(&self) -> Result<Vec<ConteoGrupo>, AppError> {
        let conteos = sqlx::query_as::<_, ConteoGrupo>(
            r#"
            SELECT grupo_id, COUNT(*) FILTER (WHERE relacion <> 'Titular') AS cantidad_extra
            FROM socios
            GROUP BY grupo_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(conteos)
    }

    // Pares (grupo, disciplina) con inscripción activa. Los INNER JOIN
    // descartan en silencio inscripciones con referencias colgantes.
    pub async fn candidatos_deportivos(&self) -> Result<Vec<CandidatoDeportivo>, AppError> {
        let candidatos = sqlx::query_as::<_, CandidatoDeportivo>(
            r#"
            SELECT DISTINCT s.grupo_id, d.id AS disciplina_id, d.monto_cuota_deportiva AS monto_disciplina
            FROM inscripciones i
            INNER JOIN socios s ON s.id = i.socio_id
            INNER JOIN disciplinas d ON d.id = i.disciplina_id
            WHERE i.activa AND d.activa
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(candidatos)
    }
}
