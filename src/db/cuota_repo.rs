// src/db/cuota_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cuota::{Cuota, CuotaFiltro, CuotaNueva, TipoCuota},
};

const CUOTA_SELECT: &str = "SELECT id, grupo_id, disciplina_id, tipo, mes, anio, monto, fecha_vencimiento, pagada, fecha_pago, medio_pago, created_at FROM cuotas";
const TIPO_SELECT: &str = "SELECT id, codigo, nombre, monto, por_disciplina, activo FROM tipos_cuota";

#[derive(Clone)]
pub struct CuotaRepository {
    pool: PgPool,
}

impl CuotaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TIPOS DE CUOTA
    // =========================================================================

    pub async fn listar_tipos(&self) -> Result<Vec<TipoCuota>, AppError> {
        let sql = format!("{} ORDER BY codigo ASC", TIPO_SELECT);
        let tipos = sqlx::query_as::<_, TipoCuota>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(tipos)
    }

    pub async fn tipos_activos(&self) -> Result<Vec<TipoCuota>, AppError> {
        let sql = format!("{} WHERE activo", TIPO_SELECT);
        let tipos = sqlx::query_as::<_, TipoCuota>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(tipos)
    }

    pub async fn crear_tipo<'e, E>(
        &self,
        executor: E,
        codigo: &str,
        nombre: &str,
        monto: rust_decimal::Decimal,
        por_disciplina: bool,
    ) -> Result<TipoCuota, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tipo = sqlx::query_as::<_, TipoCuota>(
            r#"
            INSERT INTO tipos_cuota (codigo, nombre, monto, por_disciplina)
            VALUES ($1, $2, $3, $4)
            RETURNING id, codigo, nombre, monto, por_disciplina, activo
            "#,
        )
        .bind(codigo)
        .bind(nombre)
        .bind(monto)
        .bind(por_disciplina)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::RegistroDuplicado(format!("código '{}'", codigo));
                }
            }
            e.into()
        })?;

        Ok(tipo)
    }

    pub async fn actualizar_tipo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre: Option<&str>,
        monto: Option<rust_decimal::Decimal>,
        por_disciplina: Option<bool>,
        activo: Option<bool>,
    ) -> Result<TipoCuota, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tipo = sqlx::query_as::<_, TipoCuota>(
            r#"
            UPDATE tipos_cuota
            SET nombre = COALESCE($1, nombre),
                monto = COALESCE($2, monto),
                por_disciplina = COALESCE($3, por_disciplina),
                activo = COALESCE($4, activo)
            WHERE id = $5
            RETURNING id, codigo, nombre, monto, por_disciplina, activo
            "#,
        )
        .bind(nombre)
        .bind(monto)
        .bind(por_disciplina)
        .bind(activo)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::TipoCuotaNoEncontrado)?;

        Ok(tipo)
    }

    // =========================================================================
    //  CUOTAS
    // =========================================================================

    // Claves ya emitidas para el período: el motor las salta sin tocar la base
    // de nuevo. El índice único parcial cubre la carrera entre dos llamadas.
    pub async fn claves_existentes(
        &self,
        mes: i32,
        anio: i32,
    ) -> Result<Vec<(Uuid, Option<Uuid>)>, AppError> {
        let claves = sqlx::query_as::<_, (Uuid, Option<Uuid>)>(
            "SELECT grupo_id, disciplina_id FROM cuotas WHERE mes = $1 AND anio = $2",
        )
        .bind(mes)
        .bind(anio)
        .fetch_all(&self.pool)
        .await?;

        Ok(claves)
    }

    pub async fn crear<'e, E>(&self, executor: E, nueva: &CuotaNueva) -> Result<Cuota, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cuota = sqlx::query_as::<_, Cuota>(
            r#"
            INSERT INTO cuotas (grupo_id, disciplina_id, tipo, mes, anio, monto, fecha_vencimiento)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, grupo_id, disciplina_id, tipo, mes, anio, monto, fecha_vencimiento, pagada, fecha_pago, medio_pago, created_at
            "#,
        )
        .bind(nueva.grupo_id)
        .bind(nueva.disciplina_id)
        .bind(nueva.tipo)
        .bind(nueva.mes)
        .bind(nueva.anio)
        .bind(nueva.monto)
        .bind(nueva.fecha_vencimiento)
        .fetch_one(executor)
        .await?;

        Ok(cuota)
    }

    pub async fn listar(&self, filtro: &CuotaFiltro) -> Result<Vec<Cuota>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(CUOTA_SELECT);
        query.push(" WHERE TRUE");

        if let Some(grupo_id) = filtro.grupo_id {
            query.push(" AND grupo_id = ").push_bind(grupo_id);
        }
        if let Some(disciplina_id) = filtro.disciplina_id {
            query.push(" AND disciplina_id = ").push_bind(disciplina_id);
        }
        if let Some(mes) = filtro.mes {
            query.push(" AND mes = ").push_bind(mes);
        }
        if let Some(anio) = filtro.anio {
            query.push(" AND anio = ").push_bind(anio);
        }
        if let Some(pagada) = filtro.pagada {
            query.push(" AND pagada = ").push_bind(pagada);
        }

        query.push(" ORDER BY anio DESC, mes DESC, fecha_vencimiento ASC");

        let cuotas = query
            .build_query_as::<Cuota>()
            .fetch_all(&self.pool)
            .await?;

        Ok(cuotas)
    }

    pub async fn listar_por_grupo(&self, grupo_id: Uuid) -> Result<Vec<Cuota>, AppError> {
        let sql = format!(
            "{} WHERE grupo_id = $1 ORDER BY anio DESC, mes DESC",
            CUOTA_SELECT
        );
        let cuotas = sqlx::query_as::<_, Cuota>(&sql)
            .bind(grupo_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(cuotas)
    }

    pub async fn buscar_por_id(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Cuota>, AppError> {
        let sql = format!("{} WHERE id = $1", CUOTA_SELECT);
        let cuota = sqlx::query_as::<_, Cuota>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(cuota)
    }

    // Solo pasa de impaga a pagada; devuelve cuántas filas tocó para que
    // el servicio distinga "ya estaba pagada".
    pub async fn marcar_pagada(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        fecha_pago: NaiveDate,
        medio_pago: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE cuotas SET pagada = TRUE, fecha_pago = $1, medio_pago = $2 WHERE id = $3 AND NOT pagada",
        )
        .bind(fecha_pago)
        .bind(medio_pago)
        .bind(id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
