// src/db/pago_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::pago::Pago};

// Libro de pagos. Solo altas y lecturas: una fila nunca se corrige,
// se compensa con otra.
#[derive(Clone)]
pub struct PagoRepository {
    pool: PgPool,
}

impl PagoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        grupo_id: Uuid,
        monto: Decimal,
        fecha_pago: NaiveDate,
        medio_pago: &str,
        referencia: Option<&str>,
        periodo: Option<&str>,
        notas: Option<&str>,
    ) -> Result<Pago, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            INSERT INTO pagos (grupo_id, monto, fecha_pago, medio_pago, referencia, periodo, notas)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, grupo_id, monto, fecha_pago, medio_pago, referencia, periodo, notas, created_at
            "#,
        )
        .bind(grupo_id)
        .bind(monto)
        .bind(fecha_pago)
        .bind(medio_pago)
        .bind(referencia)
        .bind(periodo)
        .bind(notas)
        .fetch_one(executor)
        .await?;

        Ok(pago)
    }

    pub async fn listar(&self, grupo_id: Option<Uuid>) -> Result<Vec<Pago>, AppError> {
        let pagos = match grupo_id {
            Some(grupo_id) => {
                sqlx::query_as::<_, Pago>(
                    "SELECT id, grupo_id, monto, fecha_pago, medio_pago, referencia, periodo, notas, created_at FROM pagos WHERE grupo_id = $1 ORDER BY fecha_pago DESC, created_at DESC",
                )
                .bind(grupo_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Pago>(
                    "SELECT id, grupo_id, monto, fecha_pago, medio_pago, referencia, periodo, notas, created_at FROM pagos ORDER BY fecha_pago DESC, created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(pagos)
    }
}
