// src/services/pago_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CuotaRepository, GrupoRepository, PagoRepository},
    models::{
        cuota::PagarCuotaPayload,
        pago::{Pago, RegistrarPagoPayload},
    },
};

#[derive(Clone)]
pub struct PagoService {
    pool: PgPool,
    pago_repo: PagoRepository,
    cuota_repo: CuotaRepository,
    grupo_repo: GrupoRepository,
}

impl PagoService {
    pub fn new(
        pool: PgPool,
        pago_repo: PagoRepository,
        cuota_repo: CuotaRepository,
        grupo_repo: GrupoRepository,
    ) -> Self {
        Self {
            pool,
            pago_repo,
            cuota_repo,
            grupo_repo,
        }
    }

    // Pago manual sobre el libro, sin cuota asociada.
    pub async fn registrar(&self, payload: &RegistrarPagoPayload) -> Result<Pago, AppError> {
        self.grupo_repo
            .buscar_por_id(payload.grupo_id)
            .await?
            .ok_or(AppError::GrupoNoEncontrado)?;

        let fecha = payload.fecha_pago.unwrap_or_else(|| Utc::now().date_naive());

        self.pago_repo
            .crear(
                &self.pool,
                payload.grupo_id,
                payload.monto,
                fecha,
                &payload.medio_pago,
                payload.referencia.as_deref(),
                payload.periodo.as_deref(),
                payload.notas.as_deref(),
            )
            .await
    }

    // Marca la cuota como pagada y asienta el pago en el libro, en una
    // sola transacción: o quedan las dos cosas o ninguna.
    pub async fn pagar_cuota(
        &self,
        cuota_id: Uuid,
        payload: &PagarCuotaPayload,
    ) -> Result<Pago, AppError> {
        let mut tx = self.pool.begin().await?;

        let cuota = self
            .cuota_repo
            .buscar_por_id(&mut tx, cuota_id)
            .await?
            .ok_or(AppError::CuotaNoEncontrada)?;

        if cuota.pagada {
            return Err(AppError::CuotaYaPagada);
        }

        let fecha = payload.fecha_pago.unwrap_or_else(|| Utc::now().date_naive());

        let tocadas = self
            .cuota_repo
            .marcar_pagada(&mut tx, cuota_id, fecha, &payload.medio_pago)
            .await?;

        // Alguien la pagó entre la lectura y el update.
        if tocadas == 0 {
            return Err(AppError::CuotaYaPagada);
        }

        let periodo = format!("{}/{}", cuota.mes, cuota.anio);
        let referencia = cuota.id.to_string();

        let pago = self
            .pago_repo
            .crear(
                &mut *tx,
                cuota.grupo_id,
                cuota.monto,
                fecha,
                &payload.medio_pago,
                Some(&referencia),
                Some(&periodo),
                None,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(cuota = %cuota_id, grupo = %cuota.grupo_id, "Cuota cobrada");
        Ok(pago)
    }

    pub async fn listar(&self, grupo_id: Option<Uuid>) -> Result<Vec<Pago>, AppError> {
        self.pago_repo.listar(grupo_id).await
    }
}
