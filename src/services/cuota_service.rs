// src/services/cuota_service.rs

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CuotaRepository, GrupoRepository, SocioRepository},
    models::{
        cuota::{
            ActualizarTipoCuotaPayload, ClaseCuota, CrearTipoCuotaPayload, Cuota, CuotaFiltro,
            CuotaNueva, ResumenGeneracion, TipoCuota,
        },
        grupo::GrupoFamiliar,
        socio::CandidatoDeportivo,
    },
};

// Códigos de tipo de cuota que el motor resuelve contra la tabla.
pub const CODIGO_INDIVIDUAL: &str = "individual";
pub const CODIGO_GRUPO_FAMILIAR: &str = "gf1";
pub const CODIGO_DEPORTIVA: &str = "deportiva";

// Si el pedido no trae vencimiento, se usa el día 10 del período.
const DIA_VENCIMIENTO: u32 = 10;

#[derive(Clone)]
pub struct CuotaService {
    pool: PgPool,
    cuota_repo: CuotaRepository,
    grupo_repo: GrupoRepository,
    socio_repo: SocioRepository,
}

impl CuotaService {
    pub fn new(
        pool: PgPool,
        cuota_repo: CuotaRepository,
        grupo_repo: GrupoRepository,
        socio_repo: SocioRepository,
    ) -> Self {
        Self {
            pool,
            cuota_repo,
            grupo_repo,
            socio_repo,
        }
    }

    // =========================================================================
    //  GENERACIÓN MENSUAL
    // =========================================================================

    // Emite las cuotas del período (mes, anio): una social por grupo y una
    // deportiva por cada par (grupo, disciplina) con inscripción activa.
    // Las tuplas que ya existen o resuelven monto <= 0 se omiten. Un fallo
    // al insertar una tupla se loguea y NO aborta el lote: el que llama ve
    // solo los conteos agregados.
    pub async fn generar_cuotas(
        &self,
        mes: u32,
        anio: i32,
        fecha_vencimiento: Option<NaiveDate>,
    ) -> Result<ResumenGeneracion, AppError> {
        if !(1..=12).contains(&mes) {
            return Err(error_validacion("mes", "mes_invalido"));
        }
        if !(2000..=2100).contains(&anio) {
            return Err(error_validacion("anio", "anio_invalido"));
        }

        let vencimiento = match fecha_vencimiento.or_else(|| vencimiento_por_defecto(mes, anio)) {
            Some(fecha) => fecha,
            None => return Err(error_validacion("fecha_vencimiento", "fecha_invalida")),
        };

        // Foto del estado actual. Las lecturas van en secuencia, como toda
        // llamada al almacén en este sistema.
        let grupos = self.grupo_repo.listar().await?;
        let tipos = self.cuota_repo.tipos_activos().await?;
        let conteos = self.socio_repo.conteo_extra_por_grupo().await?;
        let candidatos = self.socio_repo.candidatos_deportivos().await?;
        let existentes = self.cuota_repo.claves_existentes(mes as i32, anio).await?;

        let tabla = tabla_de_montos(&tipos);
        let extras: HashMap<Uuid, i64> = conteos
            .into_iter()
            .map(|c| (c.grupo_id, c.cantidad_extra))
            .collect();
        let existentes: HashSet<(Uuid, Option<Uuid>)> = existentes.into_iter().collect();

        let plan = planificar_cuotas(
            &grupos,
            &tabla,
            &extras,
            &candidatos,
            &existentes,
            mes as i32,
            anio,
            vencimiento,
        );

        let mut creadas: u32 = 0;
        let mut omitidas: u32 = plan.omitidas;

        for nueva in &plan.altas {
            match self.cuota_repo.crear(&self.pool, nueva).await {
                Ok(_) => creadas += 1,
                // Otra llamada simultánea ganó la carrera sobre esta tupla:
                // el índice único la frenó, para nosotros cuenta como omitida.
                Err(AppError::BaseDeDatos(sqlx::Error::Database(ref db_err)))
                    if db_err.is_unique_violation() =>
                {
                    tracing::debug!(
                        grupo = %nueva.grupo_id,
                        "Cuota ya emitida por otra llamada, se omite"
                    );
                    omitidas += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        grupo = %nueva.grupo_id,
                        error = %e,
                        "No se pudo insertar la cuota, se sigue con la próxima"
                    );
                    omitidas += 1;
                }
            }
        }

        tracing::info!(
            mes,
            anio,
            creadas,
            omitidas,
            "Generación de cuotas terminada"
        );

        Ok(ResumenGeneracion {
            success: true,
            creadas,
            omitidas,
        })
    }

    // =========================================================================
    //  CONSULTAS Y TIPOS DE CUOTA
    // =========================================================================

    pub async fn listar(&self, filtro: &CuotaFiltro) -> Result<Vec<Cuota>, AppError> {
        self.cuota_repo.listar(filtro).await
    }

    pub async fn listar_por_grupo(&self, grupo_id: Uuid) -> Result<Vec<Cuota>, AppError> {
        self.cuota_repo.listar_por_grupo(grupo_id).await
    }

    pub async fn listar_tipos(&self) -> Result<Vec<TipoCuota>, AppError> {
        self.cuota_repo.listar_tipos().await
    }

    pub async fn crear_tipo(&self, payload: &CrearTipoCuotaPayload) -> Result<TipoCuota, AppError> {
        self.cuota_repo
            .crear_tipo(
                &self.pool,
                &payload.codigo,
                &payload.nombre,
                payload.monto,
                payload.por_disciplina,
            )
            .await
    }

    pub async fn actualizar_tipo(
        &self,
        id: Uuid,
        payload: &ActualizarTipoCuotaPayload,
    ) -> Result<TipoCuota, AppError> {
        self.cuota_repo
            .actualizar_tipo(
                &self.pool,
                id,
                payload.nombre.as_deref(),
                payload.monto,
                payload.por_disciplina,
                payload.activo,
            )
            .await
    }
}

// =========================================================================
//  EL PLANIFICADOR (lógica pura, sin I/O)
// =========================================================================

#[derive(Debug)]
pub(crate) struct PlanCuotas {
    pub altas: Vec<CuotaNueva>,
    pub omitidas: u32,
}

// La cadena de resolución de montos: tabla de tipos por código y, si el
// código no está, el monto de respaldo (el del grupo o el de la
// disciplina). Un resultado <= 0 significa "no emitir".
pub(crate) fn resolver_monto(
    codigo: &str,
    tabla: &HashMap<String, Decimal>,
    respaldo: Decimal,
) -> Option<Decimal> {
    let monto = tabla.get(codigo).copied().unwrap_or(respaldo);
    if monto > Decimal::ZERO { Some(monto) } else { None }
}

// "individual" si el grupo no tiene integrantes además del titular,
// "gf1" en cualquier otro caso.
pub(crate) fn subtipo_social(cantidad_extra: i64) -> &'static str {
    if cantidad_extra == 0 {
        CODIGO_INDIVIDUAL
    } else {
        CODIGO_GRUPO_FAMILIAR
    }
}

pub(crate) fn vencimiento_por_defecto(mes: u32, anio: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(anio, mes, DIA_VENCIMIENTO)
}

pub(crate) fn tabla_de_montos(tipos: &[TipoCuota]) -> HashMap<String, Decimal> {
    tipos
        .iter()
        .map(|t| (t.codigo.clone(), t.monto))
        .collect()
}

// Decide qué cuotas emitir para el período dado el estado cargado.
// No toca la base: la inserción (y sus fallos parciales) es del servicio.
pub(crate) fn planificar_cuotas(
    grupos: &[GrupoFamiliar],
    tabla: &HashMap<String, Decimal>,
    extras: &HashMap<Uuid, i64>,
    candidatos: &[CandidatoDeportivo],
    existentes: &HashSet<(Uuid, Option<Uuid>)>,
    mes: i32,
    anio: i32,
    vencimiento: NaiveDate,
) -> PlanCuotas {
    let mut altas = Vec::new();
    let mut omitidas: u32 = 0;

    // Cuotas sociales: una por grupo.
    for grupo in grupos {
        let cantidad_extra = extras.get(&grupo.id).copied().unwrap_or(0);
        let codigo = subtipo_social(cantidad_extra);

        let Some(monto) = resolver_monto(codigo, tabla, grupo.monto_cuota_social) else {
            omitidas += 1;
            continue;
        };

        if existentes.contains(&(grupo.id, None)) {
            omitidas += 1;
            continue;
        }

        altas.push(CuotaNueva {
            grupo_id: grupo.id,
            disciplina_id: None,
            tipo: ClaseCuota::Social,
            mes,
            anio,
            monto,
            fecha_vencimiento: vencimiento,
        });
    }

    // Cuotas deportivas: una por par (grupo, disciplina).
    for candidato in candidatos {
        let Some(monto) = resolver_monto(CODIGO_DEPORTIVA, tabla, candidato.monto_disciplina)
        else {
            omitidas += 1;
            continue;
        };

        if existentes.contains(&(candidato.grupo_id, Some(candidato.disciplina_id))) {
            omitidas += 1;
            continue;
        }

        altas.push(CuotaNueva {
            grupo_id: candidato.grupo_id,
            disciplina_id: Some(candidato.disciplina_id),
            tipo: ClaseCuota::Deportiva,
            mes,
            anio,
            monto,
            fecha_vencimiento: vencimiento,
        });
    }

    PlanCuotas { altas, omitidas }
}

pub(crate) fn error_validacion(campo: &'static str, codigo: &'static str) -> AppError {
    let mut error = validator::ValidationError::new(codigo);
    error.message = Some(codigo.into());
    let mut errores = validator::ValidationErrors::new();
    errores.add(campo.into(), error);
    AppError::Validacion(errores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn grupo(monto_social: i64) -> GrupoFamiliar {
        GrupoFamiliar {
            id: Uuid::new_v4(),
            nombre: "Familia Pérez".to_string(),
            titular_id: Uuid::new_v4(),
            monto_cuota_social: Decimal::from(monto_social),
            tipo_cuota_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tabla(pares: &[(&str, i64)]) -> HashMap<String, Decimal> {
        pares
            .iter()
            .map(|(c, m)| (c.to_string(), Decimal::from(*m)))
            .collect()
    }

    fn candidato(monto: i64) -> CandidatoDeportivo {
        CandidatoDeportivo {
            grupo_id: Uuid::new_v4(),
            disciplina_id: Uuid::new_v4(),
            monto_disciplina: Decimal::from(monto),
        }
    }

    fn venc() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn subtipo_individual_sin_integrantes_extra() {
        assert_eq!(subtipo_social(0), CODIGO_INDIVIDUAL);
    }

    #[test]
    fn subtipo_grupo_familiar_con_integrantes() {
        assert_eq!(subtipo_social(1), CODIGO_GRUPO_FAMILIAR);
        assert_eq!(subtipo_social(4), CODIGO_GRUPO_FAMILIAR);
    }

    #[test]
    fn resolver_monto_prefiere_la_tabla() {
        let tabla = tabla(&[("individual", 5000)]);
        assert_eq!(
            resolver_monto("individual", &tabla, Decimal::from(999)),
            Some(Decimal::from(5000))
        );
    }

    #[test]
    fn resolver_monto_cae_al_respaldo_si_no_hay_codigo() {
        let tabla = tabla(&[]);
        assert_eq!(
            resolver_monto("deportiva", &tabla, Decimal::from(1500)),
            Some(Decimal::from(1500))
        );
    }

    #[test]
    fn resolver_monto_cero_o_negativo_no_emite() {
        let vacia = tabla(&[]);
        assert_eq!(resolver_monto("individual", &vacia, Decimal::ZERO), None);
        assert_eq!(
            resolver_monto("individual", &vacia, Decimal::from(-10)),
            None
        );
        // El código presente con monto cero tampoco emite, y no sigue
        // cayendo al respaldo.
        let con_cero = tabla(&[("individual", 0)]);
        assert_eq!(
            resolver_monto("individual", &con_cero, Decimal::from(5000)),
            None
        );
    }

    #[test]
    fn vencimiento_es_el_dia_10_del_periodo() {
        assert_eq!(
            vencimiento_por_defecto(3, 2025),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert_eq!(vencimiento_por_defecto(13, 2025), None);
    }

    // Escenario: grupo solo con titular y tipos cargados -> una cuota
    // social "individual" de 5000. Volver a planificar con la clave ya
    // existente no emite nada.
    #[test]
    fn escenario_social_individual_y_reemision_idempotente() {
        let g = grupo(0);
        let tabla = tabla(&[("individual", 5000), ("gf1", 8000)]);
        let extras = HashMap::from([(g.id, 0i64)]);

        let plan = planificar_cuotas(
            &[g.clone()],
            &tabla,
            &extras,
            &[],
            &HashSet::new(),
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas.len(), 1);
        assert_eq!(plan.omitidas, 0);
        assert_eq!(plan.altas[0].monto, Decimal::from(5000));
        assert_eq!(plan.altas[0].tipo, ClaseCuota::Social);
        assert_eq!(plan.altas[0].disciplina_id, None);

        // Segunda pasada: la clave ya existe.
        let existentes = HashSet::from([(g.id, None)]);
        let plan = planificar_cuotas(&[g], &tabla, &extras, &[], &existentes, 3, 2025, venc());
        assert_eq!(plan.altas.len(), 0);
        assert_eq!(plan.omitidas, 1);
    }

    #[test]
    fn grupo_con_integrantes_usa_gf1() {
        let g = grupo(0);
        let tabla = tabla(&[("individual", 5000), ("gf1", 8000)]);
        let extras = HashMap::from([(g.id, 2i64)]);

        let plan = planificar_cuotas(
            &[g],
            &tabla,
            &extras,
            &[],
            &HashSet::new(),
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas.len(), 1);
        assert_eq!(plan.altas[0].monto, Decimal::from(8000));
    }

    // Un grupo sin tipo aplicable y con monto propio en cero no produce
    // ni error ni cuota: cuenta como omitido.
    #[test]
    fn grupo_sin_monto_resuelto_se_omite() {
        let g = grupo(0);
        let plan = planificar_cuotas(
            &[g],
            &tabla(&[]),
            &HashMap::new(),
            &[],
            &HashSet::new(),
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas.len(), 0);
        assert_eq!(plan.omitidas, 1);
    }

    // Escenario: sin tipo "deportiva" en la tabla, cada disciplina cobra
    // su propio monto.
    #[test]
    fn escenario_deportivas_con_monto_de_cada_disciplina() {
        let c1 = candidato(1000);
        let c2 = candidato(1500);
        let tabla = tabla(&[("individual", 5000)]);

        let plan = planificar_cuotas(
            &[],
            &tabla,
            &HashMap::new(),
            &[c1.clone(), c2.clone()],
            &HashSet::new(),
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas.len(), 2);

        let montos: Vec<Decimal> = plan.altas.iter().map(|a| a.monto).collect();
        assert!(montos.contains(&Decimal::from(1000)));
        assert!(montos.contains(&Decimal::from(1500)));
        assert!(plan.altas.iter().all(|a| a.tipo == ClaseCuota::Deportiva));
        assert_eq!(plan.altas[0].disciplina_id, Some(c1.disciplina_id));
    }

    #[test]
    fn deportiva_ya_emitida_se_omite() {
        let c = candidato(1000);
        let existentes = HashSet::from([(c.grupo_id, Some(c.disciplina_id))]);

        let plan = planificar_cuotas(
            &[],
            &tabla(&[]),
            &HashMap::new(),
            &[c.clone()],
            &existentes,
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas.len(), 0);
        assert_eq!(plan.omitidas, 1);

        // Otro par (grupo, disciplina) no choca con esa clave y sí se emite.
        let plan = planificar_cuotas(
            &[],
            &tabla(&[]),
            &HashMap::new(),
            &[candidato(1000)],
            &existentes,
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas.len(), 1);
    }

    #[test]
    fn el_tipo_deportiva_de_la_tabla_pisa_el_monto_de_la_disciplina() {
        let c = candidato(1000);
        let tabla = tabla(&[("deportiva", 2000)]);

        let plan = planificar_cuotas(
            &[],
            &tabla,
            &HashMap::new(),
            &[c],
            &HashSet::new(),
            3,
            2025,
            venc(),
        );
        assert_eq!(plan.altas[0].monto, Decimal::from(2000));
    }
}
