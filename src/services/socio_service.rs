// src/services/socio_service.rs

use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GrupoRepository, PerfilRepository, SocioRepository, UserRepository},
    models::grupo::{ActualizarGrupoPayload, MiembroPayload},
};

#[derive(Clone)]
pub struct SocioService {
    pool: PgPool,
    grupo_repo: GrupoRepository,
    socio_repo: SocioRepository,
    perfil_repo: PerfilRepository,
    user_repo: UserRepository,
}

impl SocioService {
    pub fn new(
        pool: PgPool,
        grupo_repo: GrupoRepository,
        socio_repo: SocioRepository,
        perfil_repo: PerfilRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            pool,
            grupo_repo,
            socio_repo,
            perfil_repo,
            user_repo,
        }
    }

    // Lleva el grupo al estado que manda el formulario: datos del grupo y
    // del titular, alta/actualización/baja de integrantes según el diff, y
    // reemplazo al por mayor de las inscripciones de cada uno.
    //
    // Toda la secuencia corre dentro de UNA transacción: si algo falla en
    // el medio no queda aplicación parcial (en particular, el email del
    // perfil y el del usuario de autenticación nunca quedan desparejos).
    pub async fn actualizar_grupo(
        &self,
        grupo_id: Uuid,
        payload: &ActualizarGrupoPayload,
    ) -> Result<(), AppError> {
        // 1. El grupo tiene que existir; de él sale el titular.
        let grupo = self
            .grupo_repo
            .buscar_por_id(grupo_id)
            .await?
            .ok_or(AppError::GrupoNoEncontrado)?;
        let titular_id = grupo.titular_id;

        let perfil = self
            .perfil_repo
            .buscar_por_id(titular_id)
            .await?
            .ok_or(AppError::UsuarioNoEncontrado)?;

        let mut tx = self.pool.begin().await?;

        // 2. Datos del grupo.
        self.grupo_repo
            .actualizar_datos(&mut *tx, grupo_id, &payload.nombre_grupo, payload.tipo_cuota_id)
            .await?;

        // 3. Perfil del titular y, si cambió, el email del subsistema de
        // autenticación. Ambas escrituras dentro de la misma transacción.
        self.perfil_repo
            .actualizar(
                &mut *tx,
                titular_id,
                &payload.nombre_completo,
                &payload.dni,
                payload.telefono.as_deref(),
                &payload.email,
            )
            .await?;

        if perfil.email != payload.email {
            self.user_repo
                .actualizar_email(&mut *tx, titular_id, &payload.email)
                .await?;
        }

        // 4. Diff de integrantes (la fila del titular queda afuera).
        let actuales = self
            .socio_repo
            .ids_del_grupo_sin_titular(&mut tx, grupo_id, titular_id)
            .await?;
        let bajas = ids_a_eliminar(&actuales, &payload.miembros);
        self.socio_repo.eliminar_varios(&mut *tx, &bajas).await?;

        // Con id: actualización. Sin id: alta nueva en este grupo.
        // 5. En ambos casos, las inscripciones se reemplazan enteras.
        for miembro in &payload.miembros {
            let socio_id = match miembro.id {
                Some(id) => {
                    self.socio_repo
                        .actualizar(
                            &mut *tx,
                            id,
                            grupo_id,
                            &miembro.nombre_completo,
                            &miembro.dni,
                            &miembro.relacion,
                            miembro.fecha_nacimiento,
                        )
                        .await?;
                    id
                }
                None => {
                    self.socio_repo
                        .crear(
                            &mut *tx,
                            grupo_id,
                            None,
                            &miembro.nombre_completo,
                            &miembro.dni,
                            &miembro.relacion,
                            miembro.fecha_nacimiento,
                        )
                        .await?
                        .id
                }
            };

            let disciplinas = sin_duplicados(&miembro.disciplinas);
            self.socio_repo
                .reemplazar_inscripciones(&mut tx, socio_id, &disciplinas)
                .await?;
        }

        // 6. Las inscripciones propias del titular, sobre su fila de socio.
        match self
            .socio_repo
            .buscar_titular(&mut tx, grupo_id, titular_id)
            .await?
        {
            Some(titular_socio) => {
                let disciplinas = sin_duplicados(&payload.titular_disciplinas);
                self.socio_repo
                    .reemplazar_inscripciones(&mut tx, titular_socio.id, &disciplinas)
                    .await?;
            }
            None => {
                // Grupo viejo sin fila de titular: shim de compatibilidad,
                // se actualizan nombre y dni si hay fila con esa relación.
                let tocadas = self
                    .socio_repo
                    .actualizar_titular_por_relacion(
                        &mut tx,
                        grupo_id,
                        &payload.nombre_completo,
                        &payload.dni,
                    )
                    .await?;

                if tocadas == 0 {
                    tracing::warn!(
                        grupo = %grupo_id,
                        "El titular no tiene fila de socio en el grupo"
                    );
                }
            }
        }

        tx.commit().await?;

        tracing::info!(grupo = %grupo_id, "Grupo reconciliado");
        Ok(())
    }
}

// =========================================================================
//  EL DIFF (lógica pura, sin I/O)
// =========================================================================

// Ids presentes en la base que el formulario dejó de mandar: esos se borran.
pub(crate) fn ids_a_eliminar(actuales: &[Uuid], miembros: &[MiembroPayload]) -> Vec<Uuid> {
    let presentes: HashSet<Uuid> = miembros.iter().filter_map(|m| m.id).collect();
    actuales
        .iter()
        .copied()
        .filter(|id| !presentes.contains(id))
        .collect()
}

// Quita repetidos preservando el orden de llegada, para que el reemplazo
// de inscripciones no intente insertar dos veces la misma disciplina.
pub(crate) fn sin_duplicados(ids: &[Uuid]) -> Vec<Uuid> {
    let mut vistos = HashSet::new();
    ids.iter().copied().filter(|id| vistos.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miembro(id: Option<Uuid>) -> MiembroPayload {
        MiembroPayload {
            id,
            nombre_completo: "Ana Pérez".to_string(),
            dni: "45123456".to_string(),
            relacion: "Hijo".to_string(),
            fecha_nacimiento: None,
            disciplinas: vec![],
        }
    }

    #[test]
    fn el_id_ausente_del_payload_se_elimina() {
        let queda = Uuid::new_v4();
        let se_va = Uuid::new_v4();
        let actuales = vec![queda, se_va];

        let bajas = ids_a_eliminar(&actuales, &[miembro(Some(queda))]);
        assert_eq!(bajas, vec![se_va]);
    }

    #[test]
    fn una_alta_nueva_no_protege_ningun_id() {
        let existente = Uuid::new_v4();
        // El payload trae solo una alta sin id: lo existente se borra igual.
        let bajas = ids_a_eliminar(&[existente], &[miembro(None)]);
        assert_eq!(bajas, vec![existente]);
    }

    // Escenario: payload con miembros vacíos y dos filas en la base ->
    // las dos van a baja (y sus inscripciones caen con ellas).
    #[test]
    fn payload_vacio_elimina_todos_los_integrantes() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let bajas = ids_a_eliminar(&[a, b], &[]);
        assert_eq!(bajas.len(), 2);
        assert!(bajas.contains(&a));
        assert!(bajas.contains(&b));
    }

    #[test]
    fn sin_payload_ni_filas_no_hay_bajas() {
        assert!(ids_a_eliminar(&[], &[]).is_empty());
    }

    #[test]
    fn sin_duplicados_colapsa_repetidos_y_conserva_el_orden() {
        let d1 = Uuid::new_v4();
        let d2 = Uuid::new_v4();

        assert_eq!(sin_duplicados(&[d1, d2, d1, d1]), vec![d1, d2]);
        assert_eq!(sin_duplicados(&[d2, d1]), vec![d2, d1]);
        assert!(sin_duplicados(&[]).is_empty());
    }
}
