// src/services/grupo_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GrupoRepository, PerfilRepository, SocioRepository},
    models::{
        grupo::{GrupoDetalle, GrupoResumen},
        socio::SocioConDisciplinas,
    },
};

#[derive(Clone)]
pub struct GrupoService {
    grupo_repo: GrupoRepository,
    perfil_repo: PerfilRepository,
    socio_repo: SocioRepository,
}

impl GrupoService {
    pub fn new(
        grupo_repo: GrupoRepository,
        perfil_repo: PerfilRepository,
        socio_repo: SocioRepository,
    ) -> Self {
        Self {
            grupo_repo,
            perfil_repo,
            socio_repo,
        }
    }

    pub async fn listar(&self) -> Result<Vec<GrupoResumen>, AppError> {
        self.grupo_repo.listar_resumen().await
    }

    // Arma la pantalla de edición: grupo, perfil del titular y cada socio
    // con sus ids de disciplina. La fila del titular no va en la lista de
    // integrantes; sus inscripciones salen aparte.
    pub async fn detalle(&self, grupo_id: Uuid) -> Result<GrupoDetalle, AppError> {
        let grupo = self
            .grupo_repo
            .buscar_por_id(grupo_id)
            .await?
            .ok_or(AppError::GrupoNoEncontrado)?;

        let titular = self
            .perfil_repo
            .buscar_por_id(grupo.titular_id)
            .await?
            .ok_or(AppError::UsuarioNoEncontrado)?;

        let socios = self.socio_repo.listar_del_grupo(grupo_id).await?;
        let inscripciones = self.socio_repo.inscripciones_del_grupo(grupo_id).await?;

        let mut por_socio: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for inscripcion in inscripciones {
            por_socio
                .entry(inscripcion.socio_id)
                .or_default()
                .push(inscripcion.disciplina_id);
        }

        let mut titular_disciplinas = Vec::new();
        let mut integrantes = Vec::new();

        for socio in socios {
            let disciplinas = por_socio.remove(&socio.id).unwrap_or_default();

            if socio.usuario_id == Some(grupo.titular_id) {
                titular_disciplinas = disciplinas;
                continue;
            }

            integrantes.push(SocioConDisciplinas {
                id: socio.id,
                usuario_id: socio.usuario_id,
                nombre_completo: socio.nombre_completo,
                dni: socio.dni,
                relacion: socio.relacion,
                fecha_nacimiento: socio.fecha_nacimiento,
                disciplinas,
            });
        }

        Ok(GrupoDetalle {
            grupo,
            titular,
            socios: integrantes,
            titular_disciplinas,
        })
    }

    // El grupo de un usuario del portal: primero como titular, después
    // como socio vinculado.
    pub async fn grupo_de_usuario(&self, usuario_id: Uuid) -> Result<Uuid, AppError> {
        if let Some(grupo) = self.grupo_repo.buscar_por_titular(usuario_id).await? {
            return Ok(grupo.id);
        }

        self.socio_repo
            .buscar_grupo_de_usuario(usuario_id)
            .await?
            .ok_or(AppError::GrupoNoEncontrado)
    }
}
