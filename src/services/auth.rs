// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GrupoRepository, PerfilRepository, SocioRepository, UserRepository},
    models::auth::{Claims, RegistroPayload, Rol, Usuario, UsuarioActual},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    perfil_repo: PerfilRepository,
    grupo_repo: GrupoRepository,
    socio_repo: SocioRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        perfil_repo: PerfilRepository,
        grupo_repo: GrupoRepository,
        socio_repo: SocioRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            perfil_repo,
            grupo_repo,
            socio_repo,
            jwt_secret,
            pool,
        }
    }

    // Alta de un titular: usuario + perfil + grupo familiar + su fila de
    // socio, todo o nada. El titular SIEMPRE queda materializado como socio
    // del grupo (relación "Titular").
    pub async fn registrar(&self, payload: &RegistroPayload) -> Result<String, AppError> {
        // El hashing es pesado: va a un hilo aparte, fuera de la transacción.
        let password = payload.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falló la tarea de hashing: {}", e))??;

        let mut tx = self.pool.begin().await?;

        let usuario = self
            .user_repo
            .crear(&mut *tx, &payload.email, &password_hash, Rol::Socio)
            .await?;

        self.perfil_repo
            .crear(
                &mut *tx,
                usuario.id,
                &payload.nombre_completo,
                &payload.dni,
                payload.telefono.as_deref(),
                &payload.email,
            )
            .await?;

        let nombre_grupo = payload
            .nombre_grupo
            .clone()
            .unwrap_or_else(|| format!("Familia de {}", payload.nombre_completo));

        let grupo = self
            .grupo_repo
            .crear(&mut *tx, &nombre_grupo, usuario.id)
            .await?;

        self.socio_repo
            .crear(
                &mut *tx,
                grupo.id,
                Some(usuario.id),
                &payload.nombre_completo,
                &payload.dni,
                "Titular",
                None,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(usuario = %usuario.id, "Titular registrado con su grupo familiar");

        self.crear_token(usuario.id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let usuario = self
            .user_repo
            .buscar_por_email(email)
            .await?
            .ok_or(AppError::CredencialesInvalidas)?;

        let password = password.to_owned();
        let password_hash = usuario.password_hash.clone();

        // La verificación también corre en un hilo aparte.
        let password_valida = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falló la tarea de verificación: {}", e))??;

        if !password_valida {
            return Err(AppError::CredencialesInvalidas);
        }

        self.crear_token(usuario.id)
    }

    pub async fn validar_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalido)?;

        self.user_repo
            .buscar_por_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UsuarioNoEncontrado)
    }

    pub async fn usuario_actual(&self, usuario: &Usuario) -> Result<UsuarioActual, AppError> {
        let perfil = self.perfil_repo.buscar_por_id(usuario.id).await?;

        Ok(UsuarioActual {
            id: usuario.id,
            email: usuario.email.clone(),
            rol: usuario.rol,
            perfil,
        })
    }

    // Operación `updateUserPassword` del colaborador, expuesta al portal.
    pub async fn cambiar_password(
        &self,
        usuario: &Usuario,
        password_actual: &str,
        password_nueva: &str,
    ) -> Result<(), AppError> {
        let actual = password_actual.to_owned();
        let hash_vigente = usuario.password_hash.clone();

        let coincide = tokio::task::spawn_blocking(move || verify(&actual, &hash_vigente))
            .await
            .map_err(|e| anyhow::anyhow!("Falló la tarea de verificación: {}", e))??;

        if !coincide {
            return Err(AppError::CredencialesInvalidas);
        }

        let nueva = password_nueva.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash(&nueva, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falló la tarea de hashing: {}", e))??;

        self.user_repo
            .actualizar_password(&self.pool, usuario.id, &password_hash)
            .await
    }

    fn crear_token(&self, usuario_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expira = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: usuario_id,
            exp: expira.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
