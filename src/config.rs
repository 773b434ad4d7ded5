// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CuotaRepository, DisciplinaRepository, GrupoRepository, PagoRepository, PerfilRepository,
        SocioRepository, UserRepository,
    },
    services::{
        auth::AuthService, cuota_service::CuotaService, disciplina_service::DisciplinaService,
        grupo_service::GrupoService, pago_service::PagoService, socio_service::SocioService,
    },
};

// El estado compartido, accesible en toda la aplicación
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub grupo_service: GrupoService,
    pub socio_service: SocioService,
    pub disciplina_service: DisciplinaService,
    pub cuota_service: CuotaService,
    pub pago_service: PagoService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        // Conecta a la base, con '?' para propagar errores
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida");

        // --- Arma el grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let perfil_repo = PerfilRepository::new(db_pool.clone());
        let grupo_repo = GrupoRepository::new(db_pool.clone());
        let socio_repo = SocioRepository::new(db_pool.clone());
        let disciplina_repo = DisciplinaRepository::new(db_pool.clone());
        let cuota_repo = CuotaRepository::new(db_pool.clone());
        let pago_repo = PagoRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            perfil_repo.clone(),
            grupo_repo.clone(),
            socio_repo.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let grupo_service = GrupoService::new(
            grupo_repo.clone(),
            perfil_repo.clone(),
            socio_repo.clone(),
        );
        let socio_service = SocioService::new(
            db_pool.clone(),
            grupo_repo.clone(),
            socio_repo.clone(),
            perfil_repo,
            user_repo,
        );
        let disciplina_service = DisciplinaService::new(db_pool.clone(), disciplina_repo);
        let cuota_service = CuotaService::new(
            db_pool.clone(),
            cuota_repo.clone(),
            grupo_repo.clone(),
            socio_repo,
        );
        let pago_service = PagoService::new(db_pool.clone(), pago_repo, cuota_repo, grupo_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            grupo_service,
            socio_service,
            disciplina_service,
            cuota_service,
            pago_service,
        })
    }
}
