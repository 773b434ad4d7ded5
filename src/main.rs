// src/main.rs

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaración de los módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{auth_guard, solo_staff_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien acá: si la configuración falla, la aplicación
    // no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    // Corre las migraciones de SQLx al arrancar
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallaron las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos aplicadas");

    // Rutas públicas de autenticación + /me protegida
    let auth_routes = Router::new()
        .route("/registro", post(handlers::auth::registro))
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::me))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    // Grupos: lectura para el personal, la reconciliación la frena el
    // extractor AdminActual dentro del handler.
    let grupo_routes = Router::new()
        .route(
            "/",
            get(handlers::grupos::listar_grupos),
        )
        .route(
            "/{id}",
            get(handlers::grupos::detalle_grupo).put(handlers::grupos::actualizar_grupo),
        )
        .layer(axum_middleware::from_fn(solo_staff_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Disciplinas: el listado lo ve cualquier usuario autenticado (el
    // portal lo necesita); las escrituras exigen super admin.
    let disciplina_routes = Router::new()
        .route(
            "/",
            get(handlers::disciplinas::listar_disciplinas)
                .post(handlers::disciplinas::crear_disciplina),
        )
        .route("/{id}", put(handlers::disciplinas::actualizar_disciplina))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tipo_cuota_routes = Router::new()
        .route(
            "/",
            get(handlers::tipos_cuota::listar_tipos).post(handlers::tipos_cuota::crear_tipo),
        )
        .route("/{id}", put(handlers::tipos_cuota::actualizar_tipo))
        .layer(axum_middleware::from_fn(solo_staff_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cuota_routes = Router::new()
        .route("/", get(handlers::cuotas::listar_cuotas))
        .route("/generar", post(handlers::cuotas::generar_cuotas))
        .route("/{id}/pago", post(handlers::cuotas::pagar_cuota))
        .layer(axum_middleware::from_fn(solo_staff_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let pago_routes = Router::new()
        .route(
            "/",
            get(handlers::pagos::listar_pagos).post(handlers::pagos::registrar_pago),
        )
        .layer(axum_middleware::from_fn(solo_staff_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let portal_routes = Router::new()
        .route("/mi-grupo", get(handlers::portal::mi_grupo))
        .route("/mis-cuotas", get(handlers::portal::mis_cuotas))
        .route("/mis-pagos", get(handlers::portal::mis_pagos))
        .route("/password", put(handlers::portal::cambiar_password))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina todo en el router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/grupos", grupo_routes)
        .nest("/api/disciplinas", disciplina_routes)
        .nest("/api/tipos-cuota", tipo_cuota_routes)
        .nest("/api/cuotas", cuota_routes)
        .nest("/api/pagos", pago_routes)
        .nest("/api/portal", portal_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia el servidor
    let addr = std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falló el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
