// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::registro,
        handlers::auth::login,
        handlers::auth::me,

        // --- Grupos ---
        handlers::grupos::listar_grupos,
        handlers::grupos::detalle_grupo,
        handlers::grupos::actualizar_grupo,

        // --- Disciplinas ---
        handlers::disciplinas::listar_disciplinas,
        handlers::disciplinas::crear_disciplina,
        handlers::disciplinas::actualizar_disciplina,

        // --- Tipos de cuota ---
        handlers::tipos_cuota::listar_tipos,
        handlers::tipos_cuota::crear_tipo,
        handlers::tipos_cuota::actualizar_tipo,

        // --- Cuotas ---
        handlers::cuotas::generar_cuotas,
        handlers::cuotas::listar_cuotas,
        handlers::cuotas::pagar_cuota,

        // --- Pagos ---
        handlers::pagos::listar_pagos,
        handlers::pagos::registrar_pago,

        // --- Portal del socio ---
        handlers::portal::mi_grupo,
        handlers::portal::mis_cuotas,
        handlers::portal::mis_pagos,
        handlers::portal::cambiar_password,
    ),
    components(
        schemas(
            models::auth::Rol,
            models::auth::Usuario,
            models::auth::Perfil,
            models::auth::RegistroPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::CambiarPasswordPayload,
            models::auth::UsuarioActual,
            models::grupo::GrupoFamiliar,
            models::grupo::GrupoResumen,
            models::grupo::GrupoDetalle,
            models::grupo::MiembroPayload,
            models::grupo::ActualizarGrupoPayload,
            models::grupo::OperacionOk,
            models::socio::Socio,
            models::socio::Inscripcion,
            models::socio::SocioConDisciplinas,
            models::disciplina::Disciplina,
            models::disciplina::CrearDisciplinaPayload,
            models::disciplina::ActualizarDisciplinaPayload,
            models::cuota::ClaseCuota,
            models::cuota::Cuota,
            models::cuota::TipoCuota,
            models::cuota::GenerarCuotasPayload,
            models::cuota::ResumenGeneracion,
            models::cuota::CrearTipoCuotaPayload,
            models::cuota::ActualizarTipoCuotaPayload,
            models::cuota::PagarCuotaPayload,
            models::pago::Pago,
            models::pago::RegistrarPagoPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro y sesión"),
        (name = "Grupos", description = "Grupos familiares y reconciliación de socios"),
        (name = "Disciplinas", description = "Actividades deportivas del club"),
        (name = "Tipos de cuota", description = "Tabla configurable de montos"),
        (name = "Cuotas", description = "Generación mensual y cobro"),
        (name = "Pagos", description = "Libro de pagos"),
        (name = "Portal", description = "Autogestión del socio"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
