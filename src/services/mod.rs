pub mod auth;
pub mod cuota_service;
pub mod disciplina_service;
pub mod grupo_service;
pub mod pago_service;
pub mod socio_service;
