pub mod auth;
pub mod cuota;
pub mod disciplina;
pub mod grupo;
pub mod pago;
pub mod socio;
