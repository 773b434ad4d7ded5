pub mod auth;
pub mod cuotas;
pub mod disciplinas;
pub mod grupos;
pub mod pagos;
pub mod portal;
pub mod tipos_cuota;
