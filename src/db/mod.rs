pub mod user_repo;
pub use user_repo::UserRepository;
pub mod perfil_repo;
pub use perfil_repo::PerfilRepository;
pub mod grupo_repo;
pub use grupo_repo::GrupoRepository;
pub mod socio_repo;
pub use socio_repo::SocioRepository;
pub mod disciplina_repo;
pub use disciplina_repo::DisciplinaRepository;
pub mod cuota_repo;
pub use cuota_repo::CuotaRepository;
pub mod pago_repo;
pub use pago_repo::PagoRepository;
