pub mod store;
pub use store::{Store, UnitOfWork};
pub mod postgres;
pub use postgres::PgStore;
pub mod memoria;
pub use memoria::MemoriaStore;
pub mod memory_store;
pub use memory_store::MemoryStore;

pub mod instituicao_repo;
pub use instituicao_repo::InstituicaoRepository;
pub mod professor_repo;
pub use professor_repo::ProfessorRepository;
pub mod aluno_repo;
pub use aluno_repo::AlunoRepository;
pub mod empresa_repo;
pub use empresa_repo::EmpresaRepository;
pub mod vantagem_repo;
pub use vantagem_repo::VantagemRepository;
pub mod cupom_repo;
pub use cupom_repo::CupomRepository;
pub mod transacao_repo;
pub use transacao_repo::TransacaoRepository;
