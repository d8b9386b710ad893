pub mod aluno;
pub mod cupom;
pub mod empresa;
pub mod instituicao;
pub mod paginacao;
pub mod pedido;
pub mod professor;
pub mod transacao;
pub mod vantagem;
