pub mod professores;
pub mod vantagens;
pub mod transacoes;
pub mod cupons;
pub mod cadastros;
pub mod locadora;
