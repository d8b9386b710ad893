pub mod email_service;
pub mod professor_service;
pub mod vantagem_service;
pub mod transacao_service;
pub mod cadastro_service;
pub mod locadora_service;

#[cfg(test)]
pub(crate) mod fixtures;
