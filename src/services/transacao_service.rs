// src/services/transacao_service.rs
//
// Consultas ao livro-razão. Os filtros rodam em memória sobre a lista completa.

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::Store,
    models::transacao::{TipoTransacao, TransacaoResponse},
};

#[derive(Clone)]
pub struct TransacaoService {
    store: Arc<dyn Store>,
}

impl TransacaoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn listar_todas(&self) -> Result<Vec<TransacaoResponse>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_transacoes().await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<TransacaoResponse, AppError> {
        let mut uow = self.store.begin().await?;
        uow.find_transacao(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Transação", id))
    }

    /// Transações em que o usuário é remetente ou destinatário.
    pub async fn listar_por_usuario(&self, usuario_id: i64) -> Result<Vec<TransacaoResponse>, AppError> {
        let todas = self.listar_todas().await?;
        Ok(todas.into_iter().filter(|t| t.envolve(usuario_id)).collect())
    }

    /// Tipo desconhecido devolve lista vazia.
    pub async fn listar_por_tipo(&self, tipo: &str) -> Result<Vec<TransacaoResponse>, AppError> {
        let Some(tipo) = TipoTransacao::parse_ignore_case(tipo) else {
            return Ok(Vec::new());
        };
        let todas = self.listar_todas().await?;
        Ok(todas.into_iter().filter(|t| t.tipo == tipo).collect())
    }
}
