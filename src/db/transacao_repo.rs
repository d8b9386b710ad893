// src/db/transacao_repo.rs
//
// Livro-razão: só INSERT e SELECT.

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::transacao::{NovaTransacao, Transacao, TransacaoResponse},
};

const SELECT_COM_NOMES: &str = r#"
    SELECT t.id, t.usuario_id, u.nome AS usuario_nome,
           t.usuario_destino_id, d.nome AS usuario_destino_nome,
           t.data, t.valor, t.tipo, t.motivo
    FROM transacoes t
    LEFT JOIN usuarios u ON u.id = t.usuario_id
    LEFT JOIN usuarios d ON d.id = t.usuario_destino_id
"#;

#[derive(Clone, Default)]
pub struct TransacaoRepository;

impl TransacaoRepository {
    pub async fn record<'e, E>(&self, executor: E, nova: &NovaTransacao) -> Result<Transacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transacao = sqlx::query_as::<_, Transacao>(
            r#"
            INSERT INTO transacoes (usuario_id, usuario_destino_id, data, valor, tipo, motivo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, usuario_id, usuario_destino_id, data, valor, tipo, motivo
            "#,
        )
        .bind(nova.usuario_id)
        .bind(nova.usuario_destino_id)
        .bind(nova.data)
        .bind(nova.valor)
        .bind(nova.tipo)
        .bind(&nova.motivo)
        .fetch_one(executor)
        .await?;
        Ok(transacao)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<TransacaoResponse>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transacao =
            sqlx::query_as::<_, TransacaoResponse>(&format!("{SELECT_COM_NOMES} WHERE t.id = $1"))
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(transacao)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<TransacaoResponse>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transacoes =
            sqlx::query_as::<_, TransacaoResponse>(&format!("{SELECT_COM_NOMES} ORDER BY t.id"))
                .fetch_all(executor)
                .await?;
        Ok(transacoes)
    }
}
