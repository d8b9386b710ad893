// src/db/vantagem_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::{
        paginacao::Paginacao,
        vantagem::{NovaVantagem, Vantagem},
    },
};

#[derive(Clone, Default)]
pub struct VantagemRepository;

impl VantagemRepository {
    /// Uma página de vantagens; `empresa_id = None` lista todas.
    pub async fn list_page<'e, E>(
        &self,
        executor: E,
        empresa_id: Option<i64>,
        paginacao: &Paginacao,
    ) -> Result<Vec<Vantagem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Coluna e direção vêm de enums fechados, nunca do texto da requisição
        let sql = format!(
            r#"
            SELECT id, descricao, foto, custo_moedas, empresa_id
            FROM vantagens
            WHERE ($1::BIGINT IS NULL OR empresa_id = $1)
            ORDER BY {} {}, id ASC
            LIMIT $2 OFFSET $3
            "#,
            paginacao.ordem.coluna(),
            paginacao.direcao.sql()
        );

        let vantagens = sqlx::query_as::<_, Vantagem>(&sql)
            .bind(empresa_id)
            .bind(i64::from(paginacao.size))
            .bind(paginacao.offset())
            .fetch_all(executor)
            .await?;
        Ok(vantagens)
    }

    pub async fn count<'e, E>(&self, executor: E, empresa_id: Option<i64>) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vantagens WHERE ($1::BIGINT IS NULL OR empresa_id = $1)",
        )
        .bind(empresa_id)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Vantagem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vantagem = sqlx::query_as::<_, Vantagem>(
            "SELECT id, descricao, foto, custo_moedas, empresa_id FROM vantagens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(vantagem)
    }

    pub async fn create<'e, E>(&self, executor: E, nova: &NovaVantagem) -> Result<Vantagem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vantagem = sqlx::query_as::<_, Vantagem>(
            r#"
            INSERT INTO vantagens (descricao, foto, custo_moedas, empresa_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, descricao, foto, custo_moedas, empresa_id
            "#,
        )
        .bind(&nova.descricao)
        .bind(&nova.foto)
        .bind(nova.custo_moedas)
        .bind(nova.empresa_id)
        .fetch_one(executor)
        .await?;
        Ok(vantagem)
    }

    pub async fn update<'e, E>(&self, executor: E, vantagem: &Vantagem) -> Result<Vantagem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let atualizada = sqlx::query_as::<_, Vantagem>(
            r#"
            UPDATE vantagens
            SET descricao = $2, foto = $3, custo_moedas = $4, empresa_id = $5
            WHERE id = $1
            RETURNING id, descricao, foto, custo_moedas, empresa_id
            "#,
        )
        .bind(vantagem.id)
        .bind(&vantagem.descricao)
        .bind(&vantagem.foto)
        .bind(vantagem.custo_moedas)
        .bind(vantagem.empresa_id)
        .fetch_one(executor)
        .await?;
        Ok(atualizada)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM vantagens WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
