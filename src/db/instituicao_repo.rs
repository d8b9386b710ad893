// src/db/instituicao_repo.rs

use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, models::instituicao::InstituicaoEnsino};

#[derive(Clone, Default)]
pub struct InstituicaoRepository;

impl InstituicaoRepository {
    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<InstituicaoEnsino>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let instituicoes =
            sqlx::query_as::<_, InstituicaoEnsino>("SELECT id, nome FROM instituicoes ORDER BY id")
                .fetch_all(executor)
                .await?;
        Ok(instituicoes)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<InstituicaoEnsino>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let instituicao =
            sqlx::query_as::<_, InstituicaoEnsino>("SELECT id, nome FROM instituicoes WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(instituicao)
    }

    pub async fn create<'e, E>(&self, executor: E, nome: &str) -> Result<InstituicaoEnsino, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let instituicao = sqlx::query_as::<_, InstituicaoEnsino>(
            "INSERT INTO instituicoes (nome) VALUES ($1) RETURNING id, nome",
        )
        .bind(nome)
        .fetch_one(executor)
        .await?;
        Ok(instituicao)
    }
}
