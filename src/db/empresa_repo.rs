// src/db/empresa_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::empresa::{EmpresaParceira, NovaEmpresa},
};

#[derive(Clone, Default)]
pub struct EmpresaRepository;

impl EmpresaRepository {
    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<EmpresaParceira>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresas = sqlx::query_as::<_, EmpresaParceira>(
            "SELECT id, nome, nome_fantasia, email FROM empresas_parceiras ORDER BY id",
        )
        .fetch_all(executor)
        .await?;
        Ok(empresas)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<EmpresaParceira>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresa = sqlx::query_as::<_, EmpresaParceira>(
            "SELECT id, nome, nome_fantasia, email FROM empresas_parceiras WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(empresa)
    }

    pub async fn create<'e, E>(&self, executor: E, nova: &NovaEmpresa) -> Result<EmpresaParceira, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresa = sqlx::query_as::<_, EmpresaParceira>(
            r#"
            INSERT INTO empresas_parceiras (nome, nome_fantasia, email)
            VALUES ($1, $2, $3)
            RETURNING id, nome, nome_fantasia, email
            "#,
        )
        .bind(&nova.nome)
        .bind(&nova.nome_fantasia)
        .bind(&nova.email)
        .fetch_one(executor)
        .await?;
        Ok(empresa)
    }
}
