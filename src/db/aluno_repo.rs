// src/db/aluno_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::aluno::{Aluno, NovoAluno},
};

#[derive(Clone, Default)]
pub struct AlunoRepository;

impl AlunoRepository {
    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Aluno>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let alunos = sqlx::query_as::<_, Aluno>(
            "SELECT id, nome, email, saldo_moedas FROM alunos ORDER BY id",
        )
        .fetch_all(executor)
        .await?;
        Ok(alunos)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Aluno>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let aluno = sqlx::query_as::<_, Aluno>(
            "SELECT id, nome, email, saldo_moedas FROM alunos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(aluno)
    }

    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Aluno>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let aluno = sqlx::query_as::<_, Aluno>(
            "SELECT id, nome, email, saldo_moedas FROM alunos WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(aluno)
    }

    pub async fn find_by_email<'e, E>(&self, executor: E, email: &str) -> Result<Option<Aluno>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let aluno = sqlx::query_as::<_, Aluno>(
            "SELECT id, nome, email, saldo_moedas FROM alunos WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;
        Ok(aluno)
    }

    pub async fn create<'e, E>(&self, executor: E, novo: &NovoAluno) -> Result<Aluno, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Aluno>(
            r#"
            INSERT INTO alunos (nome, email)
            VALUES ($1, $2)
            RETURNING id, nome, email, saldo_moedas
            "#,
        )
        .bind(&novo.nome)
        .bind(&novo.email)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, |_| format!("Email já cadastrado: {}", novo.email)))
    }

    pub async fn update_saldo<'e, E>(&self, executor: E, id: i64, saldo: Decimal) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE alunos SET saldo_moedas = $2 WHERE id = $1")
            .bind(id)
            .bind(saldo)
            .execute(executor)
            .await?;
        Ok(())
    }
}
