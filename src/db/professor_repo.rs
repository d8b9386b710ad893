// src/db/professor_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::professor::{NovoProfessor, Professor},
};

const COLUNAS: &str =
    "id, nome, documento, email, login, senha_hash, departamento, saldo_moedas, instituicao_id";

// Responsável por todas as interações com a tabela 'professores'
#[derive(Clone, Default)]
pub struct ProfessorRepository;

impl ProfessorRepository {
    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professores = sqlx::query_as::<_, Professor>(&format!(
            "SELECT {COLUNAS} FROM professores ORDER BY id"
        ))
        .fetch_all(executor)
        .await?;
        Ok(professores)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professor = sqlx::query_as::<_, Professor>(&format!(
            "SELECT {COLUNAS} FROM professores WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(professor)
    }

    /// Mesma busca por ID, mas trava a linha até o fim da transação.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professor = sqlx::query_as::<_, Professor>(&format!(
            "SELECT {COLUNAS} FROM professores WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(professor)
    }

    // `campo` vem sempre de uma constante deste módulo
    async fn find_by_campo<'e, E>(
        &self,
        executor: E,
        campo: &'static str,
        valor: &str,
    ) -> Result<Option<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professor = sqlx::query_as::<_, Professor>(&format!(
            "SELECT {COLUNAS} FROM professores WHERE {campo} = $1"
        ))
        .bind(valor)
        .fetch_optional(executor)
        .await?;
        Ok(professor)
    }

    pub async fn find_by_email<'e, E>(&self, executor: E, email: &str) -> Result<Option<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find_by_campo(executor, "email", email).await
    }

    pub async fn find_by_login<'e, E>(&self, executor: E, login: &str) -> Result<Option<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find_by_campo(executor, "login", login).await
    }

    pub async fn find_by_documento<'e, E>(
        &self,
        executor: E,
        documento: &str,
    ) -> Result<Option<Professor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find_by_campo(executor, "documento", documento).await
    }

    pub async fn create<'e, E>(&self, executor: E, novo: &NovoProfessor) -> Result<Professor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Professor>(&format!(
            r#"
            INSERT INTO professores (nome, documento, email, login, senha_hash, departamento, instituicao_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(&novo.nome)
        .bind(&novo.documento)
        .bind(&novo.email)
        .bind(&novo.login)
        .bind(&novo.senha_hash)
        .bind(&novo.departamento)
        .bind(novo.instituicao_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, |c| mensagem_duplicado(c, &novo.email, &novo.login, &novo.documento)))
    }

    pub async fn update<'e, E>(&self, executor: E, professor: &Professor) -> Result<Professor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Professor>(&format!(
            r#"
            UPDATE professores
            SET nome = $2, documento = $3, email = $4, login = $5, senha_hash = $6,
                departamento = $7, saldo_moedas = $8, instituicao_id = $9
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        ))
        .bind(professor.id)
        .bind(&professor.nome)
        .bind(&professor.documento)
        .bind(&professor.email)
        .bind(&professor.login)
        .bind(&professor.senha_hash)
        .bind(&professor.departamento)
        .bind(professor.saldo_moedas)
        .bind(professor.instituicao_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(e, |c| {
                mensagem_duplicado(c, &professor.email, &professor.login, &professor.documento)
            })
        })
    }

    pub async fn update_saldo<'e, E>(&self, executor: E, id: i64, saldo: Decimal) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE professores SET saldo_moedas = $2 WHERE id = $1")
            .bind(id)
            .bind(saldo)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM professores WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn mensagem_duplicado(constraint: &str, email: &str, login: &str, documento: &str) -> String {
    match constraint {
        "professores_email_key" => format!("Email já cadastrado: {email}"),
        "professores_login_key" => format!("Login já cadastrado: {login}"),
        "professores_documento_key" => format!("Documento já cadastrado: {documento}"),
        _ => format!("Registro duplicado ({constraint})"),
    }
}
