// src/db/cupom_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::cupom::{Cupom, NovoCupom},
};

const COLUNAS: &str = "id, codigo, data_geracao, data_vencimento, valido, utilizado, \
                       data_utilizacao, aluno_id, vantagem_id, empresa_id";

#[derive(Clone, Default)]
pub struct CupomRepository;

impl CupomRepository {
    pub async fn create<'e, E>(&self, executor: E, novo: &NovoCupom) -> Result<Cupom, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Cupom>(&format!(
            r#"
            INSERT INTO cupons (codigo, data_geracao, data_vencimento, valido, utilizado,
                                aluno_id, vantagem_id, empresa_id)
            VALUES ($1, $2, $3, TRUE, FALSE, $4, $5, $6)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(&novo.codigo)
        .bind(novo.data_geracao)
        .bind(novo.data_vencimento)
        .bind(novo.aluno_id)
        .bind(novo.vantagem_id)
        .bind(novo.empresa_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, |_| format!("Código de cupom já emitido: {}", novo.codigo)))
    }

    pub async fn find_by_codigo<'e, E>(&self, executor: E, codigo: &str) -> Result<Option<Cupom>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cupom = sqlx::query_as::<_, Cupom>(&format!(
            "SELECT {COLUNAS} FROM cupons WHERE codigo = $1"
        ))
        .bind(codigo)
        .fetch_optional(executor)
        .await?;
        Ok(cupom)
    }

    pub async fn list_by_aluno<'e, E>(&self, executor: E, aluno_id: i64) -> Result<Vec<Cupom>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cupons = sqlx::query_as::<_, Cupom>(&format!(
            "SELECT {COLUNAS} FROM cupons WHERE aluno_id = $1 ORDER BY data_geracao DESC, id DESC"
        ))
        .bind(aluno_id)
        .fetch_all(executor)
        .await?;
        Ok(cupons)
    }

    // Só as flags de uso mudam depois da emissão
    pub async fn marcar_utilizado<'e, E>(&self, executor: E, cupom: &Cupom) -> Result<Cupom, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let atualizado = sqlx::query_as::<_, Cupom>(&format!(
            r#"
            UPDATE cupons
            SET utilizado = $2, valido = $3, data_utilizacao = $4
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        ))
        .bind(cupom.id)
        .bind(cupom.utilizado)
        .bind(cupom.valido)
        .bind(cupom.data_utilizacao)
        .fetch_one(executor)
        .await?;
        Ok(atualizado)
    }
}
