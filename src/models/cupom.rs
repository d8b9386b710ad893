// src/models/cupom.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Validade de um cupom a partir da geração.
pub const VALIDADE_CUPOM_DIAS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cupom {
    pub id: i64,
    pub codigo: String,
    pub data_geracao: DateTime<Utc>,
    pub data_vencimento: DateTime<Utc>,
    pub valido: bool,
    pub utilizado: bool,
    pub data_utilizacao: Option<DateTime<Utc>>,
    pub aluno_id: i64,
    pub vantagem_id: i64,
    pub empresa_id: Option<i64>,
}

impl Cupom {
    pub fn expirado(&self, agora: DateTime<Utc>) -> bool {
        agora > self.data_vencimento
    }
}

#[derive(Debug, Clone)]
pub struct NovoCupom {
    pub codigo: String,
    pub data_geracao: DateTime<Utc>,
    pub data_vencimento: DateTime<Utc>,
    pub aluno_id: i64,
    pub vantagem_id: i64,
    pub empresa_id: Option<i64>,
}

impl NovoCupom {
    pub fn emitir(
        codigo: String,
        agora: DateTime<Utc>,
        aluno_id: i64,
        vantagem_id: i64,
        empresa_id: Option<i64>,
    ) -> Self {
        Self {
            codigo,
            data_geracao: agora,
            data_vencimento: agora + Duration::days(VALIDADE_CUPOM_DIAS),
            aluno_id,
            vantagem_id,
            empresa_id,
        }
    }
}
