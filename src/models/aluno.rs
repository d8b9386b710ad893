// src/models/aluno.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub saldo_moedas: Decimal,
}

#[derive(Debug, Clone)]
pub struct NovoAluno {
    pub nome: String,
    pub email: String,
}
