// src/models/instituicao.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InstituicaoEnsino {
    pub id: i64,
    pub nome: String,
}
