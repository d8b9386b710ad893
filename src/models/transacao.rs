// src/models/transacao.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_transacao", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TipoTransacao {
    Envio,
    Resgate,
    Credito,
    TransferenciaProfessorAluno,
}

impl TipoTransacao {
    pub const TODOS: [TipoTransacao; 4] = [
        TipoTransacao::Envio,
        TipoTransacao::Resgate,
        TipoTransacao::Credito,
        TipoTransacao::TransferenciaProfessorAluno,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoTransacao::Envio => "ENVIO",
            TipoTransacao::Resgate => "RESGATE",
            TipoTransacao::Credito => "CREDITO",
            TipoTransacao::TransferenciaProfessorAluno => "TRANSFERENCIA_PROFESSOR_ALUNO",
        }
    }

    /// Comparação exata, ignorando maiúsculas/minúsculas.
    pub fn parse_ignore_case(tipo: &str) -> Option<Self> {
        Self::TODOS
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tipo))
    }
}

// Linha do livro-razão. Só existe INSERT para esta tabela.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transacao {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_destino_id: Option<i64>,
    pub data: DateTime<Utc>,
    pub valor: Decimal,
    pub tipo: TipoTransacao,
    pub motivo: String,
}

#[derive(Debug, Clone)]
pub struct NovaTransacao {
    pub usuario_id: i64,
    pub usuario_destino_id: Option<i64>,
    pub data: DateTime<Utc>,
    pub valor: Decimal,
    pub tipo: TipoTransacao,
    pub motivo: String,
}

// Transação com o nome dos participantes resolvido (JOIN na view 'usuarios')
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransacaoResponse {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nome: Option<String>,
    pub usuario_destino_id: Option<i64>,
    pub usuario_destino_nome: Option<String>,
    pub data: DateTime<Utc>,
    pub valor: Decimal,
    pub tipo: TipoTransacao,
    pub motivo: String,
}

impl TransacaoResponse {
    pub fn envolve(&self, usuario_id: i64) -> bool {
        self.usuario_id == usuario_id || self.usuario_destino_id == Some(usuario_id)
    }
}
