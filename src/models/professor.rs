// src/models/professor.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Linha da tabela 'professores'. Não é serializada: a senha fica de fora via ProfessorResponse.
#[derive(Debug, Clone, FromRow)]
pub struct Professor {
    pub id: i64,
    pub nome: String,
    pub documento: String,
    pub email: String,
    pub login: String,
    pub senha_hash: String,
    pub departamento: String,
    pub saldo_moedas: Decimal,
    pub instituicao_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NovoProfessor {
    pub nome: String,
    pub documento: String,
    pub email: String,
    pub login: String,
    pub senha_hash: String,
    pub departamento: String,
    pub instituicao_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorResponse {
    pub id: i64,
    pub nome: String,
    pub documento: String,
    pub email: String,
    pub login: String,
    pub departamento: String,
    pub saldo_moedas: Decimal,
    pub instituicao_id: Option<i64>,
    pub instituicao_nome: Option<String>,
}

impl ProfessorResponse {
    pub fn from_professor(professor: Professor, instituicao_nome: Option<String>) -> Self {
        Self {
            id: professor.id,
            nome: professor.nome,
            documento: professor.documento,
            email: professor.email,
            login: professor.login,
            departamento: professor.departamento,
            saldo_moedas: professor.saldo_moedas,
            instituicao_id: professor.instituicao_id,
            instituicao_nome,
        }
    }
}

// Resposta de POST /api/professores/{id}/enviar-moedas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnviarMoedasResponse {
    pub transacao_id: i64,
    pub professor_nome: String,
    pub aluno_nome: String,
    pub quantidade: Decimal,
    pub motivo: String,
    pub data_transacao: DateTime<Utc>,
    pub saldo_restante_professor: Decimal,
    pub novo_saldo_aluno: Decimal,
    pub mensagem: String,
}

// Resposta de PATCH /api/professores/{id}/adicionar-moedas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdicionarMoedasResponse {
    pub professor_id: i64,
    pub quantidade: Decimal,
    pub saldo_moedas: Decimal,
    pub mensagem: String,
}

// Dados de cadastro/atualização já validados pelo handler. A senha chega em texto puro.
#[derive(Debug, Clone)]
pub struct DadosProfessor {
    pub nome: String,
    pub documento: String,
    pub email: String,
    pub login: String,
    pub senha: String,
    pub departamento: String,
    pub instituicao_id: i64,
}
