// src/models/vantagem.rs

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::empresa::EmpresaParceira;

#[derive(Debug, Clone, FromRow)]
pub struct Vantagem {
    pub id: i64,
    pub descricao: String,
    pub foto: Option<Vec<u8>>,
    pub custo_moedas: Decimal,
    pub empresa_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NovaVantagem {
    pub descricao: String,
    pub foto: Option<Vec<u8>>,
    pub custo_moedas: Decimal,
    pub empresa_id: Option<i64>,
}

/// Decodifica a foto recebida em base64. Conteúdo inválido é ignorado.
pub fn decodificar_foto(foto: Option<&str>) -> Option<Vec<u8>> {
    foto.filter(|f| !f.is_empty())
        .and_then(|f| STANDARD.decode(f).ok())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VantagemResponse {
    pub id: i64,
    pub descricao: String,
    pub foto: Option<String>,
    pub custo_moedas: Decimal,
    pub empresa_id: Option<i64>,
    pub empresa_nome: Option<String>,
}

impl VantagemResponse {
    pub fn from_vantagem(vantagem: Vantagem, empresa: Option<&EmpresaParceira>) -> Self {
        Self {
            id: vantagem.id,
            descricao: vantagem.descricao,
            foto: vantagem
                .foto
                .filter(|bytes| !bytes.is_empty())
                .map(|bytes| STANDARD.encode(bytes)),
            custo_moedas: vantagem.custo_moedas,
            empresa_id: empresa.map(|e| e.id),
            empresa_nome: empresa.map(|e| e.nome_exibicao().to_string()),
        }
    }
}

// Resposta de POST /api/vantagens/{id}/resgatar
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResgateVantagemResponse {
    pub vantagem_id: i64,
    pub vantagem_descricao: String,
    pub custo_moedas: Decimal,
    pub codigo_cupom: String,
    pub data_resgate: DateTime<Utc>,
    pub novo_saldo: Decimal,
    pub email_aluno: String,
    pub nome_aluno: String,
    pub empresa_nome: Option<String>,
    pub email_empresa: Option<String>,
    pub email_enviado: bool,
}
