// src/models/pedido.rs
//
// Locadora: pedidos de aluguel avaliados por um agente. Só existe em memória.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusPedido {
    Pendente,
    Aprovado,
    Reprovado,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: String,
    pub car: String,
    pub client_name: String,
    pub status: StatusPedido,
    pub date: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Veiculo {
    pub id: String,
    pub modelo: String,
    pub placa: String,
    pub ano: i32,
    pub cor: String,
    pub diaria: Decimal,
}
