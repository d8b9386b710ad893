// src/handlers/locadora.rs
//
// Rotas do cliente (/api/client) e do agente (/api/agent) da locadora.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    services::locadora_service::{Acao, DadosPedido, DadosVeiculo},
};

// Todos os campos são opcionais; o serviço aplica os padrões
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoPayload {
    pub car: Option<String>,
    pub client_name: Option<String>,
    pub date: Option<String>,
    pub value: Option<String>,
}

impl From<PedidoPayload> for DadosPedido {
    fn from(p: PedidoPayload) -> Self {
        DadosPedido {
            car: p.car,
            client_name: p.client_name,
            date: p.date,
            value: p.value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeiculoPayload {
    pub modelo: Option<String>,
    pub placa: Option<String>,
    pub ano: Option<i32>,
    pub cor: Option<String>,
    pub diaria: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct AvaliarQuery {
    pub acao: String,
}

// --- Cliente ---

pub async fn listar_pedidos(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.locadora_service.listar_pedidos())
}

pub async fn buscar_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.locadora_service.buscar_pedido(&id)?))
}

pub async fn criar_pedido(
    State(app_state): State<AppState>,
    Json(payload): Json<PedidoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let pedido = app_state.locadora_service.criar_pedido(payload.into())?;
    Ok(Json(pedido))
}

pub async fn atualizar_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PedidoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let pedido = app_state
        .locadora_service
        .atualizar_pedido(&id, payload.into())?;
    Ok(Json(pedido))
}

pub async fn excluir_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    app_state.locadora_service.excluir_pedido(&id);
    StatusCode::NO_CONTENT
}

// --- Agente ---

pub async fn listar_pendentes(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.locadora_service.listar_pendentes())
}

pub async fn avaliar_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AvaliarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let acao = Acao::parse(&query.acao)
        .ok_or_else(|| AppError::Validacao(format!("Ação inválida: {}", query.acao)))?;
    Ok(Json(app_state.locadora_service.avaliar(&id, acao)?))
}

pub async fn listar_veiculos(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.locadora_service.listar_veiculos())
}

pub async fn criar_veiculo(
    State(app_state): State<AppState>,
    Json(payload): Json<VeiculoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let veiculo = app_state.locadora_service.criar_veiculo(DadosVeiculo {
        modelo: payload.modelo,
        placa: payload.placa,
        ano: payload.ano,
        cor: payload.cor,
        diaria: payload.diaria,
    })?;
    Ok(Json(veiculo))
}
