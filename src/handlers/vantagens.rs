// src/handlers/vantagens.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validation::{validate_not_blank, validate_positive},
    },
    config::AppState,
    models::paginacao::{Direcao, OrdemVantagem, Paginacao},
    services::vantagem_service::DadosVantagem,
};

const TAMANHO_MAXIMO_PAGINA: u32 = 100;

// ---
// Query: paginação (?page=0&size=10&sortBy=id&direction=asc)
// ---
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginacaoQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<OrdemVantagem>,
    pub direction: Option<String>,
}

impl PaginacaoQuery {
    fn paginacao(&self) -> Result<Paginacao, AppError> {
        let size = self.size.unwrap_or(10);
        if !(1..=TAMANHO_MAXIMO_PAGINA).contains(&size) {
            return Err(AppError::Validacao(format!(
                "O tamanho da página deve estar entre 1 e {TAMANHO_MAXIMO_PAGINA}"
            )));
        }
        Ok(Paginacao {
            page: self.page.unwrap_or(0),
            size,
            ordem: self.sort_by.unwrap_or_default(),
            direcao: Direcao::parse(self.direction.as_deref().unwrap_or("asc")),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VantagemPayload {
    #[validate(custom(function = "validate_not_blank", message = "Descrição é obrigatória"))]
    pub descricao: String,

    // base64
    pub foto: Option<String>,

    #[validate(required(message = "Custo em moedas é obrigatório"))]
    #[validate(custom(function = "validate_positive", message = "Custo deve ser maior que zero"))]
    pub custo_moedas: Option<Decimal>,

    pub empresa_id: Option<i64>,
}

impl VantagemPayload {
    fn into_dados(self) -> Result<DadosVantagem, AppError> {
        let custo_moedas = self
            .custo_moedas
            .ok_or_else(|| AppError::Validacao("Custo em moedas é obrigatório".into()))?;
        Ok(DadosVantagem {
            descricao: self.descricao,
            foto: self.foto,
            custo_moedas,
            empresa_id: self.empresa_id,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResgateQuery {
    // Lido como texto; o parse fica em `aluno_id()`
    pub aluno_id: Option<String>,
}

impl ResgateQuery {
    fn aluno_id(&self) -> Result<i64, AppError> {
        let aluno_id = self
            .aluno_id
            .as_deref()
            .ok_or_else(|| AppError::Validacao("ID do aluno é obrigatório".into()))?;
        aluno_id
            .trim()
            .parse()
            .map_err(|_| AppError::Validacao(format!("ID do aluno inválido: {aluno_id}")))
    }
}

pub async fn listar_vantagens(
    State(app_state): State<AppState>,
    Query(query): Query<PaginacaoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state
        .vantagem_service
        .listar_todas(&query.paginacao()?)
        .await?;
    Ok(Json(pagina))
}

pub async fn listar_vantagens_por_empresa(
    State(app_state): State<AppState>,
    Path(empresa_id): Path<i64>,
    Query(query): Query<PaginacaoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state
        .vantagem_service
        .listar_por_empresa(empresa_id, &query.paginacao()?)
        .await?;
    Ok(Json(pagina))
}

pub async fn buscar_vantagem(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let vantagem = app_state.vantagem_service.buscar_por_id(id).await?;
    Ok(Json(vantagem))
}

pub async fn criar_vantagem(
    State(app_state): State<AppState>,
    Json(payload): Json<VantagemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vantagem = app_state
        .vantagem_service
        .criar(payload.into_dados()?)
        .await?;

    Ok((StatusCode::CREATED, Json(vantagem)))
}

pub async fn atualizar_vantagem(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<VantagemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vantagem = app_state
        .vantagem_service
        .atualizar(id, payload.into_dados()?)
        .await?;

    Ok(Json(vantagem))
}

pub async fn deletar_vantagem(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.vantagem_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn resgatar_vantagem(
    State(app_state): State<AppState>,
    Path(vantagem_id): Path<i64>,
    Query(query): Query<ResgateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resgate = app_state
        .vantagem_service
        .resgatar(vantagem_id, query.aluno_id()?)
        .await?;
    Ok(Json(resgate))
}
