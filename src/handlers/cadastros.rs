// src/handlers/cadastros.rs
//
// Instituições, alunos e empresas parceiras.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_not_blank},
    config::AppState,
    models::{aluno::NovoAluno, empresa::NovaEmpresa},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InstituicaoPayload {
    #[validate(custom(function = "validate_not_blank", message = "Nome é obrigatório"))]
    pub nome: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlunoPayload {
    #[validate(custom(function = "validate_not_blank", message = "Nome é obrigatório"))]
    pub nome: String,

    #[validate(email(message = "Email deve ser válido"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaPayload {
    #[validate(custom(function = "validate_not_blank", message = "Nome é obrigatório"))]
    pub nome: String,

    pub nome_fantasia: Option<String>,

    #[validate(email(message = "Email deve ser válido"))]
    pub email: String,
}

pub async fn listar_instituicoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cadastro_service.listar_instituicoes().await?))
}

pub async fn criar_instituicao(
    State(app_state): State<AppState>,
    Json(payload): Json<InstituicaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let instituicao = app_state
        .cadastro_service
        .criar_instituicao(payload.nome.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(instituicao)))
}

pub async fn listar_alunos(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cadastro_service.listar_alunos().await?))
}

pub async fn buscar_aluno(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cadastro_service.buscar_aluno(id).await?))
}

pub async fn criar_aluno(
    State(app_state): State<AppState>,
    Json(payload): Json<AlunoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let aluno = app_state
        .cadastro_service
        .criar_aluno(NovoAluno {
            nome: payload.nome,
            email: payload.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(aluno)))
}

pub async fn listar_empresas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cadastro_service.listar_empresas().await?))
}

pub async fn buscar_empresa(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.cadastro_service.buscar_empresa(id).await?))
}

pub async fn criar_empresa(
    State(app_state): State<AppState>,
    Json(payload): Json<EmpresaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let empresa = app_state
        .cadastro_service
        .criar_empresa(NovaEmpresa {
            nome: payload.nome,
            nome_fantasia: payload.nome_fantasia,
            email: payload.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(empresa)))
}
