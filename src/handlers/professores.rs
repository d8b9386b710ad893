// src/handlers/professores.rs

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
        validation::{checar_quantidade, validate_not_blank, validate_positive},
    },
    config::AppState,
    models::professor::DadosProfessor,
};

// ---
// Payload: ProfessorPayload (cadastro e atualização)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorPayload {
    #[validate(custom(function = "validate_not_blank", message = "Nome é obrigatório"))]
    pub nome: String,

    #[validate(custom(function = "validate_not_blank", message = "Documento é obrigatório"))]
    pub documento: String,

    #[validate(email(message = "Email deve ser válido"))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank", message = "Login é obrigatório"))]
    pub login: String,

    #[validate(custom(function = "validate_not_blank", message = "Senha é obrigatória"))]
    pub senha: String,

    #[validate(custom(function = "validate_not_blank", message = "Departamento é obrigatório"))]
    pub departamento: String,

    #[validate(required(message = "Instituição é obrigatória"))]
    pub instituicao_id: Option<i64>,
}

impl ProfessorPayload {
    fn into_dados(self) -> Result<DadosProfessor, AppError> {
        let instituicao_id = self
            .instituicao_id
            .ok_or_else(|| AppError::Validacao("Instituição é obrigatória".into()))?;
        Ok(DadosProfessor {
            nome: self.nome,
            documento: self.documento,
            email: self.email,
            login: self.login,
            senha: self.senha,
            departamento: self.departamento,
            instituicao_id,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnviarMoedasPayload {
    #[validate(required(message = "ID do aluno é obrigatório"))]
    pub aluno_id: Option<i64>,

    #[validate(required(message = "Quantidade de moedas é obrigatória"))]
    #[validate(custom(function = "validate_positive", message = "Quantidade deve ser maior que zero"))]
    pub quantidade: Option<Decimal>,

    #[validate(custom(function = "validate_not_blank", message = "Motivo é obrigatório"))]
    #[serde(default)]
    pub motivo: String,
}

#[derive(Debug, Deserialize)]
pub struct AdicionarMoedasQuery {
    pub quantidade: Option<Decimal>,
}

pub async fn listar_professores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let professores = app_state.professor_service.listar_todos().await?;
    Ok(Json(professores))
}

pub async fn buscar_professor(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let professor = app_state.professor_service.buscar_por_id(id).await?;
    Ok(Json(professor))
}

pub async fn criar_professor(
    State(app_state): State<AppState>,
    Json(payload): Json<ProfessorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let professor = app_state
        .professor_service
        .criar(payload.into_dados()?)
        .await?;

    Ok((StatusCode::CREATED, Json(professor)))
}

pub async fn atualizar_professor(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProfessorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let professor = app_state
        .professor_service
        .atualizar(id, payload.into_dados()?)
        .await?;

    Ok(Json(professor))
}

pub async fn deletar_professor(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.professor_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn enviar_moedas(
    State(app_state): State<AppState>,
    Path(professor_id): Path<i64>,
    Json(payload): Json<EnviarMoedasPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Garantidos pelo `required` acima
    let (Some(aluno_id), Some(quantidade)) = (payload.aluno_id, payload.quantidade) else {
        return Err(AppError::Validacao("ID do aluno e quantidade são obrigatórios".into()));
    };

    let resposta = app_state
        .professor_service
        .enviar_moedas(professor_id, aluno_id, quantidade, &payload.motivo)
        .await?;

    Ok(Json(resposta))
}

pub async fn adicionar_moedas(
    State(app_state): State<AppState>,
    Path(professor_id): Path<i64>,
    Query(query): Query<AdicionarMoedasQuery>,
) -> Result<impl IntoResponse, AppError> {
    let quantidade = query
        .quantidade
        .ok_or_else(|| AppError::Validacao("Quantidade deve ser maior que zero".into()))?;
    checar_quantidade(&quantidade)?;

    let resposta = app_state
        .professor_service
        .adicionar_moedas(professor_id, quantidade)
        .await?;

    Ok(Json(resposta))
}
