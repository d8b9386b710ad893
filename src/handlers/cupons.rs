// src/handlers/cupons.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{common::error::AppError, config::AppState};

pub async fn listar_cupons_do_aluno(
    State(app_state): State<AppState>,
    Path(aluno_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let cupons = app_state
        .vantagem_service
        .listar_cupons_aluno(aluno_id)
        .await?;
    Ok(Json(cupons))
}

pub async fn buscar_cupom(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.vantagem_service.buscar_cupom(&codigo).await?))
}

pub async fn utilizar_cupom(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.vantagem_service.utilizar_cupom(&codigo).await?))
}
