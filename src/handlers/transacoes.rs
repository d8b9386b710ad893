// src/handlers/transacoes.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{common::error::AppError, config::AppState};

pub async fn listar_transacoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.transacao_service.listar_todas().await?))
}

pub async fn buscar_transacao(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.transacao_service.buscar_por_id(id).await?))
}

// Também atende /aluno/{id} e /professor/{id}
pub async fn listar_por_usuario(
    State(app_state): State<AppState>,
    Path(usuario_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        app_state
            .transacao_service
            .listar_por_usuario(usuario_id)
            .await?,
    ))
}

pub async fn listar_por_tipo(
    State(app_state): State<AppState>,
    Path(tipo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.transacao_service.listar_por_tipo(&tipo).await?))
}
