use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validações que não vêm do derive (ex.: quantidade na query string)
    #[error("{0}")]
    Validacao(String),

    #[error("{0}")]
    NaoEncontrado(String),

    // E-mail, login ou documento duplicado
    #[error("{0}")]
    Conflito(String),

    #[error("Saldo insuficiente. Saldo atual: {disponivel:.2}, Quantidade solicitada: {necessario:.2}")]
    SaldoInsuficiente {
        disponivel: Decimal,
        necessario: Decimal,
    },

    // Nunca chega ao cliente: o serviço só registra em log.
    #[error("Falha ao notificar: {0}")]
    Notificacao(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn nao_encontrado(entidade: &str, id: impl std::fmt::Display) -> Self {
        AppError::NaoEncontrado(format!("{entidade} não encontrado(a) com ID: {id}"))
    }

    /// Converte violações de UNIQUE do Postgres em `Conflito`; o resto segue como erro de banco.
    pub fn from_unique_violation(e: sqlx::Error, mensagem: impl FnOnce(&str) -> String) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                return AppError::Conflito(mensagem(constraint));
            }
        }
        e.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NaoEncontrado(message) => {
                // 404 sem corpo, como os controllers originais
                tracing::debug!("{}", message);
                return StatusCode::NOT_FOUND.into_response();
            }
            e @ (AppError::Validacao(_) | AppError::SaldoInsuficiente { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Conflito(message) => (StatusCode::CONFLICT, message),

            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
