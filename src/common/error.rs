use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::delivery_service::DeliveryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Período inválido: {0}")]
    InvalidPeriod(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Falha na plataforma de delivery: {0}")]
    Delivery(#[from] DeliveryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolve todos os detalhes da validação, campo a campo.
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
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string()),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            // Token válido de um cliente que não existe mais
            AppError::ClientNotFound => (StatusCode::UNAUTHORIZED, "Cliente não encontrado.".to_string()),
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", entity)),
            AppError::InvalidPeriod(ref reason) => (StatusCode::BAD_REQUEST, format!("Período inválido: {}", reason)),
            AppError::Delivery(DeliveryError::NotConfigured) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Integração com a plataforma de delivery não configurada.".to_string(),
            ),
            AppError::Delivery(ref e) => {
                tracing::warn!("Falha na plataforma de delivery: {}", e);
                (StatusCode::BAD_GATEWAY, "A plataforma de delivery não respondeu como esperado.".to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(AppError::InvalidToken.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::EmailAlreadyExists.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("Produto").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Delivery(DeliveryError::NotConfigured).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Delivery(DeliveryError::Rejected { status: 401, body: "nope".into() })
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_are_bad_request() {
        let errors = validator::ValidationErrors::new();
        assert_eq!(AppError::ValidationError(errors).into_response().status(), StatusCode::BAD_REQUEST);
    }
}
