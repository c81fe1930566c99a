//! Application error type and its HTTP rendering.
//!
//! Every fallible handler returns [`AppError`]. The constructors name the
//! error taxonomy of the auth layer:
//!
//! | Constructor | Status | Client message |
//! |---|---|---|
//! | [`AppError::invalid_credentials`] | 401 | `Credenciais inválidas` |
//! | [`AppError::unauthenticated`] | 401 | `Não autenticado` |
//! | [`AppError::forbidden`] | 403 | `Acesso negado` |
//! | [`AppError::validation`] | 400 | `Dados inválidos` + `fields` |
//! | [`AppError::audit_write_failure`] | 500 | generic |
//!
//! Server errors (5xx) are logged with their full error chain and rendered
//! with a generic body, so internal detail never reaches the client.

use std::collections::BTreeMap;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciais inválidas";
pub const UNAUTHENTICATED_MESSAGE: &str = "Não autenticado";
pub const FORBIDDEN_MESSAGE: &str = "Acesso negado";
pub const VALIDATION_MESSAGE: &str = "Dados inválidos";
pub const INTERNAL_MESSAGE: &str = "Erro interno do servidor";

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Field-level validation messages, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Wrong email or password. Never says which one.
    pub fn invalid_credentials() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(INVALID_CREDENTIALS_MESSAGE))
    }

    /// Missing, malformed, expired or forged token. All collapse to the same response.
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(UNAUTHENTICATED_MESSAGE))
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(FORBIDDEN_MESSAGE))
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| {
                        error
                            .message
                            .as_ref()
                            .map(|msg| msg.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(VALIDATION_MESSAGE),
            fields: Some(fields),
        }
    }

    /// Request body that could not be read as the expected shape.
    pub fn invalid_input(field: &str, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(VALIDATION_MESSAGE),
            fields: Some(BTreeMap::from([(
                field.to_string(),
                vec![message.to_string()],
            )])),
        }
    }

    pub fn audit_write_failure<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::internal(err.into().context("failed to record audit entry"))
    }

    /// Message safe to show to the client.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "request failed");
        }

        let mut body = json!({ "error": self.public_message() });
        if let Some(fields) = &self.fields {
            body["fields"] = json!(fields);
        }

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
