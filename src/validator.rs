use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use autoescola_core::AppError;

/// JSON body extractor that also runs `validator` rules.
///
/// Both unreadable bodies and rule violations are answered with
/// `400 {"error":"Dados inválidos","fields":{...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::invalid_input(
            "body",
            "Cabeçalho 'Content-Type: application/json' ausente",
        );
    }

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("body");
        return AppError::invalid_input(field, "Campo obrigatório");
    }

    if error_msg.contains("invalid type") {
        return AppError::invalid_input("body", "Tipo de campo inválido");
    }

    AppError::invalid_input("body", "Corpo da requisição inválido")
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(&errors))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoescola_models::AdminLoginRequest;
    use axum::{body::Body, http::StatusCode};

    async fn extract(body: &str, content_type: Option<&str>) -> Result<AdminLoginRequest, AppError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        ValidatedJson::<AdminLoginRequest>::from_request(req, &())
            .await
            .map(|ValidatedJson(value)| value)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let dto = extract(
            r#"{"email":"admin@local.dev","password":"admin123"}"#,
            Some("application/json"),
        )
        .await
        .unwrap();
        assert_eq!(dto.email, "admin@local.dev");
    }

    #[tokio::test]
    async fn test_missing_field_is_reported() {
        let err = extract(r#"{"email":"admin@local.dev"}"#, Some("application/json"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.fields.unwrap().contains_key("password"));
    }

    #[tokio::test]
    async fn test_rule_violation_is_reported() {
        let err = extract(
            r#"{"email":"nope","password":"x"}"#,
            Some("application/json"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.fields.unwrap()["email"], vec!["E-mail inválido".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(r#"{}"#, None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.fields.unwrap().contains_key("body"));
    }
}
