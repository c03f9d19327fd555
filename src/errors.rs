use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use validator::ValidationErrors;

use crate::constants::messages;

/// Every way a contact submission can fail before a success response.
///
/// The `Display` text is what gets logged. Callers only ever see the
/// localized message from [`AppError::public_message`].
#[derive(Debug, Display)]
pub enum AppError {
    #[display("Rate limit exceeded for {_0}")]
    TooManyRequests(String),

    #[display("Malformed request body: {_0}")]
    MalformedBody(String),

    #[display("Missing required fields: {}", _0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[display("Invalid message: {_0}")]
    InvalidMessage(String),

    #[display("Request body too large: {_0} bytes read")]
    PayloadTooLarge(usize),

    #[display("Database error: {_0}")]
    Database(String),
}

impl AppError {
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::TooManyRequests(_) => messages::TOO_MANY_REQUESTS,
            AppError::MalformedBody(_) => messages::MALFORMED_BODY,
            AppError::PayloadTooLarge(_) => messages::PAYLOAD_TOO_LARGE,
            AppError::MissingFields(_) => messages::MISSING_FIELDS,
            AppError::InvalidMessage(_) => messages::INVALID_MESSAGE,
            AppError::Database(_) => messages::SERVER_ERROR,
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Contact API error");
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({ "error": self.public_message() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::MalformedBody(_)
            | AppError::MissingFields(_)
            | AppError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| format!("{}:{}", field, e.code))
            })
            .collect::<Vec<_>>()
            .join(", ");

        AppError::InvalidMessage(details)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedBody(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Failures of the best-effort notification step. Never reach the caller.
#[derive(Debug, Display)]
pub enum NotifyError {
    #[display("Invalid mail address: {_0}")]
    Address(lettre::address::AddressError),

    #[display("Failed to build mail: {_0}")]
    Build(lettre::error::Error),

    #[display("SMTP transport error: {_0}")]
    Transport(lettre::transport::smtp::Error),

    #[display("Notification rejected: {_0}")]
    Rejected(String),
}

impl std::error::Error for NotifyError {}

impl From<lettre::address::AddressError> for NotifyError {
    fn from(err: lettre::address::AddressError) -> Self {
        NotifyError::Address(err)
    }
}

impl From<lettre::error::Error> for NotifyError {
    fn from(err: lettre::error::Error) -> Self {
        NotifyError::Build(err)
    }
}

impl From<lettre::transport::smtp::Error> for NotifyError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        NotifyError::Transport(err)
    }
}
